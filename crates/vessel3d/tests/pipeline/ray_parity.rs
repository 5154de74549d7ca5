use super::{cube, octahedron, unit_bounds};
use na::{Point3, Vector3};
use vessel3d::query::{Ray, RayCast};
use vessel3d::shape::TriMesh;
use vessel3d::transformation::voxelization::{GridDescriptor, RayParityVoxelizer, Voxelizer};

#[test]
fn cube_occupancy_is_the_set_of_inner_cell_centers() {
    let desc = GridDescriptor::with_resolution(unit_bounds(), [8, 8, 8]);
    let grid = RayParityVoxelizer::new()
        .voxelize(&cube(0.5), &desc)
        .unwrap();

    for id in 0..grid.len() {
        let ijk = grid.cell_coords(id);
        let center = grid.cell_center(ijk);
        let inside = center.coords.iter().all(|c| c.abs() < 0.5);
        assert_eq!(grid.is_solid(ijk), inside, "cell {:?}", ijk);
    }

    assert_eq!(grid.num_solid(), 64);
}

#[test]
fn octahedron_occupancy_is_the_set_of_inner_cell_centers() {
    let desc = GridDescriptor::with_resolution(unit_bounds(), [8, 8, 8]);
    let grid = RayParityVoxelizer::new()
        .voxelize(&octahedron(0.9), &desc)
        .unwrap();

    for id in 0..grid.len() {
        let ijk = grid.cell_coords(id);
        let center = grid.cell_center(ijk);
        let inside = center.coords.lp_norm(1) < 0.9;
        assert_eq!(grid.is_solid(ijk), inside, "cell {:?}", ijk);
    }
}

#[test]
fn half_cell_size_rounds_the_resolution_up() {
    let mesh = cube(1.0);
    let desc = GridDescriptor::from_mesh(&mesh, &Vector3::repeat(1.0), 0.3).unwrap();

    assert_eq!(desc.resolution, [4, 4, 4]);
    assert!(relative_eq!(desc.bounds.extents(), Vector3::repeat(2.4), epsilon = 1.0e-5));
    assert!(relative_eq!(desc.bounds.center(), Point3::origin()));

    // Every cell center of the grown grid lies inside the cube.
    let grid = RayParityVoxelizer::new().voxelize(&mesh, &desc).unwrap();
    assert_eq!(grid.num_solid(), 64);
}

#[test]
fn mesh_ray_cast_matches_brute_force() {
    let mut rng = oorandom::Rand32::new(42);
    let mut rand_point = || {
        Point3::new(rng.rand_float(), rng.rand_float(), rng.rand_float()) * 4.0
            - Vector3::repeat(2.0)
    };

    let vertices: Vec<_> = (0..150).map(|_| rand_point()).collect();
    let indices: Vec<_> = (0..50u32).map(|i| [3 * i, 3 * i + 1, 3 * i + 2]).collect();
    let mesh = TriMesh::new(vertices, indices).unwrap();

    for _ in 0..200 {
        let origin = rand_point() * 2.0;
        let ray = Ray::new(origin, rand_point() - origin);
        let expected = mesh
            .triangles()
            .filter_map(|tri| tri.cast_local_ray(&ray, f32::MAX))
            .min_by(|a, b| a.total_cmp(b));

        match (mesh.cast_local_ray(&ray, f32::MAX), expected) {
            (Some(toi), Some(expected)) => assert!(relative_eq!(toi, expected)),
            (found, expected) => assert_eq!(found, expected),
        }
    }
}
