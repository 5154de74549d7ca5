use super::{cube, hollow_cube, octahedron, unit_bounds};
use na::{Point3, Vector3};
use vessel3d::bounding_volume::Aabb;
use vessel3d::container::{ContainerizerParameters, FluidContainerizer};
use vessel3d::shape::TriMesh;
use vessel3d::transformation::aabb_to_trimesh;
use vessel3d::transformation::voxelization::{
    GridDescriptor, VoxelGrid, VoxelValue, VoxelizationBackend, Voxelizer,
};

fn stacked_boxes() -> TriMesh {
    let bottom = Aabb::new(Point3::new(-0.75, -0.75, -1.0), Point3::new(0.75, 0.75, -0.25));
    let top = Aabb::new(Point3::new(-0.5, -0.5, 0.25), Point3::new(0.5, 0.5, 0.75));
    let mut mesh = aabb_to_trimesh(&bottom, false);
    mesh.append(&aabb_to_trimesh(&top, false));
    mesh
}

fn fixtures() -> Vec<(&'static str, TriMesh)> {
    vec![
        ("cube", cube(0.5)),
        ("full cube", cube(1.0)),
        ("hollow cube", hollow_cube()),
        ("octahedron", octahedron(0.9)),
        ("stacked boxes", stacked_boxes()),
    ]
}

/// Both backends agree on every cell the surface does not cross. Cells crossed by the
/// surface are solid for the cell-overlap backend.
#[test]
fn backends_agree_on_occupancy() {
    for resolution in [[8, 8, 8], [16, 16, 16], [4, 8, 16]] {
        let desc = GridDescriptor::with_resolution(unit_bounds(), resolution);

        for (name, mesh) in fixtures() {
            let ray_parity = VoxelizationBackend::RayParity
                .into_voxelizer()
                .voxelize(&mesh, &desc)
                .unwrap();
            let cell_overlap = VoxelizationBackend::CellOverlap
                .into_voxelizer()
                .voxelize(&mesh, &desc)
                .unwrap();

            assert_eq!(ray_parity.dimensions(), cell_overlap.dimensions());
            assert_eq!(ray_parity.origin(), cell_overlap.origin());
            assert!(ray_parity.num_solid() <= cell_overlap.num_solid(), "{}", name);

            for (id, (rp, co)) in ray_parity
                .values()
                .iter()
                .zip(cell_overlap.values())
                .enumerate()
            {
                let ijk = ray_parity.cell_coords(id);
                assert_ne!(*rp, VoxelValue::Surface);

                if *co == VoxelValue::Surface {
                    continue;
                }

                assert_eq!(
                    rp.is_solid(),
                    co.is_solid(),
                    "{} at {:?}: cell {:?}",
                    name,
                    resolution,
                    ijk
                );
            }
        }
    }
}

fn voxelize_with_both(mesh: &TriMesh, desc: &GridDescriptor) -> (VoxelGrid, VoxelGrid) {
    let ray_parity = VoxelizationBackend::RayParity
        .into_voxelizer()
        .voxelize(mesh, desc)
        .unwrap();
    let cell_overlap = VoxelizationBackend::CellOverlap
        .into_voxelizer()
        .voxelize(mesh, desc)
        .unwrap();
    (ray_parity, cell_overlap)
}

#[test]
fn grid_aligned_walls_voxelize_identically() {
    let desc = GridDescriptor::with_resolution(unit_bounds(), [8, 8, 8]);

    for (name, mesh) in [("cube", cube(0.5)), ("hollow cube", hollow_cube())] {
        let (ray_parity, cell_overlap) = voxelize_with_both(&mesh, &desc);

        // The faces only touch cell boundaries: no cell is crossed by the surface.
        assert!(
            cell_overlap.values().iter().all(|v| *v != VoxelValue::Surface),
            "{}",
            name
        );
        assert_eq!(ray_parity.values(), cell_overlap.values(), "{}", name);
    }

    let (ray_parity, _) = voxelize_with_both(&cube(0.5), &desc);
    assert_eq!(ray_parity.num_solid(), 4 * 4 * 4);
}

#[test]
fn cube_far_from_the_origin() {
    let center = Point3::new(0.0, 0.0, 2000.0);
    let far_cube = Aabb::from_half_extents(center, Vector3::repeat(0.5));
    let mesh = aabb_to_trimesh(&far_cube, false);
    let desc = GridDescriptor::with_resolution(far_cube.loosened(0.5), [4, 4, 4]);
    let (ray_parity, cell_overlap) = voxelize_with_both(&mesh, &desc);

    // The 2x2x2 cells with a center inside the cube.
    assert_eq!(ray_parity.num_solid(), 8);
    assert_eq!(cell_overlap.num_solid(), 8);
    for k in 1..=2 {
        assert!(ray_parity.is_solid([1, 2, k]));
        assert!(cell_overlap.is_solid([2, 1, k]));
    }
}

#[test]
fn both_backends_accept_the_hollow_cube_container() {
    for backend in [VoxelizationBackend::RayParity, VoxelizationBackend::CellOverlap] {
        let params = ContainerizerParameters {
            cell_half_size: 0.125,
            backend,
            ..Default::default()
        };
        let mut container = FluidContainerizer::new(hollow_cube(), params);
        container.build().unwrap();
        assert_eq!(container.interior_voxels().unwrap().len(), 8, "{:?}", backend);
    }
}

#[cfg(feature = "gpu")]
#[test]
fn gpu_backend_matches_the_cpu_kernels() {
    use vessel3d::transformation::voxelization::{
        CellOverlapVoxelizer, GpuDevice, GpuVoxelizer,
    };

    let gpu = match GpuDevice::request(wgpu::PowerPreference::LowPower) {
        Ok(gpu) => gpu,
        // No adapter on this machine.
        Err(_) => return,
    };
    let mut gpu = GpuVoxelizer::with_device(gpu);

    // Axis-aligned fixtures only: their contacts with the cell boundaries are exact in both
    // coordinate frames.
    let fixtures = [
        ("cube", cube(0.5)),
        ("full cube", cube(1.0)),
        ("hollow cube", hollow_cube()),
        ("stacked boxes", stacked_boxes()),
    ];
    for resolution in [[8, 8, 8], [16, 16, 16], [4, 8, 16]] {
        let desc = GridDescriptor::with_resolution(unit_bounds(), resolution);

        for (name, mesh) in &fixtures {
            let expected = CellOverlapVoxelizer::new().voxelize(mesh, &desc).unwrap();
            let grid = gpu.voxelize(mesh, &desc).unwrap();
            assert_eq!(grid.values(), expected.values(), "{} at {:?}", name, resolution);
        }
    }
}
