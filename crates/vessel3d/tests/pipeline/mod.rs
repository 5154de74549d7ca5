use na::{Point3, Vector3};
use vessel3d::bounding_volume::Aabb;
use vessel3d::shape::TriMesh;
use vessel3d::transformation::aabb_to_trimesh;

mod backend_conformance;
mod cavity_classification;
mod fluid_containerizer;
mod particle_sources;
mod ray_parity;

/// The axis-aligned box mesh with the given half extent, centered at the origin.
pub fn cube(half_extent: f32) -> TriMesh {
    let aabb = Aabb::from_half_extents(Point3::origin(), Vector3::repeat(half_extent));
    aabb_to_trimesh(&aabb, false)
}

/// A closed box shell: outer walls at `±1`, inner walls at `±0.5`.
pub fn hollow_cube() -> TriMesh {
    let mut mesh = cube(1.0);
    let inner = Aabb::from_half_extents(Point3::origin(), Vector3::repeat(0.5));
    mesh.append(&aabb_to_trimesh(&inner, true));
    mesh
}

/// A regular octahedron with vertices at distance `radius` on each axis.
pub fn octahedron(radius: f32) -> TriMesh {
    let vertices = vec![
        Point3::new(radius, 0.0, 0.0),
        Point3::new(-radius, 0.0, 0.0),
        Point3::new(0.0, radius, 0.0),
        Point3::new(0.0, -radius, 0.0),
        Point3::new(0.0, 0.0, radius),
        Point3::new(0.0, 0.0, -radius),
    ];
    let indices = vec![
        [0, 2, 4],
        [2, 1, 4],
        [1, 3, 4],
        [3, 0, 4],
        [2, 0, 5],
        [1, 2, 5],
        [3, 1, 5],
        [0, 3, 5],
    ];
    TriMesh::new(vertices, indices).unwrap()
}

/// The box `[-1, 1]^3`.
pub fn unit_bounds() -> Aabb {
    Aabb::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0))
}
