//! Non-persistent geometric queries.
//!
//! Only the queries needed by the voxelization pipeline are provided here: ray-casting
//! against boxes, triangles, and triangle meshes, and the box/triangle overlap test.

pub use self::intersection_test::intersection_test_aabb_triangle;
pub use self::ray::{Ray, RayCast, RayIntersection};

mod intersection_test;
mod ray;
