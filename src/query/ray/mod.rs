//! Ray-casting related definitions and implementations.

#[doc(inline)]
pub use self::ray::{Ray, RayCast, RayIntersection};

#[doc(hidden)]
pub mod ray;
mod ray_aabb;
mod ray_triangle;
mod ray_trimesh;
