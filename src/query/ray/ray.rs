//! Traits and structure needed to cast rays.

use crate::math::{Point, Real, Vector};

/// A ray that can be cast against triangles, triangle meshes, and boxes.
///
/// The ray is the half-line `origin + dir * t` for `t ≥ 0`. `dir` does not need to be
/// normalized: times of impact are expressed in multiples of `dir`.
///
/// # Example
///
/// ```rust
/// # #[cfg(feature = "f32")] {
/// use vessel3d::query::Ray;
/// use nalgebra::{Point3, Vector3};
///
/// let ray = Ray::new(Point3::origin(), Vector3::z());
/// assert_eq!(ray.point_at(2.0), Point3::new(0.0, 0.0, 2.0));
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[repr(C)]
pub struct Ray {
    /// Starting point of the ray.
    pub origin: Point<Real>,
    /// Direction of the ray.
    pub dir: Vector<Real>,
}

impl Ray {
    /// Creates a new ray starting from `origin` and with the direction `dir`.
    pub fn new(origin: Point<Real>, dir: Vector<Real>) -> Ray {
        Ray { origin, dir }
    }

    /// Computes the point `origin + dir * t`.
    #[inline]
    pub fn point_at(&self, t: Real) -> Point<Real> {
        self.origin + self.dir * t
    }
}

/// Result of a successful ray cast against a triangle or a triangle mesh.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct RayIntersection {
    /// The time of impact of the ray with the surface.
    ///
    /// The hit point is `ray.point_at(time_of_impact)`.
    pub time_of_impact: Real,

    /// The unit normal of the hit triangle, oriented against the ray direction.
    pub normal: Vector<Real>,

    /// Index of the triangle that was hit.
    ///
    /// Always 0 when casting against a single triangle.
    pub triangle: u32,

    /// `true` if the ray hit the triangle from the side opposite to its
    /// counter-clockwise normal.
    pub is_backface: bool,
}

impl RayIntersection {
    /// Creates a new `RayIntersection`.
    #[inline]
    pub fn new(
        time_of_impact: Real,
        normal: Vector<Real>,
        triangle: u32,
        is_backface: bool,
    ) -> RayIntersection {
        RayIntersection {
            time_of_impact,
            normal,
            triangle,
            is_backface,
        }
    }
}

/// Traits of surfaces which can be tested for intersection with a ray.
///
/// Surfaces are hollow: a ray starting inside a closed mesh reports the first wall
/// it crosses, not a hit at `t = 0`.
pub trait RayCast {
    /// Computes the time of impact between this shape and a ray.
    fn cast_local_ray(&self, ray: &Ray, max_time_of_impact: Real) -> Option<Real> {
        self.cast_local_ray_and_get_normal(ray, max_time_of_impact)
            .map(|inter| inter.time_of_impact)
    }

    /// Computes the time of impact, and normal between this shape and a ray.
    fn cast_local_ray_and_get_normal(
        &self,
        ray: &Ray,
        max_time_of_impact: Real,
    ) -> Option<RayIntersection>;

    /// Tests whether a ray intersects this shape.
    #[inline]
    fn intersects_local_ray(&self, ray: &Ray, max_time_of_impact: Real) -> bool {
        self.cast_local_ray(ray, max_time_of_impact).is_some()
    }
}
