//! Axis Aligned Bounding Box.

use crate::math::{Point, Real, Transform, Vector, DIM};
use num::Bounded;

/// An Axis-Aligned Bounding Box (AABB).
///
/// This is the box type used everywhere in this crate: for the bounds of a triangle mesh,
/// for the nodes of its BVH, for the individual cells of a voxel grid, and for the
/// particle-exclusion regions of particle sources.
///
/// `mins` is expected to be component-wise smaller or equal to `maxs`, except for the
/// inverted box returned by [`Aabb::new_invalid`] that serves as the identity of
/// [`Aabb::merge`].
///
/// # Example
///
/// ```rust
/// # #[cfg(feature = "f32")] {
/// use vessel3d::bounding_volume::Aabb;
/// use nalgebra::Point3;
///
/// let aabb = Aabb::new(Point3::new(-0.5, -0.5, -0.5), Point3::new(0.5, 0.5, 0.5));
///
/// assert!(aabb.contains_local_point(&Point3::origin()));
/// assert_eq!(aabb.center(), Point3::origin());
/// assert_eq!(aabb.extents().x, 1.0);
/// assert_eq!(aabb.half_extents().x, 0.5);
/// # }
/// ```
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
#[repr(C)]
pub struct Aabb {
    /// The point with minimum coordinates.
    pub mins: Point<Real>,
    /// The point with maximum coordinates.
    pub maxs: Point<Real>,
}

impl Aabb {
    /// Creates a new AABB from its minimum and maximum corners.
    #[inline]
    pub fn new(mins: Point<Real>, maxs: Point<Real>) -> Aabb {
        Aabb { mins, maxs }
    }

    /// An inverted AABB, with `mins` at `Real::max_value()` and `maxs` at its opposite.
    ///
    /// Merging anything into it gives back that thing.
    #[inline]
    pub fn new_invalid() -> Self {
        Self::new(
            Vector::repeat(Real::max_value()).into(),
            Vector::repeat(-Real::max_value()).into(),
        )
    }

    /// Creates a new AABB from its center and its half-extents.
    #[inline]
    pub fn from_half_extents(center: Point<Real>, half_extents: Vector<Real>) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// The smallest AABB containing every point of `pts`.
    ///
    /// Returns [`Aabb::new_invalid`] if `pts` is empty.
    pub fn from_points<I>(pts: I) -> Self
    where
        I: IntoIterator<Item = Point<Real>>,
    {
        pts.into_iter().fold(Self::new_invalid(), |aabb, pt| Aabb {
            mins: aabb.mins.inf(&pt),
            maxs: aabb.maxs.sup(&pt),
        })
    }

    /// The center of this AABB.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        na::center(&self.mins, &self.maxs)
    }

    /// The half extents of this AABB.
    #[inline]
    pub fn half_extents(&self) -> Vector<Real> {
        (self.maxs - self.mins) * 0.5
    }

    /// The extents of this AABB.
    #[inline]
    pub fn extents(&self) -> Vector<Real> {
        self.maxs - self.mins
    }

    /// Checks that every component of `mins` is smaller or equal to the matching component of `maxs`.
    #[inline]
    pub fn is_valid(&self) -> bool {
        na::partial_le(&self.mins, &self.maxs)
    }

    /// Computes the AABB bounding `self` transformed by `m`.
    ///
    /// `m` may rotate, shear, or scale non-uniformly: the eight transformed corners are
    /// bounded explicitly.
    #[inline]
    pub fn transform_by(&self, m: &Transform) -> Self {
        Self::from_points(self.vertices().iter().map(|pt| m.transform_point(pt)))
    }

    /// Returns an AABB with the same center as `self` but with extents scaled by `scale`.
    ///
    /// Negative scale components are treated as their absolute value.
    #[inline]
    #[must_use]
    pub fn scaled_wrt_center(self, scale: &Vector<Real>) -> Self {
        let half_extents = self.half_extents().component_mul(scale).abs();
        Self::from_half_extents(self.center(), half_extents)
    }

    /// Does this AABB contains a point expressed in the same coordinate frame as `self`?
    ///
    /// Points exactly on the boundary are considered contained.
    #[inline]
    pub fn contains_local_point(&self, point: &Point<Real>) -> bool {
        (0..DIM).all(|i| point[i] >= self.mins[i] && point[i] <= self.maxs[i])
    }

    /// Do `self` and `other` share at least one point?
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        na::partial_le(&self.mins, &other.maxs) && na::partial_ge(&self.maxs, &other.mins)
    }

    /// Is `other` entirely inside of `self`?
    #[inline]
    pub fn contains(&self, other: &Aabb) -> bool {
        na::partial_le(&self.mins, &other.mins) && na::partial_ge(&self.maxs, &other.maxs)
    }

    /// Enlarges `self` so it also contains `other`.
    #[inline]
    pub fn merge(&mut self, other: &Aabb) {
        *self = self.merged(other);
    }

    /// The smallest AABB containing both `self` and `other`.
    #[inline]
    #[must_use]
    pub fn merged(&self, other: &Aabb) -> Aabb {
        Aabb {
            mins: self.mins.inf(&other.mins),
            maxs: self.maxs.sup(&other.maxs),
        }
    }

    /// This AABB grown by `margin` on every side.
    #[inline]
    #[must_use]
    pub fn loosened(&self, margin: Real) -> Aabb {
        let margin = Vector::repeat(margin);
        Aabb::new(self.mins - margin, self.maxs + margin)
    }

    /// Computes the vertices of this AABB.
    ///
    /// ```text
    ///    y             3 - 2
    ///    |           7 − 6 |
    ///    ___ x       |   | 1  (the zero is below 3 and on the left of 1,
    ///   /            4 - 5     hidden by the 4-5-6-7 face.)
    ///  z
    /// ```
    #[inline]
    pub fn vertices(&self) -> [Point<Real>; 8] {
        let (lo, hi) = (self.mins, self.maxs);
        [
            Point::new(lo.x, lo.y, lo.z),
            Point::new(hi.x, lo.y, lo.z),
            Point::new(hi.x, hi.y, lo.z),
            Point::new(lo.x, hi.y, lo.z),
            Point::new(lo.x, lo.y, hi.z),
            Point::new(hi.x, lo.y, hi.z),
            Point::new(hi.x, hi.y, hi.z),
            Point::new(lo.x, hi.y, hi.z),
        ]
    }
}
