use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector};

/// Absorbs rounding errors when the spacing evenly divides a box extent.
const COUNT_TOLERANCE: Real = 1.0e-4;

/// The number of samples fitting along an extent, zero if the extent is smaller than the
/// spacing.
pub(super) fn samples_per_axis(extent: Real, spacing: Real) -> u32 {
    (extent / spacing + COUNT_TOLERANCE).floor().max(0.0) as u32
}

/// A regular grid of points inside `aabb`, offset by half a spacing from its min corner.
///
/// Points are yielded with `x` varying fastest, then `y`, then `z`.
pub(super) fn box_samples(aabb: &Aabb, spacing: Real) -> impl Iterator<Item = Point<Real>> {
    let counts = aabb.extents().map(|e| samples_per_axis(e, spacing));
    let mins = aabb.mins;

    (0..counts.z).flat_map(move |k| {
        (0..counts.y).flat_map(move |j| {
            (0..counts.x).map(move |i| {
                let shift = Vector::new(i as Real + 0.5, j as Real + 0.5, k as Real + 0.5);
                mins + shift * spacing
            })
        })
    })
}

#[cfg(test)]
mod test {
    use super::{box_samples, samples_per_axis};
    use crate::bounding_volume::Aabb;
    use crate::math::Point;
    use alloc::vec::Vec;

    #[test]
    fn sample_counts() {
        assert_eq!(samples_per_axis(1.0, 0.25), 4);
        assert_eq!(samples_per_axis(0.3, 0.1), 3);
        assert_eq!(samples_per_axis(0.99, 0.25), 3);
        assert_eq!(samples_per_axis(0.1, 0.2), 0);
    }

    #[test]
    fn samples_are_centered_in_their_sub_cells() {
        let aabb = Aabb::new(Point::new(1.0, 0.0, 0.0), Point::new(2.0, 0.5, 0.5));
        let points: Vec<_> = box_samples(&aabb, 0.5).collect();
        assert_eq!(points, [Point::new(1.25, 0.25, 0.25), Point::new(1.75, 0.25, 0.25)]);
        assert!(points.iter().all(|pt| aabb.contains_local_point(pt)));
    }
}
