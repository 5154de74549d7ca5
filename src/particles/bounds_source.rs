use super::box_sampling::box_samples;
use super::particle_error::check_spacing;
use super::ParticleError;
use crate::bounding_volume::Aabb;
use crate::math::{Point, Real};
use alloc::vec;
use alloc::vec::Vec;

/// Inflation applied to the wall thickness of [`BoundsSource::container_walls`].
///
/// Leaves no gap in the walls when the spacing does not evenly divide the thickness.
pub const WALL_SAFETY_FACTOR: Real = 1.2;

/// Particles on a regular grid inside of a box, minus exclusion boxes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct BoundsSource {
    outer: Aabb,
    exclusions: Vec<Aabb>,
    spacing: Real,
    positions: Vec<Point<Real>>,
}

impl BoundsSource {
    /// A source filling `outer`, except for the points contained by any of the `exclusions`.
    pub fn new(outer: Aabb, exclusions: Vec<Aabb>, spacing: Real) -> Result<Self, ParticleError> {
        Ok(Self {
            outer,
            exclusions,
            spacing: check_spacing(spacing)?,
            positions: Vec::new(),
        })
    }

    /// A solid shell of thickness `wall_thickness` around the box `interior`.
    ///
    /// The shell thickness is inflated by [`WALL_SAFETY_FACTOR`]. Fails unless `wall_thickness`
    /// is positive and finite.
    pub fn container_walls(
        interior: Aabb,
        wall_thickness: Real,
        spacing: Real,
    ) -> Result<Self, ParticleError> {
        if !wall_thickness.is_finite() || wall_thickness <= 0.0 {
            return Err(ParticleError::InvalidWallThickness(wall_thickness));
        }

        let outer = interior.loosened(wall_thickness * WALL_SAFETY_FACTOR);
        Self::new(outer, vec![interior], spacing)
    }

    /// The box filled by this source.
    pub fn outer(&self) -> &Aabb {
        &self.outer
    }

    /// The boxes left empty.
    pub fn exclusions(&self) -> &[Aabb] {
        &self.exclusions
    }

    /// The distance between two adjacent particles.
    pub fn spacing(&self) -> Real {
        self.spacing
    }

    /// The particles generated by the last call to [`Self::create_particles`].
    pub fn positions(&self) -> &[Point<Real>] {
        &self.positions
    }

    /// Regenerates the particles.
    pub fn create_particles(&mut self) {
        let exclusions = &self.exclusions;
        self.positions.clear();
        self.positions.extend(
            box_samples(&self.outer, self.spacing)
                .filter(|pt| !exclusions.iter().any(|aabb| aabb.contains_local_point(pt))),
        );

        log::debug!("bounds particle source: {} particles.", self.positions.len());
    }
}

#[cfg(test)]
mod test {
    use super::BoundsSource;
    use crate::bounding_volume::Aabb;
    use crate::math::{Point, Real, Vector};
    use crate::particles::ParticleError;
    use alloc::vec;

    #[test]
    fn hollow_box_particles_are_between_the_boxes() {
        let outer = Aabb::from_half_extents(Point::origin(), Vector::repeat(1.0));
        let inner = Aabb::from_half_extents(Point::origin(), Vector::repeat(0.5));
        let mut source = BoundsSource::new(outer, vec![inner], 0.5).unwrap();
        source.create_particles();

        // 4x4x4 grid minus the 2x2x2 block inside of the inner box.
        assert_eq!(source.positions().len(), 64 - 8);
        for pt in source.positions() {
            assert!(outer.contains_local_point(pt));
            assert!(!inner.contains_local_point(pt));
        }
    }

    #[test]
    fn container_walls_enclose_the_interior() {
        let interior = Aabb::from_half_extents(Point::origin(), Vector::repeat(1.0));
        let mut source = BoundsSource::container_walls(interior, 0.25, 0.1).unwrap();
        source.create_particles();

        assert!(relative_eq!(source.outer().maxs.x, 1.3));
        assert!(!source.positions().is_empty());
        assert!(source
            .positions()
            .iter()
            .all(|pt| !interior.contains_local_point(pt)));
    }

    #[test]
    fn invalid_parameters() {
        let aabb = Aabb::from_half_extents(Point::origin(), Vector::repeat(1.0));
        assert_eq!(
            BoundsSource::new(aabb, vec![], -1.0).unwrap_err(),
            ParticleError::InvalidSpacing(-1.0)
        );
        for thickness in [0.0, -0.5, Real::INFINITY] {
            assert_eq!(
                BoundsSource::container_walls(aabb, thickness, 0.1).unwrap_err(),
                ParticleError::InvalidWallThickness(thickness)
            );
        }
        assert!(matches!(
            BoundsSource::container_walls(aabb, Real::NAN, 0.1),
            Err(ParticleError::InvalidWallThickness(_))
        ));
        assert!(BoundsSource::container_walls(aabb, 1.0e-3, 0.1).is_ok());
    }
}
