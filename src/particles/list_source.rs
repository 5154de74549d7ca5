use super::particle_error::check_spacing;
use super::ParticleError;
use crate::math::{Point, Real, Transform};
use alloc::vec::Vec;

/// Particles at explicit positions, optionally transformed.
///
/// Typically built from the point sets of [`shapes`](super::shapes).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ListSource {
    points: Vec<Point<Real>>,
    transform: Option<Transform>,
    spacing: Real,
    positions: Vec<Point<Real>>,
}

impl ListSource {
    /// A source emitting `points`, transformed by `transform` if any.
    pub fn new(
        points: Vec<Point<Real>>,
        transform: Option<Transform>,
        spacing: Real,
    ) -> Result<Self, ParticleError> {
        Ok(Self {
            points,
            transform,
            spacing: check_spacing(spacing)?,
            positions: Vec::new(),
        })
    }

    /// The untransformed points.
    pub fn points(&self) -> &[Point<Real>] {
        &self.points
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
        self.positions.clear();
        match &self.transform {
            Some(m) => self
                .positions
                .extend(self.points.iter().map(|pt| m.transform_point(pt))),
            None => self.positions.extend_from_slice(&self.points),
        }
    }
}

#[cfg(test)]
mod test {
    use super::ListSource;
    use crate::math::{Point, Transform, Vector};
    use alloc::vec;

    #[test]
    fn list_source_applies_its_transform() {
        let points = vec![Point::new(1.0, 0.0, 0.0), Point::new(0.0, 2.0, 0.0)];
        let m = Transform::new_nonuniform_scaling(&Vector::new(2.0, 0.5, 1.0));
        let mut source = ListSource::new(points.clone(), Some(m), 0.1).unwrap();
        source.create_particles();

        assert_eq!(source.points(), &points[..]);
        assert_eq!(
            source.positions(),
            &[Point::new(2.0, 0.0, 0.0), Point::new(0.0, 1.0, 0.0)]
        );
    }
}
