use super::particle_error::check_spacing;
use super::{ParticleError, ParticleSource};
use crate::math::{Point, Real};
use alloc::vec::Vec;

/// The concatenation of the particles of several sources.
///
/// For every particle, the index of the source it comes from is recorded. This lets the solver
/// apply a different rigid-body transform to the particles of each container.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct AggregateSource {
    sources: Vec<ParticleSource>,
    spacing: Real,
    positions: Vec<Point<Real>>,
    origins: Vec<usize>,
}

impl AggregateSource {
    /// Aggregates `sources`, in order.
    ///
    /// The constituents keep their own spacing: `spacing` is the value reported to the solver.
    pub fn new(sources: Vec<ParticleSource>, spacing: Real) -> Result<Self, ParticleError> {
        Ok(Self {
            sources,
            spacing: check_spacing(spacing)?,
            positions: Vec::new(),
            origins: Vec::new(),
        })
    }

    /// The aggregated sources.
    pub fn sources(&self) -> &[ParticleSource] {
        &self.sources
    }

    /// The distance between two adjacent particles.
    pub fn spacing(&self) -> Real {
        self.spacing
    }

    /// The particles generated by the last call to [`Self::create_particles`].
    pub fn positions(&self) -> &[Point<Real>] {
        &self.positions
    }

    /// For each particle, the index of the source it comes from.
    pub fn origin_indices(&self) -> &[usize] {
        &self.origins
    }

    /// The index of the source the `i`-th particle comes from.
    pub fn origin_of(&self, i: usize) -> Result<usize, ParticleError> {
        self.origins
            .get(i)
            .copied()
            .ok_or(ParticleError::IndexOutOfRange {
                index: i,
                len: self.origins.len(),
            })
    }

    /// Regenerates the particles of every source, then concatenates them.
    pub fn create_particles(&mut self) {
        self.positions.clear();
        self.origins.clear();

        for (origin, source) in self.sources.iter_mut().enumerate() {
            source.create_particles();
            self.positions.extend_from_slice(source.positions());
            self.origins
                .extend(core::iter::repeat(origin).take(source.num_particles()));
        }

        log::debug!(
            "aggregate particle source: {} particles from {} sources.",
            self.positions.len(),
            self.sources.len()
        );
    }
}
