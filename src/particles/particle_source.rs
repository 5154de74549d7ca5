use super::{AggregateSource, BoundsSource, ListSource, ParticleError, VoxelSource};
use crate::math::{Point, Real};

/// A generator of particle positions.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum ParticleSource {
    /// Particles filling a box minus exclusion boxes.
    Bounds(BoundsSource),
    /// Particles filling each voxel of a list.
    Voxels(VoxelSource),
    /// Particles at explicit positions.
    List(ListSource),
    /// The concatenation of other sources.
    Aggregate(AggregateSource),
}

impl ParticleSource {
    /// The distance between two adjacent particles.
    pub fn spacing(&self) -> Real {
        match self {
            Self::Bounds(s) => s.spacing(),
            Self::Voxels(s) => s.spacing(),
            Self::List(s) => s.spacing(),
            Self::Aggregate(s) => s.spacing(),
        }
    }

    /// The particles generated by the last call to [`Self::create_particles`].
    pub fn positions(&self) -> &[Point<Real>] {
        match self {
            Self::Bounds(s) => s.positions(),
            Self::Voxels(s) => s.positions(),
            Self::List(s) => s.positions(),
            Self::Aggregate(s) => s.positions(),
        }
    }

    /// The number of particles generated by the last call to [`Self::create_particles`].
    pub fn num_particles(&self) -> usize {
        self.positions().len()
    }

    /// The position of the `i`-th particle.
    ///
    /// Fails if `i` is not smaller than [`Self::num_particles`], which happens when an index
    /// computed before a regeneration outlives it.
    pub fn position(&self, i: usize) -> Result<Point<Real>, ParticleError> {
        let positions = self.positions();
        positions
            .get(i)
            .copied()
            .ok_or(ParticleError::IndexOutOfRange {
                index: i,
                len: positions.len(),
            })
    }

    /// Regenerates the particles.
    ///
    /// Calling this twice without modifying the source gives the same positions in the same
    /// order.
    pub fn create_particles(&mut self) {
        match self {
            Self::Bounds(s) => s.create_particles(),
            Self::Voxels(s) => s.create_particles(),
            Self::List(s) => s.create_particles(),
            Self::Aggregate(s) => s.create_particles(),
        }
    }
}

impl From<BoundsSource> for ParticleSource {
    fn from(source: BoundsSource) -> Self {
        Self::Bounds(source)
    }
}

impl From<VoxelSource> for ParticleSource {
    fn from(source: VoxelSource) -> Self {
        Self::Voxels(source)
    }
}

impl From<ListSource> for ParticleSource {
    fn from(source: ListSource) -> Self {
        Self::List(source)
    }
}

impl From<AggregateSource> for ParticleSource {
    fn from(source: AggregateSource) -> Self {
        Self::Aggregate(source)
    }
}
