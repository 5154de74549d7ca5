use crate::math::Real;

/// Errors raised while building or reading particle sources.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq)]
pub enum ParticleError {
    /// The particle spacing is not a positive finite number.
    #[error("invalid particle spacing {0}: it must be positive and finite.")]
    InvalidSpacing(Real),
    /// The wall thickness of a container is not a positive finite number.
    #[error("invalid wall thickness {0}: it must be positive and finite.")]
    InvalidWallThickness(Real),
    /// A voxel particle source was given no voxel.
    #[error("a voxel particle source needs at least one voxel.")]
    EmptyVoxelList,
    /// A particle was accessed past the end of the position list.
    #[error("particle index {index} is out of range for a source with {len} particles.")]
    IndexOutOfRange {
        /// The requested particle index.
        index: usize,
        /// The number of particles of the source.
        len: usize,
    },
}

pub(crate) fn check_spacing(spacing: Real) -> Result<Real, ParticleError> {
    if spacing.is_finite() && spacing > 0.0 {
        Ok(spacing)
    } else {
        Err(ParticleError::InvalidSpacing(spacing))
    }
}
