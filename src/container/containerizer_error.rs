use crate::particles::ParticleError;
use crate::transformation::hollowing::HollowingError;
use crate::transformation::voxelization::VoxelizationError;

/// Errors raised by the [`FluidContainerizer`](super::FluidContainerizer).
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq)]
pub enum ContainerizerError {
    /// The mesh could not be voxelized.
    #[error(transparent)]
    Voxelization(#[from] VoxelizationError),
    /// The voxel grid could not be classified.
    #[error(transparent)]
    Hollowing(#[from] HollowingError),
    /// The particle sources could not be built.
    #[error(transparent)]
    Particles(#[from] ParticleError),
    /// The classification has no hull cell.
    #[error("the container has no exterior voxel.")]
    NoExteriorVoxels,
    /// The classification has no cavity cell: the mesh does not enclose any volume at this
    /// resolution.
    #[error("the container has no interior voxel, the mesh is not a closed container.")]
    NoInteriorVoxels,
    /// The voxels were requested before a successful build.
    #[error("the container was not built yet.")]
    NotReady,
}
