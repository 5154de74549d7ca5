use crate::math::{Real, Transform, Vector};
use crate::transformation::voxelization::VoxelizationBackend;

/// Parameters of a [`FluidContainerizer`](super::FluidContainerizer).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ContainerizerParameters {
    /// The voxelizer used by [`FluidContainerizer::build`](super::FluidContainerizer::build).
    ///
    /// Default: `RayParity`.
    pub backend: VoxelizationBackend,
    /// The half-size of the cubic voxels. The grid resolution is derived from it, rounding up.
    ///
    /// Default: `0.05`.
    pub cell_half_size: Real,
    /// An explicit grid resolution. Takes precedence over `cell_half_size` if set.
    ///
    /// Default: `None`.
    pub resolution: Option<[u32; 3]>,
    /// The scale applied to the mesh bounding box, about its center, to get the grid bounds.
    ///
    /// Default: `(1, 1, 1)`.
    pub scale: Vector<Real>,
    /// The transform from the mesh local space to the world space.
    ///
    /// Default: `None`.
    pub local_to_world: Option<Transform>,
}

impl Default for ContainerizerParameters {
    fn default() -> Self {
        Self {
            backend: VoxelizationBackend::RayParity,
            cell_half_size: 0.05,
            resolution: None,
            scale: Vector::repeat(1.0),
            local_to_world: None,
        }
    }
}
