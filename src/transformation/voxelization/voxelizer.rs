use super::{CellOverlapVoxelizer, GridDescriptor, RayParityVoxelizer, VoxelGrid, VoxelizationError};
use crate::shape::TriMesh;
use alloc::boxed::Box;

/// A strategy converting a triangle mesh into an occupancy grid.
///
/// Every implementation marks a cell as solid if its center is inside of the closed surface
/// of the mesh. Implementations may additionally mark cells crossed by the surface as
/// [`VoxelValue::Surface`](super::VoxelValue::Surface).
pub trait Voxelizer {
    /// Builds the occupancy grid of `mesh` over the region described by `desc`.
    fn voxelize(
        &mut self,
        mesh: &TriMesh,
        desc: &GridDescriptor,
    ) -> Result<VoxelGrid, VoxelizationError>;
}

/// The voxelization backends available for configuration-driven selection.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum VoxelizationBackend {
    /// Ray-parity counting along the `+Z` axis. See [`RayParityVoxelizer`].
    #[default]
    RayParity,
    /// Cell/triangle overlap tests followed by a parity fill, on the CPU. See
    /// [`CellOverlapVoxelizer`].
    CellOverlap,
    /// The cell-overlap kernels, on a GPU. See [`GpuVoxelizer`](super::GpuVoxelizer).
    #[cfg(feature = "gpu")]
    Gpu,
}

impl VoxelizationBackend {
    /// Instantiates the voxelizer for this backend.
    pub fn into_voxelizer(self) -> Box<dyn Voxelizer> {
        match self {
            Self::RayParity => Box::new(RayParityVoxelizer::new()),
            Self::CellOverlap => Box::new(CellOverlapVoxelizer::new()),
            #[cfg(feature = "gpu")]
            Self::Gpu => Box::new(super::GpuVoxelizer::new()),
        }
    }
}
