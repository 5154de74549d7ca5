use super::{GridDescriptor, VoxelValue};
use alloc::vec;
use alloc::vec::Vec;

/// The raw cell states written by the kernels of the [`CellOverlapVoxelizer`](super::CellOverlapVoxelizer).
///
/// The buffer is only valid for the resolution it was allocated for: a dispatch on a grid
/// with a different layout reallocates it, so stale cell states never leak into a new
/// dispatch.
#[derive(Clone, Debug, Default)]
pub struct CellBuffer {
    cells: Vec<u32>,
    resolution: [u32; 3],
}

impl CellBuffer {
    /// An unallocated buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// The resolution the buffer was sized for, or zeros if it was never allocated.
    pub fn resolution(&self) -> [u32; 3] {
        self.resolution
    }

    /// Is the buffer sized for the grid described by `desc`?
    pub fn is_valid_for(&self, desc: &GridDescriptor) -> bool {
        self.resolution == desc.resolution && self.cells.len() == desc.num_cells()
    }

    /// Makes sure the buffer matches `desc`, reallocating it if needed.
    ///
    /// Returns `true` if the buffer was reallocated. In every case, all cells are reset
    /// to [`VoxelValue::Empty`].
    #[must_use]
    pub fn ensure_size(&mut self, desc: &GridDescriptor) -> bool {
        if self.is_valid_for(desc) {
            self.cells.fill(VoxelValue::Empty.to_raw());
            return false;
        }

        self.cells = vec![VoxelValue::Empty.to_raw(); desc.num_cells()];
        self.resolution = desc.resolution;
        true
    }

    /// Frees the buffer.
    pub fn release(&mut self) {
        *self = Self::default();
    }

    /// The raw cell states.
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    pub(super) fn cells_mut(&mut self) -> &mut [u32] {
        &mut self.cells
    }
}
