//! The cell-overlap kernels running on a GPU through `wgpu`.
//!
//! The kernels are the same as the ones of the [`CellOverlapVoxelizer`](super::CellOverlapVoxelizer):
//! one invocation per cell tests the cell against every triangle, then every remaining cell
//! counts the triangles crossed by an upward ray from its center. Vertices are uploaded
//! relative to the grid origin, so single-precision kernels keep their accuracy on meshes
//! far from the world origin.

pub use self::gpu_buffers::GpuBuffers;
pub use self::gpu_layout::{GpuGridParams, GpuVertex};
pub use self::gpu_voxelizer::{GpuDevice, GpuVoxelizer};

mod gpu_buffers;
mod gpu_layout;
mod gpu_voxelizer;
