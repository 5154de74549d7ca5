//! Conversion of closed triangle meshes into occupancy grids.
//!
//! Interchangeable [`Voxelizer`] strategies are provided:
//! - [`RayParityVoxelizer`] marks the cells with a center inside of the mesh, by counting
//!   ray/surface crossings along each grid column.
//! - [`CellOverlapVoxelizer`] marks the cells whose interior is crossed by the mesh surface,
//!   then fills the remaining cells with a center inside of the mesh. Its solid cells are a
//!   superset of the ray-parity ones.
//! - `GpuVoxelizer`, behind the `gpu` feature, runs the cell-overlap kernels on a GPU.

pub use self::cell_buffer::CellBuffer;
pub use self::cell_overlap::CellOverlapVoxelizer;
#[cfg(feature = "gpu")]
pub use self::gpu::{GpuBuffers, GpuDevice, GpuGridParams, GpuVertex, GpuVoxelizer};
pub use self::grid_descriptor::GridDescriptor;
pub use self::ray_parity::{RayParityVoxelizer, RAY_EPSILON_FACTOR};
pub use self::voxel_grid::{VoxelGrid, VoxelValue};
pub use self::voxelization_error::VoxelizationError;
pub use self::voxelizer::{VoxelizationBackend, Voxelizer};

mod cell_buffer;
mod cell_overlap;
#[cfg(feature = "gpu")]
mod gpu;
mod grid_descriptor;
mod ray_parity;
mod voxel_grid;
mod voxelization_error;
mod voxelizer;
