use crate::math::Real;

/// Errors raised while building a voxel grid.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq)]
pub enum VoxelizationError {
    /// One of the grid dimensions is zero.
    #[error("the voxel grid resolution {0:?} has a zero dimension.")]
    ZeroResolution([u32; 3]),
    /// The grid bounds are empty, inverted, or not finite.
    #[error("the voxel grid bounds are degenerate.")]
    DegenerateBounds,
    /// The requested cell half-size is not a positive finite number.
    #[error("invalid voxel half-size {0}: it must be positive and finite.")]
    InvalidCellSize(Real),
    /// The number of cell values does not match the grid dimensions.
    #[error("expected {expected} voxel values, found {found}.")]
    ValueCountMismatch {
        /// The number of cells of the grid.
        expected: usize,
        /// The number of values provided.
        found: usize,
    },
    /// The result of a compute dispatch was requested before the dispatch was issued, or was
    /// already read back.
    #[error("no dispatched voxelization is ready to be read back.")]
    ReadbackNotReady,
    /// No GPU adapter is available to the GPU backend.
    #[error("no compatible GPU adapter was found.")]
    NoGpuAdapter,
    /// The GPU adapter failed to open a device.
    #[error("the GPU device could not be opened.")]
    GpuDeviceUnavailable,
    /// The grid does not fit in the buffers or the dispatch limits of the GPU device.
    #[error("the voxel grid resolution {0:?} exceeds the limits of the GPU device.")]
    GridTooLarge([u32; 3]),
    /// The cell readback buffer could not be mapped.
    #[error("the voxel readback buffer could not be mapped.")]
    BufferMapFailed,
}
