//! Conversion of a closed mesh into the boundary and fluid voxels of a fluid container.

pub use self::containerizer_error::ContainerizerError;
pub use self::fluid_containerizer::FluidContainerizer;
pub use self::parameters::ContainerizerParameters;

mod containerizer_error;
mod fluid_containerizer;
mod parameters;
