//! Particle sources seeding the boundary and fluid particles of a particle-based fluid solver.
//!
//! Every source owns an ordered list of particle positions, regenerated on demand by
//! `create_particles`, and the spacing between its particles. Constructors only validate
//! their inputs: the position list is empty until the first call to `create_particles`.

pub use self::aggregate_source::AggregateSource;
pub use self::bounds_source::{BoundsSource, WALL_SAFETY_FACTOR};
pub use self::list_source::ListSource;
pub use self::particle_error::ParticleError;
pub use self::particle_source::ParticleSource;
pub use self::voxel_source::VoxelSource;

mod aggregate_source;
mod bounds_source;
mod box_sampling;
mod list_source;
mod particle_error;
mod particle_source;
/// Parametric point sets for analytically shaped containers.
pub mod shapes;
mod voxel_source;
