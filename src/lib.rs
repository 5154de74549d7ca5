/*!
vessel3d
========

**vessel3d** turns closed triangle meshes into particle containers for
particle-based fluid solvers, written with the rust programming language.

The pipeline has three stages:

1. **Voxelization**: a triangle mesh is converted into an occupancy grid, either by
   ray-parity counting ([`RayParityVoxelizer`](transformation::voxelization::RayParityVoxelizer))
   or by cell/triangle overlap tests followed by a parity fill
   ([`CellOverlapVoxelizer`](transformation::voxelization::CellOverlapVoxelizer)).
   With the `gpu` feature, the same overlap kernels also run on a GPU through `wgpu`.
2. **Hollowing**: the occupancy grid is classified into solid, hull, and cavity cells
   ([`classify_cavities`](transformation::hollowing::classify_cavities)).
3. **Seeding**: hull and cavity cells are converted into boxes and filled with particles
   at a given spacing ([`particles`]).

The [`FluidContainerizer`](container::FluidContainerizer) chains the first two stages
and exposes the resulting boundary and fluid voxel sets.
*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::module_inception)]
#![allow(clippy::manual_range_contains)] // This usually makes it way more verbose that it could be.
#![deny(unused_qualifications)]

#[cfg(all(feature = "f32", feature = "f64"))]
std::compile_error!("The `f32` and `f64` features are mutually exclusive.");

#[cfg(feature = "serde-serialize")]
#[macro_use]
extern crate serde;
#[cfg_attr(test, macro_use)]
extern crate approx;
extern crate alloc;
extern crate num_traits as num;

pub extern crate nalgebra as na;

pub mod bounding_volume;
pub mod container;
pub mod partitioning;
pub mod particles;
pub mod query;
pub mod shape;
pub mod transformation;

mod real {
    /// The scalar type used throughout this crate.
    #[cfg(feature = "f64")]
    pub use f64 as Real;

    /// The scalar type used throughout this crate.
    #[cfg(feature = "f32")]
    pub use f32 as Real;
}

/// Compilation flags dependent aliases for mathematical types.
pub mod math {
    pub use super::real::*;
    pub use na::{Matrix4, Point3, Vector3};

    /// The default tolerance used for geometric operations.
    pub const DEFAULT_EPSILON: Real = Real::EPSILON;

    /// The dimension of the space.
    pub const DIM: usize = 3;

    /// The point type.
    pub use Point3 as Point;

    /// The vector type.
    pub use Vector3 as Vector;

    /// The homogeneous local-to-world transformation type.
    ///
    /// Unlike an isometry, this may contain non-uniform scaling and shearing, which is
    /// the case for scaled instances of a container mesh.
    pub type Transform = Matrix4<Real>;
}
