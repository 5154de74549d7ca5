//! Spatial partitioning tools.

pub use self::bvh::{Bvh, BvhNode, Leaves};

/// A static bounding-volume hierarchy over triangle AABBs.
pub mod bvh;
