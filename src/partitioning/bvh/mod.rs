pub use bvh_queries::Leaves;
pub use bvh_tree::{Bvh, BvhNode};

mod bvh_build;
mod bvh_queries;
mod bvh_tree;
