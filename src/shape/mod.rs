//! Shapes supported by vessel3d.

pub use self::triangle::Triangle;
pub use self::trimesh::{TriMesh, TriMeshBuilderError};

mod triangle;
mod trimesh;
