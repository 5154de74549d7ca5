//! Transformation of triangle meshes into voxel grids, and classification of those grids.

pub use self::to_trimesh::aabb_to_trimesh;

/// Classification of voxel grids into solid, hull, and cavity cells.
pub mod hollowing;
/// Voxelization of a 3D triangle mesh.
pub mod voxelization;

mod to_trimesh;
