//! Triangle mesh generation from geometric shapes.
//!
//! A triangle mesh is represented either as a pair of buffers
//! `(Vec<Point<Real>>, Vec<[u32; 3]>)` or directly as a [`TriMesh`](crate::shape::TriMesh).
//! Triangles follow a counter-clockwise winding order when viewed from outside the shape.

pub use self::aabb_to_trimesh::aabb_to_trimesh;

mod aabb_to_trimesh;
