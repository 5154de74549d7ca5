use crate::bounding_volume::Aabb;
use crate::math::{Point, Real};
use crate::partitioning::Bvh;
use crate::shape::Triangle;
use alloc::vec::Vec;

/// Indicated an inconsistency while building a triangle mesh.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum TriMeshBuilderError {
    /// A triangle mesh must contain at least one triangle.
    #[error("A triangle mesh must contain at least one triangle.")]
    EmptyIndices,
    /// A triangle references a vertex that doesn’t exist.
    #[error("triangle {triangle} references the vertex {index} but the mesh only has {num_vertices} vertices.")]
    IndexOutOfBounds {
        /// The triangle with the invalid index.
        triangle: u32,
        /// The invalid vertex index.
        index: u32,
        /// The number of vertices of the mesh.
        num_vertices: u32,
    },
    /// A flat index buffer whose length isn’t a multiple of 3.
    #[error("the flat index buffer has {0} elements, which is not a multiple of 3.")]
    IncompleteTriangle(usize),
}

/// A triangle mesh.
///
/// This is the input of the voxelizers. The mesh is expected to be closed (watertight) for
/// the voxelization to give meaningful results, but this is not checked.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct TriMesh {
    bvh: Bvh,
    vertices: Vec<Point<Real>>,
    indices: Vec<[u32; 3]>,
}

impl TriMesh {
    /// Creates a new triangle mesh from a vertex buffer and an index buffer.
    pub fn new(
        vertices: Vec<Point<Real>>,
        indices: Vec<[u32; 3]>,
    ) -> Result<Self, TriMeshBuilderError> {
        if indices.is_empty() {
            return Err(TriMeshBuilderError::EmptyIndices);
        }

        let num_vertices = vertices.len() as u32;
        for (triangle, idx) in indices.iter().enumerate() {
            if let Some(index) = idx.iter().find(|i| **i >= num_vertices) {
                return Err(TriMeshBuilderError::IndexOutOfBounds {
                    triangle: triangle as u32,
                    index: *index,
                    num_vertices,
                });
            }
        }

        let mut result = Self {
            bvh: Bvh::new(),
            vertices,
            indices,
        };
        result.rebuild_bvh();
        Ok(result)
    }

    /// Creates a new triangle mesh from buffers already known to be valid.
    pub(crate) fn new_unchecked(vertices: Vec<Point<Real>>, indices: Vec<[u32; 3]>) -> Self {
        debug_assert!(!indices.is_empty());
        let mut result = Self {
            bvh: Bvh::new(),
            vertices,
            indices,
        };
        result.rebuild_bvh();
        result
    }

    /// Creates a new triangle mesh from a vertex buffer and a flat index buffer where each
    /// consecutive triplet of indices forms a triangle.
    pub fn from_flat_indices(
        vertices: Vec<Point<Real>>,
        indices: &[u32],
    ) -> Result<Self, TriMeshBuilderError> {
        if indices.len() % 3 != 0 {
            return Err(TriMeshBuilderError::IncompleteTriangle(indices.len()));
        }

        let indices = indices
            .chunks_exact(3)
            .map(|idx| [idx[0], idx[1], idx[2]])
            .collect();
        Self::new(vertices, indices)
    }

    fn rebuild_bvh(&mut self) {
        let leaves = self
            .triangles()
            .map(|tri| tri.local_aabb())
            .enumerate();
        self.bvh = Bvh::from_iter(leaves);
    }

    /// Reverse the orientation of every triangle of this mesh.
    pub fn reverse(&mut self) {
        self.indices.iter_mut().for_each(|idx| idx.swap(0, 1));
    }

    /// Merges `other` into `self`.
    ///
    /// The resulting mesh is not checked for self-intersections.
    pub fn append(&mut self, other: &TriMesh) {
        let base_id = self.vertices.len() as u32;
        self.vertices.extend_from_slice(other.vertices());
        self.indices.extend(
            other
                .indices()
                .iter()
                .map(|idx| [idx[0] + base_id, idx[1] + base_id, idx[2] + base_id]),
        );
        self.rebuild_bvh();
    }

    /// Gets the local axis-aligned bounding box of this triangle mesh.
    pub fn local_aabb(&self) -> Aabb {
        self.bvh.root_aabb()
    }

    /// The acceleration structure used by this triangle-mesh.
    pub fn bvh(&self) -> &Bvh {
        &self.bvh
    }

    /// The number of triangles forming this mesh.
    pub fn num_triangles(&self) -> usize {
        self.indices.len()
    }

    /// Get the `i`-th triangle of this mesh.
    pub fn triangle(&self, i: u32) -> Triangle {
        let idx = self.indices[i as usize];
        Triangle::new(
            self.vertices[idx[0] as usize],
            self.vertices[idx[1] as usize],
            self.vertices[idx[2] as usize],
        )
    }

    /// An iterator through all the triangles of this mesh.
    pub fn triangles(&self) -> impl ExactSizeIterator<Item = Triangle> + '_ {
        self.indices.iter().map(move |ids| {
            Triangle::new(
                self.vertices[ids[0] as usize],
                self.vertices[ids[1] as usize],
                self.vertices[ids[2] as usize],
            )
        })
    }

    /// The vertex buffer of this mesh.
    pub fn vertices(&self) -> &[Point<Real>] {
        &self.vertices
    }

    /// The index buffer of this mesh.
    pub fn indices(&self) -> &[[u32; 3]] {
        &self.indices
    }
}
