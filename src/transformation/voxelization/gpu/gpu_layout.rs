use crate::shape::TriMesh;
use crate::transformation::voxelization::GridDescriptor;
use alloc::vec::Vec;
use bytemuck::{Pod, Zeroable};

/// The workgroup size of every kernel, matching `@workgroup_size` in the shader.
pub(super) const WORKGROUP_SIZE: [u32; 3] = [4, 4, 4];

/// A mesh vertex as laid out in the vertex storage buffer.
///
/// Positions are padded to four components to match the alignment of `vec3<f32>` in
/// storage buffers.
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct GpuVertex {
    /// The vertex position, relative to the grid origin.
    pub position: [f32; 3],
    /// Unused.
    pub padding: f32,
}

static_assertions::assert_eq_size!(GpuVertex, [f32; 4]);

impl GpuVertex {
    /// Creates a vertex at the given position.
    pub fn new(position: [f32; 3]) -> Self {
        Self {
            position,
            padding: 0.0,
        }
    }
}

/// The uniform parameters shared by the kernels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct GpuGridParams {
    /// The cell extents, `w` unused.
    pub cell_size: [f32; 4],
    /// The grid resolution, with the number of triangles in `w`.
    pub resolution: [u32; 4],
}

static_assertions::assert_eq_size!(GpuGridParams, [u32; 8]);

impl GpuGridParams {
    /// The parameters of a dispatch over `desc` with `num_triangles` triangles.
    pub fn new(desc: &GridDescriptor, num_triangles: u32) -> Self {
        let cell_size = desc.cell_size();
        let [w, h, d] = desc.resolution;

        Self {
            cell_size: [cell_size.x as f32, cell_size.y as f32, cell_size.z as f32, 0.0],
            resolution: [w, h, d, num_triangles],
        }
    }
}

/// The vertices of `mesh`, relative to the origin of the grid described by `desc`.
///
/// The subtraction happens at full precision before the conversion to `f32`.
pub(super) fn mesh_vertices(mesh: &TriMesh, desc: &GridDescriptor) -> Vec<GpuVertex> {
    mesh.vertices()
        .iter()
        .map(|pt| {
            let local = pt - desc.bounds.mins;
            GpuVertex::new([local.x as f32, local.y as f32, local.z as f32])
        })
        .collect()
}

/// The flat index buffer of `mesh`.
pub(super) fn mesh_indices(mesh: &TriMesh) -> Vec<u32> {
    mesh.indices().iter().flatten().copied().collect()
}

/// The number of workgroups to dispatch along each axis to cover `resolution`.
pub(super) fn workgroup_counts(resolution: [u32; 3]) -> [u32; 3] {
    [0, 1, 2].map(|i| resolution[i].div_ceil(WORKGROUP_SIZE[i]))
}
