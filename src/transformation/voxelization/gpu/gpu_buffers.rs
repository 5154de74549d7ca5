use super::gpu_layout::{GpuGridParams, GpuVertex};
use crate::transformation::voxelization::{GridDescriptor, VoxelizationError};
use alloc::vec::Vec;
use core::mem::size_of;
use futures::channel::oneshot;
use wgpu::{Buffer, BufferAddress, BufferDescriptor, BufferUsages, Device, Queue};

// Zero-sized buffers cannot be bound.
const MIN_BUFFER_SIZE: BufferAddress = 16;
const MIRROR_USAGE: BufferUsages = BufferUsages::STORAGE.union(BufferUsages::COPY_DST);

/// The device buffers of a [`GpuVoxelizer`](super::GpuVoxelizer).
///
/// The cell and staging buffers are sized for one grid resolution and must be replaced when
/// it changes. The mesh mirrors only grow, and are reused as long as they are large enough.
#[derive(Debug)]
pub struct GpuBuffers {
    pub(super) params: Buffer,
    pub(super) vertices: Buffer,
    pub(super) indices: Buffer,
    pub(super) cells: Buffer,
    staging: Buffer,
    resolution: [u32; 3],
}

impl Drop for GpuBuffers {
    fn drop(&mut self) {
        self.params.destroy();
        self.vertices.destroy();
        self.indices.destroy();
        self.cells.destroy();
        self.staging.destroy();
    }
}

/// The size in bytes of the cell buffer of a grid.
pub(super) fn cell_buffer_size(desc: &GridDescriptor) -> BufferAddress {
    (desc.num_cells() * size_of::<u32>()) as BufferAddress
}

fn create_buffer(
    device: &Device,
    label: &str,
    size: BufferAddress,
    usage: BufferUsages,
) -> Buffer {
    device.create_buffer(&BufferDescriptor {
        label: Some(label),
        size: size.max(MIN_BUFFER_SIZE),
        usage,
        mapped_at_creation: false,
    })
}

impl GpuBuffers {
    /// Allocates the buffers of a dispatch over the grid described by `desc`.
    pub fn new(device: &Device, desc: &GridDescriptor) -> Self {
        let cells_size = cell_buffer_size(desc);

        Self {
            params: create_buffer(
                device,
                "voxel grid params",
                size_of::<GpuGridParams>() as BufferAddress,
                BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            ),
            vertices: create_buffer(device, "voxel mesh vertices", 0, MIRROR_USAGE),
            indices: create_buffer(device, "voxel mesh indices", 0, MIRROR_USAGE),
            cells: create_buffer(
                device,
                "voxel cells",
                cells_size,
                BufferUsages::STORAGE | BufferUsages::COPY_SRC,
            ),
            staging: create_buffer(
                device,
                "voxel cells readback",
                cells_size,
                BufferUsages::MAP_READ | BufferUsages::COPY_DST,
            ),
            resolution: desc.resolution,
        }
    }

    /// The resolution the cell buffer was sized for.
    pub fn resolution(&self) -> [u32; 3] {
        self.resolution
    }

    /// Can these buffers hold the cells of the grid described by `desc`?
    pub fn is_valid_for(&self, desc: &GridDescriptor) -> bool {
        self.resolution == desc.resolution && self.cells.size() >= cell_buffer_size(desc)
    }

    /// Writes the mesh mirrors and the kernel parameters.
    ///
    /// Mirrors too small for the new mesh are reallocated first.
    pub fn upload(
        &mut self,
        device: &Device,
        queue: &Queue,
        params: &GpuGridParams,
        vertices: &[GpuVertex],
        indices: &[u32],
    ) {
        let vertex_bytes: &[u8] = bytemuck::cast_slice(vertices);
        let index_bytes: &[u8] = bytemuck::cast_slice(indices);

        if self.vertices.size() < vertex_bytes.len() as BufferAddress {
            self.vertices.destroy();
            self.vertices = create_buffer(
                device,
                "voxel mesh vertices",
                vertex_bytes.len() as BufferAddress,
                MIRROR_USAGE,
            );
        }
        if self.indices.size() < index_bytes.len() as BufferAddress {
            self.indices.destroy();
            self.indices = create_buffer(
                device,
                "voxel mesh indices",
                index_bytes.len() as BufferAddress,
                MIRROR_USAGE,
            );
        }

        queue.write_buffer(&self.params, 0, bytemuck::bytes_of(params));
        queue.write_buffer(&self.vertices, 0, vertex_bytes);
        queue.write_buffer(&self.indices, 0, index_bytes);
    }

    /// Records the copy of the cell buffer into the readback buffer.
    pub fn copy_cells_for_readback(&self, encoder: &mut wgpu::CommandEncoder) {
        encoder.copy_buffer_to_buffer(&self.cells, 0, &self.staging, 0, self.cells.size());
    }

    /// Waits for the readback buffer to be mapped, and copies the first `len` cells out of it.
    pub fn read_cells(&self, device: &Device, len: usize) -> Result<Vec<u32>, VoxelizationError> {
        let slice = self.staging.slice(..);
        let (sender, receiver) = oneshot::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = sender.send(result);
        });
        let _ = device.poll(wgpu::Maintain::Wait);

        match futures::executor::block_on(receiver) {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                log::warn!("failed to map the voxel readback buffer: {}.", err);
                return Err(VoxelizationError::BufferMapFailed);
            }
            Err(_) => {
                log::warn!("the voxel readback buffer mapping was dropped.");
                return Err(VoxelizationError::BufferMapFailed);
            }
        }

        let cells = {
            let data = slice.get_mapped_range();
            let cells: &[u32] = bytemuck::cast_slice(&data);
            cells[..len.min(cells.len())].to_vec()
        };
        self.staging.unmap();
        Ok(cells)
    }
}
