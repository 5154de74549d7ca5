use super::gpu_buffers::{cell_buffer_size, GpuBuffers};
use super::gpu_layout::{self, GpuGridParams};
use crate::shape::TriMesh;
use crate::transformation::voxelization::{
    GridDescriptor, VoxelGrid, VoxelValue, VoxelizationError, Voxelizer,
};
use alloc::borrow::Cow;
use wgpu::{
    BindGroup, BindGroupDescriptor, BindGroupEntry, BindGroupLayout, BindGroupLayoutDescriptor,
    BindGroupLayoutEntry, BindingType, BufferBindingType, CommandEncoderDescriptor,
    ComputePassDescriptor, ComputePipeline, ComputePipelineDescriptor, Device, Queue,
    PipelineLayoutDescriptor, ShaderModuleDescriptor, ShaderSource, ShaderStages,
};

/// A GPU device and its queue.
#[derive(Debug)]
pub struct GpuDevice {
    device: Device,
    queue: Queue,
}

impl GpuDevice {
    /// Wraps a device opened by the caller.
    pub fn new(device: Device, queue: Queue) -> Self {
        Self { device, queue }
    }

    /// Opens a device on the first adapter matching `power_preference`.
    ///
    /// Blocks until the adapter and the device are ready.
    pub fn request(power_preference: wgpu::PowerPreference) -> Result<Self, VoxelizationError> {
        futures::executor::block_on(Self::open(power_preference))
    }

    async fn open(power_preference: wgpu::PowerPreference) -> Result<Self, VoxelizationError> {
        let instance = wgpu::Instance::default();
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference,
                force_fallback_adapter: false,
                compatible_surface: None,
            })
            .await
            .ok_or(VoxelizationError::NoGpuAdapter)?;
        log::debug!("voxelizing on {:?}.", adapter.get_info());

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("voxelizer"),
                    features: wgpu::Features::empty(),
                    limits: wgpu::Limits::downlevel_defaults(),
                },
                None,
            )
            .await
            .map_err(|err| {
                log::warn!("failed to open a GPU device: {}.", err);
                VoxelizationError::GpuDeviceUnavailable
            })?;

        Ok(Self::new(device, queue))
    }

    /// The device.
    pub fn device(&self) -> &Device {
        &self.device
    }

    /// The queue of the device.
    pub fn queue(&self) -> &Queue {
        &self.queue
    }
}

/// The compiled kernels.
#[derive(Debug)]
struct Kernels {
    bind_group_layout: BindGroupLayout,
    clear_cells: ComputePipeline,
    mark_surface: ComputePipeline,
    fill_interior: ComputePipeline,
}

fn buffer_entry(binding: u32, ty: BufferBindingType) -> BindGroupLayoutEntry {
    BindGroupLayoutEntry {
        binding,
        visibility: ShaderStages::COMPUTE,
        ty: BindingType::Buffer {
            ty,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

impl Kernels {
    fn new(device: &Device) -> Self {
        let shader_module = device.create_shader_module(ShaderModuleDescriptor {
            label: Some("cell overlap"),
            source: ShaderSource::Wgsl(Cow::Borrowed(include_str!("cell_overlap.wgsl"))),
        });

        let bind_group_layout = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
            label: None,
            entries: &[
                buffer_entry(0, BufferBindingType::Uniform),
                buffer_entry(1, BufferBindingType::Storage { read_only: true }),
                buffer_entry(2, BufferBindingType::Storage { read_only: true }),
                buffer_entry(3, BufferBindingType::Storage { read_only: false }),
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
            label: None,
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = |entry_point: &str| {
            device.create_compute_pipeline(&ComputePipelineDescriptor {
                label: Some(entry_point),
                layout: Some(&pipeline_layout),
                module: &shader_module,
                entry_point,
            })
        };

        Self {
            clear_cells: pipeline("clear_cells"),
            mark_surface: pipeline("mark_surface"),
            fill_interior: pipeline("fill_interior"),
            bind_group_layout,
        }
    }

    fn bind_group(&self, device: &Device, buffers: &GpuBuffers) -> BindGroup {
        device.create_bind_group(&BindGroupDescriptor {
            label: None,
            layout: &self.bind_group_layout,
            entries: &[
                BindGroupEntry {
                    binding: 0,
                    resource: buffers.params.as_entire_binding(),
                },
                BindGroupEntry {
                    binding: 1,
                    resource: buffers.vertices.as_entire_binding(),
                },
                BindGroupEntry {
                    binding: 2,
                    resource: buffers.indices.as_entire_binding(),
                },
                BindGroupEntry {
                    binding: 3,
                    resource: buffers.cells.as_entire_binding(),
                },
            ],
        })
    }
}

#[derive(Debug)]
struct GpuContext {
    gpu: GpuDevice,
    kernels: Kernels,
}

impl GpuContext {
    fn new(gpu: GpuDevice) -> Self {
        let kernels = Kernels::new(&gpu.device);
        Self { gpu, kernels }
    }

    /// Fails if the grid does not fit in a storage binding or a dispatch of the device.
    fn check_limits(&self, desc: &GridDescriptor) -> Result<(), VoxelizationError> {
        let limits = self.gpu.device.limits();
        let fits_binding = cell_buffer_size(desc) <= limits.max_storage_buffer_binding_size as u64;
        let fits_dispatch = gpu_layout::workgroup_counts(desc.resolution)
            .iter()
            .all(|count| *count <= limits.max_compute_workgroups_per_dimension);

        if fits_binding && fits_dispatch {
            Ok(())
        } else {
            Err(VoxelizationError::GridTooLarge(desc.resolution))
        }
    }
}

/// Voxelizes a mesh with compute kernels running on a GPU.
///
/// The occupancy semantics are the ones of the
/// [`CellOverlapVoxelizer`](crate::transformation::voxelization::CellOverlapVoxelizer): cells
/// overlapping the surface are [`VoxelValue::Surface`], and the other cells with a center
/// inside the mesh are [`VoxelValue::Interior`]. The fill kernel counts the crossings of an
/// upward ray from each cell center. A ray through an edge shared by two triangles is
/// counted by exactly one of them.
///
/// [`Self::dispatch`] submits the kernels and returns without waiting. The results are only
/// available after [`Self::readback`], which blocks until the device is done and the cell
/// buffer is mapped. The buffers are replaced whenever the grid resolution changes.
#[derive(Debug, Default)]
pub struct GpuVoxelizer {
    context: Option<GpuContext>,
    buffers: Option<GpuBuffers>,
    pending: Option<GridDescriptor>,
}

/// Opens the default high-performance device on first use.
fn ensure_context(slot: &mut Option<GpuContext>) -> Result<&GpuContext, VoxelizationError> {
    if slot.is_none() {
        *slot = Some(GpuContext::new(GpuDevice::request(
            wgpu::PowerPreference::HighPerformance,
        )?));
    }

    slot.as_ref().ok_or(VoxelizationError::NoGpuAdapter)
}

impl GpuVoxelizer {
    /// A voxelizer opening a device on its first dispatch.
    pub fn new() -> Self {
        Self::default()
    }

    /// A voxelizer running on the given device.
    pub fn with_device(gpu: GpuDevice) -> Self {
        Self {
            context: Some(GpuContext::new(gpu)),
            ..Self::default()
        }
    }

    /// The buffers of the last dispatch, if still allocated.
    pub fn buffers(&self) -> Option<&GpuBuffers> {
        self.buffers.as_ref()
    }

    /// Is there a dispatched result waiting to be read back?
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Frees the device buffers. Any result not read back yet is discarded.
    pub fn release(&mut self) {
        self.buffers = None;
        self.pending = None;
    }

    /// Uploads `mesh` and submits the kernels over the grid described by `desc`.
    ///
    /// A result not read back yet is discarded.
    pub fn dispatch(
        &mut self,
        mesh: &TriMesh,
        desc: &GridDescriptor,
    ) -> Result<(), VoxelizationError> {
        desc.validate()?;
        self.pending = None;

        let context = ensure_context(&mut self.context)?;
        context.check_limits(desc)?;
        let (device, queue) = (&context.gpu.device, &context.gpu.queue);

        if let Some(stale) = self.buffers.as_ref().filter(|b| !b.is_valid_for(desc)) {
            log::debug!(
                "reallocating the voxel cell buffers: {:?} -> {:?}.",
                stale.resolution(),
                desc.resolution
            );
            self.buffers = None;
        }
        let buffers = self
            .buffers
            .get_or_insert_with(|| GpuBuffers::new(device, desc));

        let params = GpuGridParams::new(desc, mesh.num_triangles() as u32);
        let vertices = gpu_layout::mesh_vertices(mesh, desc);
        let indices = gpu_layout::mesh_indices(mesh);
        buffers.upload(device, queue, &params, &vertices, &indices);

        let bind_group = context.kernels.bind_group(device, buffers);
        let [x, y, z] = gpu_layout::workgroup_counts(desc.resolution);
        let mut encoder = device.create_command_encoder(&CommandEncoderDescriptor {
            label: Some("cell overlap"),
        });
        {
            let mut compute_pass =
                encoder.begin_compute_pass(&ComputePassDescriptor { label: None });
            compute_pass.set_bind_group(0, &bind_group, &[]);

            for pipeline in [
                &context.kernels.clear_cells,
                &context.kernels.mark_surface,
                &context.kernels.fill_interior,
            ] {
                compute_pass.set_pipeline(pipeline);
                compute_pass.dispatch_workgroups(x, y, z);
            }
        }
        buffers.copy_cells_for_readback(&mut encoder);
        let _ = queue.submit(Some(encoder.finish()));

        log::debug!(
            "gpu cell-overlap dispatch: {} triangles, {:?} cells.",
            mesh.num_triangles(),
            desc.resolution
        );
        self.pending = Some(*desc);
        Ok(())
    }

    /// Waits for the last dispatch and converts its cell buffer into a voxel grid.
    ///
    /// Fails with [`VoxelizationError::ReadbackNotReady`] if nothing was dispatched since
    /// the last readback.
    pub fn readback(&mut self) -> Result<VoxelGrid, VoxelizationError> {
        let desc = self
            .pending
            .take()
            .ok_or(VoxelizationError::ReadbackNotReady)?;
        let (Some(context), Some(buffers)) = (&self.context, &self.buffers) else {
            return Err(VoxelizationError::ReadbackNotReady);
        };

        let values = buffers
            .read_cells(&context.gpu.device, desc.num_cells())?
            .into_iter()
            .map(VoxelValue::from_raw)
            .collect();

        VoxelGrid::from_values(desc.bounds.mins, desc.cell_size(), desc.resolution, values)
    }
}

impl Voxelizer for GpuVoxelizer {
    fn voxelize(
        &mut self,
        mesh: &TriMesh,
        desc: &GridDescriptor,
    ) -> Result<VoxelGrid, VoxelizationError> {
        self.dispatch(mesh, desc)?;
        self.readback()
    }
}
