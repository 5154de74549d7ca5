use super::ray_parity::{self, ColumnTracer, RAY_EPSILON_FACTOR};
use super::{CellBuffer, GridDescriptor, VoxelGrid, VoxelValue, VoxelizationError, Voxelizer};
use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector};
use crate::query;
use crate::shape::TriMesh;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Voxelizes a mesh on the CPU with two kernels writing a [`CellBuffer`].
///
/// The surface kernel marks [`VoxelValue::Surface`] every cell whose interior overlaps at
/// least one triangle. A triangle merely touching the boundary of a cell does not mark it.
/// The fill kernel then casts one ray per column, like
/// [`RayParityVoxelizer`](super::RayParityVoxelizer), and marks [`VoxelValue::Interior`]
/// every remaining cell with a center inside the mesh.
///
/// Results are only available after an explicit [`Self::readback`] following a
/// [`Self::dispatch`]. The buffer is kept between dispatches and reallocated whenever
/// the grid resolution changes. See `GpuVoxelizer` (behind the `gpu` feature) for the same
/// kernels running on a device.
#[derive(Clone, Debug, Default)]
pub struct CellOverlapVoxelizer {
    buffer: CellBuffer,
    pending: Option<GridDescriptor>,
}

#[derive(Copy, Clone)]
struct CellLayout {
    origin: Point<Real>,
    cell_size: Vector<Real>,
    resolution: [u32; 3],
}

impl CellLayout {
    fn coords(&self, id: usize) -> [u32; 3] {
        let w = self.resolution[0] as usize;
        let wh = w * self.resolution[1] as usize;
        [(id % w) as u32, ((id % wh) / w) as u32, (id / wh) as u32]
    }

    fn cell_aabb(&self, id: usize) -> Aabb {
        let [i, j, k] = self.coords(id);
        let mins = self.origin
            + Vector::new(i as Real, j as Real, k as Real).component_mul(&self.cell_size);
        Aabb::new(mins, mins + self.cell_size)
    }
}

impl CellOverlapVoxelizer {
    /// A voxelizer with an unallocated buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// The cell buffer written by the last dispatch.
    pub fn cell_buffer(&self) -> &CellBuffer {
        &self.buffer
    }

    /// Is there a dispatched result waiting to be read back?
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Frees the cell buffer. Any result not read back yet is discarded.
    pub fn release(&mut self) {
        self.buffer.release();
        self.pending = None;
    }

    /// Runs the surface and fill kernels of `mesh` over the grid described by `desc`.
    ///
    /// A result not read back yet is discarded.
    pub fn dispatch(
        &mut self,
        mesh: &TriMesh,
        desc: &GridDescriptor,
    ) -> Result<(), VoxelizationError> {
        desc.validate()?;
        self.pending = None;

        let previous = self.buffer.resolution();
        if self.buffer.ensure_size(desc) {
            log::debug!(
                "reallocating the voxel cell buffer: {:?} -> {:?}.",
                previous,
                desc.resolution
            );
        }

        let layout = CellLayout {
            origin: desc.bounds.mins,
            cell_size: desc.cell_size(),
            resolution: desc.resolution,
        };
        log::debug!(
            "cell-overlap dispatch: {} triangles, {:?} cells.",
            mesh.num_triangles(),
            layout.resolution
        );

        let tracer = ColumnTracer::new(mesh, desc, RAY_EPSILON_FACTOR);
        let cells = self.buffer.cells_mut();
        surface_kernel(&layout, mesh, cells);
        fill_kernel(&layout, &tracer, cells);

        self.pending = Some(*desc);
        Ok(())
    }

    /// Converts the cell buffer of the last dispatch into a voxel grid.
    ///
    /// Fails with [`VoxelizationError::ReadbackNotReady`] if nothing was dispatched since
    /// the last readback.
    pub fn readback(&mut self) -> Result<VoxelGrid, VoxelizationError> {
        let desc = self
            .pending
            .take()
            .ok_or(VoxelizationError::ReadbackNotReady)?;
        let values = self
            .buffer
            .cells()
            .iter()
            .map(|raw| VoxelValue::from_raw(*raw))
            .collect();

        VoxelGrid::from_values(desc.bounds.mins, desc.cell_size(), desc.resolution, values)
    }
}

impl Voxelizer for CellOverlapVoxelizer {
    fn voxelize(
        &mut self,
        mesh: &TriMesh,
        desc: &GridDescriptor,
    ) -> Result<VoxelGrid, VoxelizationError> {
        self.dispatch(mesh, desc)?;
        self.readback()
    }
}

/// One invocation per cell: marks the cell as surface if any triangle overlaps it.
fn surface_kernel(layout: &CellLayout, mesh: &TriMesh, cells: &mut [u32]) {
    let invocation = |(id, cell): (usize, &mut u32)| {
        let aabb = layout.cell_aabb(id);
        let overlaps = mesh.bvh().intersect_aabb(&aabb).any(|triangle| {
            query::intersection_test_aabb_triangle(&aabb, &mesh.triangle(triangle))
        });

        if overlaps {
            *cell = VoxelValue::Surface.to_raw();
        }
    };

    #[cfg(not(feature = "parallel"))]
    cells.iter_mut().enumerate().for_each(invocation);
    #[cfg(feature = "parallel")]
    cells.par_iter_mut().enumerate().for_each(invocation);
}

/// Marks interior the empty cells with a center inside the mesh.
///
/// Inside-ness is decided per column by ray parity, so enclosed hollow pockets stay empty.
fn fill_kernel(layout: &CellLayout, tracer: &ColumnTracer<'_>, cells: &mut [u32]) {
    let [w, h, _] = layout.resolution;
    let layer = w as usize * h as usize;
    let empty = VoxelValue::Empty.to_raw();

    for (column, spans) in ray_parity::trace_columns(tracer, [w, h]).iter().enumerate() {
        for (first, last) in spans {
            for k in *first..=*last {
                let cell = &mut cells[column + k as usize * layer];
                if *cell == empty {
                    *cell = VoxelValue::Interior.to_raw();
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::CellOverlapVoxelizer;
    use crate::bounding_volume::Aabb;
    use crate::math::Point;
    use crate::transformation::aabb_to_trimesh;
    use crate::transformation::voxelization::{
        GridDescriptor, RayParityVoxelizer, VoxelValue, VoxelizationError, Voxelizer,
    };

    fn unit_bounds() -> Aabb {
        Aabb::new(Point::new(-1.0, -1.0, -1.0), Point::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn cube_surface_and_interior() {
        let cube = Aabb::new(Point::new(-0.4, -0.4, -0.4), Point::new(0.4, 0.4, 0.4));
        let mesh = aabb_to_trimesh(&cube, false);
        let desc = GridDescriptor::with_resolution(unit_bounds(), [8, 8, 8]);
        let grid = CellOverlapVoxelizer::new().voxelize(&mesh, &desc).unwrap();

        // The faces cut through cells 2 and 5.
        for (id, value) in grid.values().iter().enumerate() {
            let ijk = grid.cell_coords(id);
            let in_range = |r: core::ops::RangeInclusive<u32>| ijk.iter().all(|c| r.contains(c));
            let expected = if in_range(3..=4) {
                VoxelValue::Interior
            } else if in_range(2..=5) {
                VoxelValue::Surface
            } else {
                VoxelValue::Empty
            };
            assert_eq!(*value, expected, "cell {:?}", ijk);
        }

        let ray_parity = RayParityVoxelizer::new().voxelize(&mesh, &desc).unwrap();
        assert_eq!(grid.num_solid(), ray_parity.num_solid());
    }

    #[test]
    fn grid_aligned_walls_gain_no_surface_layer() {
        let cube = Aabb::new(Point::new(-0.5, -0.5, -0.5), Point::new(0.5, 0.5, 0.5));
        let mesh = aabb_to_trimesh(&cube, false);
        let desc = GridDescriptor::with_resolution(unit_bounds(), [8, 8, 8]);
        let grid = CellOverlapVoxelizer::new().voxelize(&mesh, &desc).unwrap();
        let ray_parity = RayParityVoxelizer::new().voxelize(&mesh, &desc).unwrap();

        // The faces only touch cell boundaries.
        assert!(grid.values().iter().all(|v| *v != VoxelValue::Surface));
        assert_eq!(grid.values(), ray_parity.values());
        assert_eq!(grid.num_solid(), 64);
    }

    #[test]
    fn readback_requires_a_dispatch() {
        let mesh = aabb_to_trimesh(&unit_bounds(), false);
        let desc = GridDescriptor::with_resolution(unit_bounds(), [4, 4, 4]);
        let mut voxelizer = CellOverlapVoxelizer::new();

        assert_eq!(
            voxelizer.readback().unwrap_err(),
            VoxelizationError::ReadbackNotReady
        );

        voxelizer.dispatch(&mesh, &desc).unwrap();
        assert!(voxelizer.is_pending());
        let grid = voxelizer.readback().unwrap();
        assert_eq!(grid.num_solid(), 64);
        assert_eq!(
            voxelizer.readback().unwrap_err(),
            VoxelizationError::ReadbackNotReady
        );
    }

    #[test]
    fn cell_buffer_follows_the_resolution() {
        let mesh = aabb_to_trimesh(&unit_bounds(), false);
        let mut voxelizer = CellOverlapVoxelizer::new();

        let coarse = GridDescriptor::with_resolution(unit_bounds(), [2, 2, 2]);
        let fine = GridDescriptor::with_resolution(unit_bounds(), [4, 4, 4]);
        let _ = voxelizer.voxelize(&mesh, &coarse).unwrap();
        assert_eq!(voxelizer.cell_buffer().cells().len(), 8);

        let grid = voxelizer.voxelize(&mesh, &fine).unwrap();
        assert_eq!(voxelizer.cell_buffer().cells().len(), 64);
        assert_eq!(grid.dimensions(), [4, 4, 4]);

        voxelizer.release();
        assert!(voxelizer.cell_buffer().cells().is_empty());
        assert!(!voxelizer.is_pending());
    }
}
