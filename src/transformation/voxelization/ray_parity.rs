use super::{GridDescriptor, VoxelGrid, VoxelValue, VoxelizationError, Voxelizer};
use crate::math::{Point, Real, Vector};
use crate::query::{Ray, RayCast};
use crate::shape::TriMesh;
use alloc::vec::Vec;
use smallvec::SmallVec;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The distance under which two hits along a column ray are merged, relative to the depth
/// of the voxelized region.
pub const RAY_EPSILON_FACTOR: Real = 1.0e-5;

/// A contiguous range `[first, last]` of solid cells along a column.
pub(super) type Span = (u32, u32);

/// Voxelizes a mesh by counting surface crossings along rays.
///
/// One ray is cast along `+Z` through the center of every `(x, y)` column of the grid. The
/// ray starts below the grid and toggles an inside/outside flag at each surface crossing.
/// Each cell whose center lies between an entry and the following exit is marked
/// [`VoxelValue::Interior`]. Hit triangles orientations are ignored.
///
/// The crossings of a column are gathered in a single pass over the triangles whose boxes
/// the column crosses. Hits closer than the ray epsilon to the previous crossing are the
/// same crossing, through an edge or a vertex shared by several triangles.
///
/// The mesh is assumed to be watertight. Gaps in the surface result in incorrectly filled
/// columns and are not reported.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RayParityVoxelizer {
    /// The distance under which two hits of a ray are merged, relative to the depth of the
    /// grid.
    pub ray_epsilon_factor: Real,
}

impl Default for RayParityVoxelizer {
    fn default() -> Self {
        Self {
            ray_epsilon_factor: RAY_EPSILON_FACTOR,
        }
    }
}

/// Casts the `+Z` ray of a grid column and collects its solid spans.
pub(super) struct ColumnTracer<'a> {
    mesh: &'a TriMesh,
    mins: Point<Real>,
    cell_size: Vector<Real>,
    start_z: Real,
    epsilon: Real,
    last_k: u32,
}

impl<'a> ColumnTracer<'a> {
    pub fn new(mesh: &'a TriMesh, desc: &GridDescriptor, epsilon_factor: Real) -> Self {
        let depth = desc.bounds.extents().z;
        // Below a few ulps of the grid coordinates, two hits on a shared edge may not merge.
        let magnitude = desc.bounds.mins.z.abs().max(desc.bounds.maxs.z.abs());
        let epsilon = (epsilon_factor * depth).max(magnitude * Real::EPSILON * 4.0);

        Self {
            mesh,
            mins: desc.bounds.mins,
            cell_size: desc.cell_size(),
            start_z: desc.bounds.mins.z - depth,
            epsilon,
            last_k: desc.resolution[2] - 1,
        }
    }

    /// The `z` coordinates where the ray of the column through `(x, y)` crosses the mesh,
    /// sorted, with the hits closer than the ray epsilon to the previous one dropped.
    ///
    /// Such hits belong to the same crossing, through an edge or a vertex shared by several
    /// triangles.
    pub fn crossings(&self, x: Real, y: Real) -> SmallVec<[Real; 8]> {
        let ray = Ray::new(Point::new(x, y, self.start_z), Vector::z());
        let mut hits: SmallVec<[Real; 8]> = self
            .mesh
            .bvh()
            .column_leaves(x, y)
            .filter_map(|triangle| self.mesh.triangle(triangle).cast_local_ray(&ray, Real::MAX))
            .map(|toi| ray.origin.z + toi)
            .collect();
        hits.sort_unstable_by(Real::total_cmp);

        let mut last = Real::NEG_INFINITY;
        hits.retain(|z| {
            let keep = *z - last > self.epsilon;
            if keep {
                last = *z;
            }
            keep
        });
        hits
    }

    /// The spans of cells of the column `(i, j)` with a center inside the mesh.
    pub fn trace(&self, i: u32, j: u32) -> SmallVec<[Span; 4]> {
        let x = self.mins.x + (i as Real + 0.5) * self.cell_size.x;
        let y = self.mins.y + (j as Real + 0.5) * self.cell_size.y;
        let crossings = self.crossings(x, y);

        if crossings.len() % 2 == 1 {
            log::debug!(
                "column ({}, {}) crosses the surface an odd number of times, the mesh is likely open.",
                i,
                j
            );
        }

        crossings
            .chunks_exact(2)
            .filter_map(|pair| self.cells_between(pair[0], pair[1]))
            .collect()
    }

    /// The cells with a center in `[entry, exit]`, clamped to the grid.
    fn cells_between(&self, entry: Real, exit: Real) -> Option<Span> {
        let first = ((entry - self.mins.z) / self.cell_size.z - 0.5)
            .ceil()
            .max(0.0);
        let last = ((exit - self.mins.z) / self.cell_size.z - 0.5)
            .floor()
            .min(self.last_k as Real);

        (first <= last).then_some((first as u32, last as u32))
    }
}

impl RayParityVoxelizer {
    /// A ray-parity voxelizer with the default ray epsilon.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Voxelizer for RayParityVoxelizer {
    fn voxelize(
        &mut self,
        mesh: &TriMesh,
        desc: &GridDescriptor,
    ) -> Result<VoxelGrid, VoxelizationError> {
        desc.validate()?;

        let [w, h, d] = desc.resolution;
        let mut grid = VoxelGrid::new(desc.bounds.mins, desc.cell_size(), desc.resolution)?;
        let tracer = ColumnTracer::new(mesh, desc, self.ray_epsilon_factor);

        for (id, spans) in trace_columns(&tracer, [w, h]).iter().enumerate() {
            let (i, j) = (id as u32 % w, id as u32 / w);
            for (first, last) in spans {
                for k in *first..=*last {
                    grid.set([i, j, k], VoxelValue::Interior);
                }
            }
        }

        log::debug!(
            "ray-parity voxelization of {} triangles: {}x{}x{} cells, {} solid.",
            mesh.num_triangles(),
            w,
            h,
            d,
            grid.num_solid()
        );

        Ok(grid)
    }
}

/// The spans of every column of a `w x h` grid, in `i + j * w` order.
pub(super) fn trace_columns(tracer: &ColumnTracer<'_>, [w, h]: [u32; 2]) -> Vec<SmallVec<[Span; 4]>> {
    let num_columns = w as usize * h as usize;

    #[cfg(not(feature = "parallel"))]
    let columns: Vec<_> = (0..num_columns)
        .map(|id| tracer.trace(id as u32 % w, id as u32 / w))
        .collect();
    #[cfg(feature = "parallel")]
    let columns: Vec<_> = (0..num_columns)
        .into_par_iter()
        .map(|id| tracer.trace(id as u32 % w, id as u32 / w))
        .collect();

    columns
}
