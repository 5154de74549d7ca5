use super::VoxelizationError;
use crate::bounding_volume::Aabb;
use crate::math::{Real, Vector};
use crate::shape::TriMesh;

/// The region and resolution of a voxel grid to build.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct GridDescriptor {
    /// The box covered by the grid.
    pub bounds: Aabb,
    /// The number of cells along each axis.
    pub resolution: [u32; 3],
}

impl GridDescriptor {
    /// A grid with an explicit resolution over `bounds`.
    ///
    /// Cells are not necessarily cubic.
    pub fn with_resolution(bounds: Aabb, resolution: [u32; 3]) -> Self {
        Self { bounds, resolution }
    }

    /// A grid of cubic cells of half-size `half_cell_size` covering `bounds`.
    ///
    /// The resolution along each axis is `ceil(extent / (2 * half_cell_size))` (at least 1) so
    /// partially covered boundary cells are never dropped. The grid bounds are then grown
    /// symmetrically so every cell has extents exactly `2 * half_cell_size`.
    pub fn with_half_cell_size(
        bounds: Aabb,
        half_cell_size: Real,
    ) -> Result<Self, VoxelizationError> {
        if !half_cell_size.is_finite() || half_cell_size <= 0.0 {
            return Err(VoxelizationError::InvalidCellSize(half_cell_size));
        }

        if !bounds.is_valid() {
            return Err(VoxelizationError::DegenerateBounds);
        }

        let cell_size = half_cell_size * 2.0;
        let extents = bounds.extents();
        let resolution = extents.map(|e| ((e / cell_size).ceil() as u32).max(1));
        let grown = resolution.map(|r| r as Real * cell_size);

        Ok(Self {
            bounds: Aabb::from_half_extents(bounds.center(), grown * 0.5),
            resolution: resolution.into(),
        })
    }

    /// A grid of cubic cells covering the bounding box of `mesh` scaled by `scale` about its
    /// center.
    pub fn from_mesh(
        mesh: &TriMesh,
        scale: &Vector<Real>,
        half_cell_size: Real,
    ) -> Result<Self, VoxelizationError> {
        let bounds = mesh.local_aabb().scaled_wrt_center(scale);
        Self::with_half_cell_size(bounds, half_cell_size)
    }

    /// The extents of a single cell.
    pub fn cell_size(&self) -> Vector<Real> {
        let [w, h, d] = self.resolution;
        self.bounds
            .extents()
            .component_div(&Vector::new(w as Real, h as Real, d as Real))
    }

    /// The total number of cells.
    pub fn num_cells(&self) -> usize {
        self.resolution.iter().map(|r| *r as usize).product()
    }

    /// Checks that this descriptor describes a non-empty grid with positive cell sizes.
    pub fn validate(&self) -> Result<(), VoxelizationError> {
        if self.resolution.contains(&0) {
            return Err(VoxelizationError::ZeroResolution(self.resolution));
        }

        let extents = self.bounds.extents();
        if extents.iter().any(|e| !e.is_finite() || *e <= 0.0) {
            return Err(VoxelizationError::DegenerateBounds);
        }

        Ok(())
    }
}
