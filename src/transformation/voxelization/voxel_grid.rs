use super::VoxelizationError;
use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector};
use alloc::vec;
use alloc::vec::Vec;

/// The occupancy state of a single voxel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum VoxelValue {
    /// The voxel center is outside of the mesh.
    #[default]
    Empty = 0,
    /// The voxel is inside of the mesh, without touching its surface.
    ///
    /// The ray-parity voxelizer marks every inside voxel with this value.
    Interior = 1,
    /// The voxel intersects at least one triangle of the mesh.
    Surface = 2,
}

impl VoxelValue {
    /// Is this voxel part of the solid (either `Interior` or `Surface`)?
    #[inline]
    pub fn is_solid(self) -> bool {
        self != VoxelValue::Empty
    }

    /// The raw value stored into compute buffers.
    #[inline]
    pub fn to_raw(self) -> u32 {
        self as u32
    }

    /// Converts a raw compute-buffer value. Unknown values are read as `Empty`.
    #[inline]
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            1 => VoxelValue::Interior,
            2 => VoxelValue::Surface,
            _ => VoxelValue::Empty,
        }
    }
}

/// A dense 3D grid of voxels over an axis-aligned box.
///
/// Cells are stored contiguously, with the linear index of the cell `(x, y, z)` being
/// `x + y * W + z * W * H` where `W` and `H` are the first two grid dimensions. The cell
/// `(x, y, z)` covers the box `[origin + ijk * cell_size, origin + (ijk + 1) * cell_size]`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct VoxelGrid {
    origin: Point<Real>,
    cell_size: Vector<Real>,
    dimensions: [u32; 3],
    values: Vec<VoxelValue>,
}

impl VoxelGrid {
    /// Creates a grid where every cell is `Empty`.
    pub fn new(
        origin: Point<Real>,
        cell_size: Vector<Real>,
        dimensions: [u32; 3],
    ) -> Result<Self, VoxelizationError> {
        let len = Self::checked_len(&cell_size, dimensions)?;
        Ok(Self {
            origin,
            cell_size,
            dimensions,
            values: vec![VoxelValue::Empty; len],
        })
    }

    /// Creates a grid from explicit cell values, in linear-index order.
    pub fn from_values(
        origin: Point<Real>,
        cell_size: Vector<Real>,
        dimensions: [u32; 3],
        values: Vec<VoxelValue>,
    ) -> Result<Self, VoxelizationError> {
        let expected = Self::checked_len(&cell_size, dimensions)?;
        if values.len() != expected {
            return Err(VoxelizationError::ValueCountMismatch {
                expected,
                found: values.len(),
            });
        }

        Ok(Self {
            origin,
            cell_size,
            dimensions,
            values,
        })
    }

    fn checked_len(
        cell_size: &Vector<Real>,
        dimensions: [u32; 3],
    ) -> Result<usize, VoxelizationError> {
        if dimensions.contains(&0) {
            return Err(VoxelizationError::ZeroResolution(dimensions));
        }

        if cell_size.iter().any(|s| !s.is_finite() || *s <= 0.0) {
            return Err(VoxelizationError::DegenerateBounds);
        }

        Ok(dimensions.iter().map(|d| *d as usize).product())
    }

    /// The number of cells along each axis.
    #[inline]
    pub fn dimensions(&self) -> [u32; 3] {
        self.dimensions
    }

    /// The min corner of the cell `(0, 0, 0)`.
    #[inline]
    pub fn origin(&self) -> Point<Real> {
        self.origin
    }

    /// The extents of a single cell.
    #[inline]
    pub fn cell_size(&self) -> Vector<Real> {
        self.cell_size
    }

    /// The box covered by the whole grid.
    pub fn bounds(&self) -> Aabb {
        let dims = Vector::new(
            self.dimensions[0] as Real,
            self.dimensions[1] as Real,
            self.dimensions[2] as Real,
        );
        Aabb::new(self.origin, self.origin + self.cell_size.component_mul(&dims))
    }

    /// The total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Does this grid have no cell? Never true for a grid built through the public API.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The cell values, in linear-index order.
    #[inline]
    pub fn values(&self) -> &[VoxelValue] {
        &self.values
    }

    /// The linear index of the cell `ijk`.
    #[inline]
    pub fn linear_index(&self, ijk: [u32; 3]) -> usize {
        let [w, h, _] = self.dimensions;
        ijk[0] as usize + ijk[1] as usize * w as usize + ijk[2] as usize * w as usize * h as usize
    }

    /// The cell coordinates of the given linear index.
    #[inline]
    pub fn cell_coords(&self, index: usize) -> [u32; 3] {
        let w = self.dimensions[0] as usize;
        let wh = w * self.dimensions[1] as usize;
        [
            (index % w) as u32,
            ((index % wh) / w) as u32,
            (index / wh) as u32,
        ]
    }

    /// Is `ijk` a valid cell of this grid?
    #[inline]
    pub fn contains_cell(&self, ijk: [u32; 3]) -> bool {
        ijk[0] < self.dimensions[0] && ijk[1] < self.dimensions[1] && ijk[2] < self.dimensions[2]
    }

    /// The value of the cell `ijk`.
    ///
    /// Panics if `ijk` is out of the grid bounds.
    #[inline]
    pub fn get(&self, ijk: [u32; 3]) -> VoxelValue {
        self.values[self.linear_index(ijk)]
    }

    #[inline]
    pub(crate) fn set(&mut self, ijk: [u32; 3], value: VoxelValue) {
        let id = self.linear_index(ijk);
        self.values[id] = value;
    }

    /// Is the cell `ijk` solid?
    #[inline]
    pub fn is_solid(&self, ijk: [u32; 3]) -> bool {
        self.get(ijk).is_solid()
    }

    /// The number of solid cells.
    pub fn num_solid(&self) -> usize {
        self.values.iter().filter(|v| v.is_solid()).count()
    }

    /// The center of the cell `ijk`.
    #[inline]
    pub fn cell_center(&self, ijk: [u32; 3]) -> Point<Real> {
        let offset = Vector::new(
            ijk[0] as Real + 0.5,
            ijk[1] as Real + 0.5,
            ijk[2] as Real + 0.5,
        );
        self.origin + offset.component_mul(&self.cell_size)
    }

    /// The box covered by the cell `ijk`.
    #[inline]
    pub fn cell_aabb(&self, ijk: [u32; 3]) -> Aabb {
        let mins = self.origin
            + Vector::new(ijk[0] as Real, ijk[1] as Real, ijk[2] as Real)
                .component_mul(&self.cell_size);
        Aabb::new(mins, mins + self.cell_size)
    }

    /// Returns a copy of this grid surrounded by `n` layers of `Empty` cells on every face.
    ///
    /// The origin moves by `-n * cell_size` so every original cell keeps its position in space.
    #[must_use]
    pub fn padded(&self, n: u32) -> Self {
        let dimensions = self.dimensions.map(|d| d + 2 * n);
        let origin = self.origin - self.cell_size * n as Real;
        let len = dimensions.iter().map(|d| *d as usize).product();
        let mut result = Self {
            origin,
            cell_size: self.cell_size,
            dimensions,
            values: vec![VoxelValue::Empty; len],
        };

        for (id, value) in self.values.iter().enumerate() {
            if value.is_solid() {
                let [i, j, k] = self.cell_coords(id);
                result.set([i + n, j + n, k + n], *value);
            }
        }

        result
    }

    /// Are all the cells on the six faces of this grid `Empty`?
    ///
    /// This is the precondition of the cavity classification.
    pub fn is_padded(&self) -> bool {
        let [w, h, d] = self.dimensions;
        self.values.iter().enumerate().all(|(id, value)| {
            let [i, j, k] = self.cell_coords(id);
            let on_boundary =
                i == 0 || j == 0 || k == 0 || i == w - 1 || j == h - 1 || k == d - 1;
            !on_boundary || !value.is_solid()
        })
    }
}
