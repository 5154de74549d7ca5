use super::HollowingError;
use crate::transformation::voxelization::VoxelGrid;
use alloc::vec;
use alloc::vec::Vec;

/// The class of a voxel after cavity classification.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum CellClass {
    /// A solid cell connected to the classification seed.
    Solid,
    /// An empty cell touching (26-connectivity) the solid body.
    Hull,
    /// A cell never reached by the classification: enclosed pockets, far exterior space,
    /// and solid islands disconnected from the seed.
    Cavity,
}

/// The result of [`classify_cavities`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct CavityClassification {
    dimensions: [u32; 3],
    classes: Vec<CellClass>,
    hull: Vec<[u32; 3]>,
    cavity: Vec<[u32; 3]>,
}

impl CavityClassification {
    /// The dimensions of the classified grid.
    pub fn dimensions(&self) -> [u32; 3] {
        self.dimensions
    }

    /// The class of every cell, in linear-index order.
    pub fn classes(&self) -> &[CellClass] {
        &self.classes
    }

    /// The class of the cell `ijk`.
    pub fn class(&self, ijk: [u32; 3]) -> CellClass {
        let [w, h, _] = self.dimensions;
        let id = ijk[0] as usize
            + ijk[1] as usize * w as usize
            + ijk[2] as usize * w as usize * h as usize;
        self.classes[id]
    }

    /// The visited mask: `true` for solid and hull cells.
    pub fn visited(&self) -> Vec<bool> {
        self.classes.iter().map(|c| *c != CellClass::Cavity).collect()
    }

    /// The hull cells, in the order they were reached.
    pub fn hull_cells(&self) -> &[[u32; 3]] {
        &self.hull
    }

    /// The cavity cells, in linear-index order.
    pub fn cavity_cells(&self) -> &[[u32; 3]] {
        &self.cavity
    }

    /// The number of hull cells.
    pub fn num_hull(&self) -> usize {
        self.hull.len()
    }

    /// The number of cavity cells.
    pub fn num_cavity(&self) -> usize {
        self.cavity.len()
    }

    /// The number of solid cells reached from the seed.
    pub fn num_solid(&self) -> usize {
        self.classes.len() - self.hull.len() - self.cavity.len()
    }
}

/// Classifies every cell of `grid` as solid, hull, or cavity.
///
/// The classification is a flood-fill over 26-connected neighbors, seeded on the first solid
/// cell in linear-index order. The flood expands through solid cells only: every empty cell it
/// reaches is a hull cell, and every cell it never reaches is a cavity cell.
///
/// The grid must be padded by at least one empty cell on every face (see
/// [`VoxelGrid::padded`]). Otherwise, parts of the hull may be missing and the exterior
/// space may be classified as cavity. An unpadded grid is classified anyway, with a warning.
///
/// Only the solid component connected to the seed is classified as such. Other solid islands
/// end up in the cavity.
pub fn classify_cavities(grid: &VoxelGrid) -> Result<CavityClassification, HollowingError> {
    let seed = grid
        .values()
        .iter()
        .position(|value| value.is_solid())
        .ok_or(HollowingError::NoSolidCell)?;

    if !grid.is_padded() {
        log::warn!(
            "classifying the cavities of a voxel grid without empty padding, the result may be incorrect."
        );
    }

    let dimensions = grid.dimensions();
    let mut visited = vec![false; grid.len()];
    let mut hull = Vec::new();
    let mut stack = vec![seed];

    while let Some(id) = stack.pop() {
        if visited[id] {
            continue;
        }
        visited[id] = true;

        let ijk = grid.cell_coords(id);

        if !grid.values()[id].is_solid() {
            hull.push(ijk);
            continue;
        }

        for neighbor in neighbors_26(ijk, dimensions) {
            let neighbor_id = grid.linear_index(neighbor);
            if !visited[neighbor_id] {
                stack.push(neighbor_id);
            }
        }
    }

    let mut cavity = Vec::new();
    let classes = visited
        .iter()
        .enumerate()
        .map(|(id, is_visited)| {
            if !is_visited {
                cavity.push(grid.cell_coords(id));
                CellClass::Cavity
            } else if grid.values()[id].is_solid() {
                CellClass::Solid
            } else {
                CellClass::Hull
            }
        })
        .collect();

    let result = CavityClassification {
        dimensions,
        classes,
        hull,
        cavity,
    };

    log::debug!(
        "cavity classification: {} solid, {} hull, {} cavity cells.",
        result.num_solid(),
        result.num_hull(),
        result.num_cavity()
    );

    Ok(result)
}

/// The in-bounds cells sharing a face, an edge, or a vertex with `ijk`.
fn neighbors_26(ijk: [u32; 3], dimensions: [u32; 3]) -> impl Iterator<Item = [u32; 3]> {
    (0..27)
        .filter(|shift| *shift != 13)
        .filter_map(move |shift| {
            let mut neighbor = [0; 3];
            let shifts = [shift % 3, (shift / 3) % 3, shift / 9];

            for axis in 0..3 {
                let coord = (ijk[axis] + shifts[axis]).checked_sub(1)?;
                if coord >= dimensions[axis] {
                    return None;
                }
                neighbor[axis] = coord;
            }

            Some(neighbor)
        })
}
