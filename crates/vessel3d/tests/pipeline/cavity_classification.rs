use super::{cube, hollow_cube, unit_bounds};
use na::{Point3, Vector3};
use vessel3d::bounding_volume::Aabb;
use vessel3d::transformation::aabb_to_trimesh;
use vessel3d::transformation::hollowing::{classify_cavities, CellClass};
use vessel3d::transformation::voxelization::{
    CellOverlapVoxelizer, GridDescriptor, RayParityVoxelizer, VoxelValue, Voxelizer,
};

#[test]
fn hollow_cube_shell_is_solid_with_hull_on_both_sides() {
    let desc = GridDescriptor::with_resolution(unit_bounds(), [8, 8, 8]);
    let grid = RayParityVoxelizer::new()
        .voxelize(&hollow_cube(), &desc)
        .unwrap()
        .padded(1);
    let classification = classify_cavities(&grid).unwrap();

    for id in 0..grid.len() {
        let ijk = grid.cell_coords(id);
        let in_range = |r: core::ops::RangeInclusive<u32>| ijk.iter().all(|c| r.contains(c));

        let expected = if grid.is_solid(ijk) {
            CellClass::Solid
        } else if in_range(4..=5) {
            CellClass::Cavity
        } else {
            // The padding layer, or the empty cells lining the inner walls.
            CellClass::Hull
        };
        assert_eq!(classification.class(ijk), expected, "cell {:?}", ijk);
    }

    assert_eq!(classification.num_solid(), 448);
    assert_eq!(classification.num_hull(), 488 + 56);
    assert_eq!(classification.num_cavity(), 8);
}

#[test]
fn padding_makes_the_outside_reachable() {
    // The cube fills the whole grid: without padding there is no empty cell to reach.
    let desc = GridDescriptor::with_resolution(unit_bounds(), [4, 4, 4]);
    let grid = RayParityVoxelizer::new().voxelize(&cube(1.0), &desc).unwrap();
    assert!(!grid.is_padded());
    assert_eq!(grid.num_solid(), 64);

    let unpadded = classify_cavities(&grid).unwrap();
    assert_eq!(unpadded.num_hull(), 0);
    assert_eq!(unpadded.num_solid(), 64);

    let padded_grid = grid.padded(1);
    assert!(padded_grid.is_padded());
    let padded = classify_cavities(&padded_grid).unwrap();
    assert_eq!(padded.num_hull(), 6 * 6 * 6 - 64);
    assert_eq!(padded.num_cavity(), 0);
    assert_eq!(padded.num_solid(), 64);
}

#[test]
fn surface_cells_count_as_solid() {
    // Inner walls inside cells 3 and 12, away from the cell boundaries.
    let mut mesh = cube(1.0);
    let inner = Aabb::from_half_extents(Point3::origin(), Vector3::repeat(0.53125));
    mesh.append(&aabb_to_trimesh(&inner, true));

    let desc = GridDescriptor::with_resolution(unit_bounds(), [16, 16, 16]);
    let grid = CellOverlapVoxelizer::new()
        .voxelize(&mesh, &desc)
        .unwrap()
        .padded(1);
    let classification = classify_cavities(&grid).unwrap();

    assert_eq!(grid.get([3, 8, 8]), VoxelValue::Interior);
    assert_eq!(grid.get([4, 8, 8]), VoxelValue::Surface);
    assert_eq!(grid.get([13, 8, 8]), VoxelValue::Surface);

    // One layer of hull cells inside the surface cells.
    assert_eq!(classification.num_cavity(), 6 * 6 * 6);
    assert_eq!(classification.class([4, 8, 8]), CellClass::Solid);
    assert_eq!(classification.class([5, 8, 8]), CellClass::Hull);
    assert_eq!(classification.class([6, 8, 8]), CellClass::Cavity);
    assert_eq!(classification.class([11, 8, 8]), CellClass::Cavity);
    assert_eq!(classification.class([12, 8, 8]), CellClass::Hull);
    assert_eq!(classification.class([13, 8, 8]), CellClass::Solid);
}
