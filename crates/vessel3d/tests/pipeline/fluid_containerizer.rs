use super::{cube, hollow_cube};
use na::{Matrix4, Point3, Vector3};
use vessel3d::bounding_volume::Aabb;
use vessel3d::container::{ContainerizerError, ContainerizerParameters, FluidContainerizer};
use vessel3d::shape::TriMesh;
use vessel3d::transformation::hollowing::HollowingError;

fn params() -> ContainerizerParameters {
    ContainerizerParameters {
        cell_half_size: 0.125,
        local_to_world: Some(Matrix4::new_translation(&Vector3::new(5.0, 0.0, 0.0))),
        ..Default::default()
    }
}

#[test]
fn hollow_cube_end_to_end() {
    let mut container = FluidContainerizer::new(hollow_cube(), params());
    container.build().unwrap();

    let exterior = container.exterior_voxels_world().unwrap();
    let interior = container.interior_voxels_world().unwrap();
    assert_eq!(exterior.len(), 544);
    assert_eq!(interior.len(), 8);

    let cavity = Aabb::new(Point3::new(4.75, -0.25, -0.25), Point3::new(5.25, 0.25, 0.25));
    for voxel in &interior {
        assert!(relative_eq!(voxel.extents(), Vector3::repeat(0.25)));
        assert!(cavity.contains_local_point(&voxel.center()));
    }

    let mut fluid = container.fluid_particles(0.125).unwrap();
    fluid.create_particles();
    assert_eq!(fluid.positions().len(), 8 * 8);
    assert!(fluid.positions().iter().all(|pt| cavity.contains_local_point(pt)));

    let mut boundary = container.boundary_particles(0.125).unwrap();
    boundary.create_particles();
    assert_eq!(boundary.positions().len(), 544 * 8);
    assert!(boundary
        .positions()
        .iter()
        .all(|pt| !cavity.contains_local_point(pt)));
}

#[test]
fn resolution_overrides_the_cell_size() {
    let params = ContainerizerParameters {
        cell_half_size: 10.0,
        resolution: Some([8, 8, 8]),
        ..params()
    };
    let mut container = FluidContainerizer::new(hollow_cube(), params);
    container.build().unwrap();

    assert_eq!(container.grid().unwrap().dimensions(), [10, 10, 10]);
    assert_eq!(container.interior_voxels().unwrap().len(), 8);
}

#[test]
fn readiness_never_goes_back() {
    let mut container = FluidContainerizer::new(hollow_cube(), params());
    assert!(!container.is_ready());
    assert_eq!(container.grid().unwrap_err(), ContainerizerError::NotReady);
    assert_eq!(
        container.classification().unwrap_err(),
        ContainerizerError::NotReady
    );
    assert_eq!(
        container.interior_voxels_world().unwrap_err(),
        ContainerizerError::NotReady
    );
    assert_eq!(
        container.fluid_particles(0.1).unwrap_err(),
        ContainerizerError::NotReady
    );

    container.build().unwrap();
    let interior = container.interior_voxels().unwrap().to_vec();

    for _ in 0..3 {
        container.build().unwrap();
        assert!(container.is_ready());
        assert_eq!(container.interior_voxels().unwrap(), &interior[..]);
    }
}

#[test]
fn invalid_containers_are_reported() {
    let mut solid = FluidContainerizer::new(cube(1.0), params());
    assert_eq!(
        solid.build().unwrap_err(),
        ContainerizerError::NoInteriorVoxels
    );

    // A single triangle never closes a span: nothing is solid.
    let vertices = vec![
        Point3::new(-1.0, -1.0, 0.0),
        Point3::new(1.0, -1.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
    ];
    let open = TriMesh::new(vertices, vec![[0, 1, 2]]).unwrap();
    let mut open = FluidContainerizer::new(open, params());
    assert_eq!(
        open.build().unwrap_err(),
        ContainerizerError::Hollowing(HollowingError::NoSolidCell)
    );
    assert!(!open.is_ready());

    let mut hollow = FluidContainerizer::new(hollow_cube(), params());
    assert!(matches!(
        hollow.boundary_particles(0.0),
        Err(ContainerizerError::NotReady)
    ));
    hollow.build().unwrap();
    assert!(matches!(
        hollow.boundary_particles(0.0),
        Err(ContainerizerError::Particles(_))
    ));
}
