use na::{Matrix4, Point3, Vector3};
use vessel3d::bounding_volume::Aabb;
use vessel3d::particles::{
    shapes, AggregateSource, BoundsSource, ListSource, ParticleError, ParticleSource, VoxelSource,
};

fn centered_box(size: f32) -> Aabb {
    Aabb::from_half_extents(Point3::origin(), Vector3::repeat(size / 2.0))
}

#[test]
fn bounds_points_stay_between_outer_and_inner_boxes() {
    let outer = centered_box(2.0);
    let inner = centered_box(1.0);
    let mut source = BoundsSource::new(outer, vec![inner], 0.5).unwrap();
    source.create_particles();

    assert_eq!(source.positions().len(), 4 * 4 * 4 - 2 * 2 * 2);
    for pt in source.positions() {
        assert!(outer.contains_local_point(pt), "{} outside of the outer box", pt);
        assert!(!inner.contains_local_point(pt), "{} inside of the inner box", pt);
    }
}

#[test]
fn container_walls_surround_the_interior() {
    let interior = centered_box(1.0);
    let mut walls = BoundsSource::container_walls(interior, 0.25, 0.1).unwrap();
    walls.create_particles();

    assert!(relative_eq!(walls.outer().extents(), Vector3::repeat(1.6), epsilon = 1.0e-5));
    assert!(!walls.positions().is_empty());
    assert!(walls.positions().iter().all(|pt| !interior.contains_local_point(pt)));
    assert_eq!(
        BoundsSource::container_walls(interior, -1.0, 0.1),
        Err(ParticleError::InvalidWallThickness(-1.0))
    );
}

#[test]
fn voxel_smaller_than_spacing_yields_nothing() {
    let voxel = Aabb::new(Point3::origin(), Point3::new(0.1, 0.1, 0.1));
    let mut source = VoxelSource::new(vec![voxel], None, 0.2).unwrap();
    source.create_particles();
    assert!(source.positions().is_empty());
}

#[test]
fn voxel_particles_are_transformed_to_world_space() {
    let voxel = Aabb::new(Point3::origin(), Point3::new(0.5, 0.5, 0.5));
    let shift = Vector3::new(1.0, -2.0, 3.0);
    let mut source =
        VoxelSource::new(vec![voxel], Some(Matrix4::new_translation(&shift)), 0.25).unwrap();
    source.create_particles();

    assert_eq!(source.positions().len(), 8);
    assert_eq!(source.positions()[0], Point3::new(0.125, 0.125, 0.125) + shift);
}

#[test]
fn create_particles_is_idempotent() {
    let cup = shapes::cup_walls(0.5, 0.3, 0.1).unwrap();
    let mut sources: Vec<ParticleSource> = vec![
        BoundsSource::new(centered_box(1.0), vec![], 0.25).unwrap().into(),
        VoxelSource::new(vec![centered_box(0.5)], None, 0.125).unwrap().into(),
        ListSource::new(cup, None, 0.1).unwrap().into(),
    ];
    let aggregate = AggregateSource::new(sources.clone(), 0.1).unwrap();
    sources.push(aggregate.into());

    for source in &mut sources {
        source.create_particles();
        let first = source.positions().to_vec();
        assert!(!first.is_empty());
        source.create_particles();
        assert_eq!(source.positions(), &first[..]);
    }
}

#[test]
fn aggregate_origins_skip_empty_sources() {
    let list = |len: usize| -> ParticleSource {
        let points = (0..len).map(|i| Point3::new(i as f32, 0.0, 0.0)).collect();
        ListSource::new(points, None, 1.0).unwrap().into()
    };
    let mut aggregate = AggregateSource::new(vec![list(5), list(0), list(3)], 1.0).unwrap();
    aggregate.create_particles();

    assert_eq!(aggregate.positions().len(), 8);
    assert_eq!(aggregate.origin_indices(), &[0, 0, 0, 0, 0, 2, 2, 2]);

    let source = ParticleSource::from(aggregate);
    assert_eq!(source.position(5), Ok(Point3::origin()));
    assert_eq!(
        source.position(8),
        Err(ParticleError::IndexOutOfRange { index: 8, len: 8 })
    );
}

#[test]
fn cup_and_funnel_rings_follow_the_radius() {
    let walls = shapes::cup_walls(1.0, 0.5, 0.25).unwrap();
    assert!(walls
        .iter()
        .all(|pt| relative_eq!(Vector3::new(pt.x, 0.0, pt.z).norm(), 1.0, epsilon = 1.0e-5)));

    let floor = shapes::cup_floor(1.0, 0.25).unwrap();
    assert!(floor.iter().all(|pt| pt.y == 0.0 && pt.x * pt.x + pt.z * pt.z <= 1.0));

    let funnel = shapes::funnel(1.0, 0.5, 1.0, 0.25).unwrap();
    let top = funnel.iter().filter(|pt| relative_eq!(pt.y, 1.0)).count();
    let bottom = funnel.iter().filter(|pt| pt.y == 0.0).count();
    assert!(top > bottom);
}
