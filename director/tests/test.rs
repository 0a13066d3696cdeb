use common::{Vec2, Vec3};
use director::{
    Director, DirectorConfig, DirectorError, DirectorEvent, EntityId, EntityState, IndexState,
    RegistryId,
};
use quadtree::QuadtreeError;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

fn director() -> Director {
    Director::new(DirectorConfig::default()).unwrap()
}

fn three_entities() -> Vec<EntityState> {
    vec![
        EntityState::active(1, Vec3::new(0.0, 0.0, 0.0)),
        EntityState::active(2, Vec3::new(100.0, 0.0, 0.0)),
        EntityState::active(3, Vec3::new(0.0, 100.0, 0.0)),
    ]
}

fn ids(found: &[EntityId]) -> HashSet<u32> {
    found.iter().map(|id| id.0).collect()
}

#[test]
fn test_three_entities() {
    let mut director = director();
    let report = director.rebuild_spatial_index(&three_entities());
    assert_eq!(report.indexed, 3);
    assert!(report.rejected.is_empty());

    assert_eq!(
        director.nearest(Vec3::new(10.0, 0.0, 0.0), 1000.0),
        Some(EntityId(1))
    );
    assert_eq!(
        ids(&director.in_radius(Vec3::ZERO, 50.0)),
        HashSet::from([1])
    );
    assert_eq!(
        ids(&director.in_radius(Vec3::ZERO, 150.0)),
        HashSet::from([1, 2, 3])
    );
    assert_eq!(director.metrics().total_queries, 3);
}

#[test]
fn test_empty_index_answers_empty() {
    let mut director = director();
    assert_eq!(director.state(), IndexState::Idle);
    assert_eq!(director.nearest(Vec3::ZERO, 0.0), None);
    assert!(director.in_radius(Vec3::ZERO, 1000.0).is_empty());
    assert_eq!(director.by_id(RegistryId(0)), None);
    assert!(director.ranked_by_threat(Vec3::ZERO).is_empty());
    assert_eq!(director.next_threat(), None);
}

#[test]
fn test_invalid_config() {
    let config = DirectorConfig {
        arena_half_extent: Vec2::new(-1.0, 10.0),
        ..DirectorConfig::default()
    };
    assert!(matches!(
        Director::new(config),
        Err(DirectorError::Quadtree(QuadtreeError::InvalidBounds { .. }))
    ));

    let config = DirectorConfig {
        node_capacity: 0,
        ..DirectorConfig::default()
    };
    assert!(matches!(
        Director::new(config),
        Err(DirectorError::Quadtree(QuadtreeError::InvalidConfig { .. }))
    ));

    let config = DirectorConfig {
        threat_distance_scale: 0.0,
        ..DirectorConfig::default()
    };
    assert!(matches!(
        Director::new(config),
        Err(DirectorError::InvalidConfig(_))
    ));
}

#[test]
fn test_inactive_entities_are_not_indexed() {
    let mut director = director();
    let entities = vec![
        EntityState::active(1, Vec3::new(10.0, 10.0, 0.0)),
        EntityState::new(2, Vec3::new(5.0, 5.0, 0.0), false),
    ];
    let report = director.rebuild_spatial_index(&entities);
    assert_eq!(report.indexed, 1);
    assert_eq!(director.indexed_len(), 1);
    assert_eq!(director.nearest(Vec3::ZERO, 0.0), Some(EntityId(1)));
}

#[test]
fn test_out_of_arena_entities_are_reported() {
    let mut director = director();
    let entities = vec![
        EntityState::active(1, Vec3::new(0.0, 0.0, 0.0)),
        EntityState::active(2, Vec3::new(5001.0, 0.0, 0.0)),
        EntityState::active(3, Vec3::new(0.0, -9000.0, 0.0)),
    ];
    let report = director.rebuild_spatial_index(&entities);
    assert_eq!(report.indexed, 1);
    assert_eq!(report.rejected, vec![EntityId(2), EntityId(3)]);
}

#[test]
fn test_state_transitions() {
    let mut director = director();
    let mut frame = three_entities();
    assert_eq!(director.observe(&frame), IndexState::Idle);

    director.rebuild_spatial_index(&frame);
    assert_eq!(director.state(), IndexState::Built);
    assert_eq!(director.observe(&frame), IndexState::Built);

    frame[0].position = Vec3::new(400.0, 400.0, 0.0);
    assert_eq!(director.observe(&frame), IndexState::Stale);

    // Stale answers come from the last rebuild.
    assert_eq!(
        director.nearest(Vec3::new(400.0, 400.0, 0.0), 10.0),
        None
    );
    assert_eq!(director.nearest(Vec3::ZERO, 1.0), Some(EntityId(1)));

    director.rebuild_spatial_index(&frame);
    assert_eq!(director.state(), IndexState::Built);
    assert_eq!(
        director.nearest(Vec3::new(400.0, 400.0, 0.0), 10.0),
        Some(EntityId(1))
    );
}

#[test]
fn test_registry_lookup_both_ways() {
    let mut director = director();
    let entities = vec![
        EntityState::active(40, Vec3::ZERO),
        EntityState::new(41, Vec3::ZERO, false),
        EntityState::active(42, Vec3::ZERO),
    ];
    assert_eq!(director.rebuild_registry(&entities), 3);
    assert_eq!(director.by_id(RegistryId(0)), Some(EntityId(40)));
    assert_eq!(director.by_id(RegistryId(1)), Some(EntityId(41)));
    assert_eq!(director.by_id(RegistryId(2)), Some(EntityId(42)));
    assert_eq!(director.by_id(RegistryId(3)), None);
    assert_eq!(director.registry_id_of(EntityId(42)), Some(RegistryId(2)));
    assert_eq!(director.registry_id_of(EntityId(7)), None);

    // Rebuilding reassigns from zero.
    director.rebuild_registry(&entities[2..]);
    assert_eq!(director.registry_len(), 1);
    assert_eq!(director.by_id(RegistryId(0)), Some(EntityId(42)));
    assert_eq!(director.registry_id_of(EntityId(40)), None);
}

#[test]
fn test_registry_skips_duplicate_ids() {
    let mut director = director();
    let entities = vec![
        EntityState::active(5, Vec3::ZERO),
        EntityState::active(5, Vec3::new(1.0, 0.0, 0.0)),
        EntityState::active(6, Vec3::ZERO),
    ];
    assert_eq!(director.rebuild_registry(&entities), 2);
    assert_eq!(director.by_id(RegistryId(1)), Some(EntityId(6)));
}

#[test]
fn test_registry_grows_past_initial_capacity() {
    let mut director = Director::new(DirectorConfig {
        registry_capacity: 4,
        ..DirectorConfig::default()
    })
    .unwrap();
    let entities: Vec<EntityState> = (0..500)
        .map(|id| EntityState::active(id, Vec3::ZERO))
        .collect();
    assert_eq!(director.rebuild_registry(&entities), 500);
    for id in 0..500 {
        assert_eq!(director.by_id(RegistryId(id)), Some(EntityId(id)));
    }
}

#[test]
fn test_ranked_by_threat() {
    let mut director = director();
    let entities = vec![
        EntityState::active(1, Vec3::new(300.0, 0.0, 0.0)),
        EntityState::active(2, Vec3::new(0.0, 10.0, 0.0)),
        EntityState::new(3, Vec3::new(1.0, 0.0, 0.0), false),
        EntityState::active(4, Vec3::new(0.0, 0.0, 99.0)),
    ];
    director.rebuild_registry(&entities);
    director.rebuild_spatial_index(&entities);

    let ranking = director.ranked_by_threat(Vec3::ZERO);
    let order: Vec<u32> = ranking.iter().map(|entry| entry.entity.0).collect();
    assert_eq!(order, vec![2, 4, 1]);

    let top = ranking.top().unwrap();
    assert_eq!(top.registry_id, RegistryId(1));
    assert_eq!(top.distance, 10.0);
    assert!((top.priority - 10_000.0 / 11.0).abs() < 1e-3);

    assert_eq!(ranking.count_within(9.0), 0);
    assert_eq!(ranking.count_within(10.0), 1);
    assert_eq!(ranking.count_within(150.0), 2);
    assert_eq!(ranking.within(1e6).len(), 3);
    assert_eq!(ranking.rank_of(EntityId(1)), Some(2));
    assert_eq!(ranking.rank_of(EntityId(3)), None);
}

#[test]
fn test_ranking_skips_unregistered_entities() {
    let mut director = director();
    let entities = three_entities();
    director.rebuild_registry(&entities[..2]);
    director.rebuild_spatial_index(&entities);
    let ranking = director.ranked_by_threat(Vec3::ZERO);
    assert_eq!(ranking.len(), 2);
}

#[test]
fn test_random_ranking_is_ordered() {
    let mut rng: StdRng = SeedableRng::seed_from_u64(21);
    let mut director = director();
    let entities: Vec<EntityState> = (0..1000)
        .map(|id| {
            EntityState::active(
                id,
                Vec3::new(
                    rng.gen_range(-4000.0..4000.0),
                    rng.gen_range(-4000.0..4000.0),
                    0.0,
                ),
            )
        })
        .collect();
    director.rebuild_registry(&entities);
    director.rebuild_spatial_index(&entities);

    let reference = Vec3::new(120.0, -75.0, 0.0);
    let ranking = director.ranked_by_threat(reference);
    assert_eq!(ranking.len(), 1000);
    for pair in ranking.entries().windows(2) {
        assert!(pair[0].priority >= pair[1].priority);
        assert!(pair[0].distance <= pair[1].distance);
    }
    let mut seen: Vec<u32> = ranking.iter().map(|entry| entry.entity.0).collect();
    seen.sort();
    assert_eq!(seen, (0..1000).collect::<Vec<_>>());

    let limit = 1500.0;
    let expected = entities
        .iter()
        .filter(|entity| entity.position.distance(reference) <= limit)
        .count();
    assert_eq!(ranking.count_within(limit), expected);
}

#[test]
fn test_threat_queue() {
    let mut director = director();
    let entities = vec![
        EntityState::active(1, Vec3::new(500.0, 0.0, 0.0)),
        EntityState::active(2, Vec3::new(50.0, 0.0, 0.0)),
        EntityState::active(3, Vec3::new(200.0, 0.0, 0.0)),
        EntityState::new(4, Vec3::new(1.0, 0.0, 0.0), false),
    ];
    director.rebuild_registry(&entities);
    director.rebuild_spatial_index(&entities);

    assert_eq!(director.rebuild_threat_queue(Vec3::ZERO), 3);
    let peeked = director.peek_threat().unwrap();
    assert_eq!(peeked.entity, EntityId(2));
    assert!((peeked.priority - 0.5).abs() < 1e-6);
    assert!((peeked.distance - 50.0).abs() < 1e-3);

    // Entity 1 closed in.
    assert!(director.update_threat(EntityId(1), 10.0));
    assert!(!director.update_threat(EntityId(4), 10.0));
    assert!(!director.update_threat(EntityId(1), f32::NAN));

    let order: Vec<u32> = std::iter::from_fn(|| director.next_threat())
        .map(|entry| entry.entity.0)
        .collect();
    assert_eq!(order, vec![1, 2, 3]);
    assert_eq!(director.threat_queue_len(), 0);
}

#[test]
fn test_tick_reports_departures_and_out_of_bounds() {
    let mut director = director();
    let first = three_entities();
    let report = director.tick(&first);
    assert!(report.events.is_empty());
    assert_eq!(report.indexed, 3);

    let second = vec![
        EntityState::active(1, Vec3::new(5.0, 0.0, 0.0)),
        EntityState::new(2, Vec3::new(100.0, 0.0, 0.0), false),
        EntityState::active(4, Vec3::new(7000.0, 0.0, 0.0)),
    ];
    let report = director.tick(&second);
    assert_eq!(report.indexed, 1);
    let departed: HashSet<u32> = report.departed().map(|id| id.0).collect();
    assert_eq!(departed, HashSet::from([2, 3]));
    assert_eq!(report.out_of_bounds().collect::<Vec<_>>(), vec![EntityId(4)]);
    assert!(report
        .events
        .contains(&DirectorEvent::OutOfBounds(EntityId(4))));

    assert_eq!(director.state(), IndexState::Built);
    assert_eq!(director.nearest(Vec3::ZERO, 0.0), Some(EntityId(1)));

    // Nothing left in play departs once.
    let report = director.tick(&[]);
    assert_eq!(report.departed().collect::<Vec<_>>(), vec![EntityId(1)]);
    let report = director.tick(&[]);
    assert!(report.events.is_empty());
}

#[test]
fn test_nearest_uses_ground_plane() {
    let mut director = director();
    let entities = vec![
        EntityState::active(1, Vec3::new(10.0, 0.0, 500.0)),
        EntityState::active(2, Vec3::new(20.0, 0.0, 0.0)),
    ];
    director.rebuild_spatial_index(&entities);
    assert_eq!(director.nearest(Vec3::ZERO, 0.0), Some(EntityId(1)));
}

#[test]
fn test_config_round_trips_through_bincode() {
    let config = DirectorConfig {
        arena_half_extent: Vec2::new(250.0, 125.0),
        node_capacity: 8,
        ..DirectorConfig::default()
    };
    let bytes = bincode::serialize(&config).unwrap();
    let restored: DirectorConfig = bincode::deserialize(&bytes).unwrap();
    assert_eq!(restored, config);
    assert_eq!(restored.arena_bounds().width, 500.0);
    assert_eq!(restored.quadtree_config().node_capacity, 8);
}

#[test]
fn test_ranking_leaves_out_non_finite_positions() {
    let mut director = director();
    let entities = vec![
        EntityState::active(1, Vec3::new(10.0, 0.0, 0.0)),
        EntityState::active(2, Vec3::new(20.0, 0.0, 0.0)),
        EntityState::active(3, Vec3::new(f32::NAN, 0.0, 0.0)),
        EntityState::active(4, Vec3::new(30.0, 0.0, 0.0)),
        EntityState::active(5, Vec3::new(40.0, 0.0, 0.0)),
    ];
    director.rebuild_registry(&entities);
    let report = director.tick(&entities);
    assert_eq!(report.events, vec![DirectorEvent::OutOfBounds(EntityId(3))]);

    let ranking = director.ranked_by_threat(Vec3::ZERO);
    let order: Vec<u32> = ranking.iter().map(|entry| entry.entity.0).collect();
    assert_eq!(order, vec![1, 2, 4, 5]);
    assert_eq!(ranking.count_within(25.0), 2);
    assert_eq!(ranking.rank_of(EntityId(3)), None);

    assert_eq!(director.rebuild_threat_queue(Vec3::ZERO), 4);
    assert!(!director.update_threat(EntityId(1), f32::INFINITY));
    assert_eq!(director.peek_threat().map(|entry| entry.entity), Some(EntityId(1)));
}

#[test]
fn test_random_frames_with_a_non_finite_entity_stay_ordered() {
    let mut rng: StdRng = SeedableRng::seed_from_u64(77);
    let mut director = director();
    let reference = Vec3::ZERO;
    for _ in 0..50 {
        let bad = rng.gen_range(0..20);
        let entities: Vec<EntityState> = (0..20)
            .map(|id| {
                let x = if id == bad {
                    f32::NAN
                } else {
                    rng.gen_range(-1000.0..1000.0)
                };
                EntityState::active(id, Vec3::new(x, rng.gen_range(-1000.0..1000.0), 0.0))
            })
            .collect();
        director.rebuild_registry(&entities);
        director.tick(&entities);

        let ranking = director.ranked_by_threat(reference);
        assert_eq!(ranking.len(), 19);
        for pair in ranking.entries().windows(2) {
            assert!(pair[0].distance <= pair[1].distance);
        }
        let expected = entities
            .iter()
            .filter(|entity| entity.position.distance(reference) <= 500.0)
            .count();
        assert_eq!(ranking.count_within(500.0), expected);
    }
}

#[test]
fn test_queued_threat_keeps_its_registry_id() {
    let mut director = director();
    let entities = three_entities();
    director.rebuild_registry(&entities);
    director.rebuild_spatial_index(&entities);
    director.rebuild_threat_queue(Vec3::new(100.0, 0.0, 0.0));

    director.rebuild_registry(&[]);
    assert_eq!(director.registry_len(), 0);
    let peeked = director.peek_threat().unwrap();
    assert_eq!(peeked.entity, EntityId(2));
    assert_eq!(peeked.registry_id, RegistryId(1));
    let next = director.next_threat().unwrap();
    assert_eq!(next.registry_id, RegistryId(1));
}

#[test]
fn test_duplicate_ids_use_their_first_row() {
    let mut director = director();
    let entities = vec![
        EntityState::active(7, Vec3::new(10.0, 0.0, 0.0)),
        EntityState::active(8, Vec3::new(0.0, 30.0, 0.0)),
        EntityState::active(7, Vec3::new(20.0, 0.0, 0.0)),
    ];
    assert_eq!(director.rebuild_registry(&entities), 2);
    let report = director.tick(&entities);
    assert_eq!(report.indexed, 2);
    assert_eq!(director.indexed_len(), 2);

    let ranking = director.ranked_by_threat(Vec3::ZERO);
    assert_eq!(ranking.len(), 2);
    assert_eq!(ranking.top().map(|entry| entry.distance), Some(10.0));
    assert_eq!(director.rebuild_threat_queue(Vec3::ZERO), 2);

    let report = director.tick(&[]);
    assert_eq!(
        report.events,
        vec![
            DirectorEvent::Departed(EntityId(7)),
            DirectorEvent::Departed(EntityId(8))
        ]
    );

    // An inactive first row wins over a later active one.
    let entities = vec![
        EntityState::new(9, Vec3::ZERO, false),
        EntityState::active(9, Vec3::ZERO),
    ];
    assert_eq!(director.tick(&entities).indexed, 0);
    assert!(director.tick(&[]).events.is_empty());
}
