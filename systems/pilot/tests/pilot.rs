use std::time::Duration;

use starminer_core::{Command, Event, NodeId, NodeRarity, ShipState, WorldPoint};
use starminer_system_pilot::Pilot;
use starminer_world::{self as world, query, World};

fn configured_world() -> World {
    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::ConfigureWorld {
            width: 1000.0,
            height: 1000.0,
            node_capacity: 10,
        },
        &mut events,
    );
    world
}

fn spawn(world: &mut World, x: f32, y: f32) -> NodeId {
    let mut events = Vec::new();
    world::apply(
        world,
        Command::SpawnNode {
            position: WorldPoint::new(x, y),
            rarity: NodeRarity::Common,
        },
        &mut events,
    );
    match events.as_slice() {
        [Event::NodeSpawned { node, .. }] => *node,
        other => panic!("unexpected events: {other:?}"),
    }
}

/// Runs one tick through the pilot and returns every event the world emitted.
fn step(world: &mut World, pilot: &mut Pilot, dt: Duration) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, Command::Tick { dt }, &mut events);

    let mut commands = Vec::new();
    pilot.handle(
        &events,
        &query::spaceship(world),
        &query::node_view(world),
        &mut commands,
    );
    for command in commands {
        world::apply(world, command, &mut events);
    }
    world::apply(world, Command::FinishTick, &mut events);
    events
}

fn assert_target_invariant(world: &World) {
    let ship = query::spaceship(world);
    match ship.state {
        ShipState::Seeking => assert_eq!(ship.target, None),
        ShipState::Traveling | ShipState::Mining => {
            let target = ship.target.expect("active ship holds a target");
            assert!(
                query::node_view(world).contains(target),
                "target {target:?} missing from field"
            );
        }
    }
}

#[test]
fn seeks_the_nearest_node() {
    let mut world = configured_world();
    let _far = spawn(&mut world, 505.0, 500.0);
    let nearest = spawn(&mut world, 500.0, 503.0);
    let _farther = spawn(&mut world, 491.0, 500.0);

    let events = step(&mut world, &mut Pilot, Duration::from_millis(16));

    assert!(events.contains(&Event::TargetAcquired { node: nearest }));
    let ship = query::spaceship(&world);
    assert_eq!(ship.target, Some(nearest));
    assert_eq!(ship.state, ShipState::Traveling);
}

#[test]
fn ten_seconds_of_mining_depletes_a_standard_node() {
    let mut world = configured_world();
    let node = spawn(&mut world, 515.0, 500.0);
    let mut pilot = Pilot;
    let dt = Duration::from_millis(500);

    let _ = step(&mut world, &mut pilot, dt);
    assert_eq!(query::spaceship(&world).target, Some(node));

    let mut mined = Duration::ZERO;
    let mut payout = None;
    for _ in 0..40 {
        let events = step(&mut world, &mut pilot, dt);
        if query::spaceship(&world).state == ShipState::Mining
            || events.iter().any(|e| matches!(e, Event::NodeDepleted { .. }))
        {
            mined += dt;
        }
        if let Some(Event::NodeDepleted { payout: paid, .. }) = events
            .iter()
            .find(|e| matches!(e, Event::NodeDepleted { .. }))
        {
            payout = Some(*paid);
            break;
        }
    }

    assert_eq!(mined, Duration::from_secs(10));
    assert_eq!(payout, Some(10.0));
    assert_eq!(query::economy(&world).resources, 10.0);
    let ship = query::spaceship(&world);
    assert_eq!(ship.target, None);
    assert_eq!(ship.state, ShipState::Seeking);
}

#[test]
fn travels_then_orbits_at_fixed_radius() {
    let mut world = configured_world();
    let node = spawn(&mut world, 800.0, 500.0);
    let mut pilot = Pilot;
    let dt = Duration::from_millis(16);

    let mut previous = query::spaceship(&world).position.distance(WorldPoint::new(800.0, 500.0));
    for _ in 0..400 {
        let _ = step(&mut world, &mut pilot, dt);
        let ship = query::spaceship(&world);
        if ship.state == ShipState::Mining {
            let radius = ship.position.distance(WorldPoint::new(800.0, 500.0));
            assert!((radius - 15.0).abs() < 1e-2, "orbit radius {radius}");
            let orbit = query::node_view(&world)
                .get(node)
                .map(|snapshot| snapshot.orbit_angle)
                .expect("node mined");
            assert!(orbit > 0.0);
            return;
        }
        let distance = ship.position.distance(WorldPoint::new(800.0, 500.0));
        assert!(distance <= previous + 1e-3, "ship moved away from target");
        previous = distance;
    }
    panic!("ship never reached orbit");
}

#[test]
fn target_stays_live_until_field_is_exhausted() {
    let mut world = configured_world();
    for (x, y) in [(100.0, 100.0), (900.0, 120.0), (450.0, 880.0), (520.0, 510.0)] {
        let _ = spawn(&mut world, x, y);
    }
    let mut pilot = Pilot;
    let dt = Duration::from_millis(100);

    let mut depletions = 0;
    for _ in 0..2_000 {
        let events = step(&mut world, &mut pilot, dt);
        for event in &events {
            if let Event::NodeDepleted { node, .. } = event {
                depletions += 1;
                assert!(!query::node_view(&world).contains(*node));
                let ship = query::spaceship(&world);
                assert_eq!(ship.state, ShipState::Seeking);
            }
        }
        assert_target_invariant(&world);
    }

    assert_eq!(depletions, 4);
    assert!(query::node_view(&world).is_empty());
    assert_eq!(query::economy(&world).resources, 40.0);
}

#[test]
fn empty_field_requests_refill() {
    let mut world = configured_world();
    let events = step(&mut world, &mut Pilot, Duration::from_millis(16));
    assert!(events.contains(&Event::NodeRefillRequested { vacancies: 10 }));
    assert_eq!(query::spaceship(&world).target, None);
}

#[test]
fn depleted_target_is_replaced_by_the_next_nearest() {
    let mut world = configured_world();
    let first = spawn(&mut world, 510.0, 500.0);
    let second = spawn(&mut world, 700.0, 500.0);
    let mut pilot = Pilot;
    let dt = Duration::from_millis(16);
    let _ = step(&mut world, &mut pilot, dt);
    assert_eq!(query::spaceship(&world).target, Some(first));

    let events = step(&mut world, &mut pilot, Duration::from_secs(60));
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::NodeDepleted { node, .. } if *node == first)));

    let events = step(&mut world, &mut pilot, dt);
    assert!(events.contains(&Event::TargetAcquired { node: second }));
    assert_target_invariant(&world);
}
