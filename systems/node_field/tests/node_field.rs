use std::time::Duration;

use starminer_core::{Command, Event, NodeId, NodeRarity, WorldBounds, WorldPoint};
use starminer_system_node_field::{Config, NodeField};
use starminer_world::{self as world, query, World};

const INTERVAL: Duration = Duration::from_secs(3);

fn bounds() -> WorldBounds {
    WorldBounds::new(400.0, 300.0)
}

#[test]
fn emits_one_spawn_per_elapsed_interval() {
    let mut field = NodeField::new(Config::new(INTERVAL, 7));
    let mut commands = Vec::new();

    field.handle(
        &[Event::TimeAdvanced {
            dt: Duration::from_secs(2),
        }],
        bounds(),
        &mut commands,
    );
    assert!(commands.is_empty(), "no generation before a full interval");

    field.handle(
        &[Event::TimeAdvanced {
            dt: Duration::from_secs(7),
        }],
        bounds(),
        &mut commands,
    );
    assert_eq!(commands.len(), 3);
}

#[test]
fn refill_request_emits_one_spawn_per_vacancy() {
    let mut field = NodeField::new(Config::new(INTERVAL, 11));
    let mut commands = Vec::new();
    field.handle(
        &[Event::NodeRefillRequested { vacancies: 5 }],
        bounds(),
        &mut commands,
    );

    assert_eq!(commands.len(), 5);
    for command in &commands {
        match command {
            Command::SpawnNode { position, .. } => {
                assert!(bounds().contains(*position), "{position:?} out of bounds");
            }
            other => panic!("unexpected command emitted: {other:?}"),
        }
    }
}

#[test]
fn depletion_requests_a_backfill() {
    let mut field = NodeField::new(Config::new(INTERVAL, 3));
    let mut commands = Vec::new();
    field.handle(
        &[Event::NodeDepleted {
            node: NodeId::new(4),
            position: WorldPoint::new(10.0, 10.0),
            rarity: NodeRarity::Common,
            payout: 10.0,
        }],
        bounds(),
        &mut commands,
    );
    assert!(matches!(commands.as_slice(), [Command::SpawnNode { .. }]));
}

#[test]
fn same_seed_places_same_nodes() {
    let run = |seed| {
        let mut field = NodeField::new(Config::new(INTERVAL, seed));
        let mut commands = Vec::new();
        field.handle(
            &[Event::NodeRefillRequested { vacancies: 8 }],
            bounds(),
            &mut commands,
        );
        commands
    };

    assert_eq!(run(99), run(99));
    assert_ne!(run(99), run(100));
}

#[test]
fn configured_world_fills_to_capacity_and_stops() {
    let mut world = World::new();
    let mut field = NodeField::new(Config::new(INTERVAL, 0x1234_5678));
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::ConfigureWorld {
            width: 500.0,
            height: 500.0,
            node_capacity: 6,
        },
        &mut events,
    );

    let mut commands = Vec::new();
    field.handle(&events, query::bounds(&world), &mut commands);
    assert_eq!(commands.len(), 6);
    for command in commands.drain(..) {
        world::apply(&mut world, command, &mut events);
    }
    assert_eq!(query::node_view(&world).len(), 6);

    events.clear();
    field.handle(
        &[Event::TimeAdvanced {
            dt: Duration::from_secs(30),
        }],
        query::bounds(&world),
        &mut commands,
    );
    assert_eq!(commands.len(), 10);
    for command in commands.drain(..) {
        world::apply(&mut world, command, &mut events);
    }
    assert!(events.is_empty(), "full field rejects timer spawns");
    assert_eq!(query::node_view(&world).len(), 6);
}
