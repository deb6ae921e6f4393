use std::time::Duration;

use starminer_core::{
    palette::{GOLD, WHITE},
    Command, Event, NodeId, NodeRarity, ParticleMotion, ShakePriority, WorldPoint,
};
use starminer_system_effects::{Config, Effects};
use starminer_world::{self as world, query, World};

fn depletion(rarity: NodeRarity, payout: f64) -> Event {
    Event::NodeDepleted {
        node: NodeId::new(1),
        position: WorldPoint::new(40.0, 60.0),
        rarity,
        payout,
    }
}

#[test]
fn depletion_emits_text_impact_and_burst() {
    let mut effects = Effects::new(Config::new(1));
    let mut commands = Vec::new();
    effects.handle(&[depletion(NodeRarity::Common, 30.0)], &mut commands);

    assert_eq!(commands.len(), 3);
    match &commands[0] {
        Command::ShowFloatingText {
            position,
            text,
            color,
        } => {
            assert_eq!(*position, WorldPoint::new(40.0, 60.0));
            assert_eq!(text, "+30");
            assert_eq!(*color, WHITE);
        }
        other => panic!("unexpected command: {other:?}"),
    }
    assert!(matches!(
        &commands[1],
        Command::ShakeScreen { shake } if shake.priority == ShakePriority::Impact
            && shake.magnitude == 5.0
            && shake.duration == 20
    ));
    match &commands[2] {
        Command::SpawnParticles { particles } => {
            assert_eq!(particles.len(), 30);
            assert!(particles
                .iter()
                .all(|p| matches!(p.motion, ParticleMotion::Ballistic { .. })));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn rare_payout_text_is_gold() {
    let mut effects = Effects::new(Config::new(2));
    let mut commands = Vec::new();
    effects.handle(&[depletion(NodeRarity::Rare, 50.0)], &mut commands);
    assert!(matches!(
        &commands[0],
        Command::ShowFloatingText { color, .. } if *color == GOLD
    ));
}

#[test]
fn orbiting_always_requests_a_pulse() {
    let mut effects = Effects::new(Config::new(3));
    let orbiting = Event::SpaceshipOrbiting {
        node: NodeId::new(0),
        node_position: WorldPoint::new(10.0, 10.0),
        rarity: NodeRarity::Common,
    };

    let mut pulses = 0;
    let mut seekers = 0;
    for _ in 0..1_000 {
        let mut commands = Vec::new();
        effects.handle(std::slice::from_ref(&orbiting), &mut commands);
        for command in commands {
            match command {
                Command::ShakeScreen { shake } => {
                    assert_eq!(shake.priority, ShakePriority::Pulse);
                    pulses += 1;
                }
                Command::SpawnParticles { particles } => {
                    assert!(particles
                        .iter()
                        .all(|p| p.motion == ParticleMotion::SeekOwner));
                    seekers += particles.len();
                }
                other => panic!("unexpected command: {other:?}"),
            }
        }
    }

    assert_eq!(pulses, 1_000);
    assert!((40..200).contains(&seekers), "seekers {seekers}");
}

#[test]
fn traveling_leaves_a_trail_about_half_the_time() {
    let mut effects = Effects::new(Config::new(4));
    let traveled = Event::SpaceshipTraveled {
        position: WorldPoint::new(100.0, 100.0),
        heading: 1.0,
    };
    let mut commands = Vec::new();
    for _ in 0..1_000 {
        effects.handle(std::slice::from_ref(&traveled), &mut commands);
    }
    assert!((400..600).contains(&commands.len()), "trail {}", commands.len());
}

#[test]
fn ignores_unrelated_events() {
    let mut effects = Effects::new(Config::new(5));
    let mut commands = Vec::new();
    effects.handle(
        &[Event::TimeAdvanced {
            dt: Duration::from_millis(16),
        }],
        &mut commands,
    );
    assert!(commands.is_empty());
}

#[test]
fn impact_shake_survives_following_pulses() {
    let mut world = World::new();
    let mut effects = Effects::new(Config::new(6));
    let mut commands = Vec::new();
    effects.handle(&[depletion(NodeRarity::Common, 10.0)], &mut commands);
    effects.handle(
        &[Event::SpaceshipOrbiting {
            node: NodeId::new(2),
            node_position: WorldPoint::new(0.0, 0.0),
            rarity: NodeRarity::Common,
        }],
        &mut commands,
    );

    let mut events = Vec::new();
    for command in commands {
        world::apply(&mut world, command, &mut events);
    }

    let shake = query::shake(&world);
    assert_eq!(shake.magnitude, 5.0);
    assert_eq!(shake.remaining, 20);
    assert_eq!(query::floating_texts(&world).len(), 1);
    assert!(query::particles(&world).len() >= 30);
}
