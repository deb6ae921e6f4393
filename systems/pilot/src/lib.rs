#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Spaceship agent that acquires targets, flies to them and mines them out.

use std::time::Duration;

use starminer_core::{
    math::ease_angle, Command, Event, NodeId, NodeSnapshot, NodeView, SpaceshipSnapshot,
};

/// Distance kept between the spaceship and the node it mines.
pub const ORBIT_RADIUS: f32 = 15.0;
/// Fraction of the heading error corrected every tick.
const ROTATION_GAIN: f32 = 0.05;
/// Fraction of the remaining distance covered every tick at speed 1.
const APPROACH_GAIN: f32 = 0.05;
/// Radians added to the orbit angle every tick.
const ORBIT_SPEED: f32 = 0.05;

/// Stateless system steering the spaceship through its mining loop.
///
/// Easing is applied per tick while damage scales with the tick's duration.
#[derive(Debug, Default)]
pub struct Pilot;

impl Pilot {
    /// Reacts to time advancement by emitting the spaceship's next move.
    pub fn handle(
        &mut self,
        events: &[Event],
        ship: &SpaceshipSnapshot,
        nodes: &NodeView,
        out: &mut Vec<Command>,
    ) {
        let Some(dt) = elapsed(events) else {
            return;
        };

        let target = ship.target.and_then(|id| nodes.get(id));
        let Some(target) = target else {
            self.acquire(ship, nodes, out);
            return;
        };

        let desired = ship.position.angle_to(target.position);
        let heading = ease_angle(ship.heading, desired, ROTATION_GAIN);
        let engage_distance = ORBIT_RADIUS + ship.stats.speed;

        if ship.position.distance_squared(target.position) > engage_distance * engage_distance {
            let position = ship
                .position
                .lerp(target.position, APPROACH_GAIN * ship.stats.speed);
            out.push(Command::TravelSpaceship { position, heading });
            return;
        }

        let orbit_angle = target.orbit_angle + ORBIT_SPEED;
        out.push(Command::OrbitNode {
            node: target.id,
            orbit_angle,
            position: target.position.polar_offset(orbit_angle, ORBIT_RADIUS),
            heading,
        });
        out.push(Command::MineNode {
            node: target.id,
            damage: ship.stats.damage_per_second * dt.as_secs_f32(),
        });
    }

    fn acquire(&self, ship: &SpaceshipSnapshot, nodes: &NodeView, out: &mut Vec<Command>) {
        match nearest(ship, nodes) {
            Some(node) => out.push(Command::AssignTarget { node: Some(node) }),
            None => {
                if ship.target.is_some() {
                    out.push(Command::AssignTarget { node: None });
                }
                out.push(Command::RequestNodeRefill);
            }
        }
    }
}

fn elapsed(events: &[Event]) -> Option<Duration> {
    let mut total: Option<Duration> = None;
    for event in events {
        if let Event::TimeAdvanced { dt } = event {
            total = Some(total.unwrap_or_default().saturating_add(*dt));
        }
    }
    total
}

/// Nearest node by squared distance; the first of equally near nodes wins.
fn nearest(ship: &SpaceshipSnapshot, nodes: &NodeView) -> Option<NodeId> {
    let mut best: Option<(&NodeSnapshot, f32)> = None;
    for node in nodes.iter() {
        let distance = ship.position.distance_squared(node.position);
        match best {
            Some((_, closest)) if distance >= closest => {}
            _ => best = Some((node, distance)),
        }
    }
    best.map(|(node, _)| node.id)
}
