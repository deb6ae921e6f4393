//! Translation of world queries into the render snapshot.

use glam::Vec2;
use starminer_core::{
    palette::{GOLD, LIGHT_GRAY, SHIP_PINK},
    ShipState,
};
use starminer_rendering::{
    to_vec2, CameraPresentation, Color, FloatingTextPresentation, HudPresentation,
    NodePresentation, ParticlePresentation, Scene, ShipPresentation,
};
use starminer_world::{query, World};

/// Peak vertical bobbing of the spaceship.
const BOB_AMPLITUDE: f32 = 5.0;
/// Peak jitter of the node being mined.
const WOBBLE_AMPLITUDE: f32 = 2.0;

pub(crate) fn build(world: &World, shake_offset: Vec2) -> Scene {
    let camera = query::camera(world);
    let ship = query::spaceship(world);
    let cosmetics = query::cosmetics(world);
    let economy = query::economy(world);

    let mined = match ship.state {
        ShipState::Mining => ship.target,
        ShipState::Seeking | ShipState::Traveling => None,
    };
    let wobble = Vec2::new(cosmetics.wobble_angle.sin(), cosmetics.wobble_angle.cos())
        * WOBBLE_AMPLITUDE;

    let nodes = query::node_view(world)
        .iter()
        .map(|node| NodePresentation {
            id: node.id,
            position: to_vec2(node.position),
            radius: node.size,
            rare: node.rarity.is_rare(),
            color: Color::from(if node.rarity.is_rare() { GOLD } else { LIGHT_GRAY }),
            wobble: if mined == Some(node.id) {
                wobble
            } else {
                Vec2::ZERO
            },
        })
        .collect();

    let particles = query::particles(world)
        .into_iter()
        .map(|particle| ParticlePresentation {
            position: to_vec2(particle.position),
            radius: particle.size,
            color: Color::from(particle.color),
        })
        .collect();

    let texts = query::floating_texts(world)
        .into_iter()
        .map(|text| FloatingTextPresentation {
            position: to_vec2(text.position),
            color: Color::from(text.color).with_alpha(text.opacity),
            text: text.text,
        })
        .collect();

    Scene {
        camera: CameraPresentation::new(
            to_vec2(camera.origin),
            Vec2::new(camera.width, camera.height),
        ),
        shake_offset,
        ship: ShipPresentation {
            position: to_vec2(ship.position),
            heading: ship.heading,
            bob_offset: cosmetics.float_angle.sin() * BOB_AMPLITUDE,
            state: ship.state,
            color: Color::from(SHIP_PINK),
        },
        nodes,
        particles,
        texts,
        hud: HudPresentation {
            resources: economy.resources.floor(),
            miner_level: economy.miner_level,
            miner_cost: economy.miner_cost.floor(),
            engine_level: economy.engine_level,
            engine_cost: economy.engine_cost.floor(),
            star_speed: ship.stats.star_speed,
        },
    }
}
