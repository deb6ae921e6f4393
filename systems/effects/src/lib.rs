#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Cosmetic feedback system translating gameplay events into particles,
//! floating payout labels and screen shake.

use std::f32::consts::{PI, TAU};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use starminer_core::{
    palette::{BOOSTER_ORANGE, GOLD, LIGHT_GRAY, WHITE},
    Command, Event, NodeRarity, ParticleMotion, ParticleSpawn, Rgb, ShakePriority, ShakeRequest,
    WorldPoint, WorldVector,
};

const BOOSTER_CHANCE: f64 = 0.5;
const RESOURCE_CHANCE: f64 = 0.1;
const EXPLOSION_PARTICLES: usize = 30;

const PULSE_SHAKE: ShakeRequest = ShakeRequest {
    magnitude: 0.5,
    duration: 2,
    priority: ShakePriority::Pulse,
};
const IMPACT_SHAKE: ShakeRequest = ShakeRequest {
    magnitude: 5.0,
    duration: 20,
    priority: ShakePriority::Impact,
};

/// Configuration parameters required to construct the effects system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration seeding the cosmetic random stream.
    #[must_use]
    pub const fn new(rng_seed: u64) -> Self {
        Self { rng_seed }
    }
}

/// Pure system that owns every cosmetic random draw.
#[derive(Debug)]
pub struct Effects {
    rng: ChaCha8Rng,
}

impl Effects {
    /// Creates a new effects system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Consumes gameplay events and emits the matching effect commands.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::SpaceshipTraveled { position, heading } => {
                    if self.rng.gen_bool(BOOSTER_CHANCE) {
                        let particle = self.booster_particle(*position, *heading);
                        out.push(Command::SpawnParticles {
                            particles: vec![particle],
                        });
                    }
                }
                Event::SpaceshipOrbiting {
                    node_position,
                    rarity,
                    ..
                } => {
                    if self.rng.gen_bool(RESOURCE_CHANCE) {
                        let particle = self.resource_particle(*node_position, *rarity);
                        out.push(Command::SpawnParticles {
                            particles: vec![particle],
                        });
                    }
                    out.push(Command::ShakeScreen { shake: PULSE_SHAKE });
                }
                Event::NodeDepleted {
                    position,
                    rarity,
                    payout,
                    ..
                } => {
                    out.push(Command::ShowFloatingText {
                        position: *position,
                        text: format!("+{payout:.0}"),
                        color: if rarity.is_rare() { GOLD } else { WHITE },
                    });
                    out.push(Command::ShakeScreen {
                        shake: IMPACT_SHAKE,
                    });
                    let particles = (0..EXPLOSION_PARTICLES)
                        .map(|_| self.explosion_particle(*position, *rarity))
                        .collect();
                    out.push(Command::SpawnParticles { particles });
                }
                _ => {}
            }
        }
    }

    /// Exhaust puff pushed out behind the spaceship.
    fn booster_particle(&mut self, position: WorldPoint, heading: f32) -> ParticleSpawn {
        let jitter = (self.rng.gen::<f32>() - 0.5) * 0.5;
        let speed = self.rng.gen::<f32>() * 2.0 + 1.0;
        ParticleSpawn {
            position,
            motion: ParticleMotion::Ballistic {
                velocity: WorldVector::from_angle(heading + PI + jitter, speed),
            },
            lifetime: 20.0 + self.rng.gen::<f32>() * 10.0,
            size: 2.0 + self.rng.gen::<f32>() * 2.0,
            color: BOOSTER_ORANGE,
        }
    }

    fn resource_particle(&mut self, position: WorldPoint, rarity: NodeRarity) -> ParticleSpawn {
        ParticleSpawn {
            position,
            motion: ParticleMotion::SeekOwner,
            lifetime: 60.0 + self.rng.gen::<f32>() * 20.0,
            size: 3.0 + self.rng.gen::<f32>() * 2.0,
            color: debris_color(rarity),
        }
    }

    fn explosion_particle(&mut self, position: WorldPoint, rarity: NodeRarity) -> ParticleSpawn {
        let angle = self.rng.gen::<f32>() * TAU;
        let speed = self.rng.gen::<f32>() * 4.0 + 2.0;
        ParticleSpawn {
            position,
            motion: ParticleMotion::Ballistic {
                velocity: WorldVector::from_angle(angle, speed),
            },
            lifetime: 45.0 + self.rng.gen::<f32>() * 15.0,
            size: 3.0 + self.rng.gen::<f32>() * 3.0,
            color: debris_color(rarity),
        }
    }
}

const fn debris_color(rarity: NodeRarity) -> Rgb {
    match rarity {
        NodeRarity::Rare => GOLD,
        NodeRarity::Common => LIGHT_GRAY,
    }
}
