#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Star Miner.

mod camera;
mod economy;
mod effects;
mod nodes;
mod ship;

use starminer_core::{Command, Event, ShipState, WorldBounds, WELCOME_BANNER};
use tracing::{debug, trace};

use self::{
    camera::{Camera, DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH},
    economy::Economy,
    effects::Effects,
    nodes::{DamageOutcome, NodeField, DEFAULT_NODE_CAPACITY},
    ship::Spaceship,
};

const DEFAULT_WORLD_WIDTH: f32 = 3000.0;
const DEFAULT_WORLD_HEIGHT: f32 = 3000.0;

/// Per-tick advance of the spaceship bobbing angle.
const FLOAT_ANGLE_STEP: f32 = 0.05;
/// Per-tick advance of the mined node wobble angle.
const WOBBLE_ANGLE_STEP: f32 = 0.2;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Cosmetics {
    float_angle: f32,
    wobble_angle: f32,
}

impl Cosmetics {
    fn advance(&mut self) {
        self.float_angle += FLOAT_ANGLE_STEP;
        self.wobble_angle += WOBBLE_ANGLE_STEP;
    }
}

/// Represents the authoritative Star Miner world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    bounds: WorldBounds,
    camera: Camera,
    nodes: NodeField,
    ship: Spaceship,
    effects: Effects,
    economy: Economy,
    cosmetics: Cosmetics,
    tick_index: u64,
}

impl World {
    /// Creates a new Star Miner world with default bounds and an empty node field.
    #[must_use]
    pub fn new() -> Self {
        let bounds = WorldBounds::new(DEFAULT_WORLD_WIDTH, DEFAULT_WORLD_HEIGHT);
        let ship = Spaceship::new(bounds.center());
        let mut camera = Camera::new(DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT);
        camera.center_on(ship.position(), &bounds);
        Self {
            banner: WELCOME_BANNER,
            bounds,
            camera,
            nodes: NodeField::new(DEFAULT_NODE_CAPACITY),
            ship,
            effects: Effects::default(),
            economy: Economy::new(),
            cosmetics: Cosmetics::default(),
            tick_index: 0,
        }
    }

    fn release_target(&mut self, out_events: &mut Vec<Event>) {
        if let Some(node) = self.ship.release() {
            out_events.push(Event::TargetReleased { node });
        }
    }

    fn request_refill(&self, out_events: &mut Vec<Event>) {
        let vacancies = self.nodes.vacancies();
        if vacancies > 0 {
            debug!(vacancies, "node refill requested");
            out_events.push(Event::NodeRefillRequested { vacancies });
        }
    }

    /// Keeps the target reference valid; a target that left the field is dropped.
    fn validate_target(&mut self, out_events: &mut Vec<Event>) -> bool {
        match self.ship.target() {
            Some(node) if self.nodes.contains(node) => true,
            Some(_) => {
                self.release_target(out_events);
                false
            }
            None => false,
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureWorld {
            width,
            height,
            node_capacity,
        } => {
            world.bounds = WorldBounds::new(width, height);
            world.nodes.reconfigure(node_capacity);
            world.ship = Spaceship::new(world.bounds.center());
            world.effects.clear();
            world.camera.center_on(world.ship.position(), &world.bounds);
            out_events.push(Event::WorldConfigured {
                bounds: world.bounds,
            });
            world.request_refill(out_events);
        }
        Command::ConfigureViewport { width, height } => {
            world.camera.resize(width, height, &world.bounds);
        }
        Command::Tick { dt } => {
            world.tick_index = world.tick_index.saturating_add(1);
            world.cosmetics.advance();
            out_events.push(Event::TimeAdvanced { dt });
        }
        Command::FinishTick => {
            let focus = world.ship.position();
            world.effects.advance(focus);
            world.camera.follow(focus, &world.bounds);
            world.effects.decay_shake();
        }
        Command::SpawnNode { position, rarity } => {
            if !world.bounds.contains(position) {
                debug!(x = position.x(), y = position.y(), "node outside world ignored");
                return;
            }
            match world.nodes.generate(position, rarity) {
                Some(node) => out_events.push(Event::NodeSpawned {
                    node,
                    position,
                    rarity,
                }),
                None => trace!("node field at capacity"),
            }
        }
        Command::RequestNodeRefill => world.request_refill(out_events),
        Command::AssignTarget { node } => match node {
            Some(node) if world.nodes.contains(node) => {
                if world.ship.target() != Some(node) {
                    world.release_target(out_events);
                    world.ship.assign(node);
                    out_events.push(Event::TargetAcquired { node });
                }
            }
            Some(node) => {
                debug!(node = node.get(), "refusing to target missing node");
                world.release_target(out_events);
            }
            None => world.release_target(out_events),
        },
        Command::TravelSpaceship { position, heading } => {
            if !world.validate_target(out_events) {
                return;
            }
            world.ship.travel(position, heading);
            out_events.push(Event::SpaceshipTraveled { position, heading });
        }
        Command::OrbitNode {
            node,
            orbit_angle,
            position,
            heading,
        } => {
            if !world.validate_target(out_events) || world.ship.target() != Some(node) {
                return;
            }
            let Some(target) = world.nodes.get_mut(node) else {
                return;
            };
            target.orbit_angle = orbit_angle;
            let node_position = target.position;
            let rarity = target.rarity;
            world.ship.orbit(position, heading);
            out_events.push(Event::SpaceshipOrbiting {
                node,
                node_position,
                rarity,
            });
        }
        Command::MineNode { node, damage } => {
            if world.ship.state() != ShipState::Mining || world.ship.target() != Some(node) {
                return;
            }
            match world.nodes.damage(node, damage) {
                None => world.release_target(out_events),
                Some(DamageOutcome::Damaged) => {}
                Some(DamageOutcome::Depleted(mined)) => {
                    let payout = world.economy.credit_payout(mined.value);
                    let _ = world.ship.release();
                    debug!(node = node.get(), payout, "node depleted");
                    out_events.push(Event::NodeDepleted {
                        node,
                        position: mined.position,
                        rarity: mined.rarity,
                        payout,
                    });
                }
            }
        }
        Command::SpawnParticles { particles } => world.effects.spawn_particles(particles),
        Command::ShowFloatingText {
            position,
            text,
            color,
        } => world.effects.show_text(position, text, color),
        Command::ShakeScreen { shake } => world.effects.request_shake(shake),
        Command::PurchaseUpgrade { track } => match world.economy.purchase(track) {
            Ok(receipt) => {
                debug!(
                    track = ?receipt.track,
                    level = receipt.level,
                    cost = receipt.cost,
                    "upgrade purchased"
                );
                out_events.push(Event::UpgradePurchased {
                    track: receipt.track,
                    level: receipt.level,
                    cost: receipt.cost,
                    next_cost: receipt.next_cost,
                });
            }
            Err(reason) => {
                debug!(%reason, "upgrade rejected");
                out_events.push(Event::UpgradeRejected { track, reason });
            }
        },
        Command::GrantResources { amount } => {
            if amount.is_finite() && amount > 0.0 {
                world.economy.grant(amount);
                out_events.push(Event::ResourcesGranted { amount });
            }
        }
        Command::RestoreProgress { save } => {
            world.economy.restore(save);
            out_events.push(Event::ProgressRestored);
        }
        Command::ResetProgress => {
            world.economy.reset();
            out_events.push(Event::ProgressReset);
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use starminer_core::{
        EconomySnapshot, NodeView, Rgb, SaveState, SpaceshipSnapshot, WorldBounds, WorldPoint,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Number of ticks opened since the world was created.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Bounds of the playable world.
    #[must_use]
    pub fn bounds(world: &World) -> WorldBounds {
        world.bounds
    }

    /// Maximum number of nodes the field holds.
    #[must_use]
    pub fn node_capacity(world: &World) -> usize {
        world.nodes.capacity()
    }

    /// Captures a read-only view of the nodes in the field.
    #[must_use]
    pub fn node_view(world: &World) -> NodeView {
        NodeView::from_snapshots(world.nodes.all().iter().map(|node| node.snapshot()).collect())
    }

    /// Captures the spaceship pose, target and derived stats.
    #[must_use]
    pub fn spaceship(world: &World) -> SpaceshipSnapshot {
        world.ship.snapshot(world.economy.stats())
    }

    /// Captures the resource ledger and upgrade tracks.
    #[must_use]
    pub fn economy(world: &World) -> EconomySnapshot {
        world.economy.snapshot()
    }

    /// Builds the flat persisted record, stamped with the provided save time.
    #[must_use]
    pub fn save_state(world: &World, last_save_time: u64) -> SaveState {
        world.economy.to_save(last_save_time)
    }

    /// Captures the camera rectangle.
    #[must_use]
    pub fn camera(world: &World) -> CameraSnapshot {
        let (width, height) = world.camera.size();
        CameraSnapshot {
            origin: world.camera.origin(),
            width,
            height,
        }
    }

    /// Captures the particles in draw order.
    #[must_use]
    pub fn particles(world: &World) -> Vec<ParticleSnapshot> {
        world
            .effects
            .particles()
            .iter()
            .map(|particle| ParticleSnapshot {
                position: particle.position,
                size: particle.size,
                color: particle.color,
                lifetime: particle.lifetime,
            })
            .collect()
    }

    /// Captures the floating texts in draw order.
    #[must_use]
    pub fn floating_texts(world: &World) -> Vec<FloatingTextSnapshot> {
        world
            .effects
            .texts()
            .iter()
            .map(|text| FloatingTextSnapshot {
                position: text.position,
                text: text.text.clone(),
                color: text.color,
                opacity: text.opacity,
            })
            .collect()
    }

    /// Captures the active screen shake.
    #[must_use]
    pub fn shake(world: &World) -> ShakeSnapshot {
        let shake = world.effects.shake();
        ShakeSnapshot {
            magnitude: shake.magnitude,
            remaining: shake.remaining,
        }
    }

    /// Captures the purely cosmetic animation angles.
    #[must_use]
    pub fn cosmetics(world: &World) -> CosmeticSnapshot {
        CosmeticSnapshot {
            float_angle: world.cosmetics.float_angle,
            wobble_angle: world.cosmetics.wobble_angle,
        }
    }

    /// Camera rectangle in world units.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct CameraSnapshot {
        /// Top-left corner of the visible region.
        pub origin: WorldPoint,
        /// Width of the visible region.
        pub width: f32,
        /// Height of the visible region.
        pub height: f32,
    }

    /// Immutable representation of a single particle.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct ParticleSnapshot {
        /// Current position.
        pub position: WorldPoint,
        /// Draw radius.
        pub size: f32,
        /// Fill colour.
        pub color: Rgb,
        /// Ticks left before the particle expires.
        pub lifetime: f32,
    }

    /// Immutable representation of a floating text label.
    #[derive(Clone, Debug, PartialEq)]
    pub struct FloatingTextSnapshot {
        /// Current anchor.
        pub position: WorldPoint,
        /// Displayed text.
        pub text: String,
        /// Text colour.
        pub color: Rgb,
        /// Remaining opacity in `(0, 1]`.
        pub opacity: f32,
    }

    /// Immutable representation of the screen shake.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct ShakeSnapshot {
        /// Largest render offset along each axis.
        pub magnitude: f32,
        /// Ticks left before the shake ends.
        pub remaining: u32,
    }

    impl ShakeSnapshot {
        /// Reports whether the shake still offsets the render.
        #[must_use]
        pub const fn is_active(&self) -> bool {
            self.remaining > 0
        }
    }

    /// Cosmetic angles advanced every tick.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct CosmeticSnapshot {
        /// Phase of the spaceship's vertical bobbing.
        pub float_angle: f32,
        /// Phase of the mined node's jitter.
        pub wobble_angle: f32,
    }
}
