#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Simulation clock that owns the Star Miner world and its systems.
//!
//! Every tick runs the same pipeline: pending commands submitted between
//! ticks are applied first, then the tick opens, systems react to the
//! resulting events until no further commands are produced, the effects and
//! camera advance, the shake decays, and a render snapshot can be taken.

mod autosave;
mod config;
mod queue;
mod scene;

use std::time::Duration;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use starminer_core::{
    Command, EconomySnapshot, Event, NodeView, PurchaseError, SaveState, SpaceshipSnapshot,
    UpgradeTrack,
};
use starminer_rendering::Scene;
use starminer_system_effects::{self as effects_system, Effects};
use starminer_system_node_field::{self as node_field_system, NodeField};
use starminer_system_pilot::Pilot;
use starminer_world::{self as world, query, World};
use tracing::{debug, trace};

pub use config::SimulationConfig;

use self::{autosave::AutosaveTimer, queue::CommandQueue};

const EFFECTS_SEED_SALT: u64 = 0x9e37_79b9_7f4a_7c15;
const SHAKE_SEED_SALT: u64 = 0xc2b2_ae3d_27d4_eb4f;

/// Receipt returned by a successful upgrade purchase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UpgradeReceipt {
    /// Track that was upgraded.
    pub track: UpgradeTrack,
    /// Level reached by the purchase.
    pub level: u32,
    /// Price that was paid.
    pub cost: f64,
    /// Price of the following level.
    pub next_cost: f64,
}

/// Summary of a single tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickReport {
    /// Nodes mined out during the tick.
    pub depleted: usize,
    /// Resources credited during the tick.
    pub payout: f64,
    /// Whether the host should persist progress now.
    pub autosave_due: bool,
}

/// Owns the world, the systems and the timers driving them.
#[derive(Debug)]
pub struct Simulation {
    world: World,
    node_field: NodeField,
    pilot: Pilot,
    effects: Effects,
    queue: CommandQueue,
    autosave: AutosaveTimer,
    shake_rng: ChaCha8Rng,
    shake_offset: Vec2,
    save_requested: bool,
}

impl Simulation {
    /// Creates a simulation and populates its node field.
    #[must_use]
    pub fn new(config: &SimulationConfig) -> Self {
        let mut simulation = Self {
            world: World::new(),
            node_field: NodeField::new(node_field_system::Config::new(
                config.node_interval(),
                config.seed,
            )),
            pilot: Pilot,
            effects: Effects::new(effects_system::Config::new(
                config.seed ^ EFFECTS_SEED_SALT,
            )),
            queue: CommandQueue::default(),
            autosave: AutosaveTimer::new(config.autosave_interval()),
            shake_rng: ChaCha8Rng::seed_from_u64(config.seed ^ SHAKE_SEED_SALT),
            shake_offset: Vec2::ZERO,
            save_requested: false,
        };

        let _ = simulation.dispatch(Command::ConfigureWorld {
            width: config.world_width,
            height: config.world_height,
            node_capacity: config.node_capacity,
        });
        let _ = simulation.dispatch(Command::ConfigureViewport {
            width: config.viewport_width,
            height: config.viewport_height,
        });
        debug!(
            nodes = query::node_view(&simulation.world).len(),
            "simulation ready"
        );
        simulation
    }

    /// Banner adapters may greet the player with.
    #[must_use]
    pub fn welcome_banner(&self) -> &'static str {
        query::welcome_banner(&self.world)
    }

    /// Read-only access to the world for queries.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Replaces the economy with previously persisted progress.
    pub fn restore(&mut self, save: SaveState) {
        let _ = self.dispatch(Command::RestoreProgress { save });
    }

    /// Returns the economy to its defaults and asks for an immediate save.
    pub fn reset(&mut self) {
        let _ = self.dispatch(Command::ResetProgress);
        self.save_requested = true;
    }

    /// Credits resources outside of mining. Returns `false` when the amount is ignored.
    pub fn grant(&mut self, amount: f64) -> bool {
        self.dispatch(Command::GrantResources { amount })
            .iter()
            .any(|event| matches!(event, Event::ResourcesGranted { .. }))
    }

    /// Buys the next miner level.
    pub fn purchase_miner(&mut self) -> Result<UpgradeReceipt, PurchaseError> {
        self.purchase(UpgradeTrack::Miner)
    }

    /// Buys the next engine level.
    pub fn purchase_engine(&mut self) -> Result<UpgradeReceipt, PurchaseError> {
        self.purchase(UpgradeTrack::Engine)
    }

    /// Buys the next level of `track`, leaving state untouched when funds are short.
    pub fn purchase(&mut self, track: UpgradeTrack) -> Result<UpgradeReceipt, PurchaseError> {
        let before = self.economy();
        let _ = self.dispatch(Command::PurchaseUpgrade { track });
        let after = self.economy();
        if after.spent == before.spent {
            return Err(PurchaseError::InsufficientFunds {
                track,
                cost: before.cost(track),
                balance: before.resources,
            });
        }

        self.save_requested = true;
        Ok(UpgradeReceipt {
            track,
            level: after.level(track),
            cost: before.cost(track),
            next_cost: after.cost(track),
        })
    }

    /// Submits a command to be applied at the start of the next tick.
    pub fn enqueue(&mut self, command: Command) {
        self.queue.push(command);
    }

    /// Number of commands waiting for the next tick.
    #[must_use]
    pub fn pending_commands(&self) -> usize {
        self.queue.len()
    }

    /// Runs one tick of `dt`.
    pub fn advance(&mut self, dt: Duration) -> TickReport {
        for command in self.queue.take() {
            let _ = self.dispatch(command);
        }

        let mut report = TickReport::default();
        for event in self.dispatch(Command::Tick { dt }) {
            if let Event::NodeDepleted { payout, .. } = event {
                report.depleted += 1;
                report.payout += payout;
            }
        }

        let _ = self.dispatch(Command::FinishTick);
        self.shake_offset = self.sample_shake();

        let timer_due = self.autosave.advance(dt);
        let requested = std::mem::take(&mut self.save_requested);
        report.autosave_due = timer_due || requested;
        trace!(
            tick = query::tick_index(&self.world),
            depleted = report.depleted,
            "tick complete"
        );
        report
    }

    /// Builds the render snapshot for the most recent tick.
    #[must_use]
    pub fn scene(&self) -> Scene {
        scene::build(&self.world, self.shake_offset)
    }

    /// Flat record of progress, stamped with `last_save_time` in epoch milliseconds.
    #[must_use]
    pub fn save_state(&self, last_save_time: u64) -> SaveState {
        query::save_state(&self.world, last_save_time)
    }

    /// Resource ledger and upgrade tracks.
    #[must_use]
    pub fn economy(&self) -> EconomySnapshot {
        query::economy(&self.world)
    }

    /// Spaceship pose, target and stats.
    #[must_use]
    pub fn spaceship(&self) -> SpaceshipSnapshot {
        query::spaceship(&self.world)
    }

    /// Live mining nodes.
    #[must_use]
    pub fn nodes(&self) -> NodeView {
        query::node_view(&self.world)
    }

    /// Applies `command` and lets every system react until the world is quiescent.
    ///
    /// Returns every event emitted along the way.
    fn dispatch(&mut self, command: Command) -> Vec<Event> {
        let mut log = Vec::new();
        let mut events = Vec::new();
        world::apply(&mut self.world, command, &mut events);

        loop {
            if events.is_empty() {
                break;
            }
            log.extend(events.iter().cloned());

            let ship = query::spaceship(&self.world);
            let nodes = query::node_view(&self.world);
            let bounds = query::bounds(&self.world);
            let mut commands = Vec::new();
            self.pilot.handle(&events, &ship, &nodes, &mut commands);
            self.node_field.handle(&events, bounds, &mut commands);
            self.effects.handle(&events, &mut commands);

            if commands.is_empty() {
                break;
            }

            events.clear();
            for command in commands {
                world::apply(&mut self.world, command, &mut events);
            }
        }

        log
    }

    fn sample_shake(&mut self) -> Vec2 {
        let shake = query::shake(&self.world);
        if !shake.is_active() || !shake.magnitude.is_finite() || shake.magnitude <= 0.0 {
            return Vec2::ZERO;
        }
        let magnitude = shake.magnitude;
        Vec2::new(
            self.shake_rng.gen_range(-magnitude..=magnitude),
            self.shake_rng.gen_range(-magnitude..=magnitude),
        )
    }
}
