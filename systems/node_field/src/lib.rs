#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic node field system responsible for emitting node spawn commands.

use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use starminer_core::{Command, Event, NodeRarity, WorldBounds, WorldPoint};

/// Probability that a freshly generated node is rare.
const RARE_CHANCE: f64 = 0.1;

/// Configuration parameters required to construct the node field system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    generation_interval: Duration,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided generation cadence and seed.
    #[must_use]
    pub const fn new(generation_interval: Duration, rng_seed: u64) -> Self {
        Self {
            generation_interval,
            rng_seed,
        }
    }
}

/// Pure system that places new mining nodes on a timer and on demand.
///
/// Every request becomes a `SpawnNode` command; the world decides whether
/// the field has room for it.
#[derive(Debug)]
pub struct NodeField {
    generation_interval: Duration,
    accumulator: Duration,
    rng: ChaCha8Rng,
}

impl NodeField {
    /// Creates a new node field system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            generation_interval: config.generation_interval,
            accumulator: Duration::ZERO,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Consumes events and the world bounds to emit spawn commands.
    pub fn handle(&mut self, events: &[Event], bounds: WorldBounds, out: &mut Vec<Command>) {
        let mut requested = 0;
        let mut accumulated = Duration::ZERO;
        for event in events {
            match event {
                Event::TimeAdvanced { dt } => accumulated = accumulated.saturating_add(*dt),
                Event::NodeRefillRequested { vacancies } => requested += vacancies,
                Event::NodeDepleted { .. } => requested += 1,
                Event::WorldConfigured { .. } => self.accumulator = Duration::ZERO,
                _ => {}
            }
        }

        if !accumulated.is_zero() {
            self.accumulator = self.accumulator.saturating_add(accumulated);
            requested += self.resolve_generation_attempts();
        }

        if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return;
        }

        for _ in 0..requested {
            let position = self.random_position(bounds);
            let rarity = self.roll_rarity();
            out.push(Command::SpawnNode { position, rarity });
        }
    }

    fn resolve_generation_attempts(&mut self) -> usize {
        if self.generation_interval.is_zero() {
            return 0;
        }

        let mut attempts = 0;
        while self.accumulator >= self.generation_interval {
            self.accumulator -= self.generation_interval;
            attempts += 1;
        }
        attempts
    }

    fn random_position(&mut self, bounds: WorldBounds) -> WorldPoint {
        let x = self.rng.gen_range(0.0..=bounds.width());
        let y = self.rng.gen_range(0.0..=bounds.height());
        WorldPoint::new(x, y)
    }

    fn roll_rarity(&mut self) -> NodeRarity {
        if self.rng.gen_bool(RARE_CHANCE) {
            NodeRarity::Rare
        } else {
            NodeRarity::Common
        }
    }
}
