//! Tunables for a simulation run.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration consumed by [`crate::Simulation::new`].
///
/// Every field falls back to its default when absent, so partial files are valid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Width of the world rectangle.
    pub world_width: f32,
    /// Height of the world rectangle.
    pub world_height: f32,
    /// Width of the camera viewport.
    pub viewport_width: f32,
    /// Height of the camera viewport.
    pub viewport_height: f32,
    /// Maximum number of nodes alive at once.
    pub node_capacity: usize,
    /// Milliseconds between timer-driven node generation attempts.
    pub node_interval_ms: u64,
    /// Milliseconds between autosaves. Zero disables the timer.
    pub autosave_interval_ms: u64,
    /// Seed for every random stream in the run.
    pub seed: u64,
}

impl SimulationConfig {
    /// Interval between timer-driven node generation attempts.
    #[must_use]
    pub fn node_interval(&self) -> Duration {
        Duration::from_millis(self.node_interval_ms)
    }

    /// Interval between autosaves.
    #[must_use]
    pub fn autosave_interval(&self) -> Duration {
        Duration::from_millis(self.autosave_interval_ms)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            world_width: 3000.0,
            world_height: 3000.0,
            viewport_width: 1280.0,
            viewport_height: 720.0,
            node_capacity: 15,
            node_interval_ms: 3_000,
            autosave_interval_ms: 10_000,
            seed: 0x5354_4152_4d49_4e45,
        }
    }
}
