//! Per-frame host logic: advancing the clock, autosaving and status logs.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use starminer_core::UpgradeTrack;
use starminer_rendering::Scene;
use starminer_simulation::Simulation;
use starminer_storage::SaveStore;
use tracing::{debug, info, warn};

const STATUS_INTERVAL: Duration = Duration::from_secs(10);

/// Owns the simulation and its save slot for the lifetime of a run.
#[derive(Debug)]
pub(crate) struct Session<S> {
    simulation: Simulation,
    store: S,
    auto_upgrade: bool,
    target: Option<f64>,
    since_status: Duration,
    saves: u32,
}

impl<S: SaveStore> Session<S> {
    pub(crate) fn new(simulation: Simulation, store: S) -> Self {
        Self {
            simulation,
            store,
            auto_upgrade: false,
            target: None,
            since_status: Duration::ZERO,
            saves: 0,
        }
    }

    /// Buys every affordable upgrade after each frame.
    pub(crate) fn with_auto_upgrade(mut self, enabled: bool) -> Self {
        self.auto_upgrade = enabled;
        self
    }

    /// Ends the run once the balance reaches `target`.
    pub(crate) fn with_target(mut self, target: Option<f64>) -> Self {
        self.target = target;
        self
    }

    pub(crate) fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    /// Advances one frame and refreshes `scene`. Returns `false` once the run should end.
    pub(crate) fn frame(&mut self, dt: Duration, scene: &mut Scene) -> bool {
        let report = self.simulation.advance(dt);
        if report.depleted > 0 {
            debug!(payout = report.payout, "nodes mined");
        }

        if report.autosave_due {
            self.persist();
        }
        if self.auto_upgrade {
            self.buy_affordable();
        }

        self.since_status = self.since_status.saturating_add(dt);
        if self.since_status >= STATUS_INTERVAL {
            self.since_status = Duration::ZERO;
            self.log_status();
        }

        *scene = self.simulation.scene();
        match self.target {
            Some(target) => self.simulation.economy().resources < target,
            None => true,
        }
    }

    /// Writes progress to the store. Failures are logged and never interrupt play.
    pub(crate) fn persist(&mut self) {
        let state = self.simulation.save_state(epoch_millis());
        match self.store.save(&state) {
            Ok(()) => {
                self.saves += 1;
                debug!(resources = state.resources, "progress saved");
            }
            Err(error) => warn!(%error, "failed to save progress"),
        }
    }

    pub(crate) fn saves(&self) -> u32 {
        self.saves
    }

    /// Purchases request a save that the next frame's report carries.
    fn buy_affordable(&mut self) {
        for track in UpgradeTrack::ALL {
            while let Ok(receipt) = self.simulation.purchase(track) {
                info!(
                    track = ?receipt.track,
                    level = receipt.level,
                    cost = receipt.cost,
                    "upgrade purchased"
                );
            }
        }
    }

    fn log_status(&self) {
        let economy = self.simulation.economy();
        let ship = self.simulation.spaceship();
        info!(
            resources = economy.resources.floor(),
            miner_level = economy.miner_level,
            engine_level = economy.engine_level,
            state = ?ship.state,
            nodes = self.simulation.nodes().len(),
            "status"
        );
    }
}

fn epoch_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}
