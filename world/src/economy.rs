//! Resource ledger and upgrade tracks.

use starminer_core::{EconomySnapshot, PurchaseError, SaveState, ShipStats, UpgradeTrack};

/// Receipt describing a completed purchase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Purchase {
    pub(crate) track: UpgradeTrack,
    pub(crate) level: u32,
    pub(crate) cost: f64,
    pub(crate) next_cost: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Track {
    level: u32,
    cost: f64,
}

impl Track {
    fn fresh(track: UpgradeTrack) -> Self {
        Self {
            level: 0,
            cost: track.base_cost(),
        }
    }
}

/// Balance, upgrade levels and the stats they derive.
///
/// Tracks every credit and debit so that
/// `opening_balance + earned + granted - spent == resources` always holds.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Economy {
    resources: f64,
    miner: Track,
    engine: Track,
    opening_balance: f64,
    earned: f64,
    granted: f64,
    spent: f64,
    stats: ShipStats,
}

impl Economy {
    pub(crate) fn new() -> Self {
        Self::from_save(SaveState::default())
    }

    fn from_save(save: SaveState) -> Self {
        let save = save.sanitized();
        let miner = Track {
            level: save.miner_level,
            cost: save.miner_cost,
        };
        let engine = Track {
            level: save.engine_level,
            cost: save.engine_cost,
        };
        Self {
            resources: save.resources,
            miner,
            engine,
            opening_balance: save.resources,
            earned: 0.0,
            granted: 0.0,
            spent: 0.0,
            stats: ShipStats::for_levels(miner.level, engine.level),
        }
    }

    pub(crate) fn stats(&self) -> ShipStats {
        self.stats
    }

    pub(crate) fn restore(&mut self, save: SaveState) {
        *self = Self::from_save(save);
    }

    pub(crate) fn reset(&mut self) {
        self.miner = Track::fresh(UpgradeTrack::Miner);
        self.engine = Track::fresh(UpgradeTrack::Engine);
        self.resources = 0.0;
        self.opening_balance = 0.0;
        self.earned = 0.0;
        self.granted = 0.0;
        self.spent = 0.0;
        self.recompute_stats();
    }

    /// Credits a depleted node and returns the floored payout.
    pub(crate) fn credit_payout(&mut self, node_value: f64) -> f64 {
        let payout = (node_value * self.stats.production_multiplier).floor().max(0.0);
        self.resources += payout;
        self.earned += payout;
        payout
    }

    pub(crate) fn grant(&mut self, amount: f64) {
        self.resources += amount;
        self.granted += amount;
    }

    /// Buys the next level of `track`, leaving state untouched when funds are short.
    pub(crate) fn purchase(&mut self, track: UpgradeTrack) -> Result<Purchase, PurchaseError> {
        let balance = self.resources;
        let entry = self.track_mut(track);
        let cost = entry.cost;
        if balance < cost {
            return Err(PurchaseError::InsufficientFunds {
                track,
                cost,
                balance,
            });
        }

        entry.level = entry.level.saturating_add(1);
        entry.cost = track.next_cost(cost);
        let level = entry.level;
        let next_cost = entry.cost;

        self.resources -= cost;
        self.spent += cost;
        self.recompute_stats();

        Ok(Purchase {
            track,
            level,
            cost,
            next_cost,
        })
    }

    pub(crate) fn to_save(&self, last_save_time: u64) -> SaveState {
        SaveState {
            resources: self.resources,
            miner_level: self.miner.level,
            miner_cost: self.miner.cost,
            engine_level: self.engine.level,
            engine_cost: self.engine.cost,
            last_save_time,
        }
    }

    pub(crate) fn snapshot(&self) -> EconomySnapshot {
        EconomySnapshot {
            resources: self.resources,
            miner_level: self.miner.level,
            miner_cost: self.miner.cost,
            engine_level: self.engine.level,
            engine_cost: self.engine.cost,
            opening_balance: self.opening_balance,
            earned: self.earned,
            granted: self.granted,
            spent: self.spent,
        }
    }

    fn track_mut(&mut self, track: UpgradeTrack) -> &mut Track {
        match track {
            UpgradeTrack::Miner => &mut self.miner,
            UpgradeTrack::Engine => &mut self.engine,
        }
    }

    fn recompute_stats(&mut self) {
        self.stats = ShipStats::for_levels(self.miner.level, self.engine.level);
    }
}
