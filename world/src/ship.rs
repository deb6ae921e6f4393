//! Authoritative spaceship pose and target bookkeeping.

use starminer_core::{NodeId, ShipState, ShipStats, SpaceshipSnapshot, WorldPoint};

/// Spaceship state owned by the world.
///
/// The target is a plain identifier; the world clears it whenever the node
/// leaves the field, so it never outlives the node it names.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Spaceship {
    position: WorldPoint,
    heading: f32,
    target: Option<NodeId>,
    state: ShipState,
}

impl Spaceship {
    pub(crate) fn new(position: WorldPoint) -> Self {
        Self {
            position,
            heading: 0.0,
            target: None,
            state: ShipState::Seeking,
        }
    }

    pub(crate) fn position(&self) -> WorldPoint {
        self.position
    }

    pub(crate) fn target(&self) -> Option<NodeId> {
        self.target
    }

    pub(crate) fn state(&self) -> ShipState {
        self.state
    }

    pub(crate) fn assign(&mut self, node: NodeId) {
        self.target = Some(node);
        self.state = ShipState::Traveling;
    }

    /// Drops the target and returns to seeking, yielding the node that was held.
    pub(crate) fn release(&mut self) -> Option<NodeId> {
        self.state = ShipState::Seeking;
        self.target.take()
    }

    pub(crate) fn travel(&mut self, position: WorldPoint, heading: f32) {
        self.position = position;
        self.heading = heading;
        self.state = ShipState::Traveling;
    }

    pub(crate) fn orbit(&mut self, position: WorldPoint, heading: f32) {
        self.position = position;
        self.heading = heading;
        self.state = ShipState::Mining;
    }

    pub(crate) fn snapshot(&self, stats: ShipStats) -> SpaceshipSnapshot {
        SpaceshipSnapshot {
            position: self.position,
            heading: self.heading,
            target: self.target,
            state: self.state,
            stats,
        }
    }
}
