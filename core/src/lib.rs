#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Star Miner engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters and the simulation clock
//! submit [`Command`] values describing desired mutations, the world executes
//! those commands via its `apply` entry point, and then broadcasts [`Event`]
//! values for systems to react to deterministically. Systems consume event
//! streams, query immutable snapshots, and respond exclusively with new
//! command batches.

pub mod math;
pub mod palette;

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Star Miner.";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Resizes the world rectangle and sets the mining node capacity.
    ConfigureWorld {
        /// Width of the world measured in world units.
        width: f32,
        /// Height of the world measured in world units.
        height: f32,
        /// Maximum number of nodes the field may hold at once.
        node_capacity: usize,
    },
    /// Updates the camera viewport after the host surface was resized.
    ConfigureViewport {
        /// Width of the visible region in world units.
        width: f32,
        /// Height of the visible region in world units.
        height: f32,
    },
    /// Opens a new tick, advancing cosmetic angles and the clock.
    Tick {
        /// Wall-clock time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Closes the current tick: advances effects, follows the camera and
    /// decays the screen shake.
    FinishTick,
    /// Requests that a node be added to the field at the provided position.
    ///
    /// The world ignores the request when the field is at capacity.
    SpawnNode {
        /// Location of the new node.
        position: WorldPoint,
        /// Rarity rolled for the node.
        rarity: NodeRarity,
    },
    /// Asks the node field to top itself up to capacity.
    RequestNodeRefill,
    /// Points the spaceship at a node, or clears its target.
    AssignTarget {
        /// Node to pursue, `None` to return to seeking.
        node: Option<NodeId>,
    },
    /// Moves the spaceship toward its target without orbiting.
    TravelSpaceship {
        /// New spaceship position.
        position: WorldPoint,
        /// New facing angle in radians.
        heading: f32,
    },
    /// Places the spaceship on its orbit around the targeted node.
    OrbitNode {
        /// Node being orbited.
        node: NodeId,
        /// Orbit angle to store on the node.
        orbit_angle: f32,
        /// New spaceship position on the orbit.
        position: WorldPoint,
        /// New facing angle in radians.
        heading: f32,
    },
    /// Applies mining damage to a node, depleting it when hit points run out.
    MineNode {
        /// Node receiving the damage.
        node: NodeId,
        /// Hit points removed by this tick of mining.
        damage: f32,
    },
    /// Adds a batch of particles to the effects layer.
    SpawnParticles {
        /// Particles to add, in draw order.
        particles: Vec<ParticleSpawn>,
    },
    /// Adds a floating text label that drifts upward and fades out.
    ShowFloatingText {
        /// Anchor of the label in world space.
        position: WorldPoint,
        /// Text to display.
        text: String,
        /// Colour of the label.
        color: Rgb,
    },
    /// Requests a screen shake pulse.
    ShakeScreen {
        /// Magnitude, duration and priority of the pulse.
        shake: ShakeRequest,
    },
    /// Attempts to buy the next level of an upgrade track.
    PurchaseUpgrade {
        /// Track being purchased.
        track: UpgradeTrack,
    },
    /// Credits resources without mining them.
    GrantResources {
        /// Amount added to the balance.
        amount: f64,
    },
    /// Replaces the economy with a persisted snapshot.
    RestoreProgress {
        /// Snapshot being restored.
        save: SaveState,
    },
    /// Returns the economy to its starting state.
    ResetProgress,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Announces that the world bounds were reconfigured.
    WorldConfigured {
        /// Bounds that are now active.
        bounds: WorldBounds,
    },
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Wall-clock time that elapsed in the tick.
        dt: Duration,
    },
    /// Reports that the field has room for more nodes and wants them now.
    NodeRefillRequested {
        /// Number of nodes missing from capacity.
        vacancies: usize,
    },
    /// Confirms that a node was added to the field.
    NodeSpawned {
        /// Identifier allocated to the node.
        node: NodeId,
        /// Location of the node.
        position: WorldPoint,
        /// Rarity of the node.
        rarity: NodeRarity,
    },
    /// Confirms that the spaceship locked onto a node.
    TargetAcquired {
        /// Node now targeted.
        node: NodeId,
    },
    /// Reports that the spaceship dropped a target that was still held.
    TargetReleased {
        /// Node that was released.
        node: NodeId,
    },
    /// Reports that the spaceship moved toward its target this tick.
    SpaceshipTraveled {
        /// Position after the move.
        position: WorldPoint,
        /// Facing angle after the move.
        heading: f32,
    },
    /// Reports that the spaceship orbited and mined its target this tick.
    SpaceshipOrbiting {
        /// Node being mined.
        node: NodeId,
        /// Location of the node being mined.
        node_position: WorldPoint,
        /// Rarity of the node being mined.
        rarity: NodeRarity,
    },
    /// Reports that a node ran out of hit points and paid out.
    NodeDepleted {
        /// Identifier of the removed node.
        node: NodeId,
        /// Location the node occupied.
        position: WorldPoint,
        /// Rarity of the removed node.
        rarity: NodeRarity,
        /// Resources credited for the node.
        payout: f64,
    },
    /// Confirms that an upgrade was bought.
    UpgradePurchased {
        /// Track that advanced.
        track: UpgradeTrack,
        /// Level reached after the purchase.
        level: u32,
        /// Amount deducted from the balance.
        cost: f64,
        /// Price of the following level.
        next_cost: f64,
    },
    /// Reports that an upgrade purchase was declined.
    UpgradeRejected {
        /// Track that was requested.
        track: UpgradeTrack,
        /// Reason the purchase failed.
        reason: PurchaseError,
    },
    /// Confirms that resources were granted outside of mining.
    ResourcesGranted {
        /// Amount credited.
        amount: f64,
    },
    /// Confirms that a persisted snapshot replaced the economy.
    ProgressRestored,
    /// Confirms that the economy returned to its starting state.
    ProgressReset,
}

/// Position expressed in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WorldPoint {
    x: f32,
    y: f32,
}

impl WorldPoint {
    /// Creates a new world-space position.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical coordinate, growing downward.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Squared Euclidean distance to another point.
    #[must_use]
    pub fn distance_squared(self, other: WorldPoint) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: WorldPoint) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Angle in radians of the direction from `self` toward `other`.
    #[must_use]
    pub fn angle_to(self, other: WorldPoint) -> f32 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// Interpolates each coordinate toward `other`.
    #[must_use]
    pub fn lerp(self, other: WorldPoint, amount: f32) -> Self {
        Self {
            x: math::lerp(self.x, other.x, amount),
            y: math::lerp(self.y, other.y, amount),
        }
    }

    /// Point lying `radius` units away from `self` in direction `angle`.
    #[must_use]
    pub fn polar_offset(self, angle: f32, radius: f32) -> Self {
        Self {
            x: self.x + angle.cos() * radius,
            y: self.y + angle.sin() * radius,
        }
    }

    /// Point displaced by the provided vector.
    #[must_use]
    pub fn translated(self, by: WorldVector) -> Self {
        Self {
            x: self.x + by.x(),
            y: self.y + by.y(),
        }
    }
}

/// Displacement expressed in world units per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WorldVector {
    x: f32,
    y: f32,
}

impl WorldVector {
    /// Vector of zero length.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Creates a vector from its components.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Creates a vector of the given length pointing along `angle`.
    #[must_use]
    pub fn from_angle(angle: f32, length: f32) -> Self {
        Self {
            x: angle.cos() * length,
            y: angle.sin() * length,
        }
    }

    /// Horizontal component.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical component.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }
}

/// Rectangle `[0, width] x [0, height]` that bounds the playable world.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldBounds {
    width: f32,
    height: f32,
}

impl WorldBounds {
    /// Creates bounds with the provided extent. Negative or non-finite extents collapse to zero.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: usable_extent(width),
            height: usable_extent(height),
        }
    }

    /// Width of the world.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Height of the world.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Centre of the world rectangle.
    #[must_use]
    pub fn center(&self) -> WorldPoint {
        WorldPoint::new(self.width / 2.0, self.height / 2.0)
    }

    /// Reports whether the point lies inside the bounds, edges included.
    #[must_use]
    pub fn contains(&self, point: WorldPoint) -> bool {
        (0.0..=self.width).contains(&point.x()) && (0.0..=self.height).contains(&point.y())
    }
}

fn usable_extent(extent: f32) -> f32 {
    if extent.is_finite() {
        extent.max(0.0)
    } else {
        0.0
    }
}

/// Opaque RGB colour attached to effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    red: u8,
    green: u8,
    blue: u8,
}

impl Rgb {
    /// Creates a colour from byte components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the color.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the color.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the color.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Unique identifier assigned to a mining node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u64);

impl NodeId {
    /// Creates a new node identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

/// Rarity drawn once when a node is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeRarity {
    /// Standard node.
    Common,
    /// Boosted node with scaled hit points and value.
    Rare,
}

impl NodeRarity {
    /// Returns `true` for [`NodeRarity::Rare`].
    #[must_use]
    pub const fn is_rare(self) -> bool {
        matches!(self, Self::Rare)
    }
}

/// How a particle moves between ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParticleMotion {
    /// Travels with a constant velocity.
    Ballistic {
        /// Displacement applied every tick.
        velocity: WorldVector,
    },
    /// Homes in on the spaceship and expires once it arrives.
    SeekOwner,
}

/// Description of a particle to be added to the effects layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleSpawn {
    /// Starting position.
    pub position: WorldPoint,
    /// Motion model applied every tick.
    pub motion: ParticleMotion,
    /// Remaining lifetime measured in ticks.
    pub lifetime: f32,
    /// Radius used when drawing the particle.
    pub size: f32,
    /// Fill colour.
    pub color: Rgb,
}

/// Whether a shake request may replace a shake already in progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShakePriority {
    /// Only applies when no shake is active.
    Pulse,
    /// Always replaces the active shake.
    Impact,
}

/// Screen shake pulse requested by a system.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShakeRequest {
    /// Largest render offset along each axis.
    pub magnitude: f32,
    /// Number of ticks the shake lasts.
    pub duration: u32,
    /// Whether the request may override an active shake.
    pub priority: ShakePriority,
}

/// Upgrade tracks available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeTrack {
    /// Raises damage per second.
    Miner,
    /// Raises production multiplier, travel speed and star speed.
    Engine,
}

impl UpgradeTrack {
    /// Every track in display order.
    pub const ALL: [Self; 2] = [Self::Miner, Self::Engine];

    /// Price of the first level.
    #[must_use]
    pub const fn base_cost(self) -> f64 {
        match self {
            Self::Miner => 10.0,
            Self::Engine => 50.0,
        }
    }

    /// Factor applied to the price after every purchase.
    #[must_use]
    pub const fn cost_growth(self) -> f64 {
        match self {
            Self::Miner => 1.5,
            Self::Engine => 1.8,
        }
    }

    /// Price of the level following one that cost `current`.
    ///
    /// Each step floors the previous result.
    #[must_use]
    pub fn next_cost(self, current: f64) -> f64 {
        (current * self.cost_growth()).floor()
    }
}

/// Reasons an upgrade purchase may be declined.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum PurchaseError {
    /// The balance does not cover the next level.
    #[error("{track:?} upgrade costs {cost} but only {balance} is available")]
    InsufficientFunds {
        /// Track that was requested.
        track: UpgradeTrack,
        /// Price of the next level.
        cost: f64,
        /// Balance at the time of the request.
        balance: f64,
    },
}

/// Stats derived from upgrade levels.
///
/// Recomputed from levels whenever a level changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShipStats {
    /// Hit points removed from the mined node per second.
    pub damage_per_second: f32,
    /// Travel speed factor scaling the approach easing.
    pub speed: f32,
    /// Scalar applied to node value on payout.
    pub production_multiplier: f64,
    /// Background star scroll speed, cosmetic only.
    pub star_speed: f32,
}

impl ShipStats {
    /// Computes the stats reached at the provided levels.
    #[must_use]
    pub fn for_levels(miner_level: u32, engine_level: u32) -> Self {
        let miner = miner_level as f32;
        let engine = engine_level as f32;
        Self {
            damage_per_second: 10.0 + miner * 10.0,
            speed: 1.0 + engine * 0.2,
            production_multiplier: 1.0 + f64::from(engine_level),
            star_speed: 2.0 + engine * 0.5,
        }
    }
}

/// Phase of the spaceship's mining loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShipState {
    /// No live target is held.
    Seeking,
    /// Flying toward a target outside orbit range.
    Traveling,
    /// Orbiting and damaging the target.
    Mining,
}

/// Immutable representation of the spaceship used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpaceshipSnapshot {
    /// Current position.
    pub position: WorldPoint,
    /// Current facing angle in radians.
    pub heading: f32,
    /// Node currently pursued, if any.
    pub target: Option<NodeId>,
    /// Phase of the mining loop.
    pub state: ShipState,
    /// Stats derived from upgrade levels.
    pub stats: ShipStats,
}

/// Immutable representation of a single node's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeSnapshot {
    /// Unique identifier assigned to the node.
    pub id: NodeId,
    /// Location of the node.
    pub position: WorldPoint,
    /// Remaining hit points.
    pub hp: f32,
    /// Hit points at creation.
    pub max_hp: f32,
    /// Resources paid out before the production multiplier.
    pub value: f64,
    /// Rarity drawn at creation.
    pub rarity: NodeRarity,
    /// Draw radius, shrinking with hit points.
    pub size: f32,
    /// Angle of the spaceship's orbit around this node.
    pub orbit_angle: f32,
}

/// Read-only snapshot describing all nodes in the field.
#[derive(Clone, Debug, Default)]
pub struct NodeView {
    snapshots: Vec<NodeSnapshot>,
}

impl NodeView {
    /// Creates a new node view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<NodeSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured node snapshots in spawn order.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &NodeSnapshot> {
        self.snapshots.iter()
    }

    /// Looks up a node by identifier.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&NodeSnapshot> {
        self.snapshots
            .binary_search_by_key(&id, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.snapshots[index])
    }

    /// Reports whether the node is still in the field.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Number of nodes captured.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the field was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<NodeSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of the resource ledger.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EconomySnapshot {
    /// Spendable balance.
    pub resources: f64,
    /// Purchased miner levels.
    pub miner_level: u32,
    /// Price of the next miner level.
    pub miner_cost: f64,
    /// Purchased engine levels.
    pub engine_level: u32,
    /// Price of the next engine level.
    pub engine_cost: f64,
    /// Balance carried in by the last restore or reset.
    pub opening_balance: f64,
    /// Sum of all mining payouts.
    pub earned: f64,
    /// Sum of all resources granted outside of mining.
    pub granted: f64,
    /// Sum of all purchase costs.
    pub spent: f64,
}

impl EconomySnapshot {
    /// Level reached on the provided track.
    #[must_use]
    pub const fn level(&self, track: UpgradeTrack) -> u32 {
        match track {
            UpgradeTrack::Miner => self.miner_level,
            UpgradeTrack::Engine => self.engine_level,
        }
    }

    /// Price of the next level on the provided track.
    #[must_use]
    pub const fn cost(&self, track: UpgradeTrack) -> f64 {
        match track {
            UpgradeTrack::Miner => self.miner_cost,
            UpgradeTrack::Engine => self.engine_cost,
        }
    }
}

/// Flat persisted record of player progress.
///
/// Derived stats are not stored; they are recomputed from levels on load.
/// Restoring always goes through [`SaveState::sanitized`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SaveState {
    /// Spendable balance.
    pub resources: f64,
    /// Purchased miner levels.
    pub miner_level: u32,
    /// Price of the next miner level.
    pub miner_cost: f64,
    /// Purchased engine levels.
    pub engine_level: u32,
    /// Price of the next engine level.
    pub engine_cost: f64,
    /// Time of the save in milliseconds since the Unix epoch.
    pub last_save_time: u64,
}

impl SaveState {
    /// Replaces unusable fields with their defaults, keeping the rest.
    ///
    /// A balance that is negative or not finite becomes zero. A cost that is
    /// not finite or below its track's base cost becomes the base cost.
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self {
            resources: if self.resources.is_finite() && self.resources >= 0.0 {
                self.resources
            } else {
                0.0
            },
            miner_cost: sanitized_cost(self.miner_cost, UpgradeTrack::Miner),
            engine_cost: sanitized_cost(self.engine_cost, UpgradeTrack::Engine),
            ..self
        }
    }
}

fn sanitized_cost(cost: f64, track: UpgradeTrack) -> f64 {
    if cost.is_finite() && cost >= track.base_cost() {
        cost
    } else {
        track.base_cost()
    }
}

impl Default for SaveState {
    fn default() -> Self {
        Self {
            resources: 0.0,
            miner_level: 0,
            miner_cost: UpgradeTrack::Miner.base_cost(),
            engine_level: 0,
            engine_cost: UpgradeTrack::Engine.base_cost(),
            last_save_time: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn save_state_round_trips_through_bincode() {
        let save = SaveState {
            resources: 1234.5,
            miner_level: 3,
            miner_cost: 33.0,
            engine_level: 1,
            engine_cost: 90.0,
            last_save_time: 1_700_000_000_000,
        };
        assert_round_trip(&save);
    }

    #[test]
    fn sanitized_save_replaces_only_unusable_fields() {
        let save = SaveState {
            resources: f64::NAN,
            miner_level: 4,
            miner_cost: 0.0,
            engine_level: 2,
            engine_cost: 162.0,
            last_save_time: 9,
        }
        .sanitized();

        assert_eq!(
            save,
            SaveState {
                resources: 0.0,
                miner_level: 4,
                miner_cost: 10.0,
                engine_level: 2,
                engine_cost: 162.0,
                last_save_time: 9,
            }
        );
        assert_eq!(
            SaveState {
                resources: -3.0,
                engine_cost: f64::INFINITY,
                miner_cost: 4.0,
                ..SaveState::default()
            }
            .sanitized(),
            SaveState::default()
        );
    }

    #[test]
    fn miner_cost_sequence_floors_every_step() {
        let mut cost = UpgradeTrack::Miner.base_cost();
        let mut sequence = Vec::new();
        for _ in 0..5 {
            cost = UpgradeTrack::Miner.next_cost(cost);
            sequence.push(cost);
        }
        assert_eq!(sequence, vec![15.0, 22.0, 33.0, 49.0, 73.0]);
    }

    #[test]
    fn engine_cost_grows_by_its_own_factor() {
        let cost = UpgradeTrack::Engine.next_cost(UpgradeTrack::Engine.base_cost());
        assert_eq!(cost, 90.0);
        assert_eq!(UpgradeTrack::Engine.next_cost(cost), 162.0);
    }

    #[test]
    fn stats_follow_level_formulas() {
        let stats = ShipStats::for_levels(3, 2);
        assert_eq!(stats.damage_per_second, 40.0);
        assert_eq!(stats.production_multiplier, 3.0);
        assert!((stats.speed - 1.4).abs() < 1e-6);
        assert_eq!(stats.star_speed, 3.0);
    }

    #[test]
    fn base_stats_match_level_zero() {
        let stats = ShipStats::for_levels(0, 0);
        assert_eq!(stats.damage_per_second, 10.0);
        assert_eq!(stats.speed, 1.0);
        assert_eq!(stats.production_multiplier, 1.0);
        assert_eq!(stats.star_speed, 2.0);
    }

    #[test]
    fn node_view_lookup_uses_identifier_order() {
        let view = NodeView::from_snapshots(vec![node(7), node(2), node(4)]);
        let ids: Vec<u64> = view.iter().map(|snapshot| snapshot.id.get()).collect();
        assert_eq!(ids, vec![2, 4, 7]);
        assert!(view.contains(NodeId::new(4)));
        assert!(!view.contains(NodeId::new(5)));
    }

    #[test]
    fn bounds_reject_points_outside() {
        let bounds = WorldBounds::new(100.0, 50.0);
        assert!(bounds.contains(WorldPoint::new(100.0, 0.0)));
        assert!(!bounds.contains(WorldPoint::new(-1.0, 10.0)));
        assert!(!bounds.contains(WorldPoint::new(10.0, 50.5)));
        assert_eq!(bounds.center(), WorldPoint::new(50.0, 25.0));
    }

    #[test]
    fn non_finite_extents_collapse_to_zero() {
        let bounds = WorldBounds::new(f32::INFINITY, f32::NAN);
        assert_eq!(bounds.width(), 0.0);
        assert_eq!(bounds.height(), 0.0);
        assert_eq!(WorldBounds::new(-5.0, 20.0).width(), 0.0);
    }

    fn node(id: u64) -> NodeSnapshot {
        NodeSnapshot {
            id: NodeId::new(id),
            position: WorldPoint::new(0.0, 0.0),
            hp: 100.0,
            max_hp: 100.0,
            value: 10.0,
            rarity: NodeRarity::Common,
            size: 10.0,
            orbit_angle: 0.0,
        }
    }
}
