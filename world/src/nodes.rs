//! Authoritative mining node storage and identifier allocation.

use starminer_core::{NodeId, NodeRarity, NodeSnapshot, WorldPoint};

/// Draw radius of an undamaged node.
pub(crate) const NODE_BASE_SIZE: f32 = 10.0;
/// Number of nodes the field holds unless configured otherwise.
pub(crate) const DEFAULT_NODE_CAPACITY: usize = 15;

const BASE_NODE_HP: f32 = 100.0;
const BASE_NODE_VALUE: f64 = 10.0;
const RARE_MULTIPLIER: f32 = 5.0;

/// Single depletable resource source.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct MiningNode {
    pub(crate) id: NodeId,
    pub(crate) position: WorldPoint,
    pub(crate) hp: f32,
    pub(crate) max_hp: f32,
    pub(crate) value: f64,
    pub(crate) rarity: NodeRarity,
    pub(crate) orbit_angle: f32,
}

impl MiningNode {
    fn new(id: NodeId, position: WorldPoint, rarity: NodeRarity) -> Self {
        let (max_hp, value) = match rarity {
            NodeRarity::Common => (BASE_NODE_HP, BASE_NODE_VALUE),
            NodeRarity::Rare => (
                BASE_NODE_HP * RARE_MULTIPLIER,
                BASE_NODE_VALUE * f64::from(RARE_MULTIPLIER),
            ),
        };

        Self {
            id,
            position,
            hp: max_hp,
            max_hp,
            value,
            rarity,
            orbit_angle: 0.0,
        }
    }

    /// Draw radius proportional to the remaining hit points.
    pub(crate) fn size(&self) -> f32 {
        if self.max_hp <= 0.0 {
            return 0.0;
        }
        NODE_BASE_SIZE * (self.hp / self.max_hp).clamp(0.0, 1.0)
    }

    pub(crate) fn snapshot(&self) -> NodeSnapshot {
        NodeSnapshot {
            id: self.id,
            position: self.position,
            hp: self.hp,
            max_hp: self.max_hp,
            value: self.value,
            rarity: self.rarity,
            size: self.size(),
            orbit_angle: self.orbit_angle,
        }
    }
}

/// Result of applying mining damage to a node.
#[derive(Debug)]
pub(crate) enum DamageOutcome {
    /// The node survived the hit.
    Damaged,
    /// The node ran out of hit points and was removed from the field.
    Depleted(MiningNode),
}

/// Capacity-gated collection that exclusively owns every mining node.
#[derive(Debug)]
pub(crate) struct NodeField {
    nodes: Vec<MiningNode>,
    capacity: usize,
    next_node_id: NodeId,
}

impl NodeField {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            nodes: Vec::new(),
            capacity,
            next_node_id: NodeId::new(0),
        }
    }

    /// Drops every node and adopts a new capacity. Identifiers keep increasing.
    pub(crate) fn reconfigure(&mut self, capacity: usize) {
        self.nodes.clear();
        self.capacity = capacity;
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    pub(crate) fn vacancies(&self) -> usize {
        self.capacity.saturating_sub(self.nodes.len())
    }

    /// Creates a node when the field is below capacity.
    pub(crate) fn generate(&mut self, position: WorldPoint, rarity: NodeRarity) -> Option<NodeId> {
        if self.nodes.len() >= self.capacity {
            return None;
        }

        let id = self.next_node_id;
        self.next_node_id = NodeId::new(id.get().saturating_add(1));
        self.nodes.push(MiningNode::new(id, position, rarity));
        Some(id)
    }

    pub(crate) fn remove(&mut self, id: NodeId) -> Option<MiningNode> {
        let index = self.nodes.iter().position(|node| node.id == id)?;
        Some(self.nodes.remove(index))
    }

    pub(crate) fn all(&self) -> &[MiningNode] {
        &self.nodes
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&MiningNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut MiningNode> {
        self.nodes.iter_mut().find(|node| node.id == id)
    }

    pub(crate) fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Removes `amount` hit points, taking the node out of the field once depleted.
    ///
    /// Returns `None` when the node does not exist.
    pub(crate) fn damage(&mut self, id: NodeId, amount: f32) -> Option<DamageOutcome> {
        let node = self.get_mut(id)?;
        node.hp -= amount.max(0.0);
        if node.hp > 0.0 {
            return Some(DamageOutcome::Damaged);
        }

        self.remove(id).map(DamageOutcome::Depleted)
    }
}
