//! Charging station membership.
//!
//! The search core only needs to know whether a node offers a charger. Station
//! metadata (name, address) is accepted when loading documents but not kept.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::Result;
use crate::network::{NodeId, RoadNetwork};

/// Set of nodes that host a charging station.
///
/// Document order is retained so [`ChargerSet::truncate`] is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChargerSet {
    order: Vec<NodeId>,
    members: HashSet<NodeId>,
}

impl ChargerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_nodes(nodes: impl IntoIterator<Item = NodeId>) -> Self {
        let mut set = Self::new();
        for node in nodes {
            set.insert(node);
        }
        set
    }

    /// Parse a charger document: `{ "data": [{ "node": 1, "name": "..." }] }`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let document: ChargerDocument = serde_json::from_str(json)?;
        Ok(Self::from_nodes(
            document.data.into_iter().map(|record| record.node),
        ))
    }

    pub fn from_json_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let chargers = Self::from_json_str(&contents)?;
        debug!(path = %path.display(), count = chargers.len(), "loaded chargers");
        Ok(chargers)
    }

    /// Insert a charger node; returns `false` when it was already present.
    pub fn insert(&mut self, node: NodeId) -> bool {
        if self.members.insert(node) {
            self.order.push(node);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.members.contains(&node)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.order.iter().copied()
    }

    /// Keep only the first `max` chargers in insertion order.
    pub fn truncate(&mut self, max: usize) {
        for node in self.order.drain(max.min(self.order.len())..) {
            self.members.remove(&node);
        }
    }

    /// Drop chargers that do not exist in `network`.
    pub fn retain_known(&mut self, network: &RoadNetwork) {
        let before = self.order.len();
        self.order.retain(|node| network.contains(*node));
        if self.order.len() != before {
            warn!(
                dropped = before - self.order.len(),
                "ignoring chargers that are not part of the road network"
            );
            self.members = self.order.iter().copied().collect();
        }
    }
}

impl FromIterator<NodeId> for ChargerSet {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        Self::from_nodes(iter)
    }
}

#[derive(Debug, Deserialize)]
struct ChargerDocument {
    #[serde(default)]
    data: Vec<ChargerRecord>,
}

#[derive(Debug, Deserialize)]
struct ChargerRecord {
    node: NodeId,
}
