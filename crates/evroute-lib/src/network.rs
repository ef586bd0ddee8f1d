use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Numeric identifier for a road network node.
pub type NodeId = i64;

/// Speed assumed for edges that carry no max speed annotation.
pub const DEFAULT_MAX_SPEED_KMH: f64 = 40.0;

/// Planar coordinates for a node, in kilometres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Absolute coordinate differences `(dx, dy)` to another position.
    pub fn deltas(&self, other: &Self) -> (f64, f64) {
        ((self.x - other.x).abs(), (self.y - other.y).abs())
    }
}

/// Location in the road network.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub position: Coordinate,
}

/// Directed edge within the road network.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub target: NodeId,
    /// Edge length in metres.
    pub length_m: f64,
    /// Explicit energy cost in kWh; derived from length when absent.
    pub energy_cost: Option<f64>,
    pub max_speed_kmh: Option<f64>,
}

impl Edge {
    pub fn new(target: NodeId, length_m: f64) -> Self {
        Self {
            target,
            length_m,
            energy_cost: None,
            max_speed_kmh: None,
        }
    }

    pub fn with_energy_cost(mut self, energy_cost: f64) -> Self {
        self.energy_cost = Some(energy_cost);
        self
    }

    pub fn with_max_speed(mut self, max_speed_kmh: f64) -> Self {
        self.max_speed_kmh = Some(max_speed_kmh);
        self
    }

    pub fn distance_km(&self) -> f64 {
        self.length_m / 1000.0
    }

    /// Travel time in minutes at the edge's max speed.
    pub fn travel_time_min(&self) -> f64 {
        let speed = self
            .max_speed_kmh
            .filter(|speed| *speed > 0.0)
            .unwrap_or(DEFAULT_MAX_SPEED_KMH);
        self.distance_km() / speed * 60.0
    }
}

/// Read-only road network used by the search engine.
///
/// Node and adjacency tables sit behind `Arc`, so clones are cheap and a
/// single network can serve concurrent queries.
#[derive(Debug, Clone, Default)]
pub struct RoadNetwork {
    nodes: Arc<HashMap<NodeId, Node>>,
    adjacency: Arc<HashMap<NodeId, Vec<Edge>>>,
}

impl RoadNetwork {
    pub fn builder() -> NetworkBuilder {
        NetworkBuilder::default()
    }

    /// Parse a network from its JSON document form.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let document: NetworkDocument = serde_json::from_str(json)?;
        document.into_network()
    }

    /// Load a network from a JSON file on disk.
    pub fn from_json_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let network = Self::from_json_str(&contents)?;
        debug!(
            path = %path.display(),
            nodes = network.node_count(),
            edges = network.edge_count(),
            "loaded road network"
        );
        Ok(network)
    }

    /// Return a copy of the network where every edge carries
    /// `energy_cost = gamma × length_km`, replacing any existing cost.
    pub fn with_energy_costs(&self, gamma: f64) -> Result<Self> {
        if !gamma.is_finite() || gamma < 0.0 {
            return Err(Error::invalid_parameter(
                "gamma",
                "must be a finite non-negative number",
            ));
        }

        let adjacency = self
            .adjacency
            .iter()
            .map(|(&source, edges)| {
                let weighted = edges
                    .iter()
                    .cloned()
                    .map(|edge| {
                        let cost = gamma * edge.distance_km();
                        edge.with_energy_cost(cost)
                    })
                    .collect();
                (source, weighted)
            })
            .collect();

        Ok(Self {
            nodes: Arc::clone(&self.nodes),
            adjacency: Arc::new(adjacency),
        })
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn position(&self, id: NodeId) -> Option<Coordinate> {
        self.nodes.get(&id).map(|node| node.position)
    }

    /// Outgoing edges for a node, in insertion order.
    pub fn neighbours(&self, id: NodeId) -> &[Edge] {
        self.adjacency.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Shortest direct edge from `from` to `to`, if any.
    pub fn edge_between(&self, from: NodeId, to: NodeId) -> Option<&Edge> {
        self.neighbours(from)
            .iter()
            .filter(|edge| edge.target == to)
            .min_by(|a, b| a.length_m.total_cmp(&b.length_m))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Node identifiers in ascending order.
    pub fn node_ids(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.nodes.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

/// Incremental constructor for [`RoadNetwork`].
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    nodes: HashMap<NodeId, Node>,
    edges: Vec<(NodeId, Edge)>,
}

impl NetworkBuilder {
    pub fn node(mut self, id: NodeId, x: f64, y: f64) -> Self {
        self.nodes.insert(
            id,
            Node {
                id,
                position: Coordinate::new(x, y),
            },
        );
        self
    }

    pub fn edge(mut self, source: NodeId, edge: Edge) -> Self {
        self.edges.push((source, edge));
        self
    }

    /// Add the same edge in both directions.
    pub fn bidirectional(self, a: NodeId, b: NodeId, edge: Edge) -> Self {
        let forward = Edge {
            target: b,
            ..edge.clone()
        };
        let backward = Edge { target: a, ..edge };
        self.edge(a, forward).edge(b, backward)
    }

    pub fn build(self) -> Result<RoadNetwork> {
        let mut adjacency: HashMap<NodeId, Vec<Edge>> = HashMap::new();
        for (source, edge) in self.edges {
            if !self.nodes.contains_key(&source) {
                return Err(Error::invalid_network(format!(
                    "edge source {source} is not a known node"
                )));
            }
            if !self.nodes.contains_key(&edge.target) {
                return Err(Error::invalid_network(format!(
                    "edge target {} is not a known node",
                    edge.target
                )));
            }
            if !edge.length_m.is_finite() || edge.length_m < 0.0 {
                return Err(Error::invalid_network(format!(
                    "edge {source}->{} has invalid length {}",
                    edge.target, edge.length_m
                )));
            }
            if let Some(cost) = edge.energy_cost {
                if !cost.is_finite() || cost < 0.0 {
                    return Err(Error::invalid_network(format!(
                        "edge {source}->{} has invalid energy cost {cost}",
                        edge.target
                    )));
                }
            }
            adjacency.entry(source).or_default().push(edge);
        }

        Ok(RoadNetwork {
            nodes: Arc::new(self.nodes),
            adjacency: Arc::new(adjacency),
        })
    }
}

#[derive(Debug, Deserialize)]
struct NetworkDocument {
    nodes: Vec<NodeRecord>,
    #[serde(default)]
    edges: Vec<EdgeRecord>,
}

#[derive(Debug, Deserialize)]
struct NodeRecord {
    id: NodeId,
    x: f64,
    y: f64,
}

#[derive(Debug, Deserialize)]
struct EdgeRecord {
    from: NodeId,
    to: NodeId,
    length: f64,
    #[serde(default)]
    energy_cost: Option<f64>,
    #[serde(default, alias = "max_speed")]
    maxspeed: Option<f64>,
}

impl NetworkDocument {
    fn into_network(self) -> Result<RoadNetwork> {
        let mut builder = RoadNetwork::builder();
        for node in self.nodes {
            if !node.x.is_finite() || !node.y.is_finite() {
                return Err(Error::invalid_network(format!(
                    "node {} has non-finite coordinates",
                    node.id
                )));
            }
            builder = builder.node(node.id, node.x, node.y);
        }
        for record in self.edges {
            let edge = Edge {
                target: record.to,
                length_m: record.length,
                energy_cost: record.energy_cost,
                max_speed_kmh: record.maxspeed,
            };
            builder = builder.edge(record.from, edge);
        }
        builder.build()
    }
}
