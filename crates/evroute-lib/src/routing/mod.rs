//! Route planning module for battery-aware routing.
//!
//! This module provides:
//! - [`RouteAlgorithm`] - Supported routing algorithms (A*, Dijkstra, Greedy)
//! - [`RouteRequest`] - High-level route planning request
//! - [`RoutePlan`] - Planned route result
//! - [`plan_route`] - Main entry point for computing routes
//!
//! # Strategy Pattern
//!
//! Each algorithm is encapsulated in a [`RoutePlanner`] implementation, so new
//! orderings can be added without touching the orchestration in
//! [`plan_route`].
//!
//! # Example
//!
//! ```
//! use evroute_lib::{plan_route, ChargerSet, Edge, RoadNetwork, RouteRequest};
//!
//! let network = RoadNetwork::builder()
//!     .node(1, 0.0, 0.0)
//!     .node(2, 1.0, 0.0)
//!     .edge(1, Edge::new(2, 1000.0).with_energy_cost(1.0))
//!     .build()?;
//! let plan = plan_route(&network, &ChargerSet::new(), &RouteRequest::a_star(1, 2))?;
//! assert_eq!(plan.path.nodes(), vec![1, 2]);
//! # Ok::<(), evroute_lib::Error>(())
//! ```

mod planner;

pub use planner::{select_planner, AStarPlanner, DijkstraPlanner, GreedyPlanner, RoutePlanner};

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::battery::Discretizer;
use crate::chargers::ChargerSet;
use crate::error::{Error, Result};
use crate::network::{NodeId, RoadNetwork};
use crate::reconstruct::TraceStep;
use crate::search::{NoopObserver, SearchConfig, SearchEngine, SearchObserver, SearchOutcome};

/// Supported routing algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RouteAlgorithm {
    /// Energy-A*: accumulated energy plus heuristic.
    #[default]
    #[serde(rename = "a-star")]
    AStar,
    /// Energy-A* with a zero heuristic.
    Dijkstra,
    /// Heuristic-only best-first search.
    Greedy,
}

impl fmt::Display for RouteAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteAlgorithm::AStar => "a-star",
            RouteAlgorithm::Dijkstra => "dijkstra",
            RouteAlgorithm::Greedy => "greedy",
        };
        f.write_str(value)
    }
}

/// High-level route planning request.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub origin: NodeId,
    pub destination: NodeId,
    pub algorithm: RouteAlgorithm,
    pub config: SearchConfig,
    /// Return the battery-annotated trace instead of a plain node path.
    pub include_trace: bool,
}

impl RouteRequest {
    pub fn new(origin: NodeId, destination: NodeId, algorithm: RouteAlgorithm) -> Self {
        Self {
            origin,
            destination,
            algorithm,
            config: SearchConfig::default(),
            include_trace: false,
        }
    }

    /// Convenience constructor for energy-A* routes with default parameters.
    pub fn a_star(origin: NodeId, destination: NodeId) -> Self {
        Self::new(origin, destination, RouteAlgorithm::AStar)
    }

    /// Convenience constructor for greedy routes with default parameters.
    pub fn greedy(origin: NodeId, destination: NodeId) -> Self {
        Self::new(origin, destination, RouteAlgorithm::Greedy)
    }

    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_trace(mut self, include_trace: bool) -> Self {
        self.include_trace = include_trace;
        self
    }
}

/// Route position with the battery level on arrival.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BatteryWaypoint {
    pub node: NodeId,
    pub battery_kwh: f64,
    pub recharged_here: bool,
}

impl BatteryWaypoint {
    fn from_step(step: &TraceStep, grid: &Discretizer) -> Self {
        Self {
            node: step.node,
            battery_kwh: grid.energy(step.battery),
            recharged_here: step.recharged_here,
        }
    }
}

/// Route geometry, either as plain nodes or as a battery trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "steps", rename_all = "snake_case")]
pub enum RoutePath {
    Nodes(Vec<NodeId>),
    Trace(Vec<BatteryWaypoint>),
}

impl RoutePath {
    /// Node sequence with in-place recharges collapsed.
    pub fn nodes(&self) -> Vec<NodeId> {
        match self {
            RoutePath::Nodes(nodes) => nodes.clone(),
            RoutePath::Trace(trace) => {
                let mut nodes: Vec<NodeId> = Vec::with_capacity(trace.len());
                for waypoint in trace {
                    if nodes.last() != Some(&waypoint.node) {
                        nodes.push(waypoint.node);
                    }
                }
                nodes
            }
        }
    }

    /// Battery trace, when one was requested.
    pub fn trace(&self) -> Option<&[BatteryWaypoint]> {
        match self {
            RoutePath::Nodes(_) => None,
            RoutePath::Trace(trace) => Some(trace),
        }
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, Serialize)]
pub struct RoutePlan {
    pub algorithm: RouteAlgorithm,
    pub origin: NodeId,
    pub destination: NodeId,
    pub path: RoutePath,
    /// Energy consumed along the route in kWh.
    pub total_energy: f64,
    /// Length of the edges driven, in km.
    pub distance_km: f64,
    /// Travel time over the edges driven, in minutes.
    pub travel_time_min: f64,
    pub nodes_expanded: usize,
    pub recharges: usize,
    pub elapsed: Duration,
}

impl RoutePlan {
    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.path.nodes().len().saturating_sub(1)
    }
}

/// Compute a route using the requested algorithm and parameters.
///
/// Parameters are validated before the search starts. An infeasible route
/// yields [`Error::RouteNotFound`]; a greedy search that ran out of
/// iterations yields [`Error::SearchAbandoned`].
pub fn plan_route(
    network: &RoadNetwork,
    chargers: &ChargerSet,
    request: &RouteRequest,
) -> Result<RoutePlan> {
    plan_route_observed(network, chargers, request, &mut NoopObserver)
}

/// Same as [`plan_route`], reporting every expansion to `observer`.
pub fn plan_route_observed(
    network: &RoadNetwork,
    chargers: &ChargerSet,
    request: &RouteRequest,
    observer: &mut dyn SearchObserver,
) -> Result<RoutePlan> {
    let engine = SearchEngine::new(network, chargers, &request.config)?;
    let planner = select_planner(request);

    let outcome = planner.find_route(&engine, request.origin, request.destination, observer)?;

    let result = match outcome {
        SearchOutcome::Found(result) => result,
        SearchOutcome::Unreachable(_) => {
            return Err(Error::RouteNotFound {
                origin: request.origin,
                destination: request.destination,
            })
        }
        SearchOutcome::Abandoned(stats) => {
            return Err(Error::SearchAbandoned {
                origin: request.origin,
                destination: request.destination,
                iterations: stats.iterations,
            })
        }
    };

    let path = if request.include_trace {
        let grid = engine.discretizer();
        RoutePath::Trace(
            result
                .trace(chargers)
                .iter()
                .map(|step| BatteryWaypoint::from_step(step, grid))
                .collect(),
        )
    } else {
        RoutePath::Nodes(result.path())
    };

    let edges = result.edges(network);
    Ok(RoutePlan {
        algorithm: request.algorithm,
        origin: request.origin,
        destination: request.destination,
        path,
        total_energy: result.total_energy,
        distance_km: edges.iter().map(|edge| edge.distance_km()).sum(),
        travel_time_min: edges.iter().map(|edge| edge.travel_time_min()).sum(),
        nodes_expanded: result.nodes_expanded(),
        recharges: result.recharges,
        elapsed: result.elapsed(),
    })
}
