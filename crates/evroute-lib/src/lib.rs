//! evroute library entry points.
//!
//! This crate loads road networks and charger lists, and computes
//! energy-feasible routes for a battery-limited vehicle with a search over
//! `(node, battery level)` states. Higher-level consumers (the CLI) should
//! only depend on the functions exported here instead of reimplementing
//! behavior.

pub mod battery;
pub mod chargers;
pub mod cost;
pub mod error;
pub mod heuristic;
pub mod network;
pub mod output;
pub mod recharge;
pub mod reconstruct;
pub mod routing;
pub mod search;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use battery::{discretize, BatteryLevel, Discretizer};
pub use chargers::ChargerSet;
pub use cost::CostModel;
pub use error::{Error, Result};
pub use heuristic::{DistanceMetric, Heuristic};
pub use network::{Coordinate, Edge, NodeId, RoadNetwork};
pub use output::{RouteRenderMode, RouteStep, RouteSummary, RunMetrics};
pub use recharge::RechargeModel;
pub use reconstruct::{count_recharges, reconstruct, reconstruct_with_battery, TraceStep};
pub use routing::{
    plan_route, plan_route_observed, BatteryWaypoint, RouteAlgorithm, RoutePath, RoutePlan,
    RouteRequest,
};
pub use search::{
    ExpansionRecorder, SearchConfig, SearchEngine, SearchObserver, SearchOutcome, SearchPolicy,
    State,
};
