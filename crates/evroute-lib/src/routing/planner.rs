//! Route planning strategies implementing the Strategy pattern.
//!
//! Each planner maps a [`RouteAlgorithm`] onto a search policy (and, for
//! uniform-cost search, a heuristic override) so `plan_route` does not need to
//! know how an algorithm is realised.

use crate::error::Result;
use crate::heuristic::Heuristic;
use crate::network::NodeId;
use crate::search::{SearchEngine, SearchObserver, SearchOutcome, SearchPolicy};

use super::{RouteAlgorithm, RouteRequest};

/// Trait for route planning strategies.
pub trait RoutePlanner: Send + Sync {
    /// The algorithm identifier for this planner.
    fn algorithm(&self) -> RouteAlgorithm;

    /// Frontier ordering used by this planner.
    fn policy(&self) -> SearchPolicy;

    /// Whether the returned route is guaranteed to be energy-optimal
    /// (given an admissible heuristic).
    fn is_optimal(&self) -> bool;

    /// Execute the search on the given engine.
    fn find_route(
        &self,
        engine: &SearchEngine<'_>,
        origin: NodeId,
        destination: NodeId,
        observer: &mut dyn SearchObserver,
    ) -> Result<SearchOutcome> {
        engine.search_observed(self.policy(), origin, destination, observer)
    }
}

/// Energy-A* planner, ordering by accumulated energy plus heuristic.
#[derive(Debug, Clone, Default)]
pub struct AStarPlanner;

impl RoutePlanner for AStarPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::AStar
    }

    fn policy(&self) -> SearchPolicy {
        SearchPolicy::EnergyAStar
    }

    fn is_optimal(&self) -> bool {
        true
    }
}

/// Uniform-cost planner: energy-A* with a zero heuristic.
///
/// Useful as a reference when the configured heuristic may not be admissible.
#[derive(Debug, Clone, Default)]
pub struct DijkstraPlanner;

impl RoutePlanner for DijkstraPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Dijkstra
    }

    fn policy(&self) -> SearchPolicy {
        SearchPolicy::EnergyAStar
    }

    fn is_optimal(&self) -> bool {
        true
    }

    fn find_route(
        &self,
        engine: &SearchEngine<'_>,
        origin: NodeId,
        destination: NodeId,
        observer: &mut dyn SearchObserver,
    ) -> Result<SearchOutcome> {
        engine
            .clone()
            .with_heuristic(Heuristic::zero())
            .search_observed(self.policy(), origin, destination, observer)
    }
}

/// Greedy best-first planner, ordering by heuristic only.
#[derive(Debug, Clone, Default)]
pub struct GreedyPlanner;

impl RoutePlanner for GreedyPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Greedy
    }

    fn policy(&self) -> SearchPolicy {
        SearchPolicy::Greedy
    }

    fn is_optimal(&self) -> bool {
        false
    }
}

/// Select the appropriate planner for a given request.
pub fn select_planner(request: &RouteRequest) -> Box<dyn RoutePlanner> {
    match request.algorithm {
        RouteAlgorithm::AStar => Box::new(AStarPlanner),
        RouteAlgorithm::Dijkstra => Box::new(DijkstraPlanner),
        RouteAlgorithm::Greedy => Box::new(GreedyPlanner),
    }
}
