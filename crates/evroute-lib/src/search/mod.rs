//! Battery-aware best-first search.
//!
//! The search runs over states `(node, battery level)`. Moving along an edge
//! consumes its energy cost and is only legal when the battery covers it;
//! charger nodes additionally offer a free in-place recharge transition.
//! Battery levels are discretized, so the state space is finite and every
//! search terminates.
//!
//! Two orderings share the same expansion rule:
//!
//! - [`SearchPolicy::EnergyAStar`] orders by `g + h` and returns the
//!   minimum-energy route whenever the heuristic is admissible.
//! - [`SearchPolicy::Greedy`] orders by `h` only. It is usually faster but
//!   gives no optimality guarantee, and it stops after a configurable number
//!   of iterations.
//!
//! All bookkeeping (frontier, finalized set, `g` scores, predecessors) is
//! owned by a single query, so one [`RoadNetwork`] can serve many concurrent
//! searches.

mod frontier;
mod observer;

pub use observer::{Expansion, ExpansionRecorder, NoopObserver, SearchObserver};

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::battery::{BatteryLevel, Discretizer, DEFAULT_STEP, ENERGY_EPSILON};
use crate::chargers::ChargerSet;
use crate::cost::CostModel;
use crate::error::{Error, Result};
use crate::heuristic::{DistanceMetric, Heuristic};
use crate::network::{Edge, NodeId, RoadNetwork};
use crate::recharge::RechargeModel;
use crate::reconstruct::{
    count_recharges, reconstruct, reconstruct_with_battery, traversed_edges, EdgeChoices,
    Predecessors, TraceStep,
};

use frontier::Frontier;

/// Default number of frontier pops allowed for the greedy policy.
pub const DEFAULT_ITERATION_CAP: usize = 100_000;

/// A search state: a location paired with a discretized battery level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct State {
    pub node: NodeId,
    pub battery: BatteryLevel,
}

impl State {
    pub fn new(node: NodeId, battery: BatteryLevel) -> Self {
        Self { node, battery }
    }
}

/// Frontier ordering policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchPolicy {
    /// Order by accumulated energy plus heuristic estimate.
    EnergyAStar,
    /// Order by heuristic estimate only.
    Greedy,
}

impl SearchPolicy {
    fn priority(self, g: f64, h: f64) -> f64 {
        match self {
            SearchPolicy::EnergyAStar => g + h,
            SearchPolicy::Greedy => h,
        }
    }
}

impl fmt::Display for SearchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            SearchPolicy::EnergyAStar => "energy-a-star",
            SearchPolicy::Greedy => "greedy",
        };
        f.write_str(value)
    }
}

/// Vehicle and search parameters supplied by the caller.
///
/// Energies are in kWh, rates in kWh per km.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    pub max_capacity: f64,
    pub initial_charge: f64,
    /// Rate used to derive the cost of edges without an explicit energy cost.
    pub consumption_rate: f64,
    /// Lower bound on any edge's energy per km; drives the heuristic.
    pub min_consumption_rate: f64,
    pub recharge_amount: f64,
    /// Battery discretization step.
    pub step: f64,
    pub metric: DistanceMetric,
    /// Frontier pops allowed before the greedy policy gives up.
    pub iteration_cap: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_capacity: 5.0,
            initial_charge: 5.0,
            consumption_rate: 1.2,
            min_consumption_rate: 1.2,
            recharge_amount: 4.5,
            step: DEFAULT_STEP,
            metric: DistanceMetric::Euclidean,
            iteration_cap: DEFAULT_ITERATION_CAP,
        }
    }
}

impl SearchConfig {
    /// Check every parameter before a search starts.
    pub fn validate(&self) -> Result<()> {
        if !self.max_capacity.is_finite() || self.max_capacity < 0.0 {
            return Err(Error::invalid_parameter(
                "max_capacity",
                format!("must be a finite non-negative number, got {}", self.max_capacity),
            ));
        }
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(Error::invalid_parameter(
                "step",
                format!("must be a finite positive number, got {}", self.step),
            ));
        }
        if !self.initial_charge.is_finite() || self.initial_charge < 0.0 {
            return Err(Error::invalid_parameter(
                "initial_charge",
                format!("must be a finite non-negative number, got {}", self.initial_charge),
            ));
        }
        if self.initial_charge > self.max_capacity {
            return Err(Error::invalid_parameter(
                "initial_charge",
                format!(
                    "{} exceeds max_capacity {}",
                    self.initial_charge, self.max_capacity
                ),
            ));
        }
        if self.iteration_cap == 0 {
            return Err(Error::invalid_parameter(
                "iteration_cap",
                "must be at least 1",
            ));
        }
        // Consumption rates are checked by their models.
        CostModel::new(self.consumption_rate)?;
        Heuristic::new(self.metric, self.min_consumption_rate)?;
        if !self.recharge_amount.is_finite() || self.recharge_amount < 0.0 {
            return Err(Error::invalid_parameter(
                "recharge_amount",
                format!("must be a finite non-negative number, got {}", self.recharge_amount),
            ));
        }
        Ok(())
    }
}

/// Counters shared by every outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchStats {
    pub policy: SearchPolicy,
    /// States finalized during the search.
    pub nodes_expanded: usize,
    /// Frontier pops, including discarded stale entries.
    pub iterations: usize,
    pub elapsed: Duration,
}

/// A successful search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub goal: State,
    /// Energy consumed along the route, `g(goal)`.
    pub total_energy: f64,
    pub recharges: usize,
    pub stats: SearchStats,
    predecessors: Predecessors,
    edge_choices: EdgeChoices,
}

impl SearchResult {
    pub fn nodes_expanded(&self) -> usize {
        self.stats.nodes_expanded
    }

    pub fn elapsed(&self) -> Duration {
        self.stats.elapsed
    }

    pub fn predecessors(&self) -> &Predecessors {
        &self.predecessors
    }

    /// Node sequence from origin to goal, in-place recharges collapsed.
    pub fn path(&self) -> Vec<NodeId> {
        reconstruct(&self.predecessors, self.goal)
    }

    /// Every transition from origin to goal with its battery level.
    pub fn trace(&self, chargers: &ChargerSet) -> Vec<TraceStep> {
        reconstruct_with_battery(&self.predecessors, self.goal, chargers)
    }

    /// Edges driven from origin to goal. `network` must be the one searched.
    pub fn edges<'n>(&self, network: &'n RoadNetwork) -> Vec<&'n Edge> {
        traversed_edges(network, &self.predecessors, &self.edge_choices, self.goal)
    }
}

/// Result of a search query.
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    Found(SearchResult),
    /// The frontier emptied: no battery/recharge combination reaches the goal.
    Unreachable(SearchStats),
    /// The iteration cap ran out before the search could decide.
    Abandoned(SearchStats),
}

impl SearchOutcome {
    pub fn found(&self) -> Option<&SearchResult> {
        match self {
            SearchOutcome::Found(result) => Some(result),
            _ => None,
        }
    }

    pub fn into_found(self) -> Option<SearchResult> {
        match self {
            SearchOutcome::Found(result) => Some(result),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    pub fn stats(&self) -> &SearchStats {
        match self {
            SearchOutcome::Found(result) => &result.stats,
            SearchOutcome::Unreachable(stats) | SearchOutcome::Abandoned(stats) => stats,
        }
    }
}

/// Battery-aware search over a read-only road network.
#[derive(Debug, Clone)]
pub struct SearchEngine<'a> {
    network: &'a RoadNetwork,
    chargers: &'a ChargerSet,
    grid: Discretizer,
    cost: CostModel,
    heuristic: Heuristic,
    recharge: RechargeModel<'a>,
    initial_charge: f64,
    iteration_cap: usize,
}

impl<'a> SearchEngine<'a> {
    /// Validate `config` and prepare the models it describes.
    pub fn new(
        network: &'a RoadNetwork,
        chargers: &'a ChargerSet,
        config: &SearchConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            network,
            chargers,
            grid: Discretizer::new(config.step, config.max_capacity)?,
            cost: CostModel::new(config.consumption_rate)?,
            heuristic: Heuristic::new(config.metric, config.min_consumption_rate)?,
            recharge: RechargeModel::new(chargers, config.recharge_amount, config.max_capacity)?,
            initial_charge: config.initial_charge,
            iteration_cap: config.iteration_cap,
        })
    }

    /// Replace the heuristic, e.g. with [`Heuristic::zero`].
    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn discretizer(&self) -> &Discretizer {
        &self.grid
    }

    pub fn network(&self) -> &'a RoadNetwork {
        self.network
    }

    pub fn chargers(&self) -> &'a ChargerSet {
        self.chargers
    }

    pub fn search(
        &self,
        policy: SearchPolicy,
        origin: NodeId,
        destination: NodeId,
    ) -> Result<SearchOutcome> {
        self.search_observed(policy, origin, destination, &mut NoopObserver)
    }

    /// Run a search, reporting every expansion to `observer`.
    pub fn search_observed(
        &self,
        policy: SearchPolicy,
        origin: NodeId,
        destination: NodeId,
        observer: &mut dyn SearchObserver,
    ) -> Result<SearchOutcome> {
        for id in [origin, destination] {
            if !self.network.contains(id) {
                return Err(Error::UnknownNode { id });
            }
        }

        let started = Instant::now();
        let cap = match policy {
            SearchPolicy::Greedy => Some(self.iteration_cap),
            SearchPolicy::EnergyAStar => None,
        };
        debug!(%policy, origin, destination, "starting battery search");

        let mut space = SearchSpace::default();
        let initial = State::new(origin, self.grid.level(self.initial_charge));
        space.g_score.insert(initial, 0.0);
        space
            .frontier
            .push(initial, self.heuristic.estimate(self.network, origin, destination));

        let mut iterations = 0usize;
        let mut nodes_expanded = 0usize;
        let mut new_frontier: Vec<State> = Vec::new();

        let stats = |nodes_expanded, iterations| SearchStats {
            policy,
            nodes_expanded,
            iterations,
            elapsed: started.elapsed(),
        };

        loop {
            if space.frontier.is_empty() {
                let stats = stats(nodes_expanded, iterations);
                debug!(%policy, nodes_expanded, elapsed = ?stats.elapsed, "no feasible route");
                return Ok(SearchOutcome::Unreachable(stats));
            }
            if cap.is_some_and(|cap| iterations >= cap) {
                let stats = stats(nodes_expanded, iterations);
                debug!(
                    %policy,
                    iterations,
                    pending = space.frontier.len(),
                    "iteration cap reached, abandoning search"
                );
                return Ok(SearchOutcome::Abandoned(stats));
            }

            let Some(state) = space.frontier.pop() else {
                continue;
            };
            iterations += 1;

            // Every pushed state carries a g score.
            let Some(&g) = space.g_score.get(&state) else {
                continue;
            };
            if !space.finalized.insert(state) {
                continue;
            }
            nodes_expanded += 1;
            trace!(node = state.node, battery = state.battery.ticks(), g, "expanding state");

            if state.node == destination {
                observer.on_expand(&state, &[]);
                let stats = stats(nodes_expanded, iterations);
                let recharges = count_recharges(&space.predecessors, state, self.chargers);
                debug!(
                    %policy,
                    nodes_expanded,
                    total_energy = g,
                    recharges,
                    elapsed = ?stats.elapsed,
                    "route found"
                );
                return Ok(SearchOutcome::Found(SearchResult {
                    goal: state,
                    total_energy: g,
                    recharges,
                    stats,
                    predecessors: space.predecessors,
                    edge_choices: space.edge_choices,
                }));
            }

            new_frontier.clear();
            let battery = self.grid.energy(state.battery);

            for (index, edge) in self.network.neighbours(state.node).iter().enumerate() {
                let cost = self.cost.edge_cost(edge);
                if battery + ENERGY_EPSILON < cost {
                    continue;
                }
                let next = State::new(edge.target, self.grid.level(battery - cost));
                let step = Step {
                    from: state,
                    to: next,
                    edge: Some(index),
                };
                if self.relax(&mut space, policy, destination, step, g + cost) {
                    new_frontier.push(next);
                }
            }

            if let Some(level) = self.recharge.transition(state.node, state.battery, &self.grid) {
                let next = State::new(state.node, level);
                let step = Step {
                    from: state,
                    to: next,
                    edge: None,
                };
                if self.relax(&mut space, policy, destination, step, g) {
                    new_frontier.push(next);
                }
            }

            observer.on_expand(&state, &new_frontier);
        }
    }

    /// Record `step.to` via `step.from` when `tentative_g` strictly improves it.
    fn relax(
        &self,
        space: &mut SearchSpace,
        policy: SearchPolicy,
        destination: NodeId,
        step: Step,
        tentative_g: f64,
    ) -> bool {
        let Step { from, to, edge } = step;
        if space.finalized.contains(&to) {
            return false;
        }
        if space
            .g_score
            .get(&to)
            .is_some_and(|&known| tentative_g >= known)
        {
            return false;
        }

        let h = self.heuristic.estimate(self.network, to.node, destination);
        space.g_score.insert(to, tentative_g);
        space.predecessors.insert(to, from);
        match edge {
            Some(index) => {
                space.edge_choices.insert(to, index);
            }
            None => {
                space.edge_choices.remove(&to);
            }
        }
        space.frontier.push(to, policy.priority(tentative_g, h));
        true
    }
}

/// A candidate transition. `edge` indexes `from`'s outgoing edges and is
/// `None` for an in-place recharge.
#[derive(Debug, Clone, Copy)]
struct Step {
    from: State,
    to: State,
    edge: Option<usize>,
}

/// Per-query bookkeeping, keyed by state and detached from the network.
#[derive(Debug, Default)]
struct SearchSpace {
    frontier: Frontier,
    finalized: HashSet<State>,
    g_score: HashMap<State, f64>,
    predecessors: Predecessors,
    edge_choices: EdgeChoices,
}
