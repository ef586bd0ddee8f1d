// Test-only helpers for `evroute-lib` unit tests
#![allow(dead_code)]

use crate::network::{Edge, NodeId, RoadNetwork};
use crate::search::SearchConfig;

/// Directed line `1 -> 2 -> ... -> n+1`, nodes 1 km apart, one edge per cost.
pub fn line_network(costs: &[f64]) -> RoadNetwork {
    let mut builder = RoadNetwork::builder();
    for index in 0..=costs.len() {
        builder = builder.node(index as NodeId + 1, index as f64, 0.0);
    }
    for (index, &cost) in costs.iter().enumerate() {
        let source = index as NodeId + 1;
        builder = builder.edge(source, Edge::new(source + 1, 1000.0).with_energy_cost(cost));
    }
    builder.build().expect("line network is valid")
}

/// Builder to create `SearchConfig` instances in tests with a unit step and
/// a zero heuristic rate.
pub struct SearchConfigBuilder {
    config: SearchConfig,
}

impl SearchConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: SearchConfig {
                min_consumption_rate: 0.0,
                step: 1.0,
                ..SearchConfig::default()
            },
        }
    }

    /// Set both capacity and initial charge.
    pub fn full(mut self, capacity: f64) -> Self {
        self.config.max_capacity = capacity;
        self.config.initial_charge = capacity;
        self
    }

    pub fn initial_charge(mut self, charge: f64) -> Self {
        self.config.initial_charge = charge;
        self
    }

    pub fn recharge(mut self, amount: f64) -> Self {
        self.config.recharge_amount = amount;
        self
    }

    pub fn step(mut self, step: f64) -> Self {
        self.config.step = step;
        self
    }

    pub fn min_rate(mut self, rate: f64) -> Self {
        self.config.min_consumption_rate = rate;
        self
    }

    pub fn iteration_cap(mut self, cap: usize) -> Self {
        self.config.iteration_cap = cap;
        self
    }

    pub fn build(self) -> SearchConfig {
        self.config
    }
}

impl Default for SearchConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
