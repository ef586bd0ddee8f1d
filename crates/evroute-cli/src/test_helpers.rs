// Test utilities used across `evroute-cli` tests.
// Kept under `#[cfg(test)]` so it is not part of the public crate API.
use evroute_lib::{NodeId, RouteAlgorithm, RouteStep, RouteSummary};

/// Builder for tests that constructs `RouteStep` with sensible defaults.
pub struct RouteStepBuilder {
    step: RouteStep,
}

impl RouteStepBuilder {
    pub fn new() -> Self {
        Self {
            step: RouteStep {
                index: 0,
                node: 1,
                battery_kwh: None,
                recharged: false,
            },
        }
    }

    pub fn node(mut self, node: NodeId) -> Self {
        self.step.node = node;
        self
    }

    pub fn battery(mut self, battery_kwh: f64) -> Self {
        self.step.battery_kwh = Some(battery_kwh);
        self
    }

    pub fn recharged(mut self) -> Self {
        self.step.recharged = true;
        self
    }

    pub fn build(self) -> RouteStep {
        self.step
    }
}

/// Builder for a `RouteSummary` from node 1 to node 3.
pub struct RouteSummaryBuilder {
    summary: RouteSummary,
}

impl RouteSummaryBuilder {
    pub fn new() -> Self {
        Self {
            summary: RouteSummary {
                algorithm: RouteAlgorithm::AStar,
                origin: 1,
                destination: 3,
                hops: 2,
                distance_km: 2.0,
                travel_time_min: 3.0,
                total_energy_kwh: 2.4,
                nodes_expanded: 3,
                recharges: 0,
                elapsed_ms: 0.5,
                steps: Vec::new(),
            },
        }
    }

    /// Append a step, numbering it after the existing ones.
    pub fn step(mut self, step: RouteStep) -> Self {
        let index = self.summary.steps.len();
        self.summary.steps.push(RouteStep { index, ..step });
        self
    }

    pub fn energy(mut self, total_energy_kwh: f64) -> Self {
        self.summary.total_energy_kwh = total_energy_kwh;
        self
    }

    pub fn recharges(mut self, recharges: usize) -> Self {
        self.summary.recharges = recharges;
        self
    }

    pub fn build(self) -> RouteSummary {
        self.summary
    }
}
