use std::fmt::Write;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::network::NodeId;
use crate::routing::{RouteAlgorithm, RoutePath, RoutePlan};

/// Presentation style for turning a [`RouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    PlainText,
    RichText,
    Json,
}

/// Step taken during traversal of a planned route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteStep {
    pub index: usize,
    pub node: NodeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battery_kwh: Option<f64>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub recharged: bool,
}

/// Structured representation of a planned route that higher-level consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub algorithm: RouteAlgorithm,
    pub origin: NodeId,
    pub destination: NodeId,
    pub hops: usize,
    pub distance_km: f64,
    pub travel_time_min: f64,
    pub total_energy_kwh: f64,
    pub nodes_expanded: usize,
    pub recharges: usize,
    pub elapsed_ms: f64,
    pub steps: Vec<RouteStep>,
}

impl RouteSummary {
    /// Convert a [`RoutePlan`] into a summary for display or serialisation.
    pub fn from_plan(plan: &RoutePlan) -> Result<Self> {
        if plan.path.nodes().is_empty() {
            return Err(Error::invalid_network("route plan was empty"));
        }

        let steps = match &plan.path {
            RoutePath::Nodes(nodes) => nodes
                .iter()
                .enumerate()
                .map(|(index, &node)| RouteStep {
                    index,
                    node,
                    battery_kwh: None,
                    recharged: false,
                })
                .collect(),
            RoutePath::Trace(trace) => trace
                .iter()
                .enumerate()
                .map(|(index, waypoint)| RouteStep {
                    index,
                    node: waypoint.node,
                    battery_kwh: Some(waypoint.battery_kwh),
                    recharged: waypoint.recharged_here,
                })
                .collect(),
        };

        Ok(Self {
            algorithm: plan.algorithm,
            origin: plan.origin,
            destination: plan.destination,
            hops: plan.hop_count(),
            distance_km: plan.distance_km,
            travel_time_min: plan.travel_time_min,
            total_energy_kwh: plan.total_energy,
            nodes_expanded: plan.nodes_expanded,
            recharges: plan.recharges,
            elapsed_ms: plan.elapsed.as_secs_f64() * 1000.0,
            steps,
        })
    }

    /// Render the summary using the requested mode.
    pub fn render(&self, mode: RouteRenderMode) -> Result<String> {
        match mode {
            RouteRenderMode::PlainText => Ok(self.render_plain()),
            RouteRenderMode::RichText => Ok(self.render_rich()),
            RouteRenderMode::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Route: {} -> {} ({} hops, algorithm: {})",
            self.origin, self.destination, self.hops, self.algorithm
        );
        let _ = writeln!(
            buffer,
            "  distance: {:.2} km, travel time: {:.1} min",
            self.distance_km, self.travel_time_min
        );
        let _ = writeln!(
            buffer,
            "  energy: {:.2} kWh, recharges: {}, expanded: {} states in {:.2} ms",
            self.total_energy_kwh, self.recharges, self.nodes_expanded, self.elapsed_ms
        );
        for step in &self.steps {
            let _ = write!(buffer, "{:>3}: {}", step.index, step.node);
            if let Some(battery) = step.battery_kwh {
                let _ = write!(buffer, " [{battery:.2} kWh]");
            }
            if step.recharged {
                let _ = write!(buffer, " RECHARGE");
            }
            buffer.push('\n');
        }
        buffer
    }

    fn render_rich(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "**Route** _{} → {}_ ({} hops, algorithm: `{}`)",
            self.origin, self.destination, self.hops, self.algorithm
        );
        let _ = writeln!(
            buffer,
            "* energy: **{:.2} kWh**, recharges: {}, distance: {:.2} km",
            self.total_energy_kwh, self.recharges, self.distance_km
        );
        for step in &self.steps {
            let marker = if step.recharged { " ⚡" } else { "" };
            match step.battery_kwh {
                Some(battery) => {
                    let _ = writeln!(
                        buffer,
                        "* {:>2}. `{}` ({battery:.2} kWh){marker}",
                        step.index, step.node
                    );
                }
                None => {
                    let _ = writeln!(buffer, "* {:>2}. `{}`{marker}", step.index, step.node);
                }
            }
        }
        buffer
    }
}

/// Flat per-run record, one per algorithm run, for comparisons.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RunMetrics {
    pub algorithm: RouteAlgorithm,
    pub energy_kwh: Option<f64>,
    pub nodes_expanded: Option<usize>,
    pub num_recharges: Option<usize>,
    pub time_seconds: Option<f64>,
    pub path_length: Option<usize>,
    pub reached_destination: bool,
}

impl RunMetrics {
    pub fn from_plan(plan: &RoutePlan) -> Self {
        Self {
            algorithm: plan.algorithm,
            energy_kwh: Some(plan.total_energy),
            nodes_expanded: Some(plan.nodes_expanded),
            num_recharges: Some(plan.recharges),
            time_seconds: Some(plan.elapsed.as_secs_f64()),
            path_length: Some(plan.path.nodes().len()),
            reached_destination: true,
        }
    }

    /// Record for a run that did not reach its destination.
    pub fn unreached(algorithm: RouteAlgorithm) -> Self {
        Self {
            algorithm,
            energy_kwh: None,
            nodes_expanded: None,
            num_recharges: None,
            time_seconds: None,
            path_length: None,
            reached_destination: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::routing::BatteryWaypoint;

    fn trace_plan() -> RoutePlan {
        let waypoint = |node, battery_kwh, recharged_here| BatteryWaypoint {
            node,
            battery_kwh,
            recharged_here,
        };
        RoutePlan {
            algorithm: RouteAlgorithm::AStar,
            origin: 1,
            destination: 3,
            path: RoutePath::Trace(vec![
                waypoint(1, 5.0, false),
                waypoint(2, 3.0, false),
                waypoint(2, 5.0, true),
                waypoint(3, 4.0, false),
            ]),
            total_energy: 3.0,
            distance_km: 3.0,
            travel_time_min: 3.5,
            nodes_expanded: 6,
            recharges: 1,
            elapsed: Duration::from_millis(2),
        }
    }

    #[test]
    fn summary_carries_plan_totals() {
        let summary = RouteSummary::from_plan(&trace_plan()).unwrap();
        assert_eq!(summary.hops, 2);
        assert_eq!(summary.distance_km, 3.0);
        assert_eq!(summary.travel_time_min, 3.5);
        assert_eq!(summary.steps.len(), 4);
        assert!(summary.steps[2].recharged);
    }

    #[test]
    fn plain_text_marks_recharges() {
        let summary = RouteSummary::from_plan(&trace_plan()).unwrap();
        let text = summary.render(RouteRenderMode::PlainText).unwrap();
        assert!(text.starts_with("Route: 1 -> 3 (2 hops, algorithm: a-star)"));
        assert!(text.contains("2 [5.00 kWh] RECHARGE"));
        assert_eq!(text.matches("RECHARGE").count(), 1);
    }

    #[test]
    fn json_render_is_parseable() {
        let summary = RouteSummary::from_plan(&trace_plan()).unwrap();
        let json = summary.render(RouteRenderMode::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["recharges"], 1);
        assert_eq!(value["algorithm"], "a-star");
        assert_eq!(value["steps"][2]["recharged"], true);
        assert!(value["steps"][0].get("recharged").is_none());
    }

    #[test]
    fn empty_plan_is_rejected() {
        let mut plan = trace_plan();
        plan.path = RoutePath::Nodes(Vec::new());
        assert!(RouteSummary::from_plan(&plan).is_err());
    }

    #[test]
    fn metrics_for_unreached_runs_are_empty() {
        let metrics = RunMetrics::unreached(RouteAlgorithm::Greedy);
        assert!(!metrics.reached_destination);
        assert!(metrics.energy_kwh.is_none());
        let reached = RunMetrics::from_plan(&trace_plan());
        assert_eq!(reached.path_length, Some(3));
        assert_eq!(reached.num_recharges, Some(1));
    }
}
