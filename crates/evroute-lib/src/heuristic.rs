//! Remaining-energy estimates for guided search.
//!
//! The estimate is `distance_metric(node, goal) × min_consumption_rate`. It is
//! admissible only when `min_consumption_rate` does not exceed the energy per
//! km of any edge and the metric does not exceed the driven distance between
//! two nodes. Both conditions are the caller's responsibility.

use std::f64::consts::SQRT_2;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::network::{Coordinate, NodeId, RoadNetwork};

/// Planar distance metric used by the heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    /// Straight-line distance.
    #[default]
    Euclidean,
    /// Sum of absolute coordinate differences.
    Manhattan,
    /// Eight-direction grid distance: `max(dx, dy) + (√2 − 1)·min(dx, dy)`.
    Octile,
}

impl DistanceMetric {
    pub fn distance(self, a: &Coordinate, b: &Coordinate) -> f64 {
        let (dx, dy) = a.deltas(b);
        match self {
            DistanceMetric::Euclidean => dx.hypot(dy),
            DistanceMetric::Manhattan => dx + dy,
            DistanceMetric::Octile => dx.max(dy) + (SQRT_2 - 1.0) * dx.min(dy),
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            DistanceMetric::Euclidean => "euclidean",
            DistanceMetric::Manhattan => "manhattan",
            DistanceMetric::Octile => "octile",
        };
        f.write_str(value)
    }
}

/// Lower bound on the energy still needed to reach a goal node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Heuristic {
    metric: DistanceMetric,
    min_consumption_rate: f64,
}

impl Heuristic {
    pub fn new(metric: DistanceMetric, min_consumption_rate: f64) -> Result<Self> {
        if !min_consumption_rate.is_finite() || min_consumption_rate < 0.0 {
            return Err(Error::invalid_parameter(
                "min_consumption_rate",
                format!("must be a finite non-negative number, got {min_consumption_rate}"),
            ));
        }
        Ok(Self {
            metric,
            min_consumption_rate,
        })
    }

    /// Heuristic that always returns zero, turning A* into Dijkstra.
    pub fn zero() -> Self {
        Self {
            metric: DistanceMetric::Euclidean,
            min_consumption_rate: 0.0,
        }
    }

    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    /// Estimate in kWh; nodes without a known position estimate zero.
    pub fn estimate(&self, network: &RoadNetwork, node: NodeId, goal: NodeId) -> f64 {
        match (network.position(node), network.position(goal)) {
            (Some(from), Some(to)) => self.metric.distance(&from, &to) * self.min_consumption_rate,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Coordinate {
        Coordinate::new(0.0, 0.0)
    }

    #[test]
    fn metrics_match_their_definitions() {
        let target = Coordinate::new(3.0, -4.0);
        assert!((DistanceMetric::Euclidean.distance(&origin(), &target) - 5.0).abs() < 1e-12);
        assert!((DistanceMetric::Manhattan.distance(&origin(), &target) - 7.0).abs() < 1e-12);
        let octile = 4.0 + (SQRT_2 - 1.0) * 3.0;
        assert!((DistanceMetric::Octile.distance(&origin(), &target) - octile).abs() < 1e-12);
    }

    #[test]
    fn octile_sits_between_euclidean_and_manhattan() {
        let target = Coordinate::new(2.0, 7.0);
        let e = DistanceMetric::Euclidean.distance(&origin(), &target);
        let o = DistanceMetric::Octile.distance(&origin(), &target);
        let m = DistanceMetric::Manhattan.distance(&origin(), &target);
        assert!(e <= o && o <= m);
    }

    #[test]
    fn estimate_scales_with_rate() {
        let network = RoadNetwork::builder()
            .node(1, 0.0, 0.0)
            .node(2, 6.0, 8.0)
            .build()
            .unwrap();
        let heuristic = Heuristic::new(DistanceMetric::Euclidean, 0.5).unwrap();
        assert!((heuristic.estimate(&network, 1, 2) - 5.0).abs() < 1e-12);
        assert_eq!(heuristic.estimate(&network, 2, 2), 0.0);
        assert_eq!(Heuristic::zero().estimate(&network, 1, 2), 0.0);
    }

    #[test]
    fn rejects_negative_rate() {
        assert!(Heuristic::new(DistanceMetric::Octile, -1.0).is_err());
    }
}
