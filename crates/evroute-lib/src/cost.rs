use crate::error::{Error, Result};
use crate::network::Edge;

/// Energy cost of traversing edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostModel {
    consumption_rate: f64,
}

impl CostModel {
    /// `consumption_rate` is in kWh per km and is only used for edges that
    /// carry no explicit energy cost.
    pub fn new(consumption_rate: f64) -> Result<Self> {
        if !consumption_rate.is_finite() || consumption_rate < 0.0 {
            return Err(Error::invalid_parameter(
                "consumption_rate",
                format!("must be a finite non-negative number, got {consumption_rate}"),
            ));
        }
        Ok(Self { consumption_rate })
    }

    pub fn consumption_rate(&self) -> f64 {
        self.consumption_rate
    }

    pub fn edge_cost(&self, edge: &Edge) -> f64 {
        match edge.energy_cost {
            Some(cost) => cost,
            None => edge.distance_km() * self.consumption_rate,
        }
    }
}
