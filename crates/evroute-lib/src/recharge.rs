use crate::battery::{BatteryLevel, Discretizer};
use crate::chargers::ChargerSet;
use crate::error::{Error, Result};
use crate::network::NodeId;

/// In-place, zero-cost recharge transitions at charger nodes.
#[derive(Debug, Clone, Copy)]
pub struct RechargeModel<'a> {
    chargers: &'a ChargerSet,
    recharge_amount: f64,
    max_capacity: f64,
}

impl<'a> RechargeModel<'a> {
    pub fn new(chargers: &'a ChargerSet, recharge_amount: f64, max_capacity: f64) -> Result<Self> {
        if !recharge_amount.is_finite() || recharge_amount < 0.0 {
            return Err(Error::invalid_parameter(
                "recharge_amount",
                format!("must be a finite non-negative number, got {recharge_amount}"),
            ));
        }
        Ok(Self {
            chargers,
            recharge_amount,
            max_capacity,
        })
    }

    pub fn is_charger(&self, node: NodeId) -> bool {
        self.chargers.contains(node)
    }

    pub fn recharge_amount(&self) -> f64 {
        self.recharge_amount
    }

    /// Battery after one recharge, capped at capacity.
    pub fn recharge(&self, battery: f64) -> f64 {
        self.max_capacity.min(battery + self.recharge_amount)
    }

    /// Level reached by recharging at `node`, or `None` when `node` has no
    /// charger or the recharge would not raise the discretized level.
    pub fn transition(
        &self,
        node: NodeId,
        level: BatteryLevel,
        grid: &Discretizer,
    ) -> Option<BatteryLevel> {
        if !self.is_charger(node) {
            return None;
        }
        let recharged = grid.level(self.recharge(grid.energy(level)));
        (recharged > level).then_some(recharged)
    }
}
