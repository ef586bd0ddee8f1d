//! Battery quantisation.
//!
//! Continuous battery values are snapped onto a fixed-step grid so that the
//! `(node, battery)` state space stays finite. Levels are stored as integer
//! grid indices, which gives exact equality and hashing for search states.

use crate::error::{Error, Result};

/// Default grid spacing in kWh.
pub const DEFAULT_STEP: f64 = 0.1;

/// Tolerance used when comparing a battery level against an energy cost.
pub const ENERGY_EPSILON: f64 = 1e-9;

/// Round `value` to the nearest multiple of `step`.
///
/// Idempotent and monotone for any positive `step`.
pub fn discretize(value: f64, step: f64) -> f64 {
    (value / step).round() * step
}

/// Battery level expressed as a number of grid steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct BatteryLevel(u32);

impl BatteryLevel {
    pub const EMPTY: BatteryLevel = BatteryLevel(0);

    pub fn from_ticks(ticks: u32) -> Self {
        Self(ticks)
    }

    pub fn ticks(self) -> u32 {
        self.0
    }
}

/// Maps continuous battery values onto the `[0, max_capacity]` grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Discretizer {
    step: f64,
    max_ticks: u32,
}

impl Discretizer {
    pub fn new(step: f64, max_capacity: f64) -> Result<Self> {
        if !step.is_finite() || step <= 0.0 {
            return Err(Error::invalid_parameter(
                "step",
                format!("must be a finite positive number, got {step}"),
            ));
        }
        if !max_capacity.is_finite() || max_capacity < 0.0 {
            return Err(Error::invalid_parameter(
                "max_capacity",
                format!("must be a finite non-negative number, got {max_capacity}"),
            ));
        }

        // Largest grid point not above capacity; the small slack absorbs
        // representation error in capacity / step.
        let ticks = (max_capacity / step + 1e-6).floor();
        if ticks > f64::from(u32::MAX - 1) {
            return Err(Error::invalid_parameter(
                "step",
                format!("too small for capacity {max_capacity}"),
            ));
        }

        Ok(Self {
            step,
            max_ticks: ticks as u32,
        })
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Highest representable level.
    pub fn max_level(&self) -> BatteryLevel {
        BatteryLevel(self.max_ticks)
    }

    /// Number of distinct battery levels per node.
    pub fn bucket_count(&self) -> usize {
        self.max_ticks as usize + 1
    }

    /// Quantise a battery value, clamped into `[0, max_capacity]`.
    pub fn level(&self, value: f64) -> BatteryLevel {
        if value.is_nan() || value <= 0.0 {
            return BatteryLevel::EMPTY;
        }
        let ticks = (value / self.step).round();
        if ticks >= f64::from(self.max_ticks) {
            BatteryLevel(self.max_ticks)
        } else {
            BatteryLevel(ticks as u32)
        }
    }

    /// Energy in kWh represented by a level.
    pub fn energy(&self, level: BatteryLevel) -> f64 {
        f64::from(level.0) * self.step
    }

    /// Snap a value to the grid and return it as energy.
    pub fn discretize(&self, value: f64) -> f64 {
        self.energy(self.level(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discretize_rounds_to_nearest_step() {
        assert!((discretize(2.34, 0.1) - 2.3).abs() < 1e-12);
        assert!((discretize(2.36, 0.1) - 2.4).abs() < 1e-12);
        assert_eq!(discretize(7.0, 2.0), 8.0);
        assert_eq!(discretize(6.9, 2.0), 6.0);
    }

    #[test]
    fn discretize_is_idempotent() {
        for step in [0.1, 0.25, 1.0, 3.0] {
            for i in 0..400 {
                let value = f64::from(i) * 0.037;
                let once = discretize(value, step);
                let twice = discretize(once, step);
                assert!((once - twice).abs() < 1e-9, "{value} at step {step}");
            }
        }
    }

    #[test]
    fn discretize_is_monotone() {
        let values: Vec<f64> = (0..500).map(|i| f64::from(i) * 0.0131).collect();
        for step in [0.1, 0.5, 2.0] {
            for pair in values.windows(2) {
                assert!(discretize(pair[1], step) >= discretize(pair[0], step));
            }
        }
    }

    #[test]
    fn levels_stay_within_capacity() {
        let grid = Discretizer::new(0.3, 5.0).unwrap();
        assert_eq!(grid.max_level().ticks(), 16);
        assert!(grid.energy(grid.max_level()) <= 5.0);
        assert_eq!(grid.level(5.0), grid.max_level());
        assert_eq!(grid.level(100.0), grid.max_level());
        assert_eq!(grid.level(-3.0), BatteryLevel::EMPTY);
        assert!(grid.bucket_count() <= (5.0f64 / 0.3).ceil() as usize + 1);
    }

    #[test]
    fn level_is_idempotent_and_monotone() {
        let grid = Discretizer::new(0.1, 5.0).unwrap();
        let mut previous = BatteryLevel::EMPTY;
        for i in 0..600 {
            let value = f64::from(i) * 0.0097;
            let level = grid.level(value);
            assert_eq!(grid.level(grid.energy(level)), level);
            assert!(level >= previous);
            previous = level;
        }
    }

    #[test]
    fn exact_capacity_is_representable() {
        let grid = Discretizer::new(0.1, 5.0).unwrap();
        assert_eq!(grid.max_level().ticks(), 50);
        assert!((grid.discretize(5.0) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn zero_capacity_has_single_bucket() {
        let grid = Discretizer::new(0.1, 0.0).unwrap();
        assert_eq!(grid.bucket_count(), 1);
        assert_eq!(grid.level(3.0), BatteryLevel::EMPTY);
    }

    #[test]
    fn rejects_invalid_parameters() {
        assert!(Discretizer::new(0.0, 5.0).is_err());
        assert!(Discretizer::new(-0.1, 5.0).is_err());
        assert!(Discretizer::new(0.1, -1.0).is_err());
        assert!(Discretizer::new(f64::NAN, 5.0).is_err());
    }
}
