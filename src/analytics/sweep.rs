//! Spot-price sweeps for sensitivity charts
//!
//! A sweep holds every input fixed except the spot price, walks an evenly
//! spaced grid between two bounds and evaluates the engine at each point.
//! It adds no math of its own: every value equals a direct call to
//! [`price_and_greeks`] at the same spot.

use super::bs_analytic::price_and_greeks;
use super::types::{GreeksResult, Metric, OptionInputs};
use crate::error::{validation::*, BsResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Inclusive, evenly spaced grid of spot prices
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepRange {
    pub s_min: f64,
    pub s_max: f64,
    pub n_points: usize,
}

impl Default for SweepRange {
    fn default() -> Self {
        SweepRange {
            s_min: 50.0,
            s_max: 150.0,
            n_points: 100,
        }
    }
}

impl SweepRange {
    pub fn new(s_min: f64, s_max: f64, n_points: usize) -> Self {
        SweepRange {
            s_min,
            s_max,
            n_points,
        }
    }

    /// Both bounds positive and finite, `s_min < s_max`, at least 2 points
    pub fn validate(&self) -> BsResult<()> {
        validate_positive("s_min", self.s_min)?;
        validate_positive("s_max", self.s_max)?;
        validate_ordered("s_min", self.s_min, self.s_max)?;
        validate_sweep_points(self.n_points)?;
        Ok(())
    }

    /// Lazy iterator over the grid
    ///
    /// Restartable: each call yields the same sequence. The first point is
    /// exactly `s_min` and the last exactly `s_max`.
    pub fn spots(&self) -> impl Iterator<Item = f64> + '_ {
        let last = self.n_points.saturating_sub(1);
        let step = if last == 0 {
            0.0
        } else {
            (self.s_max - self.s_min) / last as f64
        };
        (0..self.n_points).map(move |i| {
            if i == last {
                self.s_max
            } else {
                self.s_min + step * i as f64
            }
        })
    }
}

/// Evaluate one metric across the spot grid
///
/// The spot field of `fixed` is ignored; every other field is held
/// constant.
///
/// # Errors
///
/// `InvalidInput` if the range is invalid or if the fixed inputs violate
/// the engine preconditions. No partial series is returned.
pub fn sweep(range: &SweepRange, fixed: &OptionInputs, metric: Metric) -> BsResult<Vec<(f64, f64)>> {
    Ok(sweep_greeks(range, fixed)?
        .into_iter()
        .map(|(s, result)| (s, result.value(metric)))
        .collect())
}

/// Full engine output across the spot grid
pub fn sweep_greeks(range: &SweepRange, fixed: &OptionInputs) -> BsResult<Vec<(f64, GreeksResult)>> {
    range.validate()?;
    debug!(
        s_min = range.s_min,
        s_max = range.s_max,
        n_points = range.n_points,
        option_type = %fixed.option_type,
        "running spot sweep"
    );

    range
        .spots()
        .map(|s| price_and_greeks(&fixed.with_spot(s)).map(|result| (s, result)))
        .collect()
}
