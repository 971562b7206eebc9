//! Value objects passed into and out of the pricing engine
//!
//! Everything here is plain data: `Copy`, immutable once built, with no
//! identity beyond its field values.

use crate::error::{BsResult, GreeksError};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Days per year used to convert annualized theta to a daily figure
pub const DAYS_PER_YEAR: f64 = 365.0;

/// European exercise right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// Right to buy at the strike
    Call,
    /// Right to sell at the strike
    Put,
}

impl FromStr for OptionType {
    type Err = GreeksError;

    fn from_str(s: &str) -> BsResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "call" => Ok(OptionType::Call),
            "put" => Ok(OptionType::Put),
            other => Err(GreeksError::invalid_input(
                "option_type",
                format!("'{}' is not one of: call, put", other),
            )),
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "call"),
            OptionType::Put => write!(f, "put"),
        }
    }
}

/// Market parameters for a single Black-Scholes evaluation
///
/// # Parameters
/// - `s`: Current stock price
/// - `k`: Strike price
/// - `t`: Time to expiration in years
/// - `r`: Continuously compounded risk-free rate
/// - `sigma`: Annualized volatility
/// - `option_type`: Call or put
///
/// Construction does not validate; the engine does, so that an invalid
/// value is always reported at the point of evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionInputs {
    pub s: f64,
    pub k: f64,
    pub t: f64,
    pub r: f64,
    pub sigma: f64,
    pub option_type: OptionType,
}

impl OptionInputs {
    pub fn new(s: f64, k: f64, t: f64, r: f64, sigma: f64, option_type: OptionType) -> Self {
        OptionInputs {
            s,
            k,
            t,
            r,
            sigma,
            option_type,
        }
    }

    /// Same contract with a different spot price
    pub fn with_spot(&self, s: f64) -> Self {
        OptionInputs { s, ..*self }
    }

    /// Same market with the opposite exercise right
    pub fn with_option_type(&self, option_type: OptionType) -> Self {
        OptionInputs {
            option_type,
            ..*self
        }
    }
}

impl Default for OptionInputs {
    fn default() -> Self {
        OptionInputs {
            s: 100.0,
            k: 105.0,
            t: 1.0,
            r: 0.05,
            sigma: 0.2,
            option_type: OptionType::Call,
        }
    }
}

/// Fair value and first/second order sensitivities
///
/// `theta` is an annualized rate (price change per year of elapsed time);
/// use [`GreeksResult::theta_per_day`] for the daily figure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GreeksResult {
    pub price: f64,
    pub delta: f64,
    pub gamma: f64,
    pub theta: f64,
    pub vega: f64,
    pub rho: f64,
}

impl GreeksResult {
    /// Theta divided by 365
    pub fn theta_per_day(&self) -> f64 {
        self.theta / DAYS_PER_YEAR
    }

    /// Pick a single output by metric
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Price => self.price,
            Metric::Delta => self.delta,
            Metric::Gamma => self.gamma,
            Metric::Theta => self.theta,
            Metric::Vega => self.vega,
            Metric::Rho => self.rho,
        }
    }
}

/// One of the six engine outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Price,
    Delta,
    Gamma,
    Theta,
    Vega,
    Rho,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::Price,
        Metric::Delta,
        Metric::Gamma,
        Metric::Theta,
        Metric::Vega,
        Metric::Rho,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Metric::Price => "price",
            Metric::Delta => "delta",
            Metric::Gamma => "gamma",
            Metric::Theta => "theta",
            Metric::Vega => "vega",
            Metric::Rho => "rho",
        }
    }

    fn flag(&self) -> MetricSet {
        match self {
            Metric::Price => MetricSet::PRICE,
            Metric::Delta => MetricSet::DELTA,
            Metric::Gamma => MetricSet::GAMMA,
            Metric::Theta => MetricSet::THETA,
            Metric::Vega => MetricSet::VEGA,
            Metric::Rho => MetricSet::RHO,
        }
    }
}

impl FromStr for Metric {
    type Err = GreeksError;

    fn from_str(s: &str) -> BsResult<Self> {
        let wanted = s.trim().to_lowercase();
        Metric::ALL
            .iter()
            .copied()
            .find(|m| m.name() == wanted)
            .ok_or_else(|| {
                GreeksError::invalid_input(
                    "metric",
                    format!("'{}' is not one of: price, delta, gamma, theta, vega, rho", s),
                )
            })
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

bitflags! {
    /// Selection of metrics, used to choose columns for tabular output
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MetricSet: u32 {
        const NONE  = 0;
        const PRICE = 1 << 0;
        const DELTA = 1 << 1;
        const GAMMA = 1 << 2;
        const THETA = 1 << 3;
        const VEGA  = 1 << 4;
        const RHO   = 1 << 5;
        const GREEKS = Self::DELTA.bits()
            | Self::GAMMA.bits()
            | Self::THETA.bits()
            | Self::VEGA.bits()
            | Self::RHO.bits();
        const ALL = Self::PRICE.bits() | Self::GREEKS.bits();
    }
}

impl MetricSet {
    /// Selected metrics in canonical column order
    pub fn metrics(&self) -> Vec<Metric> {
        Metric::ALL
            .iter()
            .copied()
            .filter(|m| self.contains(m.flag()))
            .collect()
    }
}

impl From<Metric> for MetricSet {
    fn from(metric: Metric) -> Self {
        metric.flag()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_type_parse() {
        assert_eq!("call".parse::<OptionType>().unwrap(), OptionType::Call);
        assert_eq!(" PUT ".parse::<OptionType>().unwrap(), OptionType::Put);

        let err = "straddle".parse::<OptionType>().unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("straddle"));
    }

    #[test]
    fn test_metric_parse_and_display() {
        for metric in Metric::ALL {
            assert_eq!(metric.to_string().parse::<Metric>().unwrap(), metric);
        }
        assert!("charm".parse::<Metric>().is_err());
    }

    #[test]
    fn test_metric_set_order() {
        let set = MetricSet::RHO | MetricSet::PRICE | MetricSet::GAMMA;
        assert_eq!(set.metrics(), vec![Metric::Price, Metric::Gamma, Metric::Rho]);
        assert_eq!(MetricSet::ALL.metrics().len(), 6);
        assert!(!MetricSet::GREEKS.contains(MetricSet::PRICE));
        assert!(MetricSet::NONE.metrics().is_empty());
    }

    #[test]
    fn test_theta_per_day() {
        let result = GreeksResult {
            price: 8.0,
            delta: 0.5,
            gamma: 0.02,
            theta: -7.3,
            vega: 39.0,
            rho: 46.0,
        };
        assert!((result.theta_per_day() + 0.02).abs() < 1e-12);
        assert_eq!(result.value(Metric::Vega), 39.0);
    }

    #[test]
    fn test_with_spot_keeps_contract() {
        let base = OptionInputs::default();
        let moved = base.with_spot(120.0);
        assert_eq!(moved.s, 120.0);
        assert_eq!(moved.k, base.k);
        assert_eq!(moved.option_type, base.option_type);
        assert_eq!(base.with_option_type(OptionType::Put).option_type, OptionType::Put);
    }
}
