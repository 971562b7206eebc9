pub mod bs_analytic;
pub mod sweep;
pub mod types;

pub use bs_analytic::{d1_d2, price_and_greeks, price_and_greeks_batch};
pub use sweep::{sweep, sweep_greeks, SweepRange};
pub use types::{GreeksResult, Metric, MetricSet, OptionInputs, OptionType, DAYS_PER_YEAR};
