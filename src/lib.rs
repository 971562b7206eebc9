//! # bs-greeks: Closed-form Black-Scholes Pricing and Greeks
//!
//! A Rust library for the Black-Scholes fair value of European calls and
//! puts together with their risk sensitivities, plus spot-price sweeps that
//! feed sensitivity charts.
//!
//! ## Key Features
//!
//! - **Closed Form**: Price, Delta, Gamma, Theta, Vega and Rho in one call
//! - **Strict Inputs**: Invalid parameters fail with `InvalidInput`, never NaN
//! - **Sweeps**: Any metric across an evenly spaced spot grid
//! - **Lab Tooling**: TOML configuration, session state, CSV/JSON output
//!
//! ## Quick Start
//!
//! ```rust
//! use bs_greeks::analytics::{price_and_greeks, OptionInputs, OptionType};
//!
//! let inputs = OptionInputs::new(100.0, 105.0, 1.0, 0.05, 0.2, OptionType::Call);
//! let greeks = price_and_greeks(&inputs).expect("Valid inputs");
//! println!("Price: {:.2}, Delta: {:.3}", greeks.price, greeks.delta);
//! println!("Theta: {:.3}/day", greeks.theta_per_day());
//! ```
//!
//! ## Mathematical Foundation
//!
//! Prices follow geometric Brownian motion with constant rate and volatility
//! and no dividends. All outputs derive from the standard normal CDF and PDF
//! evaluated at d₁ and d₂.

// Module declarations
pub mod error;
pub mod math_utils;
pub mod analytics;
pub mod config;
pub mod session;
pub mod output;

// Re-export commonly used types for convenience
pub use analytics::{
    price_and_greeks, sweep, GreeksResult, Metric, MetricSet, OptionInputs, OptionType,
    SweepRange,
};
pub use config::LabConfig;
pub use error::{BsResult, GreeksError};
pub use session::{ChartSeries, SessionState};
