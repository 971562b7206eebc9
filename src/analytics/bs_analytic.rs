// src/analytics/bs_analytic.rs
//! Analytical Black-Scholes formulas for European options and Greeks
//!
//! # Mathematical Foundation
//!
//! Under the Black-Scholes model, the underlying asset follows:
//! ```text
//! dS_t = r S_t dt + σ S_t dW_t
//! ```
//!
//! The risk-neutral pricing formula gives:
//! ```text
//! V(S,t) = e^(-r(T-t)) * E^Q[payoff(S_T) | S_t = S]
//! ```
//!
//! For European options this has a closed form involving the cumulative
//! normal distribution Φ(x) and the density φ(x).
//!
//! # Modeling limitations
//!
//! No dividend yield and continuous compounding only. Theta carries no
//! dividend term; American exercise is not handled.

use super::types::{GreeksResult, Metric, OptionInputs, OptionType};
use crate::error::{validation::*, BsResult, GreeksError};
use crate::math_utils::{norm_cdf, norm_pdf};
use rayon::prelude::*;
use tracing::debug;

impl OptionInputs {
    /// Validate the preconditions of the closed-form formulas
    ///
    /// S, K, T and σ must be strictly positive; r may take any finite value.
    pub fn validate(&self) -> BsResult<()> {
        validate_positive("s", self.s)?;
        validate_positive("k", self.k)?;
        validate_positive("t", self.t)?;
        validate_finite("r", self.r)?;
        validate_positive("sigma", self.sigma)?;
        Ok(())
    }
}

/// The d₁ and d₂ terms of the Black-Scholes formula
///
/// ```text
/// d₁ = [ln(S/K) + (r + σ²/2)T] / (σ√T)
/// d₂ = d₁ - σ√T
/// ```
///
/// Under the risk-neutral measure Φ(d₂) is the probability that a call
/// finishes in-the-money.
pub fn d1_d2(inputs: &OptionInputs) -> BsResult<(f64, f64)> {
    inputs.validate()?;
    d1_d2_checked(inputs)
}

// Inputs already validated; rejects σ√T underflow and ln(S/K) overflow.
fn d1_d2_checked(inputs: &OptionInputs) -> BsResult<(f64, f64)> {
    let OptionInputs { s, k, t, r, sigma, .. } = *inputs;
    let sigma_sqrt_t = sigma * t.sqrt();
    if sigma_sqrt_t <= 0.0 {
        return Err(GreeksError::invalid_input(
            "sigma",
            format!("σ√T underflows to zero (sigma = {}, t = {})", sigma, t),
        ));
    }
    let d1 = ((s / k).ln() + (r + 0.5 * sigma * sigma) * t) / sigma_sqrt_t;
    let d2 = d1 - sigma_sqrt_t;
    if !(d1.is_finite() && d2.is_finite()) {
        return Err(GreeksError::invalid_input(
            "s",
            format!("d1 = {} is not finite (s = {}, k = {})", d1, s, k),
        ));
    }
    Ok((d1, d2))
}

/// Black-Scholes price and Greeks for a European call or put
///
/// # Formulas
///
/// Call:
/// ```text
/// C = S*Φ(d₁) - K*e^(-rT)*Φ(d₂)
/// Δ = Φ(d₁)
/// ρ = K*T*e^(-rT)*Φ(d₂)
/// Θ = -S*φ(d₁)*σ/(2√T) - r*K*e^(-rT)*Φ(d₂)
/// ```
///
/// Put:
/// ```text
/// P = K*e^(-rT)*Φ(-d₂) - S*Φ(-d₁)
/// Δ = Φ(d₁) - 1
/// ρ = -K*T*e^(-rT)*Φ(-d₂)
/// Θ = -S*φ(d₁)*σ/(2√T) - r*K*e^(-rT)*Φ(-d₂)
/// ```
///
/// Both:
/// ```text
/// Γ = φ(d₁) / (S*σ*√T)
/// ν = S*φ(d₁)*√T
/// ```
///
/// # Units
/// - Theta is per year. Divide by 365 (see `GreeksResult::theta_per_day`)
///   for the daily decay usually displayed to traders.
/// - Vega and rho are per unit (1.00 = 100%) change of σ and r.
///
/// # Errors
///
/// Returns `GreeksError::InvalidInput` when S, K, T or σ is not strictly
/// positive, when any input is NaN or infinite, or when the inputs are valid
/// but push an intermediate term out of f64 range (σ√T underflowing to
/// zero, e^(-rT) overflowing for a large negative rate). Every `Ok` result
/// is finite.
pub fn price_and_greeks(inputs: &OptionInputs) -> BsResult<GreeksResult> {
    inputs.validate()?;

    let OptionInputs {
        s,
        k,
        t,
        r,
        sigma,
        option_type,
    } = *inputs;
    let (d1, d2) = d1_d2_checked(inputs)?;
    let sqrt_t = t.sqrt();
    let discounted_strike = k * (-r * t).exp();
    if !discounted_strike.is_finite() {
        return Err(GreeksError::invalid_input(
            "r",
            format!("discount factor e^(-rT) overflows (r = {}, t = {})", r, t),
        ));
    }
    let pdf_d1 = norm_pdf(d1);

    // Gamma and vega do not depend on the exercise right
    let gamma = pdf_d1 / (s * sigma * sqrt_t);
    let vega = s * pdf_d1 * sqrt_t;
    let time_decay = -(s * pdf_d1 * sigma) / (2.0 * sqrt_t);

    let (price, delta, theta, rho) = match option_type {
        OptionType::Call => {
            let nd1 = norm_cdf(d1);
            let nd2 = norm_cdf(d2);
            (
                s * nd1 - discounted_strike * nd2,
                nd1,
                time_decay - r * discounted_strike * nd2,
                t * discounted_strike * nd2,
            )
        }
        OptionType::Put => {
            let n_minus_d1 = norm_cdf(-d1);
            let n_minus_d2 = norm_cdf(-d2);
            (
                discounted_strike * n_minus_d2 - s * n_minus_d1,
                norm_cdf(d1) - 1.0,
                time_decay - r * discounted_strike * n_minus_d2,
                -t * discounted_strike * n_minus_d2,
            )
        }
    };

    let result = GreeksResult {
        price,
        delta,
        gamma,
        theta,
        vega,
        rho,
    };
    if let Some(metric) = Metric::ALL.iter().find(|m| !result.value(**m).is_finite()) {
        return Err(GreeksError::invalid_input(
            "inputs",
            format!("{} is not finite for {:?}", metric, inputs),
        ));
    }
    Ok(result)
}

/// Evaluate many independent contracts in parallel
///
/// Each element succeeds or fails on its own; the output keeps the input
/// order.
pub fn price_and_greeks_batch(inputs: &[OptionInputs]) -> Vec<BsResult<GreeksResult>> {
    debug!(contracts = inputs.len(), "pricing batch");
    inputs.par_iter().map(price_and_greeks).collect()
}
