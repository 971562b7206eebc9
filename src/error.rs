// src/error.rs
use thiserror::Error;

/// Errors raised by the bs-greeks library
///
/// The pricing engine and the sweep only ever produce `InvalidInput`; the
/// remaining variants belong to the configuration and output layers.
#[derive(Debug, Error)]
pub enum GreeksError {
    /// Input outside the domain of the closed-form formulas
    #[error("Invalid input '{field}': {reason}")]
    InvalidInput { field: String, reason: String },

    /// Lab configuration could not be read or is inconsistent
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GreeksError {
    pub fn invalid_input(field: &str, reason: impl Into<String>) -> Self {
        GreeksError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// True for the engine's single failure kind
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, GreeksError::InvalidInput { .. })
    }
}

/// Result type alias for bs-greeks operations
pub type BsResult<T> = Result<T, GreeksError>;

/// Validation utilities
pub mod validation {
    use super::{BsResult, GreeksError};

    /// Validate that a parameter is finite and strictly positive
    pub fn validate_positive(name: &str, value: f64) -> BsResult<()> {
        validate_finite(name, value)?;
        if value <= 0.0 {
            Err(GreeksError::invalid_input(
                name,
                format!("{} must be positive (> 0)", value),
            ))
        } else {
            Ok(())
        }
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> BsResult<()> {
        if !value.is_finite() {
            Err(GreeksError::invalid_input(
                name,
                format!("{} must be finite (not NaN or infinite)", value),
            ))
        } else {
            Ok(())
        }
    }

    /// Validate the number of points of a sweep grid
    pub fn validate_sweep_points(n_points: usize) -> BsResult<()> {
        if n_points < 2 {
            Err(GreeksError::invalid_input(
                "n_points",
                format!("{} is too few, a sweep needs at least 2 points", n_points),
            ))
        } else {
            Ok(())
        }
    }

    /// Validate that `lo < hi`
    pub fn validate_ordered(name: &str, lo: f64, hi: f64) -> BsResult<()> {
        if lo >= hi {
            Err(GreeksError::invalid_input(
                name,
                format!("lower bound {} must be below upper bound {}", lo, hi),
            ))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::validation::*;
    use super::*;

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive("sigma", 0.2).is_ok());
        assert!(validate_positive("sigma", 0.0).is_err());
        assert!(validate_positive("sigma", -0.1).is_err());
        assert!(validate_positive("sigma", f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_finite() {
        assert!(validate_finite("r", -0.01).is_ok());
        assert!(validate_finite("r", f64::NAN).is_err());
        assert!(validate_finite("r", f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_validate_sweep_points() {
        assert!(validate_sweep_points(2).is_ok());
        assert!(validate_sweep_points(1).is_err());
        assert!(validate_sweep_points(0).is_err());
    }

    #[test]
    fn test_validate_ordered() {
        assert!(validate_ordered("s", 50.0, 150.0).is_ok());
        assert!(validate_ordered("s", 150.0, 150.0).is_err());
        assert!(validate_ordered("s", 151.0, 150.0).is_err());
    }

    #[test]
    fn test_error_display() {
        let error = validate_positive("sigma", -0.1).unwrap_err();

        let display = format!("{}", error);
        assert!(display.contains("sigma"));
        assert!(display.contains("-0.1"));
        assert!(display.contains("positive"));
        assert!(error.is_invalid_input());
    }

    #[test]
    fn test_config_error_is_not_invalid_input() {
        let error = GreeksError::Config("bad ranges".to_string());
        assert!(!error.is_invalid_input());
        assert_eq!(error.to_string(), "Invalid configuration: bad ranges");
    }
}
