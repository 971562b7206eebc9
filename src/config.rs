//! Lab configuration
//!
//! Reset values, slider bounds and the default chart sweep of the
//! interactive front end, loaded from TOML. None of this constrains the
//! engine: the ranges only describe what the presentation layer offers.

use crate::analytics::{OptionInputs, OptionType, SweepRange};
use crate::error::{BsResult, GreeksError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Closed interval `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamRange {
    pub min: f64,
    pub max: f64,
}

impl ParamRange {
    pub const fn new(min: f64, max: f64) -> Self {
        ParamRange { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Slider bounds for each parameter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ranges {
    pub s: ParamRange,
    pub k: ParamRange,
    pub t: ParamRange,
    pub r: ParamRange,
    pub sigma: ParamRange,
}

impl Default for Ranges {
    fn default() -> Self {
        Ranges {
            s: ParamRange::new(50.0, 150.0),
            k: ParamRange::new(50.0, 150.0),
            t: ParamRange::new(0.1, 5.0),
            r: ParamRange::new(0.0, 0.2),
            sigma: ParamRange::new(0.1, 1.0),
        }
    }
}

impl Ranges {
    fn named(&self) -> [(&'static str, ParamRange); 5] {
        [
            ("s", self.s),
            ("k", self.k),
            ("t", self.t),
            ("r", self.r),
            ("sigma", self.sigma),
        ]
    }

    /// Names of the parameters of `inputs` that fall outside their range
    pub fn out_of_range(&self, inputs: &OptionInputs) -> Vec<&'static str> {
        let values = [inputs.s, inputs.k, inputs.t, inputs.r, inputs.sigma];
        self.named()
            .iter()
            .zip(values)
            .filter(|((_, range), value)| !range.contains(*value))
            .map(|((name, _), _)| *name)
            .collect()
    }
}

/// Default chart sweep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepSettings {
    pub s_min: f64,
    pub s_max: f64,
    pub n_points: usize,
    /// Plot theta per day instead of per year
    pub daily_theta: bool,
}

impl Default for SweepSettings {
    fn default() -> Self {
        let range = SweepRange::default();
        SweepSettings {
            s_min: range.s_min,
            s_max: range.s_max,
            n_points: range.n_points,
            daily_theta: true,
        }
    }
}

impl SweepSettings {
    pub fn range(&self) -> SweepRange {
        SweepRange::new(self.s_min, self.s_max, self.n_points)
    }
}

/// Reset values of the five parameters and the option type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub s: f64,
    pub k: f64,
    pub t: f64,
    pub r: f64,
    pub sigma: f64,
    pub option_type: OptionType,
}

impl Default for Defaults {
    fn default() -> Self {
        let inputs = OptionInputs::default();
        Defaults {
            s: inputs.s,
            k: inputs.k,
            t: inputs.t,
            r: inputs.r,
            sigma: inputs.sigma,
            option_type: inputs.option_type,
        }
    }
}

impl Defaults {
    pub fn inputs(&self) -> OptionInputs {
        OptionInputs::new(self.s, self.k, self.t, self.r, self.sigma, self.option_type)
    }
}

/// Complete lab configuration
///
/// # Example
///
/// ```toml
/// [defaults]
/// s = 100.0
/// k = 105.0
/// option_type = "put"
///
/// [sweep]
/// n_points = 200
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    pub defaults: Defaults,
    pub ranges: Ranges,
    pub sweep: SweepSettings,
}

impl LabConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> BsResult<Self> {
        let config: LabConfig = toml::from_str(content)
            .map_err(|e| GreeksError::Config(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> BsResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            GreeksError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Validate the configuration
    ///
    /// Ranges must be ordered, defaults must be valid engine inputs lying
    /// inside their ranges, and the sweep must be a valid grid.
    pub fn validate(&self) -> BsResult<()> {
        for (name, range) in self.ranges.named() {
            if !(range.min.is_finite() && range.max.is_finite()) || range.min >= range.max {
                return Err(GreeksError::Config(format!(
                    "range for '{}' must satisfy min < max, got [{}, {}]",
                    name, range.min, range.max
                )));
            }
        }

        let defaults = self.defaults.inputs();
        defaults
            .validate()
            .map_err(|e| GreeksError::Config(format!("defaults: {}", e)))?;

        let outside = self.ranges.out_of_range(&defaults);
        if !outside.is_empty() {
            return Err(GreeksError::Config(format!(
                "defaults outside configured ranges: {}",
                outside.join(", ")
            )));
        }

        self.sweep
            .range()
            .validate()
            .map_err(|e| GreeksError::Config(format!("sweep: {}", e)))?;

        Ok(())
    }
}
