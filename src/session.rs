//! Interactive session state
//!
//! Owned by the presentation layer. Holds the parameters currently shown on
//! screen and the metric selected for the chart, and hands immutable
//! [`OptionInputs`] values to the engine. The engine never sees this type.

use crate::analytics::{
    price_and_greeks, sweep, GreeksResult, Metric, OptionInputs, OptionType, SweepRange,
    DAYS_PER_YEAR,
};
use crate::config::LabConfig;
use crate::error::BsResult;
use tracing::warn;

/// Chart data handed to the plotting collaborator
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    /// Column label; `theta_per_day` when theta was converted to daily decay
    pub column: &'static str,
    /// Current spot, drawn as a vertical marker on the chart
    pub spot_marker: f64,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone)]
pub struct SessionState {
    config: LabConfig,
    inputs: OptionInputs,
    metric: Metric,
}

impl SessionState {
    /// Start a session at the configured defaults, charting delta
    pub fn new(config: LabConfig) -> Self {
        let inputs = config.defaults.inputs();
        SessionState {
            config,
            inputs,
            metric: Metric::Delta,
        }
    }

    pub fn config(&self) -> &LabConfig {
        &self.config
    }

    pub fn inputs(&self) -> OptionInputs {
        self.inputs
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// Restore the configured default parameters and option type
    pub fn reset(&mut self) {
        self.inputs = self.config.defaults.inputs();
    }

    /// Replace all parameters at once, e.g. from a preset scenario
    pub fn set_lab_parameters(&mut self, inputs: OptionInputs) {
        self.warn_out_of_range(&inputs);
        self.inputs = inputs;
    }

    pub fn set_spot(&mut self, s: f64) {
        self.set_lab_parameters(OptionInputs { s, ..self.inputs });
    }

    pub fn set_strike(&mut self, k: f64) {
        self.set_lab_parameters(OptionInputs { k, ..self.inputs });
    }

    pub fn set_maturity(&mut self, t: f64) {
        self.set_lab_parameters(OptionInputs { t, ..self.inputs });
    }

    pub fn set_rate(&mut self, r: f64) {
        self.set_lab_parameters(OptionInputs { r, ..self.inputs });
    }

    pub fn set_volatility(&mut self, sigma: f64) {
        self.set_lab_parameters(OptionInputs { sigma, ..self.inputs });
    }

    pub fn set_option_type(&mut self, option_type: OptionType) {
        self.inputs.option_type = option_type;
    }

    pub fn select_metric(&mut self, metric: Metric) {
        self.metric = metric;
    }

    /// Price and Greeks for the current parameters
    pub fn evaluate(&self) -> BsResult<GreeksResult> {
        price_and_greeks(&self.inputs)
    }

    /// Chart data for the selected metric over the configured spot range
    ///
    /// Theta is reported per day when `sweep.daily_theta` is set,
    /// and labelled `theta_per_day`.
    pub fn chart_series(&self) -> BsResult<ChartSeries> {
        self.chart_series_over(&self.config.sweep.range())
    }

    /// Same as [`SessionState::chart_series`] over an explicit spot range
    pub fn chart_series_over(&self, range: &SweepRange) -> BsResult<ChartSeries> {
        let points = sweep(range, &self.inputs, self.metric)?;
        let (column, points) = if self.metric == Metric::Theta && self.config.sweep.daily_theta {
            let daily = points
                .into_iter()
                .map(|(s, theta)| (s, theta / DAYS_PER_YEAR))
                .collect();
            ("theta_per_day", daily)
        } else {
            (self.metric.name(), points)
        };
        Ok(ChartSeries {
            column,
            spot_marker: self.inputs.s,
            points,
        })
    }

    // Values outside the sliders are kept; the engine accepts them.
    fn warn_out_of_range(&self, inputs: &OptionInputs) {
        for name in self.config.ranges.out_of_range(inputs) {
            warn!(parameter = name, "parameter outside configured lab range");
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(LabConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_restores_defaults() {
        let mut session = SessionState::default();
        session.set_spot(140.0);
        session.set_volatility(0.6);
        session.set_option_type(OptionType::Put);
        assert_ne!(session.inputs(), OptionInputs::default());

        session.reset();
        assert_eq!(session.inputs(), OptionInputs::default());
    }

    #[test]
    fn test_out_of_range_values_are_kept() {
        let mut session = SessionState::default();
        session.set_maturity(10.0);
        assert_eq!(session.inputs().t, 10.0);
        assert!(session.evaluate().is_ok());
    }

    #[test]
    fn test_invalid_values_surface_on_evaluate() {
        let mut session = SessionState::default();
        session.set_strike(0.0);
        assert!(session.evaluate().unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_chart_series_daily_theta() {
        let mut session = SessionState::default();
        session.select_metric(Metric::Theta);
        let chart = session.chart_series().unwrap();
        assert_eq!(chart.column, "theta_per_day");
        let daily = chart.points;

        let annual = sweep(
            &session.config().sweep.range(),
            &session.inputs(),
            Metric::Theta,
        )
        .unwrap();

        assert_eq!(daily.len(), annual.len());
        for ((s_d, d), (s_a, a)) in daily.iter().zip(annual.iter()) {
            assert_eq!(s_d, s_a);
            assert!((d * DAYS_PER_YEAR - a).abs() < 1e-9);
        }
    }

    #[test]
    fn test_chart_series_uses_selected_metric() {
        let mut session = SessionState::default();
        session.select_metric(Metric::Gamma);
        let chart = session.chart_series().unwrap();
        assert_eq!(chart.column, "gamma");
        assert_eq!(chart.points.len(), session.config().sweep.n_points);
        assert!(chart.points.iter().all(|&(_, g)| g >= 0.0));
    }

    #[test]
    fn test_annual_theta_keeps_metric_label() {
        let mut config = LabConfig::default();
        config.sweep.daily_theta = false;
        let mut session = SessionState::new(config);
        session.select_metric(Metric::Theta);

        let chart = session.chart_series().unwrap();
        assert_eq!(chart.column, "theta");
        assert!(chart.points.iter().any(|&(_, theta)| theta < -1.0));
    }

    #[test]
    fn test_chart_marks_current_spot() {
        let mut session = SessionState::default();
        session.set_spot(117.5);
        let chart = session.chart_series().unwrap();
        assert_eq!(chart.spot_marker, 117.5);
        assert_eq!(chart.points.first().unwrap().0, session.config().sweep.s_min);
    }
}
