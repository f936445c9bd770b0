//! Configuration types for the two-parameter sweep.

use serde::{Deserialize, Serialize};

use super::RunMetric;
use crate::error::{Result, SweepError};

/// Most points a single sweep parameter may take
pub const MAX_STEP_COUNT: usize = 10_000;

/// Most simulator runs one sweep may request
pub const MAX_TOTAL_POINTS: usize = 100_000;

/// One swept model parameter and its evenly spaced range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepParameter {
    /// Model parameter name passed to the simulator
    pub name: String,
    pub min_value: f64,
    pub max_value: f64,
    /// Number of points, endpoints included
    pub step_count: usize,
}

impl SweepParameter {
    pub fn new(name: impl Into<String>, min_value: f64, max_value: f64, step_count: usize) -> Self {
        Self {
            name: name.into(),
            min_value,
            max_value,
            step_count,
        }
    }

    /// Evenly spaced values from `min_value` to `max_value` inclusive.
    ///
    /// The last point is exactly `max_value`. A single step yields `min_value`.
    pub fn sweep_values(&self) -> Vec<f64> {
        match self.step_count {
            0 => Vec::new(),
            1 => vec![self.min_value],
            n => {
                let step = (self.max_value - self.min_value) / (n - 1) as f64;
                let mut values: Vec<f64> = (0..n)
                    .map(|i| self.min_value + step * i as f64)
                    .collect();
                values[n - 1] = self.max_value;
                values
            }
        }
    }

    /// Axis label
    pub fn label(&self) -> &str {
        &self.name
    }

    /// Legend entry for the curve drawn at `value`, e.g. `gamma value: 0.2`
    pub fn legend_label(&self, value: f64) -> String {
        format!("{} value: {}", self.name, format_sweep_value(value))
    }

    fn validate(&self, role: &str) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(SweepError::Config(format!("{role} parameter has no name")));
        }
        if self.step_count == 0 {
            return Err(SweepError::Config(format!(
                "{role} parameter {} needs at least one step",
                self.name
            )));
        }
        if self.step_count > MAX_STEP_COUNT {
            return Err(SweepError::Config(format!(
                "{role} parameter {} has {} steps, at most {MAX_STEP_COUNT} allowed",
                self.name, self.step_count
            )));
        }
        if !self.min_value.is_finite() || !self.max_value.is_finite() {
            return Err(SweepError::Config(format!(
                "{role} parameter {} has a non-finite range",
                self.name
            )));
        }
        Ok(())
    }
}

/// Print a sweep value without floating-point accumulation noise.
///
/// `0.6000000000000001` prints as `0.6`, integral values keep one decimal
/// (`1.0`).
pub fn format_sweep_value(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let rounded = if value.abs() < 1e6 {
        (value * 1e12).round() / 1e12
    } else {
        value
    };
    let text = rounded.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{text}.0")
    }
}

/// Full sweep description: an outer and an inner parameter, the simulation
/// horizon, and the metric extracted from each run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// One curve per outer value
    pub outer: SweepParameter,
    /// X-axis of every curve
    pub inner: SweepParameter,
    /// Simulation stop time
    pub final_time: f64,
    /// Output signal the metric is read from
    pub signal: String,
    pub metric: RunMetric,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            outer: SweepParameter::new("gamma", 0.2, 1.0, 5),
            inner: SweepParameter::new("beta", 0.1, 1.0, 10),
            final_time: 14.0,
            signal: "s".to_string(),
            metric: RunMetric::default(),
        }
    }
}

impl SweepConfig {
    /// Number of simulator runs (saturates on overflow; `validate` rejects it)
    pub fn total_points(&self) -> usize {
        self.outer.step_count.saturating_mul(self.inner.step_count)
    }

    /// `[outer steps, inner steps]`
    pub fn grid_shape(&self) -> Vec<usize> {
        vec![self.outer.step_count, self.inner.step_count]
    }

    /// One legend label per outer value, in sweep order
    pub fn legend_labels(&self) -> Vec<String> {
        self.outer
            .sweep_values()
            .into_iter()
            .map(|v| self.outer.legend_label(v))
            .collect()
    }

    pub fn validate(&self) -> Result<()> {
        self.outer.validate("outer")?;
        self.inner.validate("inner")?;
        match self.outer.step_count.checked_mul(self.inner.step_count) {
            Some(total) if total <= MAX_TOTAL_POINTS => {}
            _ => {
                return Err(SweepError::Config(format!(
                    "{} x {} grid exceeds {MAX_TOTAL_POINTS} runs",
                    self.outer.step_count, self.inner.step_count
                )));
            }
        }
        if self.outer.name == self.inner.name {
            return Err(SweepError::Config(format!(
                "outer and inner sweeps both target {}",
                self.outer.name
            )));
        }
        if !self.final_time.is_finite() || self.final_time <= 0.0 {
            return Err(SweepError::Config(format!(
                "final time must be positive, got {}",
                self.final_time
            )));
        }
        if self.signal.trim().is_empty() {
            return Err(SweepError::Config("no output signal named".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-12, "{actual:?} != {expected:?}");
        }
    }

    #[test]
    fn default_grid_matches_rectifier_study() {
        let config = SweepConfig::default();
        assert_close(&config.outer.sweep_values(), &[0.2, 0.4, 0.6, 0.8, 1.0]);
        assert_close(
            &config.inner.sweep_values(),
            &[0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0],
        );
        assert_eq!(config.total_points(), 50);
        assert_eq!(config.grid_shape(), vec![5, 10]);
    }

    #[test]
    fn endpoints_are_exact() {
        let values = SweepParameter::new("beta", 0.1, 1.0, 10).sweep_values();
        assert_eq!(values[0], 0.1);
        assert_eq!(values[9], 1.0);
        assert!(values.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn single_step_yields_minimum() {
        assert_eq!(SweepParameter::new("g", 0.3, 0.9, 1).sweep_values(), vec![0.3]);
    }

    #[test]
    fn legend_labels_match_outer_sweep() {
        assert_eq!(
            SweepConfig::default().legend_labels(),
            vec![
                "gamma value: 0.2",
                "gamma value: 0.4",
                "gamma value: 0.6",
                "gamma value: 0.8",
                "gamma value: 1.0",
            ]
        );
    }

    #[test]
    fn value_formatting() {
        assert_eq!(format_sweep_value(0.2 + 2.0 * 0.2), "0.6");
        assert_eq!(format_sweep_value(1.0), "1.0");
        assert_eq!(format_sweep_value(14.0), "14.0");
        assert_eq!(format_sweep_value(-0.25), "-0.25");
        assert_eq!(format_sweep_value(f64::INFINITY), "inf");
    }

    #[test]
    fn validation_rejects_bad_configs() {
        let mut config = SweepConfig::default();
        config.inner.step_count = 0;
        assert!(config.validate().is_err());

        let mut config = SweepConfig::default();
        config.inner.name = "gamma".to_string();
        assert!(config.validate().is_err());

        let mut config = SweepConfig::default();
        config.final_time = 0.0;
        assert!(config.validate().is_err());

        let mut config = SweepConfig::default();
        config.outer.max_value = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = SweepConfig::default();
        config.signal = " ".to_string();
        assert!(config.validate().is_err());

        let mut config = SweepConfig::default();
        config.outer.step_count = usize::MAX / 2;
        assert!(matches!(config.validate(), Err(SweepError::Config(_))));

        let mut config = SweepConfig::default();
        config.outer.step_count = MAX_STEP_COUNT + 1;
        assert!(config.validate().is_err());

        let mut config = SweepConfig::default();
        config.outer.step_count = MAX_STEP_COUNT;
        config.inner.step_count = MAX_STEP_COUNT;
        assert!(matches!(config.validate(), Err(SweepError::Config(_))));

        assert!(SweepConfig::default().validate().is_ok());
    }
}
