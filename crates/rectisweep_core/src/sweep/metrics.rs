//! Scalar features extracted from a single simulation trajectory.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::Trajectory;

/// Metric computed from one output signal of one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunMetric {
    /// First sample minus last sample (how far the signal fell over the run)
    #[default]
    FirstMinusLast,
    /// Last sample
    FinalValue,
    /// Largest minus smallest sample
    PeakToPeak,
}

impl RunMetric {
    pub fn evaluate(&self, trajectory: &Trajectory, signal: &str) -> Result<f64> {
        match self {
            Self::FirstMinusLast => {
                let (first, last) = trajectory.endpoints(signal)?;
                Ok(first - last)
            }
            Self::FinalValue => trajectory.endpoints(signal).map(|(_, last)| last),
            Self::PeakToPeak => {
                let samples = trajectory.samples(signal)?;
                let (lo, hi) = samples
                    .iter()
                    .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                        (lo.min(v), hi.max(v))
                    });
                Ok(hi - lo)
            }
        }
    }

    /// Display label, mentioning the signal
    pub fn label(&self, signal: &str) -> String {
        match self {
            Self::FirstMinusLast => format!("{signal}[0] - {signal}[-1]"),
            Self::FinalValue => format!("{signal}[-1]"),
            Self::PeakToPeak => format!("max({signal}) - min({signal})"),
        }
    }

    /// Short label suitable for chart axes
    pub fn short_label(&self) -> &'static str {
        match self {
            Self::FirstMinusLast => "Drop",
            Self::FinalValue => "Final",
            Self::PeakToPeak => "Peak-to-peak",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SweepError;

    fn traj(samples: Vec<f64>) -> Trajectory {
        let time = (0..samples.len()).map(|i| i as f64).collect();
        Trajectory::new(time).with_signal("s", samples)
    }

    #[test]
    fn first_minus_last() {
        let metric = RunMetric::FirstMinusLast;
        assert_eq!(metric.evaluate(&traj(vec![5.0, 4.0, 1.0, 2.0]), "s").unwrap(), 3.0);
        assert_eq!(metric.evaluate(&traj(vec![1.5, 1.5, 1.5]), "s").unwrap(), 0.0);
        assert_eq!(metric.evaluate(&traj(vec![2.0, 5.0]), "s").unwrap(), -3.0);
    }

    #[test]
    fn final_value_and_peak_to_peak() {
        let t = traj(vec![1.0, 4.0, -2.0, 0.5]);
        assert_eq!(RunMetric::FinalValue.evaluate(&t, "s").unwrap(), 0.5);
        assert_eq!(RunMetric::PeakToPeak.evaluate(&t, "s").unwrap(), 6.0);
    }

    #[test]
    fn missing_signal_propagates() {
        let err = RunMetric::FirstMinusLast
            .evaluate(&traj(vec![1.0]), "v_out")
            .unwrap_err();
        assert!(matches!(err, SweepError::MissingSignal(name) if name == "v_out"));
    }

    #[test]
    fn labels() {
        assert_eq!(RunMetric::FirstMinusLast.label("s"), "s[0] - s[-1]");
        assert_eq!(RunMetric::PeakToPeak.short_label(), "Peak-to-peak");
    }
}
