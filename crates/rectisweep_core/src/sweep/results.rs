//! Aggregated sweep output.

use serde::{Deserialize, Serialize};

use super::{RunMetric, SweepConfig, SweepGrid};

/// One run result on a curve.
///
/// Points are keyed by the inner sweep index. The inner value is kept only as
/// the x coordinate, so float equality never decides which slot a run lands in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub index: usize,
    pub x: f64,
    pub y: f64,
}

/// Run results for one outer value, in ascending inner order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub outer_index: usize,
    pub outer_value: f64,
    /// Legend entry, e.g. `gamma value: 0.2`
    pub label: String,
    pub points: Vec<SeriesPoint>,
}

impl Series {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `(x, y)` pairs for plotting
    pub fn xy(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| (p.x, p.y)).collect()
    }
}

/// Complete results of a two-parameter sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepResults {
    pub outer_label: String,
    pub inner_label: String,
    pub outer_values: Vec<f64>,
    pub inner_values: Vec<f64>,
    pub legend_labels: Vec<String>,
    pub signal: String,
    pub metric: RunMetric,
    /// `[outer, inner]` grid of run results
    pub values: SweepGrid<f64>,
}

impl SweepResults {
    pub(crate) fn new(config: &SweepConfig, values: SweepGrid<f64>) -> Self {
        Self {
            outer_label: config.outer.label().to_string(),
            inner_label: config.inner.label().to_string(),
            outer_values: config.outer.sweep_values(),
            inner_values: config.inner.sweep_values(),
            legend_labels: config.legend_labels(),
            signal: config.signal.clone(),
            metric: config.metric,
            values,
        }
    }

    /// Result at `(outer index, inner index)`
    pub fn get(&self, outer_index: usize, inner_index: usize) -> Option<f64> {
        self.values.get(&[outer_index, inner_index]).copied()
    }

    /// The curve for one outer value
    pub fn series(&self, outer_index: usize) -> Option<Series> {
        let outer_value = *self.outer_values.get(outer_index)?;
        let row = self.values.slice_1d(1, &[Some(outer_index), None])?;
        let points = row
            .into_iter()
            .zip(&self.inner_values)
            .map(|((index, &y), &x)| SeriesPoint { index, x, y })
            .collect();
        Some(Series {
            outer_index,
            outer_value,
            label: self.legend_labels.get(outer_index).cloned().unwrap_or_default(),
            points,
        })
    }

    /// Every curve, in outer sweep order
    pub fn all_series(&self) -> Vec<Series> {
        (0..self.outer_values.len())
            .filter_map(|i| self.series(i))
            .collect()
    }

    /// Y-axis label
    pub fn metric_label(&self) -> String {
        self.metric.label(&self.signal)
    }
}
