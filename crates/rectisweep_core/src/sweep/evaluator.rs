//! Sweep runner: drives the simulator over the full parameter grid.
//!
//! Runs are strictly sequential. Each grid point loads a fresh instance from
//! the compiled model, sets both parameters, simulates to the configured
//! horizon, and reduces the trajectory to one number. The first failure
//! aborts the sweep.

use tracing::{debug, info};

use super::{Series, SweepConfig, SweepGrid, SweepResults};
use crate::error::{Result, SweepError};
use crate::simulator::{SimulationBackend, SimulationInstance};

/// Receives each curve as soon as its outer iteration completes.
pub trait SeriesSink {
    fn plot(&mut self, series: &Series);

    /// Called after every run with the number of completed runs
    fn progress(&mut self, _completed: usize, _total: usize) {}
}

impl<F: FnMut(&Series)> SeriesSink for F {
    fn plot(&mut self, series: &Series) {
        self(series)
    }
}

/// Run a single grid point: load, set inner then outer parameter, simulate,
/// extract the metric.
pub fn run_point<B: SimulationBackend>(
    backend: &B,
    handle: &B::Handle,
    config: &SweepConfig,
    outer_value: f64,
    inner_value: f64,
) -> Result<f64> {
    let mut instance = backend.load(handle)?;
    instance.set(&config.inner.name, inner_value)?;
    instance.set(&config.outer.name, outer_value)?;
    let trajectory = instance.simulate(config.final_time)?;
    config.metric.evaluate(&trajectory, &config.signal)
}

/// Run the full sweep, handing each completed series to `sink`.
///
/// Every (outer, inner) pair is simulated exactly once, outer values in
/// ascending order, inner values ascending within each.
pub fn sweep_evaluate<B, S>(
    backend: &B,
    handle: &B::Handle,
    config: &SweepConfig,
    sink: &mut S,
) -> Result<SweepResults>
where
    B: SimulationBackend,
    S: SeriesSink + ?Sized,
{
    config.validate()?;

    let outer_values = config.outer.sweep_values();
    let inner_values = config.inner.sweep_values();
    let legend_labels = config.legend_labels();
    let total = config.total_points();

    info!(
        outer = %config.outer.name,
        inner = %config.inner.name,
        total,
        final_time = config.final_time,
        "Starting sweep"
    );

    let mut values = SweepGrid::new(config.grid_shape(), f64::NAN);

    for (completed, indices) in values.indices().enumerate() {
        let (oi, ii) = (indices[0], indices[1]);
        let (outer_value, inner_value) = (outer_values[oi], inner_values[ii]);

        let value = run_point(backend, handle, config, outer_value, inner_value).map_err(|e| {
            SweepError::Point {
                outer_index: oi,
                outer_value,
                inner_index: ii,
                inner_value,
                source: Box::new(e),
            }
        })?;
        debug!(
            outer = outer_value,
            inner = inner_value,
            value,
            "Run {}/{} complete",
            completed + 1,
            total
        );
        values.set(&indices, value);
        sink.progress(completed + 1, total);

        if ii + 1 == inner_values.len() {
            let series = row_series(&values, oi, outer_value, &legend_labels[oi], &inner_values);
            info!(label = %series.label, "Series complete");
            sink.plot(&series);
        }
    }

    Ok(SweepResults::new(config, values))
}

fn row_series(
    values: &SweepGrid<f64>,
    outer_index: usize,
    outer_value: f64,
    label: &str,
    inner_values: &[f64],
) -> Series {
    let points = inner_values
        .iter()
        .enumerate()
        .map(|(index, &x)| super::SeriesPoint {
            index,
            x,
            y: values
                .get(&[outer_index, index])
                .copied()
                .unwrap_or(f64::NAN),
        })
        .collect();
    Series {
        outer_index,
        outer_value,
        label: label.to_string(),
        points,
    }
}
