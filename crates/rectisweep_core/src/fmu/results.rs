//! Reading simulator result files.

use std::io::Read;

use crate::error::{Result, SweepError};
use crate::model::Trajectory;

/// Parse a result CSV: a header row, then one row per output step.
///
/// The first column is the time axis, every other column is a signal.
pub fn read_trajectory<R: Read>(reader: R) -> Result<Trajectory> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Err(SweepError::Simulate("result file has no columns".to_string()));
    }

    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); headers.len()];
    for (row, record) in rdr.records().enumerate() {
        let record = record?;
        for (col, field) in record.iter().enumerate() {
            let value: f64 = field.parse().map_err(|e| {
                SweepError::Simulate(format!(
                    "row {}, column {:?}: cannot parse {field:?}: {e}",
                    row + 1,
                    &headers[col]
                ))
            })?;
            columns[col].push(value);
        }
    }

    let mut named = headers.iter().zip(columns);
    let Some((_, time)) = named.next() else {
        return Err(SweepError::Simulate("result file has no time column".to_string()));
    };
    let mut trajectory = Trajectory::new(time);
    for (name, samples) in named {
        trajectory.insert(name, samples);
    }
    Ok(trajectory)
}
