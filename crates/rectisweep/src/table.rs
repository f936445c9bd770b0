//! Plain-text rendering of sweep results for headless runs.

use std::fmt::Write;

use rectisweep_core::SweepResults;

const VALUE_WIDTH: usize = 12;

/// One row per inner value, one column per outer value (headed by its
/// legend label).
pub fn format_table(results: &SweepResults) -> String {
    let widths: Vec<usize> = results
        .legend_labels
        .iter()
        .map(|label| label.len().max(VALUE_WIDTH))
        .collect();
    let first_width = results.inner_label.len().max(VALUE_WIDTH);

    let mut out = String::new();
    let _ = writeln!(out, "# {}", results.metric_label());

    let _ = write!(out, "{:<first_width$}", results.inner_label);
    for (label, width) in results.legend_labels.iter().zip(&widths) {
        let _ = write!(out, "  {label:>width$}");
    }
    out.push('\n');

    let columns = results.all_series();
    for (inner_index, inner_value) in results.inner_values.iter().enumerate() {
        let _ = write!(out, "{inner_value:<first_width$.4}");
        for (series, width) in columns.iter().zip(&widths) {
            match series.points.get(inner_index) {
                Some(point) => {
                    let _ = write!(out, "  {:>width$.6}", point.y);
                }
                None => {
                    let _ = write!(out, "  {:>width$}", "-");
                }
            }
        }
        out.push('\n');
    }

    out
}
