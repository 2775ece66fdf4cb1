//! Nudity column normalization.

use crate::error::Result;
use crate::table::{Encoding, Table, set_field};
use mosaic_extract::models::Nudity;
use std::path::Path;
use tracing::instrument;

const NUDITY_COLUMN: &str = "nudity";

/// Outcome of [`normalize_nudity`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NudityReport {
    pub rows: usize,
    /// Rows whose nudity value was rewritten.
    pub changed: usize,
    /// Rows too short to hold a nudity value, passed through untouched.
    pub passed_through: usize,
}

/// Rewrites the `nudity` column of `table` onto the allowed values.
///
/// Tables without a `nudity` column are left as they are.
pub fn normalize_table(table: &mut Table) -> NudityReport {
    let mut report = NudityReport {
        rows: table.rows.len(),
        ..Default::default()
    };
    let Some(idx) = table.column(NUDITY_COLUMN) else {
        tracing::warn!("Table has no '{NUDITY_COLUMN}' column; nothing to normalize");
        report.passed_through = report.rows;
        return report;
    };
    for row in table.rows.iter_mut() {
        let Some(raw) = row.get(idx) else {
            report.passed_through += 1;
            continue;
        };
        let normalized = Nudity::normalize(raw).as_str();
        if raw != normalized {
            report.changed += 1;
            *row = set_field(row, idx, normalized);
        }
    }
    report
}

/// Reads `input`, normalizes its nudity column and writes `output` as UTF-8.
#[instrument(fields(input = %input.display(), output = %output.display()))]
pub fn normalize_nudity(input: &Path, output: &Path, encoding: Encoding) -> Result<NudityReport> {
    let mut table = Table::read(input, encoding)?;
    let report = normalize_table(&mut table);
    table.write(output)?;
    tracing::info!(rows = report.rows, changed = report.changed, "Normalized nudity column");
    Ok(report)
}
