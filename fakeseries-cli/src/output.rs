// fakeseries CLI - Row writers
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! CSV and JSON-lines writers for generated rows.

use clap::ValueEnum;
use fakeseries::{Row, Series, Value};
use std::io::Write;
use thiserror::Error;
use tracing::debug;

/// Errors raised while generating or writing rows.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("generator error: {0}")]
    Generator(#[from] fakeseries::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Comma-separated values with a header row
    Csv,
    /// One JSON object per row
    Json,
}

/// Generate `rows` rows from `series` and write them to `out`.
///
/// Returns the number of rows written.
pub fn write_rows<W: Write>(
    series: &mut Series,
    rows: usize,
    format: Format,
    out: W,
) -> Result<usize, OutputError> {
    match format {
        Format::Csv => write_csv(series, rows, out),
        Format::Json => write_json(series, rows, out),
    }
}

fn write_csv<W: Write>(series: &mut Series, rows: usize, out: W) -> Result<usize, OutputError> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(series.header())?;

    for _ in 0..rows {
        let row = series.next_row();
        writer.write_record(csv_fields(series.gate_positions(), &row))?;
    }

    writer.flush()?;
    debug!("wrote {} CSV rows", rows);
    Ok(rows)
}

/// Bad rows keep only their gate and timestamp cells.
fn csv_fields(gates: &[usize], row: &Row) -> Vec<String> {
    row.values
        .iter()
        .enumerate()
        .map(|(k, value)| {
            let keep = row.good || gates.contains(&k) || matches!(value, Value::Time(_));
            if keep {
                value.to_string()
            } else {
                String::new()
            }
        })
        .collect()
}

fn write_json<W: Write>(
    series: &mut Series,
    rows: usize,
    mut out: W,
) -> Result<usize, OutputError> {
    for _ in 0..rows {
        let row = series.next_row();
        serde_json::to_writer(&mut out, &row)?;
        out.write_all(b"\n")?;
    }

    out.flush()?;
    debug!("wrote {} JSON rows", rows);
    Ok(rows)
}
