//! CSV export of a prediction report
//!
//! Layout (three columns, `Parameter,Value,Unit`):
//! - one row per flight parameter, raw value
//! - blank row, `Results` row, five result rows at one decimal (ties
//!   away from zero)
//! - if any: blank row, `Warnings` row, `Warning N,<text>,` rows

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use super::{PredictionReport, ReportError};
use crate::types::FlightParameter;

const HEADER: [&str; 3] = ["Parameter", "Value", "Unit"];

/// Render the report as CSV text (newline-separated, no trailing newline).
pub fn render_csv(report: &PredictionReport) -> String {
    let r = &report.result;
    let mut rows: Vec<[String; 3]> = Vec::new();

    for param in FlightParameter::ALL {
        rows.push([
            param.label().to_string(),
            raw_value(report.parameters.get(param)),
            param.unit().to_string(),
        ]);
    }

    rows.push(blank_row());
    rows.push(section_row("Results"));
    for (name, value, unit) in [
        ("Battery Consumption", r.battery_consumption, "%"),
        ("Flight Time", r.flight_time, "min"),
        ("Maximum Range", r.range, "km"),
        ("Efficiency", r.efficiency, "%"),
        ("Model Confidence", report.confidence.score, "%"),
    ] {
        rows.push([name.to_string(), fixed_one_decimal(value), unit.to_string()]);
    }

    if !r.warnings.is_empty() {
        rows.push(blank_row());
        rows.push(section_row("Warnings"));
        for (index, warning) in r.warnings.iter().enumerate() {
            rows.push([
                format!("Warning {}", index + 1),
                warning.message().to_string(),
                String::new(),
            ]);
        }
    }

    std::iter::once(HEADER.map(String::from))
        .chain(rows)
        .map(|row| row.iter().map(|f| escape_field(f)).collect::<Vec<_>>().join(","))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write the CSV report to `path`, creating or truncating it.
pub fn write_csv(report: &PredictionReport, path: &Path) -> Result<(), ReportError> {
    let io_err = |source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(render_csv(report).as_bytes())
        .and_then(|()| writer.flush())
        .map_err(io_err)?;

    info!(path = %path.display(), warnings = report.result.warnings.len(), "CSV report written");
    Ok(())
}

/// Shortest round-trip rendering used by exported parameter rows.
fn raw_value(value: f64) -> String {
    match value {
        v if v.is_nan() => "NaN".to_string(),
        v if v.is_infinite() => (if v > 0.0 { "Infinity" } else { "-Infinity" }).to_string(),
        v if v == 0.0 => "0".to_string(),
        v => v.to_string(),
    }
}

/// One-decimal rendering used by exported result rows.
///
/// Exact ties round away from zero (`0.25` -> `0.3`), non-finite values
/// print as `NaN` / `Infinity` / `-Infinity`, and `-0.0` prints as `0.0`.
fn fixed_one_decimal(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return (if value > 0.0 { "Infinity" } else { "-Infinity" }).to_string();
    }
    if value == 0.0 {
        return "0.0".to_string();
    }

    let magnitude = value.abs();
    // A one-decimal tie is k/4 for odd k; scaling by 4 is exact.
    let quarters = magnitude * 4.0;
    let is_tie = quarters.fract() == 0.0 && quarters % 2.0 == 1.0;
    let body = if is_tie {
        format!("{:.1}", (magnitude * 10.0).ceil() / 10.0)
    } else {
        format!("{magnitude:.1}")
    };

    if value < 0.0 {
        format!("-{body}")
    } else {
        body
    }
}

fn blank_row() -> [String; 3] {
    [String::new(), String::new(), String::new()]
}

fn section_row(title: &str) -> [String; 3] {
    [title.to_string(), String::new(), String::new()]
}

/// Quote a field if it contains a delimiter, quote, or line break.
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
