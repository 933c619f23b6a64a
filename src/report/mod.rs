//! Prediction reports: text, JSON and CSV rendering
//!
//! A report bundles a prediction with the parameters it came from and the
//! confidence score, so that an exported file is self-describing.

mod csv;

pub use self::csv::{render_csv, write_csv};

use std::fmt::Write as _;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::optimization::assess_confidence;
use crate::physics_engine::predict;
use crate::types::{
    ConfidenceAssessment, FlightParameter, FlightParameters, OptimizationComparison,
    PredictionResult,
};

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Report I/O error ({}): {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Report serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Format {0:?} is not supported for this report")]
    UnsupportedFormat(ReportFormat),
}

/// A prediction with its source parameters and confidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionReport {
    pub parameters: FlightParameters,
    pub result: PredictionResult,
    pub confidence: ConfidenceAssessment,
}

impl PredictionReport {
    /// Run the predictor and confidence estimator for `params`.
    pub fn generate(params: &FlightParameters) -> Self {
        Self {
            parameters: *params,
            result: predict(params),
            confidence: assess_confidence(params),
        }
    }

    pub fn render(&self, format: ReportFormat) -> Result<String, ReportError> {
        match format {
            ReportFormat::Text => Ok(self.render_text()),
            ReportFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            ReportFormat::Csv => Ok(render_csv(self)),
        }
    }

    pub fn render_text(&self) -> String {
        let r = &self.result;
        let mut out = String::new();

        let _ = writeln!(out, "Flight parameters");
        for param in FlightParameter::ALL {
            let _ = writeln!(
                out,
                "  {:<18} {} {}",
                param.label(),
                self.parameters.get(param),
                param.unit()
            );
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "Prediction (model confidence {:.0}%)", self.confidence.score);
        let _ = writeln!(
            out,
            "  {:<18} {:.1} % ({})",
            "Battery use",
            r.battery_consumption,
            r.severity()
        );
        let _ = writeln!(out, "  {:<18} {:.1} min", "Flight time", r.flight_time);
        let _ = writeln!(out, "  {:<18} {:.1} km", "Maximum range", r.range);
        let _ = writeln!(out, "  {:<18} {:.1} %", "Efficiency", r.efficiency);

        if !r.warnings.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "Warnings");
            for warning in &r.warnings {
                let _ = writeln!(out, "  - {warning}");
            }
        }

        if !self.confidence.penalties.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "Confidence reduced by");
            for penalty in &self.confidence.penalties {
                let _ = writeln!(out, "  - {} (-{:.0})", penalty.kind, penalty.points);
            }
        }
        out
    }
}

/// Render an original vs optimized comparison.
pub fn render_comparison(
    comparison: &OptimizationComparison,
    format: ReportFormat,
) -> Result<String, ReportError> {
    match format {
        ReportFormat::Json => Ok(serde_json::to_string_pretty(comparison)?),
        ReportFormat::Text => Ok(comparison_text(comparison)),
        ReportFormat::Csv => Err(ReportError::UnsupportedFormat(format)),
    }
}

fn comparison_text(c: &OptimizationComparison) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<18} {:>10} {:>10}", "Parameter", "Original", "Optimized");
    for param in FlightParameter::ALL {
        let _ = writeln!(
            out,
            "{:<18} {:>10.1} {:>10.1}  {}",
            param.label(),
            c.original_parameters.get(param),
            c.optimized_parameters.get(param),
            param.unit()
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:<18} {:>10} {:>10} {:>10}",
        "Metric", "Original", "Optimized", "Change"
    );
    let rows = [
        ("Battery use %", c.battery_consumption),
        ("Flight time min", c.flight_time),
        ("Efficiency %", c.efficiency),
        ("Range km", c.range),
    ];
    for (name, delta) in rows {
        let _ = writeln!(
            out,
            "{:<18} {:>10.1} {:>10.1} {:>+10.1}",
            name, delta.original, delta.optimized, delta.change
        );
    }
    out
}
