//! Optimizer and confidence types

use serde::{Deserialize, Serialize};

use super::{FlightParameters, PredictionResult};

/// Conditions that reduce prediction confidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidencePenaltyKind {
    /// Wind above 10 m/s
    StrongWind,
    /// Altitude above 1500 m
    HighAltitude,
    /// Temperature below 0 °C or above 35 °C
    ExtremeTemperature,
    /// Airspeed above 20 m/s
    HighSpeed,
}

impl std::fmt::Display for ConfidencePenaltyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StrongWind => write!(f, "strong wind"),
            Self::HighAltitude => write!(f, "high altitude"),
            Self::ExtremeTemperature => write!(f, "extreme temperature"),
            Self::HighSpeed => write!(f, "high speed"),
        }
    }
}

/// One applied confidence deduction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidencePenalty {
    pub kind: ConfidencePenaltyKind,
    /// Points subtracted from the base score
    pub points: f64,
}

/// Heuristic confidence score with the deductions that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceAssessment {
    /// Final score, clamped to [50, 95]
    pub score: f64,
    /// Applied penalties in evaluation order
    pub penalties: Vec<ConfidencePenalty>,
}

impl ConfidenceAssessment {
    /// Sum of all deductions before clamping
    pub fn total_penalty(&self) -> f64 {
        self.penalties.iter().map(|p| p.points).sum()
    }
}

/// A single metric before and after optimization
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricDelta {
    pub original: f64,
    pub optimized: f64,
    /// `optimized - original`
    pub change: f64,
}

impl MetricDelta {
    pub fn new(original: f64, optimized: f64) -> Self {
        Self {
            original,
            optimized,
            change: optimized - original,
        }
    }
}

/// Original vs optimized parameter sets and their predictions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationComparison {
    pub original_parameters: FlightParameters,
    pub optimized_parameters: FlightParameters,
    pub original_result: PredictionResult,
    pub optimized_result: PredictionResult,
    pub battery_consumption: MetricDelta,
    pub flight_time: MetricDelta,
    pub efficiency: MetricDelta,
    pub range: MetricDelta,
}

impl OptimizationComparison {
    /// Whether the optimized set needs less of the pack for the same distance.
    pub fn reduces_consumption(&self) -> bool {
        self.battery_consumption.change < 0.0
    }
}
