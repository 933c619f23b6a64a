//! Shared data structures for the drone battery prediction engine
//!
//! - FlightParameters: caller-supplied inputs
//! - PredictionResult / FlightWarning: predictor outputs
//! - ConfidenceAssessment / OptimizationComparison: optimizer outputs
//! - thresholds: every model constant and advisory threshold

mod flight;
mod optimization;
mod prediction;
// Public so callers can reach the constant blocks as `types::thresholds::*`.
pub mod thresholds;

pub use flight::*;
pub use optimization::*;
pub use prediction::*;
