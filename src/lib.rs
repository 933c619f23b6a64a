//! Drone Battery Predictor
//!
//! Closed-form estimation of a drone's battery consumption, flight time,
//! range and efficiency from a set of flight parameters.
//!
//! ## Architecture
//!
//! - **Physics Engine**: power model and consumption prediction
//! - **Optimization**: heuristic parameter optimizer and confidence estimator
//! - **Config**: TOML profile, input ranges and validation
//! - **Report**: text, JSON and CSV rendering for callers
//!
//! The three engine entry points (`predict`, `optimize`,
//! `estimate_confidence`) are pure, synchronous and stateless.

pub mod config;
pub mod optimization;
pub mod physics_engine;
pub mod report;
pub mod types;

// Re-export the engine boundary
pub use optimization::{assess_confidence, compare_with_optimized, estimate_confidence, optimize};
pub use physics_engine::{predict, predict_detailed, PowerBreakdown};

// Re-export commonly used types
pub use types::{
    ConfidenceAssessment, ConsumptionSeverity, FlightParameter, FlightParameters, FlightWarning,
    OptimizationComparison, PredictionResult,
};

// Re-export configuration
pub use config::{FlightConfig, ValidationMode};
