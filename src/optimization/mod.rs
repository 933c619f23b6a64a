//! Parameter Optimizer and Confidence Estimator
//!
//! Both are fixed heuristics over a parameter record. Neither consults the
//! other or the power model; `compare_with_optimized` is the only place the
//! optimizer output is fed back through the predictor.

mod comparison;
mod confidence;
mod optimizer;

pub use comparison::compare_with_optimized;
pub use confidence::{assess_confidence, estimate_confidence};
pub use optimizer::optimize;
