//! Flight Configuration Module
//!
//! Per-user defaults loaded from TOML: the parameter profile a caller starts
//! from, how out-of-range inputs are handled, and the report format. The
//! model constants are not configurable; see `types::thresholds`.
//!
//! ## Loading Order
//!
//! 1. `DRONE_BATTERY_CONFIG` environment variable (path to TOML file)
//! 2. `flight_config.toml` in the current working directory
//! 3. Built-in defaults
//!
//! ## Usage
//!
//! ```ignore
//! let config = FlightConfig::load();
//! let params = config.validation.mode.apply(&config.parameters)?;
//! let result = drone_battery::predict(&params);
//! ```

pub mod defaults;
mod flight_config;
pub mod validation;

pub use defaults::param_range;
pub use flight_config::*;
pub use validation::{clamp_parameters, validate_parameters, RangeViolation, ValidationError};
