//! Default constants for configuration loading and input validation.

use crate::types::{FlightParameter, ParameterRange};

// ============================================================================
// Config Discovery
// ============================================================================

/// Environment variable holding an explicit config file path.
pub const CONFIG_ENV_VAR: &str = "DRONE_BATTERY_CONFIG";

/// Config file looked up in the current working directory.
pub const LOCAL_CONFIG_FILE: &str = "flight_config.toml";

// ============================================================================
// Input Ranges
// ============================================================================

/// Accepted range for each flight parameter.
///
/// These mirror the bounds of the parameter entry form. Speed starts at
/// 0.5 m/s rather than 0 so that validated inputs never hit the zero-speed
/// divisor in the power model.
pub const fn param_range(param: FlightParameter) -> ParameterRange {
    let (min, max, step) = match param {
        FlightParameter::Speed => (0.5, 30.0, 0.5),
        FlightParameter::Altitude => (0.0, 3000.0, 10.0),
        FlightParameter::WindSpeed => (0.0, 20.0, 0.5),
        FlightParameter::WindDirection => (0.0, 360.0, 5.0),
        FlightParameter::PayloadWeight => (0.0, 2000.0, 10.0),
        FlightParameter::Temperature => (-10.0, 50.0, 1.0),
        FlightParameter::FlightDistance => (0.1, 50.0, 0.1),
        FlightParameter::BatteryCapacity => (1000.0, 10000.0, 100.0),
    };
    ParameterRange { min, max, step }
}
