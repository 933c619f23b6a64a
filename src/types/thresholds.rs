//! Power model constants, advisory thresholds, and confidence penalties
//!
//! Every numeric constant the prediction engine uses lives in this file.
//! None of them are runtime-tunable: changing a value here changes the model.

/// Constants of the closed-form power/energy approximation
pub mod power_model {
    /// Power required to hover with no payload at sea level (W)
    pub const BASE_HOVER_POWER: f64 = 100.0;
    /// Combined motor/propeller efficiency (dimensionless)
    pub const EFFICIENCY_FACTOR: f64 = 0.85;
    /// Fractional hover power increase per 100 m of altitude
    pub const ALTITUDE_FACTOR: f64 = 0.01;
    /// Additional power per (m/s)^2 of airspeed (W)
    pub const SPEED_FACTOR: f64 = 0.05;
    /// Additional power per (m/s)^2 of effective wind (W)
    pub const WIND_RESISTANCE_FACTOR: f64 = 0.2;
    /// Additional power per gram of payload (W/g)
    pub const PAYLOAD_FACTOR: f64 = 0.0005;
    /// Fractional efficiency loss per °C away from the reference temperature
    pub const TEMPERATURE_FACTOR: f64 = 0.005;
    /// Temperature at which the pack delivers nominal capacity (°C)
    pub const REFERENCE_TEMPERATURE_C: f64 = 25.0;
    /// Nominal voltage of a 3S LiPo pack (V)
    pub const BATTERY_VOLTAGE: f64 = 11.1;
    /// Theoretical minimum power increase per gram of payload (fraction of hover)
    pub const MIN_POWER_PAYLOAD_FACTOR: f64 = 0.0001;
    /// Efficiency points lost per unit of relative excess power
    pub const EFFICIENCY_PENALTY_SCALE: f64 = 50.0;
}

/// Thresholds that raise a flight advisory
pub mod warning_thresholds {
    /// Battery consumption above this is near the maximum range (%)
    pub const NEAR_MAX_RANGE_CONSUMPTION: f64 = 90.0;
    /// Wind speed above this is "high wind" (m/s)
    pub const HIGH_WIND_SPEED: f64 = 8.0;
    /// Temperatures below this are extreme (°C)
    pub const EXTREME_TEMPERATURE_LOW: f64 = 0.0;
    /// Temperatures above this are extreme (°C)
    pub const EXTREME_TEMPERATURE_HIGH: f64 = 40.0;
    /// Altitude above this is "high altitude" (m)
    pub const HIGH_ALTITUDE: f64 = 2000.0;
    /// Airspeed above this is "high speed" (m/s)
    pub const HIGH_SPEED: f64 = 15.0;
}

/// Confidence estimator base score, clamp bounds, and penalty triggers
pub mod confidence_thresholds {
    /// Score before any penalty is applied
    pub const BASE_CONFIDENCE: f64 = 85.0;
    /// Lowest score ever reported
    pub const MIN_CONFIDENCE: f64 = 50.0;
    /// Highest score ever reported
    pub const MAX_CONFIDENCE: f64 = 95.0;

    /// Wind above this reduces confidence (m/s)
    pub const WIND_SPEED_LIMIT: f64 = 10.0;
    pub const WIND_PENALTY: f64 = 10.0;
    /// Altitude above this reduces confidence (m)
    pub const ALTITUDE_LIMIT: f64 = 1500.0;
    pub const ALTITUDE_PENALTY: f64 = 5.0;
    /// Temperatures outside [LOW, HIGH] reduce confidence (°C)
    pub const TEMPERATURE_LOW: f64 = 0.0;
    pub const TEMPERATURE_HIGH: f64 = 35.0;
    pub const TEMPERATURE_PENALTY: f64 = 8.0;
    /// Airspeed above this reduces confidence (m/s)
    pub const SPEED_LIMIT: f64 = 20.0;
    pub const SPEED_PENALTY: f64 = 7.0;
}

/// Heuristic optimizer scaling factors and floors
pub mod optimizer_factors {
    /// Speed is scaled by this factor
    pub const SPEED_SCALE: f64 = 0.7;
    /// Optimized speed never drops below this (m/s)
    pub const MIN_SPEED: f64 = 5.0;
    /// Altitude is scaled by this factor
    pub const ALTITUDE_SCALE: f64 = 0.8;
    /// Optimized altitude never drops below this (m)
    pub const MIN_ALTITUDE: f64 = 10.0;
    /// Payloads above this are considered reducible (g)
    pub const PAYLOAD_REDUCTION_THRESHOLD: f64 = 500.0;
    /// Reducible payloads are scaled by this factor
    pub const PAYLOAD_SCALE: f64 = 0.9;
}

/// Consumption severity bands used by reports
pub mod severity_thresholds {
    /// Below this consumption is low (%)
    pub const LOW_BELOW: f64 = 30.0;
    /// Below this consumption is medium (%)
    pub const MEDIUM_BELOW: f64 = 70.0;
}
