//! Physics Engine Module
//!
//! Deterministic battery consumption prediction from flight parameters.
//! All math here is a closed-form approximation; nothing is trained or
//! calibrated against flight logs.
//!
//! ## Functions
//! - `predict()` - Consumption, flight time, range, efficiency, warnings
//! - `predict_detailed()` - Same, plus every intermediate power term
//! - `evaluate_warnings()` - Ordered advisory list for a parameter set

pub mod power_model;

pub use power_model::{
    cap_percent, effective_wind, efficiency_score, hover_power, payload_power, speed_power,
    temperature_factor, theoretical_min_power, wind_power, PowerBreakdown,
};

use crate::types::thresholds::warning_thresholds::{
    EXTREME_TEMPERATURE_HIGH, EXTREME_TEMPERATURE_LOW, HIGH_ALTITUDE, HIGH_SPEED, HIGH_WIND_SPEED,
    NEAR_MAX_RANGE_CONSUMPTION,
};
use crate::types::{FlightParameters, FlightWarning, PredictionResult};

// ============================================================================
// Prediction
// ============================================================================

/// Predict battery consumption for a flight.
///
/// Total and deterministic: the same input always yields bit-identical
/// output, and no input causes a panic.
///
/// Precondition: `speed > 0`, `flight_distance > 0`, `battery_capacity > 0`.
/// Outside it the result is not meaningful but is still returned:
/// - `speed == 0`: time for distance is `inf`, so `battery_consumption`
///   caps to 100 and `range` is 0
/// - `speed == 0 && flight_distance == 0`: `battery_consumption` is `NaN`
/// - `battery_capacity == 0`: flight time and range are 0 and
///   `battery_consumption` caps to 100
pub fn predict(params: &FlightParameters) -> PredictionResult {
    predict_detailed(params).1
}

/// Predict and also return the intermediate power terms.
pub fn predict_detailed(params: &FlightParameters) -> (PowerBreakdown, PredictionResult) {
    let breakdown = PowerBreakdown::compute(params);
    let battery_consumption = breakdown.battery_consumption();

    let result = PredictionResult {
        battery_consumption,
        flight_time: breakdown.flight_time_minutes(),
        efficiency: breakdown.efficiency(),
        range: breakdown.range_km(params.speed),
        warnings: evaluate_warnings(params, battery_consumption),
    };

    (breakdown, result)
}

// ============================================================================
// Warnings
// ============================================================================

/// Inputs visible to a warning predicate
struct WarningContext<'a> {
    params: &'a FlightParameters,
    battery_consumption: f64,
}

type WarningCheck = fn(&WarningContext<'_>) -> bool;

/// Advisory rules in priority order. Each is independent of the others.
const WARNING_RULES: [(FlightWarning, WarningCheck); 5] = [
    (FlightWarning::NearMaximumRange, near_maximum_range),
    (FlightWarning::HighWind, high_wind),
    (FlightWarning::ExtremeTemperature, extreme_temperature),
    (FlightWarning::HighAltitude, high_altitude),
    (FlightWarning::HighSpeed, high_speed),
];

fn near_maximum_range(c: &WarningContext<'_>) -> bool {
    c.battery_consumption > NEAR_MAX_RANGE_CONSUMPTION
}

fn high_wind(c: &WarningContext<'_>) -> bool {
    c.params.wind_speed > HIGH_WIND_SPEED
}

fn extreme_temperature(c: &WarningContext<'_>) -> bool {
    c.params.temperature < EXTREME_TEMPERATURE_LOW || c.params.temperature > EXTREME_TEMPERATURE_HIGH
}

fn high_altitude(c: &WarningContext<'_>) -> bool {
    c.params.altitude > HIGH_ALTITUDE
}

fn high_speed(c: &WarningContext<'_>) -> bool {
    c.params.speed > HIGH_SPEED
}

/// Evaluate every advisory rule and collect the ones that fire.
///
/// `battery_consumption` is the (capped) consumption for `params`. A `NaN`
/// consumption never triggers the near-maximum-range advisory.
pub fn evaluate_warnings(params: &FlightParameters, battery_consumption: f64) -> Vec<FlightWarning> {
    let ctx = WarningContext {
        params,
        battery_consumption,
    };
    WARNING_RULES
        .iter()
        .filter(|(_, check)| check(&ctx))
        .map(|(warning, _)| *warning)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_a() -> FlightParameters {
        FlightParameters::default()
    }

    #[test]
    fn test_scenario_a_values() {
        let result = predict(&scenario_a());
        // totalPower = 107.5 / 0.85, currentDraw = totalPower / 11.1
        let total_power = 107.5 / 0.85;
        let hours = 5.0 / (total_power / 11.1);
        assert!((result.flight_time - hours * 60.0).abs() < 1e-9);
        assert!((result.flight_time - 26.33).abs() < 0.01, "got {}", result.flight_time);
        assert!((result.range - 4.388).abs() < 0.001, "got {}", result.range);
        assert_eq!(result.battery_consumption, 100.0);
        assert!((result.efficiency - 89.776).abs() < 0.001, "got {}", result.efficiency);
        assert_eq!(result.warnings, vec![FlightWarning::NearMaximumRange]);
    }

    #[test]
    fn test_uncapped_consumption_below_100() {
        let params = FlightParameters {
            flight_distance: 1.0,
            ..scenario_a()
        };
        let (breakdown, result) = predict_detailed(&params);
        let expected = 0.1 / breakdown.flight_time_hours * 100.0;
        assert!((result.battery_consumption - expected).abs() < 1e-9);
        assert!(result.battery_consumption < 25.0);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_zero_speed_caps_infinite_consumption() {
        let params = FlightParameters {
            speed: 0.0,
            ..scenario_a()
        };
        let (breakdown, result) = predict_detailed(&params);
        assert!(breakdown.time_for_distance_hours.is_infinite());
        assert_eq!(result.battery_consumption, 100.0);
        assert_eq!(result.range, 0.0);
        assert!(result.flight_time.is_finite());
        assert!(result.has_warning(FlightWarning::NearMaximumRange));
    }

    #[test]
    fn test_zero_speed_and_distance_is_nan() {
        let params = FlightParameters {
            speed: 0.0,
            flight_distance: 0.0,
            ..scenario_a()
        };
        let result = predict(&params);
        assert!(result.battery_consumption.is_nan());
        assert!(!result.has_warning(FlightWarning::NearMaximumRange));
    }

    #[test]
    fn test_all_warnings_in_priority_order() {
        let params = FlightParameters {
            speed: 25.0,
            altitude: 2500.0,
            wind_speed: 12.0,
            temperature: 45.0,
            flight_distance: 50.0,
            ..scenario_a()
        };
        let result = predict(&params);
        assert_eq!(
            result.warnings,
            vec![
                FlightWarning::NearMaximumRange,
                FlightWarning::HighWind,
                FlightWarning::ExtremeTemperature,
                FlightWarning::HighAltitude,
                FlightWarning::HighSpeed,
            ]
        );
    }

    #[test]
    fn test_warning_thresholds_are_strict() {
        let params = FlightParameters {
            speed: 15.0,
            altitude: 2000.0,
            wind_speed: 8.0,
            temperature: 40.0,
            flight_distance: 0.1,
            ..scenario_a()
        };
        assert!(predict(&params).warnings.is_empty());

        let cold = FlightParameters { temperature: -0.5, ..params };
        assert_eq!(predict(&cold).warnings, vec![FlightWarning::ExtremeTemperature]);
    }
}
