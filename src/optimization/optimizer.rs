//! Heuristic parameter optimizer
//!
//! A fixed transform, not a search: it never evaluates the power model.
//! Callers re-run [`crate::physics_engine::predict`] on the output to see
//! the effect.

use crate::types::thresholds::optimizer_factors::{
    ALTITUDE_SCALE, MIN_ALTITUDE, MIN_SPEED, PAYLOAD_REDUCTION_THRESHOLD, PAYLOAD_SCALE,
    SPEED_SCALE,
};
use crate::types::FlightParameters;

/// Derive a parameter set expected to reduce consumption.
///
/// - speed scaled by 0.7, floored at 5 m/s
/// - altitude scaled by 0.8, floored at 10 m
/// - payload above 500 g scaled by 0.9
///
/// A NaN speed or altitude stays NaN rather than snapping to its floor.
/// Wind, temperature, distance and capacity pass through unchanged. The
/// transform is not idempotent: applying it twice reduces speed again
/// whenever the first result is above the floor.
pub fn optimize(params: &FlightParameters) -> FlightParameters {
    FlightParameters {
        speed: floor_at(params.speed * SPEED_SCALE, MIN_SPEED),
        altitude: floor_at(params.altitude * ALTITUDE_SCALE, MIN_ALTITUDE),
        payload_weight: reduce_payload(params.payload_weight),
        ..*params
    }
}

/// Lower-bound `value` by `floor`. NaN is returned unchanged.
fn floor_at(value: f64, floor: f64) -> f64 {
    if value.is_nan() {
        value
    } else {
        value.max(floor)
    }
}

fn reduce_payload(payload_weight: f64) -> f64 {
    if payload_weight > PAYLOAD_REDUCTION_THRESHOLD {
        payload_weight * PAYLOAD_SCALE
    } else {
        payload_weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_speed_and_altitude() {
        let params = FlightParameters {
            speed: 20.0,
            altitude: 500.0,
            ..Default::default()
        };
        let opt = optimize(&params);
        assert!((opt.speed - 14.0).abs() < 1e-12);
        assert!((opt.altitude - 400.0).abs() < 1e-12);
    }

    #[test]
    fn floors_apply() {
        let params = FlightParameters {
            speed: 4.0,
            altitude: 5.0,
            ..Default::default()
        };
        let opt = optimize(&params);
        assert_eq!(opt.speed, 5.0);
        assert_eq!(opt.altitude, 10.0);
    }

    #[test]
    fn nan_speed_and_altitude_pass_through() {
        let params = FlightParameters {
            speed: f64::NAN,
            altitude: f64::NAN,
            payload_weight: f64::NAN,
            ..Default::default()
        };
        let opt = optimize(&params);
        assert!(opt.speed.is_nan());
        assert!(opt.altitude.is_nan());
        assert!(opt.payload_weight.is_nan());
    }

    #[test]
    fn infinities_follow_the_floor() {
        let params = FlightParameters {
            speed: f64::INFINITY,
            altitude: f64::NEG_INFINITY,
            ..Default::default()
        };
        let opt = optimize(&params);
        assert_eq!(opt.speed, f64::INFINITY);
        assert_eq!(opt.altitude, 10.0);
    }

    #[test]
    fn floor_can_raise_a_low_speed() {
        // Slow flights get faster: the floor wins over the scale factor
        let params = FlightParameters {
            speed: 1.0,
            ..Default::default()
        };
        assert_eq!(optimize(&params).speed, 5.0);
    }

    #[test]
    fn payload_threshold_is_strict() {
        let at_threshold = FlightParameters {
            payload_weight: 500.0,
            ..Default::default()
        };
        assert_eq!(optimize(&at_threshold).payload_weight, 500.0);

        let heavy = FlightParameters {
            payload_weight: 1000.0,
            ..Default::default()
        };
        assert!((optimize(&heavy).payload_weight - 900.0).abs() < 1e-12);
    }

    #[test]
    fn environment_passes_through() {
        let params = FlightParameters {
            wind_speed: 12.5,
            wind_direction: 270.0,
            temperature: -7.0,
            flight_distance: 33.3,
            battery_capacity: 8800.0,
            ..Default::default()
        };
        let opt = optimize(&params);
        assert_eq!(opt.wind_speed, params.wind_speed);
        assert_eq!(opt.wind_direction, params.wind_direction);
        assert_eq!(opt.temperature, params.temperature);
        assert_eq!(opt.flight_distance, params.flight_distance);
        assert_eq!(opt.battery_capacity, params.battery_capacity);
    }

    #[test]
    fn second_application_is_not_a_no_op() {
        let params = FlightParameters {
            speed: 20.0,
            ..Default::default()
        };
        let once = optimize(&params);
        let twice = optimize(&once);
        assert!(once.speed > 5.0);
        assert!(twice.speed < once.speed);
    }

    #[test]
    fn input_is_not_mutated() {
        let params = FlightParameters::default();
        let copy = params;
        let _ = optimize(&params);
        assert_eq!(params, copy);
    }
}
