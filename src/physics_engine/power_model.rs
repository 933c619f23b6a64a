//! Closed-form power and energy model
//!
//! Each term of the power budget is a separate function so that callers and
//! tests can inspect them. None of these functions guard their divisors: a
//! zero speed, distance, or capacity yields `inf`/`NaN` which then flows
//! into the prediction unchanged.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::types::thresholds::power_model::{
    ALTITUDE_FACTOR, BASE_HOVER_POWER, BATTERY_VOLTAGE, EFFICIENCY_FACTOR,
    EFFICIENCY_PENALTY_SCALE, MIN_POWER_PAYLOAD_FACTOR, PAYLOAD_FACTOR, REFERENCE_TEMPERATURE_C,
    SPEED_FACTOR, TEMPERATURE_FACTOR, WIND_RESISTANCE_FACTOR,
};
use crate::types::FlightParameters;

// ============================================================================
// Power Terms
// ============================================================================

/// Hover power at altitude (W)
///
/// P_hover = P_base × (1 + k_alt × altitude / 100)
pub fn hover_power(altitude: f64) -> f64 {
    BASE_HOVER_POWER * (1.0 + ALTITUDE_FACTOR * (altitude / 100.0))
}

/// Additional power for forward flight (W), quadratic in airspeed
pub fn speed_power(speed: f64) -> f64 {
    speed.powi(2) * SPEED_FACTOR
}

/// Direction-adjusted wind speed (m/s)
///
/// v_eff = v_wind × (1 − cos(θ) / 2)
///
/// θ = 0° gives factor 0.5 and θ = 180° gives factor 1.5. Every direction
/// still adds resistance; there is no tailwind assist in this model.
pub fn effective_wind(wind_speed: f64, wind_direction_deg: f64) -> f64 {
    wind_speed * (1.0 - (wind_direction_deg * PI / 180.0).cos() / 2.0)
}

/// Additional power to hold course against the effective wind (W)
pub fn wind_power(effective_wind: f64) -> f64 {
    effective_wind.powi(2) * WIND_RESISTANCE_FACTOR
}

/// Additional power to carry the payload (W)
pub fn payload_power(payload_weight: f64) -> f64 {
    payload_weight * PAYLOAD_FACTOR
}

/// Multiplicative loss for operating away from 25 °C (>= 1)
pub fn temperature_factor(temperature: f64) -> f64 {
    1.0 + (temperature - REFERENCE_TEMPERATURE_C).abs() * TEMPERATURE_FACTOR
}

/// Lowest power the airframe could draw for the payload (W)
pub fn theoretical_min_power(payload_weight: f64) -> f64 {
    BASE_HOVER_POWER * (1.0 + payload_weight * MIN_POWER_PAYLOAD_FACTOR)
}

/// Efficiency score: 100 minus 50 points per unit of relative excess power.
///
/// Clamped to [0, 100]. `NaN` passes through the clamp.
pub fn efficiency_score(total_power: f64, min_power: f64) -> f64 {
    let score = 100.0 - (total_power - min_power) / min_power * EFFICIENCY_PENALTY_SCALE;
    score.clamp(0.0, 100.0)
}

/// Cap a percentage at 100 without lower-clamping it.
///
/// `+inf` caps to 100. `NaN` is returned unchanged, unlike `f64::min`.
pub fn cap_percent(value: f64) -> f64 {
    if value > 100.0 {
        100.0
    } else {
        value
    }
}

// ============================================================================
// Breakdown
// ============================================================================

/// Every intermediate term of a prediction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerBreakdown {
    /// Hover power at altitude (W)
    pub hover_power: f64,
    /// Forward-flight power (W)
    pub speed_power: f64,
    /// Direction-adjusted wind speed (m/s)
    pub effective_wind: f64,
    /// Wind-resistance power (W)
    pub wind_power: f64,
    /// Payload power (W)
    pub payload_power: f64,
    /// Temperature loss multiplier
    pub temperature_factor: f64,
    /// Total electrical power drawn from the pack (W)
    pub total_power: f64,
    /// Pack current (A)
    pub current_draw: f64,
    /// Endurance on a full pack (h)
    pub flight_time_hours: f64,
    /// Time to cover the requested distance (h); `inf` at zero speed
    pub time_for_distance_hours: f64,
    /// Theoretical minimum power for the payload (W)
    pub theoretical_min_power: f64,
}

impl PowerBreakdown {
    /// Evaluate the power model for one parameter set.
    pub fn compute(params: &FlightParameters) -> Self {
        let hover = hover_power(params.altitude);
        let speed = speed_power(params.speed);
        let eff_wind = effective_wind(params.wind_speed, params.wind_direction);
        let wind = wind_power(eff_wind);
        let payload = payload_power(params.payload_weight);
        let temp_factor = temperature_factor(params.temperature);

        let total_power = (hover + speed + wind + payload) * temp_factor / EFFICIENCY_FACTOR;
        let current_draw = total_power / BATTERY_VOLTAGE;

        // mAh → Ah
        let flight_time_hours = params.battery_capacity / 1000.0 / current_draw;
        let time_for_distance_hours = params.flight_distance / params.speed;

        Self {
            hover_power: hover,
            speed_power: speed,
            effective_wind: eff_wind,
            wind_power: wind,
            payload_power: payload,
            temperature_factor: temp_factor,
            total_power,
            current_draw,
            flight_time_hours,
            time_for_distance_hours,
            theoretical_min_power: theoretical_min_power(params.payload_weight),
        }
    }

    /// Endurance on a full pack (minutes)
    pub fn flight_time_minutes(&self) -> f64 {
        self.flight_time_hours * 60.0
    }

    /// Still-air range on a full pack at `speed` (km)
    pub fn range_km(&self, speed: f64) -> f64 {
        speed * self.flight_time_hours
    }

    /// Share of the pack needed for the requested distance (%, capped at 100)
    pub fn battery_consumption(&self) -> f64 {
        cap_percent(self.time_for_distance_hours / self.flight_time_hours * 100.0)
    }

    pub fn efficiency(&self) -> f64 {
        efficiency_score(self.total_power, self.theoretical_min_power)
    }
}
