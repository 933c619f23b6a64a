//! Flight parameter types: FlightParameters, FlightParameter, ParameterRange

use serde::{Deserialize, Serialize};

/// Caller-supplied inputs to the prediction engine.
///
/// The engine enforces no invariant on these values. Degenerate inputs
/// (zero speed, zero distance, zero capacity) are accepted and produce
/// non-finite or capped outputs rather than errors; see
/// [`crate::physics_engine::predict`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlightParameters {
    /// Airspeed (m/s). Undefined for speed <= 0.
    pub speed: f64,
    /// Altitude above take-off (m)
    pub altitude: f64,
    /// Wind speed (m/s)
    pub wind_speed: f64,
    /// Wind direction relative to heading (degrees, 0 = headwind-aligned)
    pub wind_direction: f64,
    /// Payload mass (g)
    pub payload_weight: f64,
    /// Ambient temperature (°C)
    pub temperature: f64,
    /// Requested flight distance (km)
    pub flight_distance: f64,
    /// Battery capacity (mAh)
    pub battery_capacity: f64,
}

impl Default for FlightParameters {
    fn default() -> Self {
        Self {
            speed: 10.0,
            altitude: 100.0,
            wind_speed: 5.0,
            wind_direction: 0.0,
            payload_weight: 500.0,
            temperature: 25.0,
            flight_distance: 5.0,
            battery_capacity: 5000.0,
        }
    }
}

impl FlightParameters {
    /// Read a single field by name.
    pub const fn get(&self, param: FlightParameter) -> f64 {
        match param {
            FlightParameter::Speed => self.speed,
            FlightParameter::Altitude => self.altitude,
            FlightParameter::WindSpeed => self.wind_speed,
            FlightParameter::WindDirection => self.wind_direction,
            FlightParameter::PayloadWeight => self.payload_weight,
            FlightParameter::Temperature => self.temperature,
            FlightParameter::FlightDistance => self.flight_distance,
            FlightParameter::BatteryCapacity => self.battery_capacity,
        }
    }

    /// Return a copy with one field replaced.
    #[must_use]
    pub fn with(mut self, param: FlightParameter, value: f64) -> Self {
        match param {
            FlightParameter::Speed => self.speed = value,
            FlightParameter::Altitude => self.altitude = value,
            FlightParameter::WindSpeed => self.wind_speed = value,
            FlightParameter::WindDirection => self.wind_direction = value,
            FlightParameter::PayloadWeight => self.payload_weight = value,
            FlightParameter::Temperature => self.temperature = value,
            FlightParameter::FlightDistance => self.flight_distance = value,
            FlightParameter::BatteryCapacity => self.battery_capacity = value,
        }
        self
    }
}

/// The eight input fields of [`FlightParameters`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FlightParameter {
    Speed,
    Altitude,
    WindSpeed,
    WindDirection,
    PayloadWeight,
    Temperature,
    FlightDistance,
    BatteryCapacity,
}

impl FlightParameter {
    /// All fields in report order.
    pub const ALL: [Self; 8] = [
        Self::Speed,
        Self::Altitude,
        Self::WindSpeed,
        Self::WindDirection,
        Self::PayloadWeight,
        Self::Temperature,
        Self::FlightDistance,
        Self::BatteryCapacity,
    ];

    /// Human-readable label used in reports
    pub const fn label(self) -> &'static str {
        match self {
            Self::Speed => "Flight Speed",
            Self::Altitude => "Altitude",
            Self::WindSpeed => "Wind Speed",
            Self::WindDirection => "Wind Direction",
            Self::PayloadWeight => "Payload Weight",
            Self::Temperature => "Temperature",
            Self::FlightDistance => "Flight Distance",
            Self::BatteryCapacity => "Battery Capacity",
        }
    }

    pub const fn unit(self) -> &'static str {
        match self {
            Self::Speed | Self::WindSpeed => "m/s",
            Self::Altitude => "m",
            Self::WindDirection => "°",
            Self::PayloadWeight => "g",
            Self::Temperature => "°C",
            Self::FlightDistance => "km",
            Self::BatteryCapacity => "mAh",
        }
    }

    /// Field name as it appears in TOML/JSON
    pub const fn key(self) -> &'static str {
        match self {
            Self::Speed => "speed",
            Self::Altitude => "altitude",
            Self::WindSpeed => "windSpeed",
            Self::WindDirection => "windDirection",
            Self::PayloadWeight => "payloadWeight",
            Self::Temperature => "temperature",
            Self::FlightDistance => "flightDistance",
            Self::BatteryCapacity => "batteryCapacity",
        }
    }
}

impl std::fmt::Display for FlightParameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Accepted input range for one parameter (inclusive), with UI step size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl ParameterRange {
    /// Whether `value` is finite and within `[min, max]`.
    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }

    /// Clamp into range. NaN falls back to `min`.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min;
        }
        value.clamp(self.min, self.max)
    }
}
