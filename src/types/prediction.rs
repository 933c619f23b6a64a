//! Prediction output types: PredictionResult, FlightWarning, ConsumptionSeverity

use serde::{Deserialize, Serialize};

use super::thresholds::severity_thresholds;

/// Output of a single prediction.
///
/// `battery_consumption` is only capped from above; it is never lower-clamped.
/// Non-finite values propagate from degenerate inputs (see
/// [`crate::physics_engine::predict`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    /// Share of the pack needed for the requested distance (%, capped at 100)
    pub battery_consumption: f64,
    /// Endurance on a full pack (minutes)
    pub flight_time: f64,
    /// Efficiency score relative to the theoretical minimum power (0-100 %)
    pub efficiency: f64,
    /// Still-air distance on a full pack at the given speed (km)
    pub range: f64,
    /// Advisories in fixed priority order
    pub warnings: Vec<FlightWarning>,
}

impl PredictionResult {
    /// Advisory texts in priority order.
    pub fn warning_messages(&self) -> Vec<&'static str> {
        self.warnings.iter().map(|w| w.message()).collect()
    }

    pub fn has_warning(&self, warning: FlightWarning) -> bool {
        self.warnings.contains(&warning)
    }

    pub fn severity(&self) -> ConsumptionSeverity {
        ConsumptionSeverity::from_percent(self.battery_consumption)
    }
}

/// Flight advisories, declared in evaluation (priority) order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlightWarning {
    /// Requested distance uses more than 90% of the pack
    NearMaximumRange,
    /// Wind above 8 m/s
    HighWind,
    /// Temperature below 0 °C or above 40 °C
    ExtremeTemperature,
    /// Altitude above 2000 m
    HighAltitude,
    /// Airspeed above 15 m/s
    HighSpeed,
}

impl FlightWarning {
    pub const fn message(self) -> &'static str {
        match self {
            Self::NearMaximumRange => "Flight distance is near maximum range",
            Self::HighWind => "High wind conditions will significantly reduce battery life",
            Self::ExtremeTemperature => "Extreme temperatures will affect battery performance",
            Self::HighAltitude => "High altitude flight requires more power",
            Self::HighSpeed => "High speeds dramatically increase power consumption",
        }
    }
}

impl std::fmt::Display for FlightWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Coarse banding of battery consumption for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsumptionSeverity {
    Low,
    Medium,
    High,
}

impl ConsumptionSeverity {
    /// Band a consumption percentage. `NaN` is reported as `High`.
    pub fn from_percent(consumption: f64) -> Self {
        if consumption < severity_thresholds::LOW_BELOW {
            Self::Low
        } else if consumption < severity_thresholds::MEDIUM_BELOW {
            Self::Medium
        } else {
            Self::High
        }
    }
}

impl std::fmt::Display for ConsumptionSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_bands() {
        assert_eq!(ConsumptionSeverity::from_percent(0.0), ConsumptionSeverity::Low);
        assert_eq!(ConsumptionSeverity::from_percent(29.9), ConsumptionSeverity::Low);
        assert_eq!(ConsumptionSeverity::from_percent(30.0), ConsumptionSeverity::Medium);
        assert_eq!(ConsumptionSeverity::from_percent(69.9), ConsumptionSeverity::Medium);
        assert_eq!(ConsumptionSeverity::from_percent(70.0), ConsumptionSeverity::High);
        assert_eq!(ConsumptionSeverity::from_percent(f64::NAN), ConsumptionSeverity::High);
    }

    #[test]
    fn warning_order_follows_declaration() {
        assert!(FlightWarning::NearMaximumRange < FlightWarning::HighWind);
        assert!(FlightWarning::HighWind < FlightWarning::ExtremeTemperature);
        assert!(FlightWarning::ExtremeTemperature < FlightWarning::HighAltitude);
        assert!(FlightWarning::HighAltitude < FlightWarning::HighSpeed);
    }

    #[test]
    fn warning_display_is_message() {
        assert_eq!(
            FlightWarning::HighAltitude.to_string(),
            "High altitude flight requires more power"
        );
    }
}
