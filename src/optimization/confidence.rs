//! Heuristic prediction confidence
//!
//! Starts from a base of 85 and subtracts a fixed penalty for each extreme
//! operating condition. This expresses "trust the model less far from
//! normal conditions"; it is not a statistical interval.

use crate::types::thresholds::confidence_thresholds::{
    ALTITUDE_LIMIT, ALTITUDE_PENALTY, BASE_CONFIDENCE, MAX_CONFIDENCE, MIN_CONFIDENCE,
    SPEED_LIMIT, SPEED_PENALTY, TEMPERATURE_HIGH, TEMPERATURE_LOW, TEMPERATURE_PENALTY,
    WIND_PENALTY, WIND_SPEED_LIMIT,
};
use crate::types::{
    ConfidenceAssessment, ConfidencePenalty, ConfidencePenaltyKind, FlightParameters,
};

/// Confidence score in [50, 95].
pub fn estimate_confidence(params: &FlightParameters) -> f64 {
    assess_confidence(params).score
}

/// Confidence score together with the penalties applied.
pub fn assess_confidence(params: &FlightParameters) -> ConfidenceAssessment {
    let penalties: Vec<ConfidencePenalty> = [
        wind_penalty(params.wind_speed),
        altitude_penalty(params.altitude),
        temperature_penalty(params.temperature),
        speed_penalty(params.speed),
    ]
    .into_iter()
    .flatten()
    .collect();

    let raw = penalties
        .iter()
        .fold(BASE_CONFIDENCE, |score, penalty| score - penalty.points);

    ConfidenceAssessment {
        score: raw.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE),
        penalties,
    }
}

fn wind_penalty(wind_speed: f64) -> Option<ConfidencePenalty> {
    (wind_speed > WIND_SPEED_LIMIT).then_some(ConfidencePenalty {
        kind: ConfidencePenaltyKind::StrongWind,
        points: WIND_PENALTY,
    })
}

fn altitude_penalty(altitude: f64) -> Option<ConfidencePenalty> {
    (altitude > ALTITUDE_LIMIT).then_some(ConfidencePenalty {
        kind: ConfidencePenaltyKind::HighAltitude,
        points: ALTITUDE_PENALTY,
    })
}

fn temperature_penalty(temperature: f64) -> Option<ConfidencePenalty> {
    (temperature < TEMPERATURE_LOW || temperature > TEMPERATURE_HIGH).then_some(
        ConfidencePenalty {
            kind: ConfidencePenaltyKind::ExtremeTemperature,
            points: TEMPERATURE_PENALTY,
        },
    )
}

fn speed_penalty(speed: f64) -> Option<ConfidencePenalty> {
    (speed > SPEED_LIMIT).then_some(ConfidencePenalty {
        kind: ConfidencePenaltyKind::HighSpeed,
        points: SPEED_PENALTY,
    })
}
