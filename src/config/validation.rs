//! Validation: unknown config keys with Levenshtein suggestions, and
//! flight parameter range checks.
//!
//! Unknown-key detection is a two-pass parse: the raw TOML is first read
//! into a `toml::Value`, its key tree is compared against the known field
//! names, and warnings are emitted with "did you mean?" suggestions. Serde
//! deserialization follows. Warnings never break a config.
//!
//! Parameter checks are a caller-side service. The prediction engine never
//! calls them and accepts any input.

use std::collections::HashSet;

use thiserror::Error;

use super::defaults::param_range;
use crate::types::{FlightParameter, FlightParameters, ParameterRange};

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Every valid dotted key path of `FlightConfig`.
///
/// Maintained by hand alongside flight_config.rs.
pub fn known_config_keys() -> HashSet<String> {
    let mut keys: HashSet<String> = [
        "parameters",
        "validation",
        "validation.mode",
        "report",
        "report.format",
        "report.output",
    ]
    .iter()
    .map(|k| (*k).to_string())
    .collect();

    keys.extend(
        FlightParameter::ALL
            .iter()
            .map(|p| format!("parameters.{}", p.key())),
    );
    keys
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Collect the dotted path of every key in a `toml::Value` tree, tables
/// included.
///
/// `{ a = { b = 1, c = 2 } }` yields `["a", "a.b", "a.c"]`. Arrays of
/// tables are not descended into; `FlightConfig` has none.
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    let mut pending: Vec<(String, &toml::Table)> = value
        .as_table()
        .map(|table| vec![(prefix.to_string(), table)])
        .unwrap_or_default();

    while let Some((path, table)) = pending.pop() {
        for (name, child) in table {
            let key = if path.is_empty() {
                name.clone()
            } else {
                format!("{path}.{name}")
            };
            if let Some(inner) = child.as_table() {
                pending.push((key.clone(), inner));
            }
            keys.push(key);
        }
    }
    keys
}

// ============================================================================
// Key Suggestions
// ============================================================================

/// Largest edit distance still offered as a "did you mean" hint
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// A known key close to an unknown one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySuggestion {
    pub key: String,
    /// Edit distance after case and separator folding
    pub distance: usize,
}

/// Fold case and drop `_` / `-` so that `flight_distance`,
/// `flight-distance` and `FlightDistance` all compare equal to
/// `flightDistance`.
fn fold_key(key: &str) -> Vec<char> {
    key.chars()
        .filter(|c| !matches!(c, '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Edit distance over two folded keys, one DP row.
fn edit_distance(a: &[char], b: &[char]) -> usize {
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb {
                diagonal
            } else {
                1 + diagonal.min(above).min(row[j])
            };
            diagonal = above;
        }
    }
    row[b.len()]
}

/// Closest known key after case and separator folding, within
/// `MAX_SUGGESTION_DISTANCE`. Ties resolve to the lexicographically
/// smaller key.
pub fn closest_key(unknown: &str, known: &HashSet<String>) -> Option<KeySuggestion> {
    let folded = fold_key(unknown);
    known
        .iter()
        .map(|k| (edit_distance(&folded, &fold_key(k)), k))
        .filter(|(distance, _)| *distance <= MAX_SUGGESTION_DISTANCE)
        .min()
        .map(|(distance, k)| KeySuggestion {
            key: k.clone(),
            distance,
        })
}

/// Key to offer for an unknown one, if any is close enough.
pub fn suggest_correction(unknown: &str, known: &HashSet<String>) -> Option<String> {
    closest_key(unknown, known).map(|s| s.key)
}

/// Warn about every unknown key in a raw TOML string.
///
/// Never fails; parse errors are left to serde.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let Ok(value) = raw_toml.parse::<toml::Value>() else {
        return Vec::new();
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, &known),
            message: format!("Unknown config key '{key}'"),
            field: key,
        })
        .collect()
}

// ============================================================================
// Flight Parameter Ranges
// ============================================================================

/// One parameter outside its accepted range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeViolation {
    pub parameter: FlightParameter,
    pub value: f64,
    pub range: ParameterRange,
}

impl std::fmt::Display for RangeViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} = {} is outside [{}, {}] {}",
            self.parameter.key(),
            self.value,
            self.range.min,
            self.range.max,
            self.parameter.unit()
        )
    }
}

/// Every out-of-range or non-finite input of a parameter set
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid flight parameters: {}", join_violations(.violations))]
pub struct ValidationError {
    pub violations: Vec<RangeViolation>,
}

fn join_violations(violations: &[RangeViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Check every parameter against its range, reporting all violations.
pub fn validate_parameters(params: &FlightParameters) -> Result<(), ValidationError> {
    let violations: Vec<RangeViolation> = FlightParameter::ALL
        .iter()
        .filter_map(|&parameter| {
            let value = params.get(parameter);
            let range = param_range(parameter);
            (!range.contains(value)).then_some(RangeViolation {
                parameter,
                value,
                range,
            })
        })
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { violations })
    }
}

/// Clamp every parameter into its range.
pub fn clamp_parameters(params: &FlightParameters) -> FlightParameters {
    FlightParameter::ALL.iter().fold(*params, |acc, &parameter| {
        acc.with(parameter, param_range(parameter).clamp(acc.get(parameter)))
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn levenshtein(a: &str, b: &str) -> usize {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        edit_distance(&a, &b)
    }

    #[test]
    fn test_levenshtein_identical() {
        assert_eq!(levenshtein("speed", "speed"), 0);
    }

    #[test]
    fn test_levenshtein_small_edits() {
        assert_eq!(levenshtein("altitdue", "altitude"), 2);
        assert_eq!(levenshtein("windSped", "windSpeed"), 1);
    }

    #[test]
    fn test_levenshtein_empty() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
    }

    #[test]
    fn test_walk_toml_keys_nested() {
        let value: toml::Value = r#"
            [parameters]
            speed = 12.0
            [report]
            format = "json"
        "#
        .parse()
        .unwrap();
        let mut keys = walk_toml_keys(&value, "");
        keys.sort();
        assert_eq!(
            keys,
            vec!["parameters", "parameters.speed", "report", "report.format"]
        );
    }

    #[test]
    fn test_unknown_key_suggestion() {
        let warnings = validate_unknown_keys("[parameters]\nwindSped = 4.0\n");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].field, "parameters.windSped");
        assert_eq!(
            warnings[0].suggestion.as_deref(),
            Some("parameters.windSpeed")
        );
    }

    #[test]
    fn test_separator_and_case_folding() {
        let known = known_config_keys();
        let suggestion = closest_key("parameters.payload_weight", &known).unwrap();
        assert_eq!(suggestion.key, "parameters.payloadWeight");
        assert_eq!(suggestion.distance, 0);

        let suggestion = closest_key("Report.Formt", &known).unwrap();
        assert_eq!(suggestion.key, "report.format");
        assert_eq!(suggestion.distance, 1);

        assert!(closest_key("telemetry", &known).is_none());
    }

    #[test]
    fn test_unparseable_toml_yields_no_warnings() {
        assert!(validate_unknown_keys("[parameters\nspeed = ").is_empty());
    }

    #[test]
    fn test_default_parameters_validate() {
        assert!(validate_parameters(&FlightParameters::default()).is_ok());
    }

    #[test]
    fn test_all_violations_reported() {
        let params = FlightParameters {
            speed: 0.0,
            temperature: f64::NAN,
            battery_capacity: 50_000.0,
            ..Default::default()
        };
        let err = validate_parameters(&params).unwrap_err();
        let fields: Vec<_> = err.violations.iter().map(|v| v.parameter).collect();
        assert_eq!(
            fields,
            vec![
                FlightParameter::Speed,
                FlightParameter::Temperature,
                FlightParameter::BatteryCapacity,
            ]
        );
        assert!(err.to_string().contains("batteryCapacity = 50000"));
    }

    #[test]
    fn test_clamp_matches_ranges() {
        let params = FlightParameters {
            speed: 0.0,
            altitude: 5000.0,
            wind_direction: -10.0,
            flight_distance: f64::NAN,
            ..Default::default()
        };
        let clamped = clamp_parameters(&params);
        assert_eq!(clamped.speed, 0.5);
        assert_eq!(clamped.altitude, 3000.0);
        assert_eq!(clamped.wind_direction, 0.0);
        assert_eq!(clamped.flight_distance, 0.1);
        assert_eq!(clamped.payload_weight, params.payload_weight);
        assert!(validate_parameters(&clamped).is_ok());
    }
}
