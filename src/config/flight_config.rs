//! Flight configuration: default parameter profile, validation mode, and
//! report settings, loaded from TOML.
//!
//! Every section is optional; an empty file yields the built-in defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use super::defaults::{CONFIG_ENV_VAR, LOCAL_CONFIG_FILE};
use super::validation::{self, ValidationError};
use crate::report::ReportFormat;
use crate::types::{FlightParameter, FlightParameters};

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration.
///
/// Load with `FlightConfig::load()` which searches:
/// 1. `$DRONE_BATTERY_CONFIG`
/// 2. `./flight_config.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightConfig {
    /// Parameter profile used when the caller supplies no value
    #[serde(default)]
    pub parameters: FlightParameters,

    /// How the caller layer treats out-of-range inputs
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Report output settings
    #[serde(default)]
    pub report: ReportConfig,
}

impl FlightConfig {
    /// Load configuration using the standard search order. Never fails:
    /// a broken file is logged and skipped.
    pub fn load() -> Self {
        Self::load_with_mode(None)
    }

    /// Like [`Self::load`], but `mode` (when set) replaces the file's
    /// `validation.mode` before the profile is validated.
    pub fn load_with_mode(mode: Option<ValidationMode>) -> Self {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file_with_mode(&p, mode) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded flight config from {}", CONFIG_ENV_VAR);
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from {}, falling back", CONFIG_ENV_VAR);
                    }
                }
            } else {
                warn!(path = %path, "{} points to non-existent file, falling back", CONFIG_ENV_VAR);
            }
        }

        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file_with_mode(&local, mode) {
                Ok(config) => {
                    info!("Loaded flight config from ./{}", LOCAL_CONFIG_FILE);
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{}, using defaults", LOCAL_CONFIG_FILE);
                }
            }
        }

        info!("No flight config found, using built-in defaults");
        Self::default().with_validation_mode(mode)
    }

    /// Load from a specific TOML file path, validated under the file's own mode.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        Self::load_from_file_with_mode(path, None)
    }

    /// Load from a TOML file, letting `mode` override `validation.mode`
    /// before `validate()` runs.
    pub fn load_from_file_with_mode(
        path: &Path,
        mode: Option<ValidationMode>,
    ) -> Result<Self, ConfigError> {
        let config = Self::read_from_file(path)?.with_validation_mode(mode);
        config.validate()?;
        Ok(config)
    }

    /// Read and deserialize a TOML file without validating the profile.
    pub fn read_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;

        // Two-pass: unknown keys first (warnings only)
        for w in validation::validate_unknown_keys(&contents) {
            warn!(field = %w.field, "{}", w);
        }

        toml::from_str(&contents).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
    }

    fn with_validation_mode(mut self, mode: Option<ValidationMode>) -> Self {
        if let Some(mode) = mode {
            self.validation.mode = mode;
        }
        self
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Write the config to a file.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml()?;
        std::fs::write(path, contents).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        info!(path = %path.display(), "Flight config saved");
        Ok(())
    }

    /// Reject profiles the caller layer could never use.
    ///
    /// Non-finite parameters are always an error. Out-of-range parameters
    /// are an error unless validation is `off`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = FlightParameter::ALL
            .iter()
            .filter(|&&p| !self.parameters.get(p).is_finite())
            .map(|p| format!("parameters.{} must be a finite number", p.key()))
            .collect();

        if errors.is_empty() && self.validation.mode != ValidationMode::Off {
            if let Err(e) = validation::validate_parameters(&self.parameters) {
                errors.extend(
                    e.violations
                        .iter()
                        .map(|v| format!("parameters.{v}")),
                );
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

/// Errors from config loading, parsing, or validation
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config parse error ({}): {}", .0.display(), .1)]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("Config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}

// ============================================================================
// Validation Mode
// ============================================================================

/// Caller-side handling of out-of-range inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Clamp each field into its range, as the entry form does
    #[default]
    Clamp,
    /// Refuse to predict when any field is out of range
    Reject,
    /// Pass inputs to the engine untouched
    Off,
}

impl ValidationMode {
    /// Prepare caller inputs for the engine according to this mode.
    pub fn apply(self, params: &FlightParameters) -> Result<FlightParameters, ValidationError> {
        match self {
            Self::Off => Ok(*params),
            Self::Reject => validation::validate_parameters(params).map(|()| *params),
            Self::Clamp => {
                let clamped = validation::clamp_parameters(params);
                for param in FlightParameter::ALL {
                    let (before, after) = (params.get(param), clamped.get(param));
                    if before.to_bits() != after.to_bits() {
                        warn!(parameter = param.key(), value = before, clamped = after, "Input clamped into range");
                    }
                }
                Ok(clamped)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    #[serde(default)]
    pub mode: ValidationMode,
}

// ============================================================================
// Report
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Default output format
    #[serde(default)]
    pub format: ReportFormat,

    /// Default file for CSV export; stdout when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        assert!(FlightConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_toml_produces_defaults() {
        let config: FlightConfig = toml::from_str("").expect("empty TOML should parse");
        assert_eq!(config, FlightConfig::default());
        assert_eq!(config.parameters.battery_capacity, 5000.0);
        assert_eq!(config.validation.mode, ValidationMode::Clamp);
        assert_eq!(config.report.format, ReportFormat::Text);
    }

    #[test]
    fn test_partial_toml_override() {
        let toml_str = r#"
[parameters]
speed = 14.5
payloadWeight = 800

[report]
format = "csv"
"#;
        let config: FlightConfig = toml::from_str(toml_str).expect("partial TOML should parse");
        assert_eq!(config.parameters.speed, 14.5);
        assert_eq!(config.parameters.payload_weight, 800.0);
        // Non-overridden values retain defaults
        assert_eq!(config.parameters.altitude, 100.0);
        assert_eq!(config.report.format, ReportFormat::Csv);
        assert_eq!(config.validation.mode, ValidationMode::Clamp);
    }

    #[test]
    fn test_validation_catches_out_of_range_profile() {
        let mut config = FlightConfig::default();
        config.parameters.battery_capacity = 200.0;
        let result = config.validate();
        let Err(ConfigError::Validation(errors)) = result else {
            panic!("out-of-range capacity should fail validation");
        };
        assert!(errors.iter().any(|e| e.contains("batteryCapacity")));

        config.validation.mode = ValidationMode::Off;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_non_finite_even_when_off() {
        let mut config = FlightConfig::default();
        config.validation.mode = ValidationMode::Off;
        config.parameters.temperature = f64::NAN;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_roundtrip_toml() {
        let mut original = FlightConfig::default();
        original.report.output = Some(PathBuf::from("out.csv"));
        let toml_str = original.to_toml().expect("serialization should work");
        let roundtripped: FlightConfig =
            toml::from_str(&toml_str).expect("deserialization should work");
        assert_eq!(original, roundtripped);
    }

    #[test]
    fn test_mode_override_applies_before_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flight_config.toml");
        std::fs::write(&path, "[parameters]\nspeed = 0.0\n").unwrap();

        assert!(matches!(
            FlightConfig::load_from_file(&path),
            Err(ConfigError::Validation(_))
        ));

        let config =
            FlightConfig::load_from_file_with_mode(&path, Some(ValidationMode::Off)).unwrap();
        assert_eq!(config.validation.mode, ValidationMode::Off);
        assert_eq!(config.parameters.speed, 0.0);

        let raw = FlightConfig::read_from_file(&path).unwrap();
        assert_eq!(raw.validation.mode, ValidationMode::Clamp);
    }

    #[test]
    fn test_mode_override_can_tighten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flight_config.toml");
        std::fs::write(&path, "[parameters]\nspeed = 0.0\n\n[validation]\nmode = \"off\"\n")
            .unwrap();

        assert!(FlightConfig::load_from_file(&path).is_ok());
        assert!(
            FlightConfig::load_from_file_with_mode(&path, Some(ValidationMode::Reject)).is_err()
        );
    }

    #[test]
    fn test_mode_apply() {
        let params = FlightParameters {
            speed: 40.0,
            ..Default::default()
        };
        assert_eq!(ValidationMode::Off.apply(&params).unwrap(), params);
        assert_eq!(ValidationMode::Clamp.apply(&params).unwrap().speed, 30.0);
        assert!(ValidationMode::Reject.apply(&params).is_err());
    }
}
