//! drone-battery - battery consumption prediction from the command line
//!
//! # Usage
//!
//! ```bash
//! # Predict with the configured (or built-in) profile
//! drone-battery predict
//!
//! # Override a few parameters and export CSV
//! drone-battery predict --speed 12 --payload-weight 800 --format csv -o flight.csv
//!
//! # Compare against the heuristic optimizer
//! drone-battery optimize --wind-speed 9
//! ```
//!
//! # Environment Variables
//!
//! - `DRONE_BATTERY_CONFIG`: Path to a flight_config.toml
//! - `RUST_LOG`: Logging level (default: info)

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{debug, info, warn};

use drone_battery::config::{defaults::CONFIG_ENV_VAR, param_range, FlightConfig, ValidationMode};
use drone_battery::report::{self, PredictionReport, ReportFormat};
use drone_battery::{assess_confidence, compare_with_optimized, FlightParameter, FlightParameters};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "drone-battery")]
#[command(about = "Drone battery consumption, flight time and range prediction")]
#[command(version)]
struct CliArgs {
    /// Path to a flight_config.toml (default: ./flight_config.toml if present)
    #[arg(long, global = true, env = CONFIG_ENV_VAR)]
    config: Option<PathBuf>,

    /// How out-of-range inputs are handled (overrides the config file)
    #[arg(long, global = true, value_enum)]
    validation: Option<ValidationMode>,

    #[command(subcommand)]
    command: SubCommand,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Predict consumption, flight time, range and efficiency
    Predict {
        #[command(flatten)]
        params: ParameterArgs,

        /// Output format (default from config)
        #[arg(long, value_enum)]
        format: Option<ReportFormat>,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Apply the heuristic optimizer and compare both predictions
    Optimize {
        #[command(flatten)]
        params: ParameterArgs,

        /// Output format: text or json
        #[arg(long, value_enum, default_value = "text")]
        format: ReportFormat,
    },

    /// Show the confidence score and the penalties behind it
    Confidence {
        #[command(flatten)]
        params: ParameterArgs,
    },

    /// List accepted input ranges
    Ranges,

    /// Write a starter config file with the built-in defaults
    InitConfig {
        #[arg(short, long, default_value = "flight_config.toml")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Per-field overrides applied on top of the configured profile
#[derive(clap::Args, Debug, Clone, Default)]
struct ParameterArgs {
    /// Airspeed (m/s)
    #[arg(long)]
    speed: Option<f64>,
    /// Altitude (m)
    #[arg(long)]
    altitude: Option<f64>,
    /// Wind speed (m/s)
    #[arg(long)]
    wind_speed: Option<f64>,
    /// Wind direction (degrees, 0 = headwind)
    #[arg(long)]
    wind_direction: Option<f64>,
    /// Payload (g)
    #[arg(long)]
    payload_weight: Option<f64>,
    /// Ambient temperature (°C)
    #[arg(long, allow_negative_numbers = true)]
    temperature: Option<f64>,
    /// Flight distance (km)
    #[arg(long)]
    flight_distance: Option<f64>,
    /// Battery capacity (mAh)
    #[arg(long)]
    battery_capacity: Option<f64>,
}

impl ParameterArgs {
    fn overrides(&self) -> [(FlightParameter, Option<f64>); 8] {
        [
            (FlightParameter::Speed, self.speed),
            (FlightParameter::Altitude, self.altitude),
            (FlightParameter::WindSpeed, self.wind_speed),
            (FlightParameter::WindDirection, self.wind_direction),
            (FlightParameter::PayloadWeight, self.payload_weight),
            (FlightParameter::Temperature, self.temperature),
            (FlightParameter::FlightDistance, self.flight_distance),
            (FlightParameter::BatteryCapacity, self.battery_capacity),
        ]
    }

    fn apply_to(&self, base: FlightParameters) -> FlightParameters {
        self.overrides()
            .into_iter()
            .fold(base, |acc, (param, value)| match value {
                Some(v) => acc.with(param, v),
                None => acc,
            })
    }
}

// ============================================================================
// Commands
// ============================================================================

/// Load the profile. `--validation` replaces the file's mode before the
/// profile is validated.
fn load_config(args: &CliArgs) -> Result<FlightConfig> {
    match &args.config {
        Some(path) => FlightConfig::load_from_file_with_mode(path, args.validation)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(FlightConfig::load_with_mode(args.validation)),
    }
}

/// Merge CLI overrides into the profile and apply the validation mode.
fn resolve_parameters(config: &FlightConfig, params: &ParameterArgs) -> Result<FlightParameters> {
    let merged = params.apply_to(config.parameters);
    let resolved = config
        .validation
        .mode
        .apply(&merged)
        .context("Flight parameters rejected")?;
    debug!(?resolved, mode = ?config.validation.mode, "Resolved flight parameters");
    Ok(resolved)
}

fn run_predict(
    config: &FlightConfig,
    params: &ParameterArgs,
    format: Option<ReportFormat>,
    output: Option<PathBuf>,
) -> Result<()> {
    let resolved = resolve_parameters(config, params)?;
    let report = PredictionReport::generate(&resolved);
    let format = format.unwrap_or(config.report.format);

    for warning in &report.result.warnings {
        warn!(%warning, "Flight warning");
    }
    info!(
        consumption = report.result.battery_consumption,
        flight_time_min = report.result.flight_time,
        confidence = report.confidence.score,
        "Prediction complete"
    );

    let output = output.or_else(|| {
        (format == ReportFormat::Csv)
            .then(|| config.report.output.clone())
            .flatten()
    });

    match (format, output) {
        (ReportFormat::Csv, Some(path)) => {
            report::write_csv(&report, &path).context("CSV export failed")?;
        }
        (format, Some(path)) => {
            let rendered = report.render(format)?;
            std::fs::write(&path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "Report written");
        }
        (format, None) => println!("{}", report.render(format)?),
    }
    Ok(())
}

fn run_optimize(config: &FlightConfig, params: &ParameterArgs, format: ReportFormat) -> Result<()> {
    if format == ReportFormat::Csv {
        bail!("optimize supports --format text or json");
    }
    let resolved = resolve_parameters(config, params)?;
    let comparison = compare_with_optimized(&resolved);
    info!(
        consumption_change = comparison.battery_consumption.change,
        flight_time_change = comparison.flight_time.change,
        "Optimization compared"
    );
    println!("{}", report::render_comparison(&comparison, format)?);
    Ok(())
}

fn run_confidence(config: &FlightConfig, params: &ParameterArgs) -> Result<()> {
    let resolved = resolve_parameters(config, params)?;
    let assessment = assess_confidence(&resolved);
    println!("Model confidence: {:.0}%", assessment.score);
    for penalty in &assessment.penalties {
        println!("  - {} (-{:.0})", penalty.kind, penalty.points);
    }
    Ok(())
}

fn run_ranges() {
    println!("{:<18} {:>8} {:>8} {:>6}  Unit", "Parameter", "Min", "Max", "Step");
    for param in FlightParameter::ALL {
        let range = param_range(param);
        println!(
            "{:<18} {:>8} {:>8} {:>6}  {}",
            param.key(),
            range.min,
            range.max,
            range.step,
            param.unit()
        );
    }
}

fn run_init_config(output: &Path, force: bool) -> Result<()> {
    if output.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", output.display());
    }
    FlightConfig::default()
        .save_to_file(output)
        .context("Failed to write config")?;
    Ok(())
}

// ============================================================================
// Main
// ============================================================================

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    match &args.command {
        SubCommand::Ranges => {
            run_ranges();
            Ok(())
        }
        SubCommand::InitConfig { output, force } => run_init_config(output, *force),
        SubCommand::Predict {
            params,
            format,
            output,
        } => {
            let config = load_config(&args)?;
            run_predict(&config, params, *format, output.clone())
        }
        SubCommand::Optimize { params, format } => {
            let config = load_config(&args)?;
            run_optimize(&config, params, *format)
        }
        SubCommand::Confidence { params } => {
            let config = load_config(&args)?;
            run_confidence(&config, params)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        CliArgs::command().debug_assert();
    }

    #[test]
    fn overrides_apply_on_top_of_profile() {
        let args = CliArgs::try_parse_from([
            "drone-battery",
            "predict",
            "--speed",
            "12.5",
            "--temperature",
            "-5",
        ])
        .unwrap();
        let SubCommand::Predict { params, .. } = args.command else {
            panic!("expected predict");
        };
        let merged = params.apply_to(FlightParameters::default());
        assert_eq!(merged.speed, 12.5);
        assert_eq!(merged.temperature, -5.0);
        assert_eq!(merged.altitude, 100.0);
    }

    #[test]
    fn validation_off_accepts_out_of_range_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flight_config.toml");
        std::fs::write(&path, "[parameters]\nspeed = 0.0\n").unwrap();
        let path_arg = path.to_str().unwrap();

        let strict =
            CliArgs::try_parse_from(["drone-battery", "--config", path_arg, "predict"]).unwrap();
        assert!(load_config(&strict).is_err());

        let args = CliArgs::try_parse_from([
            "drone-battery",
            "--config",
            path_arg,
            "--validation",
            "off",
            "predict",
        ])
        .unwrap();
        let config = load_config(&args).unwrap();
        assert_eq!(config.validation.mode, ValidationMode::Off);
        assert_eq!(config.parameters.speed, 0.0);

        let SubCommand::Predict { params, .. } = &args.command else {
            panic!("expected predict");
        };
        assert_eq!(resolve_parameters(&config, params).unwrap().speed, 0.0);
    }

    #[test]
    fn validation_flag_overrides_config() {
        let args = CliArgs::try_parse_from([
            "drone-battery",
            "--validation",
            "reject",
            "confidence",
            "--speed",
            "40",
        ])
        .unwrap();
        let mut config = FlightConfig::default();
        config.validation.mode = args.validation.unwrap();
        let SubCommand::Confidence { params } = &args.command else {
            panic!("expected confidence");
        };
        assert!(resolve_parameters(&config, params).is_err());
    }
}
