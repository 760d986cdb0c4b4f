//! Meter Tools command-line front end
//!
//! Runs the two calculators without the Streamlit app.
//!
//! # Usage
//!
//! ```bash
//! # Startup pulse time with the configured form defaults
//! meter-tools tq
//!
//! # Three-phase four-wire meter, 0.2 % startup current
//! meter-tools tq --wiring three-phase-four-wire --un 57.7 --ib 1.5 --iq-percent 0.2
//!
//! # Cosine → angles, angle → cosine
//! meter-tools cos cos-to-angle 0.5
//! meter-tools cos angle-to-cos -60
//! ```
//!
//! # Environment Variables
//!
//! - `METER_TOOLS_CONFIG`: configuration file (same as `--config`)
//! - `RUST_LOG`: log filter (default: warn, raised by `-v`)

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use meter_tools::algorithms::convert;
use meter_tools::config::{self, ToolsConfig};
use meter_tools::core::{render, CalcResult, ConversionMode, PhaseWiring, PulseTimeInput};

#[derive(Parser)]
#[command(name = "meter-tools", version, about = "Electricity meter calculators")]
struct Cli {
    /// Configuration file (default: tools.toml in the standard locations)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Print the result as JSON instead of display text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Startup-current pulse time Tq
    ///
    /// Missing parameters take the `[defaults]` of the configuration.
    Tq(TqArgs),

    /// Cosine value ↔ angle conversion
    Cos {
        /// Conversion direction
        #[arg(value_enum)]
        mode: ModeArg,

        /// Cosine value or angle in degrees
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
}

#[derive(Args)]
struct TqArgs {
    /// Startup time coefficient
    #[arg(long)]
    k: Option<f64>,

    /// Meter constant (imp/kWh)
    #[arg(long)]
    c: Option<f64>,

    /// Phase wiring: single-phase, three-phase-three-wire or three-phase-four-wire
    #[arg(long)]
    wiring: Option<String>,

    /// Rated voltage (V)
    #[arg(long)]
    un: Option<f64>,

    /// Rated current (A)
    #[arg(long)]
    ib: Option<f64>,

    /// Startup current as a percentage of Ib (0.4 means 0.4 %)
    #[arg(long = "iq-percent")]
    iq_percent: Option<f64>,
}

impl TqArgs {
    fn resolve(&self, defaults: &PulseTimeInput) -> CalcResult<PulseTimeInput> {
        let wiring = match &self.wiring {
            Some(label) => label.parse::<PhaseWiring>()?,
            None => defaults.wiring,
        };
        Ok(PulseTimeInput::new(
            self.k.unwrap_or(defaults.k),
            self.c.unwrap_or(defaults.c),
            wiring,
            self.un.unwrap_or(defaults.un),
            self.ib.unwrap_or(defaults.ib),
            self.iq_percent.unwrap_or(defaults.iq_percent),
        ))
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    CosToAngle,
    AngleToCos,
}

impl From<ModeArg> for ConversionMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::CosToAngle => ConversionMode::CosineToAngle,
            ModeArg::AngleToCos => ConversionMode::AngleToCosine,
        }
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum JsonOutcome<T: Serialize> {
    Ok { ok: bool, result: T },
    Err { ok: bool, error: String },
}

/// Print a result and report whether it succeeded.
fn emit<T>(result: CalcResult<T>, json: bool) -> Result<bool>
where
    T: Serialize + std::fmt::Display,
{
    let ok = result.is_ok();
    if json {
        let outcome = match &result {
            Ok(value) => JsonOutcome::Ok { ok, result: value },
            Err(e) => JsonOutcome::Err {
                ok,
                error: e.to_string(),
            },
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&outcome).context("Failed to serialize result")?
        );
    } else {
        println!("{}", render(&result));
    }
    Ok(ok)
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<bool> {
    let settings: &ToolsConfig =
        config::init_config(cli.config.as_deref()).context("Failed to load calculator config")?;
    debug!(?settings, "Configuration loaded");

    match cli.command {
        Command::Tq(args) => {
            let result = args
                .resolve(&settings.defaults)
                .and_then(|input| settings.calculator().compute(&input));
            info!(ok = result.is_ok(), "Pulse time computed");
            emit(result, cli.json)
        }
        Command::Cos { mode, value } => {
            let result = convert(mode.into(), &value);
            info!(ok = result.is_ok(), "Cosine conversion done");
            emit(result, cli.json)
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if run(cli)? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
