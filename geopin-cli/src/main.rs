//! `geopin` command-line tool.
//!
//! Results go to stdout; errors go to stderr as an error envelope in the same
//! format, with exit status 2 for rejected input and 1 for other failures.

use std::fmt::Display;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;

use geopin_cli::api::{self, EncodeRequest};
use geopin_cli::app_config::{AppConfig, OutputFormat};
use geopin_cli::response::ErrorResponse;
use geopin_cli::{CliError, Result};

#[derive(Parser, Debug)]
#[command(name = "geopin", version, about = "Short, shareable tokens for WGS84 coordinates")]
struct Cli {
    /// Output format; overrides the configured one.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Configuration file to load on top of `geopin.toml`.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode coordinates into a token.
    Encode {
        #[arg(long, visible_alias = "lat", allow_negative_numbers = true)]
        latitude: f64,
        #[arg(long, visible_alias = "lon", allow_negative_numbers = true)]
        longitude: f64,
        /// Meters above the WGS84 ellipsoid.
        #[arg(long, allow_negative_numbers = true)]
        elevation: Option<f64>,
        /// Unix seconds.
        #[arg(long, allow_negative_numbers = true, conflicts_with = "now")]
        timestamp: Option<i64>,
        /// Stamp the fix with the current time.
        #[arg(long)]
        now: bool,
    },
    /// Decode a token to its cell center.
    Decode { geopin: String },
    /// Great-circle distance between two tokens.
    Distance { geopin1: String, geopin2: String },
    /// Check whether a token is well formed.
    Validate { geopin: String },
    /// Encode or decode many items from a JSON request.
    Batch {
        /// Request file; stdin when omitted.
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Describe the token format.
    Info,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            let err = CliError::from(err);
            report(cli.format.unwrap_or_default(), &err);
            return ExitCode::from(err.exit_code());
        }
    };

    let level = if cli.verbose {
        "debug"
    } else {
        config.log().level()
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Stderr)
        .init();

    let format = cli.format.unwrap_or_else(|| config.output().format());
    log::debug!("Running {:?} with {format:?} output", cli.command);

    match run(cli.command, &config, format) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::debug!("Command failed: {err:?}");
            report(format, &err);
            ExitCode::from(err.exit_code())
        }
    }
}

fn run(command: Command, config: &AppConfig, format: OutputFormat) -> Result<()> {
    let decimals = config.output().decimals();

    match command {
        Command::Encode {
            latitude,
            longitude,
            elevation,
            timestamp,
            now,
        } => {
            let response = if now {
                api::encode_now(latitude, longitude, elevation)?
            } else {
                api::encode(&EncodeRequest {
                    latitude,
                    longitude,
                    elevation,
                    timestamp,
                })?
            };
            emit(format, &response)
        }
        Command::Decode { geopin } => emit(format, &api::decode(&geopin, decimals)?),
        Command::Distance { geopin1, geopin2 } => {
            emit(format, &api::distance(&geopin1, &geopin2)?)
        }
        Command::Validate { geopin } => emit(format, &api::validate(&geopin)),
        Command::Batch { file } => {
            let body = match file {
                Some(path) => std::fs::read_to_string(path)?,
                None => {
                    let mut body = String::new();
                    io::stdin().read_to_string(&mut body)?;
                    body
                }
            };
            let request = api::parse_batch(&body)?;
            emit(format, &api::batch(request, decimals))
        }
        Command::Info => emit(format, &api::info()),
    }
}

fn emit<T: Serialize + Display>(format: OutputFormat, response: &T) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(response)?),
        OutputFormat::Text => println!("{response}"),
    }
    Ok(())
}

fn report(format: OutputFormat, err: &CliError) {
    let envelope = ErrorResponse::from(err);
    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(&envelope) {
            Ok(json) => eprintln!("{json}"),
            Err(_) => eprintln!("{envelope}"),
        },
        OutputFormat::Text => eprintln!("{envelope}"),
    }
}
