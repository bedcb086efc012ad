//! Layered configuration for the command-line tool.
//!
//! Sources, lowest priority first: built-in defaults, `geopin.{toml,json,...}`
//! in the working directory, an explicit `--config` file, then `GEOPIN_*`
//! environment variables (`GEOPIN_OUTPUT__FORMAT=json`).

use std::path::Path;

use clap::ValueEnum;
use config::{Config, ConfigError};
use serde::Deserialize;

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// Pretty-printed JSON envelopes.
    Json,
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    output: Output,
    log: Log,
}

impl AppConfig {
    /// Loads configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit file is missing or any source is malformed.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("output.format", "text")?
            .set_default("output.decimals", 8)?
            .set_default("log.level", "warn")?
            .add_source(config::File::with_name("geopin").required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder
            .add_source(
                config::Environment::with_prefix("GEOPIN")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub const fn output(&self) -> &Output {
        &self.output
    }

    pub const fn log(&self) -> &Log {
        &self.log
    }
}

#[derive(Debug, Deserialize)]
pub struct Output {
    format: OutputFormat,
    decimals: u32,
}

impl Output {
    pub const fn format(&self) -> OutputFormat {
        self.format
    }

    /// Decimal places for decoded coordinates and bounds.
    pub const fn decimals(&self) -> u32 {
        self.decimals
    }
}

#[derive(Debug, Deserialize)]
pub struct Log {
    level: String,
}

impl Log {
    pub fn level(&self) -> &str {
        &self.level
    }
}
