//! Command-line boundary for `geopin-core`.
//!
//! This crate is a thin layer over the codec: it turns arguments and batch
//! files into codec calls, shapes the results into JSON envelopes, and maps
//! codec errors to stable error codes and exit statuses. All coordinate logic
//! lives in `geopin-core`.

pub mod api;
pub mod app_config;
pub mod error;
pub mod response;

pub use error::{CliError, Result};
