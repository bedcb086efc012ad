//! Response envelopes.
//!
//! Envelopes serialize to camelCase JSON and render as short text blocks for
//! the `text` output format.

use std::fmt;

use geopin_core::codec::{
    constants::{ALPHABET, ELEVATION_RANGE, LATITUDE_RANGE, LONGITUDE_RANGE},
    BoundingBox, Decoded, Dimensions, Distance, GeoPosition, Precision, Token,
};
use serde::Serialize;

use crate::error::CliError;

/// Interchange format advertised in envelopes.
pub const TOKEN_FORMAT: &str = "XXXX-XXXX-XXXX";

/// Decimal places for meters in envelopes.
const METER_DECIMALS: u32 = 2;

/// Rounds `value` to `decimals` places. Values that round to zero come out as `0.0`, never `-0.0`.
#[must_use]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let multiplier = 10_f64.powi(i32::try_from(decimals).unwrap_or(i32::MAX).min(15));
    (value * multiplier).round() / multiplier + 0.0
}

/// Result of an encode.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodeResponse {
    pub geopin: Token,
    pub coordinates: GeoPosition,
    pub format: &'static str,
    pub dimensions: Dimensions,
}

impl EncodeResponse {
    #[must_use]
    pub const fn new(geopin: Token, coordinates: GeoPosition) -> Self {
        Self {
            dimensions: coordinates.dimensions(),
            geopin,
            coordinates,
            format: TOKEN_FORMAT,
        }
    }
}

impl fmt::Display for EncodeResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "GeoPin:      {}", self.geopin)?;
        write!(
            f,
            "Coordinates: {}, {}",
            self.coordinates.latitude, self.coordinates.longitude
        )?;
        if let Some(elevation) = self.coordinates.elevation {
            write!(f, "\nElevation:   {elevation} m")?;
        }
        if let Some(timestamp) = self.coordinates.timestamp {
            write!(f, "\nTimestamp:   {timestamp}")?;
        }
        write!(f, "\nDimensions:  {}", self.dimensions)
    }
}

/// Latitude/longitude pair of a decoded cell center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Result of a decode, rounded for display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodeResponse {
    pub geopin: Token,
    pub coordinates: Coordinates,
    pub precision: Precision,
    pub bounds: BoundingBox,
    pub dimensions: Dimensions,
}

impl DecodeResponse {
    /// Builds the envelope, rounding degrees to `decimals` places and meters to 2.
    #[must_use]
    pub fn new(geopin: Token, decoded: &Decoded, decimals: u32) -> Self {
        let degrees = |value: f64| round_to(value, decimals);
        let precision = decoded.precision();
        let bounds = decoded.bounds();

        Self {
            geopin,
            coordinates: Coordinates {
                latitude: degrees(decoded.latitude()),
                longitude: degrees(decoded.longitude()),
            },
            precision: Precision {
                latitude_error: degrees(precision.latitude_error),
                longitude_error: degrees(precision.longitude_error),
                accuracy_radius: round_to(precision.accuracy_radius, METER_DECIMALS),
            },
            bounds: BoundingBox {
                north: degrees(bounds.north),
                south: degrees(bounds.south),
                east: degrees(bounds.east),
                west: degrees(bounds.west),
            },
            dimensions: Dimensions::TwoD,
        }
    }
}

impl fmt::Display for DecodeResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "GeoPin:      {}", self.geopin)?;
        writeln!(
            f,
            "Coordinates: {}, {}",
            self.coordinates.latitude, self.coordinates.longitude
        )?;
        writeln!(
            f,
            "Error:       ±{}°, ±{}°",
            self.precision.latitude_error, self.precision.longitude_error
        )?;
        writeln!(f, "Accuracy:    ±{} m", self.precision.accuracy_radius)?;
        write!(
            f,
            "Bounds:      N {} S {} E {} W {}",
            self.bounds.north, self.bounds.south, self.bounds.east, self.bounds.west
        )
    }
}

/// Result of a distance measurement, rounded to centimeters.
#[derive(Debug, Clone, Serialize)]
pub struct DistanceResponse {
    pub geopin1: Token,
    pub geopin2: Token,
    pub distance: Distance,
}

impl DistanceResponse {
    #[must_use]
    pub fn new(geopin1: Token, geopin2: Token, distance: &Distance) -> Self {
        let round = |value: f64| round_to(value, METER_DECIMALS);
        Self {
            geopin1,
            geopin2,
            distance: Distance {
                meters: round(distance.meters),
                kilometers: round(distance.kilometers),
                miles: round(distance.miles),
                nautical_miles: round(distance.nautical_miles),
            },
        }
    }
}

impl fmt::Display for DistanceResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "From:     {}", self.geopin1)?;
        writeln!(f, "To:       {}", self.geopin2)?;
        write!(
            f,
            "Distance: {} m ({} km, {} mi, {} nmi)",
            self.distance.meters,
            self.distance.kilometers,
            self.distance.miles,
            self.distance.nautical_miles
        )
    }
}

/// Result of a format probe.
#[derive(Debug, Clone, Serialize)]
pub struct ValidateResponse {
    pub geopin: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl fmt::Display for ValidateResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            None => write!(f, "{}: valid", self.geopin),
            Some(reason) => write!(f, "{}: invalid ({reason})", self.geopin),
        }
    }
}

/// Envelope for a failed operation.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

impl From<&CliError> for ErrorResponse {
    fn from(err: &CliError) -> Self {
        Self {
            error: err.to_string(),
            code: err.code(),
        }
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error [{}]: {}", self.code, self.error)
    }
}

/// Datum bounds advertised by `info`.
#[derive(Debug, Clone, Serialize)]
pub struct DatumBounds {
    pub latitude: [f64; 2],
    pub longitude: [f64; 2],
    pub elevation: [f64; 2],
}

/// Static description of the codec.
#[derive(Debug, Clone, Serialize)]
pub struct InfoResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub format: &'static str,
    pub alphabet: String,
    pub datum: &'static str,
    pub bounds: DatumBounds,
}

impl Default for InfoResponse {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            description: "Short, shareable tokens for WGS84 coordinates",
            format: TOKEN_FORMAT,
            alphabet: ALPHABET.iter().map(|&b| char::from(b)).collect(),
            datum: "WGS84",
            bounds: DatumBounds {
                latitude: [LATITUDE_RANGE.0, LATITUDE_RANGE.1],
                longitude: [LONGITUDE_RANGE.0, LONGITUDE_RANGE.1],
                elevation: [ELEVATION_RANGE.0, ELEVATION_RANGE.1],
            },
        }
    }
}

impl fmt::Display for InfoResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} v{}", self.name, self.version)?;
        writeln!(f, "{}", self.description)?;
        writeln!(f, "Format:   {}", self.format)?;
        writeln!(f, "Alphabet: {}", self.alphabet)?;
        write!(f, "Datum:    {}", self.datum)
    }
}
