//! Codec data types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::constants::{GROUP_LENGTH, SEPARATOR};
use super::error::GeoPinError;
use super::validate::check_token;

/// Meters in a statute mile.
const METERS_PER_MILE: f64 = 1_609.344;

/// Meters in a nautical mile.
const METERS_PER_NAUTICAL_MILE: f64 = 1_852.0;

/// A WGS84 position with optional elevation and timestamp.
///
/// Positions are plain values: build a new one instead of mutating.
///
/// # Examples
///
/// ```
/// use geopin_core::codec::{Dimensions, GeoPosition};
///
/// let everest = GeoPosition::new(27.9881, 86.9250).with_elevation(8848.0);
/// assert_eq!(everest.dimensions(), Dimensions::ThreeD);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPosition {
    /// Latitude in degrees, `-90.0..=90.0`.
    pub latitude: f64,

    /// Longitude in degrees, `-180.0..=180.0`.
    pub longitude: f64,

    /// Elevation in meters above the ellipsoid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,

    /// Unix timestamp in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
}

impl GeoPosition {
    /// Creates a 2D position.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation: None,
            timestamp: None,
        }
    }

    /// Returns a copy with the given elevation in meters.
    #[must_use]
    pub const fn with_elevation(mut self, elevation: f64) -> Self {
        self.elevation = Some(elevation);
        self
    }

    /// Returns a copy with the given Unix timestamp in seconds.
    #[must_use]
    pub const fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Builds a position from a device fix observed at `at`.
    ///
    /// The instant is truncated to whole seconds. Instants before the Unix
    /// epoch cannot be represented and leave the timestamp empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use geopin_core::codec::GeoPosition;
    ///
    /// let at = Utc.timestamp_millis_opt(1_700_000_000_750).unwrap();
    /// let fix = GeoPosition::observed_at(51.5074, -0.1278, Some(11.0), at);
    /// assert_eq!(fix.timestamp, Some(1_700_000_000));
    /// ```
    #[must_use]
    pub fn observed_at(
        latitude: f64,
        longitude: f64,
        altitude: Option<f64>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            latitude,
            longitude,
            elevation: altitude,
            timestamp: u64::try_from(at.timestamp()).ok(),
        }
    }

    /// Reports which optional components are present.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        match (self.elevation.is_some(), self.timestamp.is_some()) {
            (false, false) => Dimensions::TwoD,
            (true, false) => Dimensions::ThreeD,
            (false, true) => Dimensions::Temporal,
            (true, true) => Dimensions::FourD,
        }
    }
}

/// Dimensionality of an encoded position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dimensions {
    /// Latitude and longitude only.
    #[serde(rename = "2D")]
    TwoD,
    /// Latitude, longitude and elevation.
    #[serde(rename = "3D")]
    ThreeD,
    /// Latitude, longitude and timestamp.
    #[serde(rename = "3D (temporal)")]
    Temporal,
    /// Latitude, longitude, elevation and timestamp.
    #[serde(rename = "4D")]
    FourD,
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::TwoD => "2D",
            Self::ThreeD => "3D",
            Self::Temporal => "3D (temporal)",
            Self::FourD => "4D",
        })
    }
}

/// A validated 12-symbol token.
///
/// Only the encoder and [`FromStr`] can produce a `Token`, so every value
/// satisfies the length and alphabet invariants. Displays as `XXXX-XXXX-XXXX`.
///
/// # Examples
///
/// ```
/// use geopin_core::codec::Token;
///
/// let token: Token = "abcd-efgh-jklm".parse().unwrap();
/// assert_eq!(token.to_string(), "ABCD-EFGH-JKLM");
/// assert_eq!(token.symbols(), "ABCDEFGHJKLM");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Token(String);

impl Token {
    /// Wraps symbols produced by the encoder.
    pub(crate) const fn from_symbols(symbols: String) -> Self {
        Self(symbols)
    }

    /// Returns the 12 symbols without separators.
    #[must_use]
    pub fn symbols(&self) -> &str {
        &self.0
    }
}

impl FromStr for Token {
    type Err = GeoPinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        check_token(s).map(Self)
    }
}

impl TryFrom<String> for Token {
    type Error = GeoPinError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Token> for String {
    fn from(token: Token) -> Self {
        token.to_string()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, symbol) in self.0.chars().enumerate() {
            if i > 0 && i % GROUP_LENGTH == 0 {
                write!(f, "{SEPARATOR}")?;
            }
            write!(f, "{symbol}")?;
        }
        Ok(())
    }
}

/// Quantization error of a decoded position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Precision {
    /// Latitude cell size in degrees.
    pub latitude_error: f64,
    /// Longitude cell size in degrees.
    pub longitude_error: f64,
    /// Combined ground error in meters at the decoded latitude.
    pub accuracy_radius: f64,
}

/// Region of coordinates sharing a token.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Northern edge in degrees.
    pub north: f64,
    /// Southern edge in degrees.
    pub south: f64,
    /// Eastern edge in degrees.
    pub east: f64,
    /// Western edge in degrees.
    pub west: f64,
}

impl BoundingBox {
    /// Returns true if the coordinate lies inside the box, edges included.
    #[must_use]
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.south..=self.north).contains(&latitude)
            && (self.west..=self.east).contains(&longitude)
    }
}

/// Precision and bounds derived from a decode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrecisionBounds {
    /// Per-axis error and accuracy radius.
    pub precision: Precision,
    /// Cell enclosing the decoded center.
    pub bounds: BoundingBox,
}

/// Result of decoding a token.
///
/// Serializes to the flat interchange shape
/// `{latitude, longitude, precision{...}, bounds{...}}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Decoded {
    /// Center of the decoded cell. Elevation and timestamp are never recovered.
    #[serde(flatten)]
    pub position: GeoPosition,

    /// Quantization bounds of the cell.
    #[serde(flatten)]
    pub precision_bounds: PrecisionBounds,
}

impl Decoded {
    /// Decoded latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.position.latitude
    }

    /// Decoded longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.position.longitude
    }

    /// Per-axis error and accuracy radius.
    #[must_use]
    pub const fn precision(&self) -> &Precision {
        &self.precision_bounds.precision
    }

    /// Bounding box of the decoded cell.
    #[must_use]
    pub const fn bounds(&self) -> &BoundingBox {
        &self.precision_bounds.bounds
    }

    /// Reads a decode result back from its JSON shape.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or missing required fields.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Converts the decode result to a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (extremely rare).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Great-circle distance expressed in several units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Distance {
    /// Meters.
    pub meters: f64,
    /// Kilometers.
    pub kilometers: f64,
    /// Statute miles.
    pub miles: f64,
    /// Nautical miles.
    pub nautical_miles: f64,
}

impl Distance {
    /// Derives all units from a distance in meters.
    #[must_use]
    pub fn from_meters(meters: f64) -> Self {
        Self {
            meters,
            kilometers: meters / 1_000.0,
            miles: meters / METERS_PER_MILE,
            nautical_miles: meters / METERS_PER_NAUTICAL_MILE,
        }
    }
}
