//! Token decoding.
//!
//! Decoding inverts the interleaving of [`encode`](super::encode()) and reports
//! the center of the quantization cell together with its size. Elevation and
//! timestamp bits folded in at encode time cannot be separated from the
//! coordinate bits and are not recovered.

use std::f64::consts::PI;

use super::constants::{
    digit_value, ALPHABET_SIZE, BITS_PER_AXIS, LATITUDE_RANGE, LONGITUDE_RANGE,
    SEMI_MAJOR_AXIS_M,
};
use super::error::Result;
use super::types::{BoundingBox, Decoded, GeoPosition, Precision, PrecisionBounds, Token};
use super::validate::check_token;

/// Decodes a token into the center of its cell and the cell's precision bounds.
///
/// Separators are optional and case is ignored.
///
/// # Errors
///
/// - [`GeoPinError::InvalidToken`](super::GeoPinError::InvalidToken) if the token does not have 12 symbols
/// - [`GeoPinError::UnknownCharacter`](super::GeoPinError::UnknownCharacter) if a symbol is outside the alphabet
///
/// # Examples
///
/// ```
/// use geopin_core::codec::{decode, encode};
///
/// let token = encode(40.7128, -74.0060, None, None).unwrap();
/// let decoded = decode(&token.to_string()).unwrap();
///
/// assert!((decoded.latitude() - 40.7128).abs() <= decoded.precision().latitude_error);
/// assert!((decoded.longitude() + 74.0060).abs() <= decoded.precision().longitude_error);
/// assert!(decoded.bounds().contains(40.7128, -74.0060));
/// ```
pub fn decode(token: &str) -> Result<Decoded> {
    let symbols = check_token(token)?;
    Ok(decode_symbols(&symbols))
}

/// Decodes an already validated [`Token`].
#[must_use]
pub fn decode_token(token: &Token) -> Decoded {
    decode_symbols(token.symbols())
}

fn decode_symbols(symbols: &str) -> Decoded {
    let value = symbols
        .chars()
        .filter_map(digit_value)
        .fold(0_u64, |value, digit| value * ALPHABET_SIZE + digit);

    let (latitude_fraction, longitude_fraction) = deinterleave(value);
    let latitude = denormalize(latitude_fraction, LATITUDE_RANGE);
    let longitude = denormalize(longitude_fraction, LONGITUDE_RANGE);

    let latitude_error = cell_size(LATITUDE_RANGE);
    let longitude_error = cell_size(LONGITUDE_RANGE);

    Decoded {
        position: GeoPosition::new(latitude, longitude),
        precision_bounds: PrecisionBounds {
            precision: Precision {
                latitude_error,
                longitude_error,
                accuracy_radius: accuracy_radius(latitude_error, longitude_error, latitude),
            },
            bounds: BoundingBox {
                north: latitude + latitude_error / 2.0,
                south: latitude - latitude_error / 2.0,
                east: longitude + longitude_error / 2.0,
                west: longitude - longitude_error / 2.0,
            },
        },
    }
}

/// Splits the accumulator into latitude and longitude fractions in `[0, 1)`,
/// each shifted to the middle of its cell.
fn deinterleave(value: u64) -> (f64, f64) {
    let mut latitude = 0.0;
    let mut longitude = 0.0;
    let mut weight = 0.5;

    for i in 0..BITS_PER_AXIS {
        if (value >> (2 * i)) & 1 == 1 {
            longitude += weight;
        }
        if (value >> (2 * i + 1)) & 1 == 1 {
            latitude += weight;
        }
        weight /= 2.0;
    }

    // `weight` is now half a cell.
    (latitude + weight, longitude + weight)
}

fn denormalize(fraction: f64, (min, max): (f64, f64)) -> f64 {
    fraction.mul_add(max - min, min)
}

/// Degrees spanned by one quantization cell.
fn cell_size((min, max): (f64, f64)) -> f64 {
    (max - min) / f64::from(1_u32 << BITS_PER_AXIS)
}

/// Ground error in meters, narrowing the east-west component toward the poles.
fn accuracy_radius(latitude_error: f64, longitude_error: f64, latitude: f64) -> f64 {
    let meters_per_degree = SEMI_MAJOR_AXIS_M * PI / 180.0;
    let latitude_m = latitude_error * meters_per_degree;
    let longitude_m = longitude_error * meters_per_degree * latitude.to_radians().cos();
    latitude_m.hypot(longitude_m)
}
