//! Coordinate encoding.
//!
//! Latitude and longitude are each quantized to 30 fractional bits and
//! interleaved into a 60-bit accumulator: the longitude bit of weight
//! `2^-(i+1)` lands at position `2i`, the latitude bit at `2i + 1`. The
//! accumulator is written as 12 base-32 digits, most significant first.

use chrono::Utc;

use super::constants::{
    symbol_for, ACCUMULATOR_MASK, BITS_PER_AXIS, BITS_PER_SYMBOL, ELEVATION_RANGE,
    ELEVATION_SCALE, LATITUDE_RANGE, LONGITUDE_RANGE, TIMESTAMP_MODULUS, TOKEN_LENGTH,
};
use super::error::{GeoPinError, Result};
use super::types::{GeoPosition, Token};
use super::validate::is_valid_coordinate;

/// Encodes a position into a token.
///
/// Elevation and timestamp, when given, are XOR-folded into the low bits of
/// the accumulator. Decoding does not recover them.
///
/// # Arguments
///
/// * `latitude` - WGS84 latitude, `-90.0..=90.0`
/// * `longitude` - WGS84 longitude, `-180.0..=180.0`
/// * `elevation` - Meters; clamped to `-11000.0..=9000.0`
/// * `timestamp` - Unix seconds; reduced modulo `2^32`
///
/// # Errors
///
/// - [`GeoPinError::InvalidCoordinate`] if latitude/longitude are non-finite or out of bounds
/// - [`GeoPinError::InvalidElevation`] if the elevation is non-finite
///
/// # Examples
///
/// ```
/// use geopin_core::codec::encode;
///
/// let token = encode(0.0, 0.0, None, None).unwrap();
/// assert_eq!(token.to_string(), "AAAA-AAAA-AAAD");
///
/// assert!(encode(91.0, 0.0, None, None).is_err());
/// ```
pub fn encode(
    latitude: f64,
    longitude: f64,
    elevation: Option<f64>,
    timestamp: Option<u64>,
) -> Result<Token> {
    if !is_valid_coordinate(latitude, longitude) {
        return Err(GeoPinError::InvalidCoordinate {
            latitude,
            longitude,
        });
    }

    let mut value = interleave(
        quantize(latitude, LATITUDE_RANGE),
        quantize(longitude, LONGITUDE_RANGE),
    );

    if let Some(meters) = elevation {
        if !meters.is_finite() {
            return Err(GeoPinError::InvalidElevation(meters));
        }
        value ^= elevation_bits(meters);
    }

    if let Some(seconds) = timestamp {
        value ^= seconds % TIMESTAMP_MODULUS;
    }

    Ok(Token::from_symbols(to_symbols(value & ACCUMULATOR_MASK)))
}

/// Encodes a [`GeoPosition`], including its optional components.
///
/// # Errors
///
/// Same as [`encode`].
pub fn encode_position(position: &GeoPosition) -> Result<Token> {
    encode(
        position.latitude,
        position.longitude,
        position.elevation,
        position.timestamp,
    )
}

/// Encodes a device fix stamped with the current time.
///
/// # Errors
///
/// Same as [`encode`].
pub fn encode_current(latitude: f64, longitude: f64, altitude: Option<f64>) -> Result<Token> {
    encode_position(&GeoPosition::observed_at(
        latitude,
        longitude,
        altitude,
        Utc::now(),
    ))
}

/// Maps a coordinate to a `BITS_PER_AXIS`-bit cell index.
///
/// The upper datum edge maps to the last cell rather than wrapping to zero.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn quantize(value: f64, (min, max): (f64, f64)) -> u64 {
    let cells = 1_u64 << BITS_PER_AXIS;
    let normalized = (value - min) / (max - min);
    let index = (normalized * cells as f64).floor() as u64;
    index.min(cells - 1)
}

/// Interleaves two cell indices, most significant index bit first.
fn interleave(latitude_cell: u64, longitude_cell: u64) -> u64 {
    (0..BITS_PER_AXIS).fold(0, |value, i| {
        let shift = BITS_PER_AXIS - 1 - i;
        let lon_bit = (longitude_cell >> shift) & 1;
        let lat_bit = (latitude_cell >> shift) & 1;
        value | (lon_bit << (2 * i)) | (lat_bit << (2 * i + 1))
    })
}

/// Normalizes an elevation into a 16-bit integer, clamping out-of-range values.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn elevation_bits(meters: f64) -> u64 {
    let (min, max) = ELEVATION_RANGE;
    let normalized = ((meters - min) / (max - min)).clamp(0.0, 1.0);
    (normalized * ELEVATION_SCALE).floor() as u64
}

fn to_symbols(mut value: u64) -> String {
    let mut digits = [' '; TOKEN_LENGTH];
    for digit in digits.iter_mut().rev() {
        *digit = symbol_for(value & 0x1F);
        value >>= BITS_PER_SYMBOL;
    }
    digits.iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::constants::ALPHABET;

    fn token(lat: f64, lon: f64) -> String {
        encode(lat, lon, None, None).unwrap().to_string()
    }

    #[test]
    fn origin_sets_only_the_half_bits() {
        assert_eq!(token(0.0, 0.0), "AAAA-AAAA-AAAD");
    }

    #[test]
    fn datum_corners() {
        assert_eq!(token(-90.0, -180.0), "AAAA-AAAA-AAAA");
        assert_eq!(token(90.0, 180.0), "9999-9999-9999");
    }

    #[test]
    fn edge_coordinates() {
        assert_eq!(token(90.0, 0.0), "XLXL-XLXL-XLXM");
        assert_eq!(token(-90.0, 0.0), "AAAA-AAAA-AAAB");
        assert_eq!(token(0.0, 180.0), "LXLX-LXLX-LXLZ");
        assert_eq!(token(0.0, -180.0), "AAAA-AAAA-AAAC");
    }

    #[test]
    fn known_cities() {
        assert_eq!(token(40.7128, -74.0060), "9RXX-2H8Y-7W7G");
        assert_eq!(token(51.5074, -0.1278), "22WP-MGAT-5X48");
    }

    #[test]
    fn rejects_out_of_bounds() {
        for (lat, lon) in [(91.0, 0.0), (0.0, 181.0), (-91.0, 0.0), (0.0, -181.0)] {
            assert_eq!(
                encode(lat, lon, None, None),
                Err(GeoPinError::InvalidCoordinate {
                    latitude: lat,
                    longitude: lon
                })
            );
        }
    }

    #[test]
    fn rejects_non_finite_coordinates() {
        assert!(encode(f64::NAN, 0.0, None, None).is_err());
        assert!(encode(0.0, f64::INFINITY, None, None).is_err());
    }

    #[test]
    fn rejects_non_finite_elevation() {
        assert!(matches!(
            encode(0.0, 0.0, Some(f64::NAN), None),
            Err(GeoPinError::InvalidElevation(_))
        ));
        assert_eq!(
            encode(0.0, 0.0, Some(f64::INFINITY), None),
            Err(GeoPinError::InvalidElevation(f64::INFINITY))
        );
    }

    #[test]
    fn elevation_at_floor_folds_to_nothing() {
        let flat = encode(0.0, 0.0, None, None).unwrap();
        let deep = encode(0.0, 0.0, Some(-11_000.0), None).unwrap();
        assert_eq!(flat, deep);
    }

    #[test]
    fn elevation_is_clamped() {
        let top = encode(0.0, 0.0, Some(9_000.0), None).unwrap();
        let above = encode(0.0, 0.0, Some(50_000.0), None).unwrap();
        assert_eq!(top, above);
        assert_eq!(top.to_string(), "AAAA-AAAA-B996");

        let below = encode(0.0, 0.0, Some(-20_000.0), None).unwrap();
        assert_eq!(below, encode(0.0, 0.0, None, None).unwrap());
    }

    #[test]
    fn timestamp_is_reduced_modulo_2_pow_32() {
        let plain = encode(0.0, 0.0, None, None).unwrap();
        assert_eq!(encode(0.0, 0.0, None, Some(1 << 32)).unwrap(), plain);
        assert_eq!(
            encode(0.0, 0.0, None, Some(1)).unwrap().to_string(),
            "AAAA-AAAA-AAAC"
        );
    }

    #[test]
    fn encode_position_matches_encode() {
        let position = GeoPosition::new(35.6762, 139.6503)
            .with_elevation(40.0)
            .with_timestamp(1_700_000_000);
        assert_eq!(
            encode_position(&position).unwrap(),
            encode(35.6762, 139.6503, Some(40.0), Some(1_700_000_000)).unwrap()
        );
    }

    #[test]
    fn encode_current_produces_valid_token() {
        let token = encode_current(-33.8688, 151.2093, Some(58.0)).unwrap();
        assert_eq!(token.symbols().len(), TOKEN_LENGTH);
        assert!(token.symbols().bytes().all(|b| ALPHABET.contains(&b)));
    }

    #[test]
    fn quantize_clamps_upper_edge() {
        assert_eq!(quantize(90.0, LATITUDE_RANGE), (1 << BITS_PER_AXIS) - 1);
        assert_eq!(quantize(-90.0, LATITUDE_RANGE), 0);
        assert_eq!(quantize(0.0, LATITUDE_RANGE), 1 << (BITS_PER_AXIS - 1));
    }

    #[test]
    fn interleave_places_longitude_on_even_bits() {
        let top_bit = 1 << (BITS_PER_AXIS - 1);
        assert_eq!(interleave(0, top_bit), 0b01);
        assert_eq!(interleave(top_bit, 0), 0b10);
        assert_eq!(interleave(1, 1), 0b11 << (2 * (BITS_PER_AXIS - 1)));
    }
}
