//! Format and range checks shared by the encoder and decoder.
//!
//! Validation is kept as free functions so callers can probe inputs without
//! triggering encode or decode errors.

use super::constants::{
    digit_value, ELEVATION_RANGE, LATITUDE_RANGE, LONGITUDE_RANGE, SEPARATOR, TOKEN_LENGTH,
};
use super::error::{GeoPinError, Result};

/// Returns true if `latitude`/`longitude` are finite and inside the WGS84 bounds.
///
/// # Examples
///
/// ```
/// use geopin_core::codec::is_valid_coordinate;
///
/// assert!(is_valid_coordinate(40.7128, -74.0060));
/// assert!(is_valid_coordinate(90.0, -180.0));
/// assert!(!is_valid_coordinate(91.0, 0.0));
/// assert!(!is_valid_coordinate(f64::NAN, 0.0));
/// ```
#[must_use]
pub fn is_valid_coordinate(latitude: f64, longitude: f64) -> bool {
    // Range checks are false for NaN; infinities fall outside the ranges.
    (LATITUDE_RANGE.0..=LATITUDE_RANGE.1).contains(&latitude)
        && (LONGITUDE_RANGE.0..=LONGITUDE_RANGE.1).contains(&longitude)
}

/// Returns true if `token` is 12 alphabet symbols once separators are removed.
///
/// Case-insensitive. Never fails.
///
/// # Examples
///
/// ```
/// use geopin_core::codec::is_valid_token;
///
/// assert!(is_valid_token("ABCD-EFGH-JKLM"));
/// assert!(is_valid_token("abcdefghjklm"));
/// assert!(!is_valid_token("INVALID-FORMAT"));
/// assert!(!is_valid_token("0123-0123-0123"));
/// ```
#[must_use]
pub fn is_valid_token(token: &str) -> bool {
    check_token(token).is_ok()
}

/// Returns true if the elevation is absent, or finite and within the datum range.
///
/// Encoding clamps out-of-range elevations instead of rejecting them; this
/// check lets callers warn about that.
#[must_use]
pub fn is_valid_elevation(elevation: Option<f64>) -> bool {
    match elevation {
        Some(meters) => (ELEVATION_RANGE.0..=ELEVATION_RANGE.1).contains(&meters),
        None => true,
    }
}

/// Returns true if the timestamp is absent or strictly positive.
#[must_use]
pub const fn is_valid_timestamp(timestamp: Option<i64>) -> bool {
    match timestamp {
        Some(seconds) => seconds > 0,
        None => true,
    }
}

/// Strips separators, upper-cases and checks a token.
///
/// Returns the 12 normalized symbols.
///
/// # Errors
///
/// - [`GeoPinError::InvalidToken`] if the symbol count is not 12
/// - [`GeoPinError::UnknownCharacter`] for the first symbol outside the alphabet
pub(crate) fn check_token(token: &str) -> Result<String> {
    let symbols: String = token
        .chars()
        .filter(|&c| c != SEPARATOR)
        .map(|c| c.to_ascii_uppercase())
        .collect();

    let length = symbols.chars().count();
    if length != TOKEN_LENGTH {
        return Err(GeoPinError::InvalidToken { length });
    }

    if let Some((index, character)) = symbols
        .chars()
        .enumerate()
        .find(|&(_, c)| digit_value(c).is_none())
    {
        return Err(GeoPinError::UnknownCharacter {
            character,
            position: index + 1,
        });
    }

    Ok(symbols)
}
