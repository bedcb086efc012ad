//! Error types for codec operations.
//!
//! Errors carry enough context (offending bound, character or position) for a
//! caller to build a user-facing message. The codec itself never logs.

use thiserror::Error;

/// Error type for encode, decode and distance operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeoPinError {
    /// Latitude or longitude is non-finite or outside the WGS84 bounds.
    #[error("Invalid coordinate: ({latitude}, {longitude}) is not a valid WGS84 position")]
    InvalidCoordinate {
        /// Latitude as supplied.
        latitude: f64,
        /// Longitude as supplied.
        longitude: f64,
    },

    /// Elevation is NaN or infinite.
    #[error("Invalid elevation: {0} is not a finite number of meters")]
    InvalidElevation(f64),

    /// Token does not have 12 symbols once separators are removed.
    #[error("Invalid token: expected 12 symbols in XXXX-XXXX-XXXX format, found {length}")]
    InvalidToken {
        /// Number of symbols found after stripping separators.
        length: usize,
    },

    /// Token contains a symbol outside the alphabet.
    #[error("Unknown character '{character}' in token at position {position}")]
    UnknownCharacter {
        /// The offending character (upper-cased).
        character: char,
        /// 1-based position among the token's symbols.
        position: usize,
    },
}

impl GeoPinError {
    /// Returns true for errors describing a malformed token.
    #[must_use]
    pub const fn is_token_error(&self) -> bool {
        matches!(self, Self::InvalidToken { .. } | Self::UnknownCharacter { .. })
    }
}

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, GeoPinError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_coordinate_display() {
        let err = GeoPinError::InvalidCoordinate {
            latitude: 91.0,
            longitude: 0.0,
        };
        assert_eq!(
            err.to_string(),
            "Invalid coordinate: (91, 0) is not a valid WGS84 position"
        );
    }

    #[test]
    fn invalid_elevation_display() {
        let err = GeoPinError::InvalidElevation(f64::NAN);
        assert_eq!(
            err.to_string(),
            "Invalid elevation: NaN is not a finite number of meters"
        );
    }

    #[test]
    fn invalid_token_display() {
        let err = GeoPinError::InvalidToken { length: 13 };
        assert_eq!(
            err.to_string(),
            "Invalid token: expected 12 symbols in XXXX-XXXX-XXXX format, found 13"
        );
    }

    #[test]
    fn unknown_character_display() {
        let err = GeoPinError::UnknownCharacter {
            character: '0',
            position: 1,
        };
        assert_eq!(err.to_string(), "Unknown character '0' in token at position 1");
    }

    #[test]
    fn token_errors_are_grouped() {
        assert!(GeoPinError::InvalidToken { length: 3 }.is_token_error());
        assert!(GeoPinError::UnknownCharacter {
            character: 'O',
            position: 4
        }
        .is_token_error());
        assert!(!GeoPinError::InvalidElevation(f64::INFINITY).is_token_error());
    }
}
