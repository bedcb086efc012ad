//! Fixed codec configuration shared by the encoder and decoder.
//!
//! Every value here is part of the token format. Changing the alphabet order,
//! the datum bounds or the bit budget makes previously issued tokens decode to
//! different positions.

/// Symbols used for token digits, in digit order.
///
/// Excludes the visually ambiguous glyphs `0`, `O`, `1` and `I`.
pub const ALPHABET: &[u8; 32] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Number of symbols in [`ALPHABET`].
pub const ALPHABET_SIZE: u64 = 32;

/// Bits carried by a single token symbol.
pub const BITS_PER_SYMBOL: u32 = 5;

/// Number of symbols in a token, separators excluded.
pub const TOKEN_LENGTH: usize = 12;

/// Symbols per hyphen-separated group.
pub const GROUP_LENGTH: usize = 4;

/// Group separator in the display form.
pub const SEPARATOR: char = '-';

/// Width of the interleaved accumulator. Exactly covered by [`TOKEN_LENGTH`] digits.
#[allow(clippy::cast_possible_truncation)]
pub const ACCUMULATOR_BITS: u32 = TOKEN_LENGTH as u32 * BITS_PER_SYMBOL;

/// Mask selecting the accumulator bits of a `u64`.
pub const ACCUMULATOR_MASK: u64 = (1 << ACCUMULATOR_BITS) - 1;

/// Fractional bits stored per axis (one latitude and one longitude bit per pair).
pub const BITS_PER_AXIS: u32 = ACCUMULATOR_BITS / 2;

/// Latitude datum bounds in degrees.
pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);

/// Longitude datum bounds in degrees.
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

/// Elevation bounds in meters (Mariana Trench to just above Everest).
pub const ELEVATION_RANGE: (f64, f64) = (-11_000.0, 9_000.0);

/// Scale applied to normalized elevation before folding (16 bits).
pub const ELEVATION_SCALE: f64 = 65_535.0;

/// Timestamps are folded modulo `2^32`.
pub const TIMESTAMP_MODULUS: u64 = 1 << 32;

/// WGS84 semi-major axis in meters.
pub const SEMI_MAJOR_AXIS_M: f64 = 6_378_137.0;

/// Mean Earth radius in meters, used for great-circle distances.
pub const MEAN_EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Reverse lookup from ASCII byte to digit value; `-1` marks bytes outside the alphabet.
const DIGIT_TABLE: [i8; 128] = build_digit_table();

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const fn build_digit_table() -> [i8; 128] {
    let mut table = [-1_i8; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as i8;
        i += 1;
    }
    table
}

/// Returns the digit value of an (already upper-cased) token symbol.
#[must_use]
#[allow(clippy::cast_sign_loss)]
pub const fn digit_value(symbol: char) -> Option<u64> {
    let code = symbol as u32;
    if code >= 128 {
        return None;
    }
    let digit = DIGIT_TABLE[code as usize];
    if digit < 0 {
        None
    } else {
        Some(digit as u64)
    }
}

/// Returns the token symbol for a digit value in `0..32`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn symbol_for(digit: u64) -> char {
    ALPHABET[(digit % ALPHABET_SIZE) as usize] as char
}
