//! GeoPin Core Library
//!
//! Encodes WGS84 coordinates into 12-character tokens (`XXXX-XXXX-XXXX`),
//! decodes them back with precision bounds, and measures great-circle
//! distances between them.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![deny(unsafe_code)]

pub mod codec;

pub use codec::{decode, distance, encode, is_valid_token, GeoPinError, Token};
