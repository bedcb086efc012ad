//! GeoPin coordinate codec.
//!
//! Maps WGS84 positions to short, shareable tokens and back:
//! - Bit-interleaved encoding of latitude/longitude into 60 bits
//! - 12-symbol base-32 tokens formatted as `XXXX-XXXX-XXXX`
//! - Decoding with per-axis error, accuracy radius and bounding box
//! - Haversine distance between tokens
//!
//! All operations are pure functions over `const` configuration, so they can
//! be called from any number of threads without coordination.
//!
//! # Example Usage
//!
//! ```
//! use geopin_core::codec::{decode, distance, encode, is_valid_token};
//!
//! let tokyo = encode(35.6762, 139.6503, None, None).unwrap();
//! println!("Tokyo: {tokyo}");
//! assert!(is_valid_token(&tokyo.to_string()));
//!
//! let decoded = decode(&tokyo.to_string()).unwrap();
//! println!("±{:.2} m", decoded.precision().accuracy_radius);
//!
//! let sydney = encode(-33.8688, 151.2093, None, None).unwrap();
//! let meters = distance(&tokyo.to_string(), &sydney.to_string()).unwrap();
//! assert!(meters > 7_000_000.0);
//! ```
//!
//! # Elevation and time
//!
//! Elevation and timestamp are XOR-folded into the same bits that carry the
//! coordinates. The resulting token is still a valid token, but decoding it
//! yields a different position and the extra dimensions are not recoverable.

pub mod constants;
mod decode;
mod distance;
mod encode;
mod error;
mod types;
mod validate;

pub use decode::{decode, decode_token};
pub use distance::{distance, haversine, measure};
pub use encode::{encode, encode_current, encode_position};
pub use error::{GeoPinError, Result};
pub use types::{
    BoundingBox, Decoded, Dimensions, Distance, GeoPosition, Precision, PrecisionBounds, Token,
};
pub use validate::{is_valid_coordinate, is_valid_elevation, is_valid_timestamp, is_valid_token};
