//! Great-circle distance between tokens.

use super::constants::MEAN_EARTH_RADIUS_M;
use super::decode::decode;
use super::error::Result;
use super::types::{Distance, GeoPosition};

/// Returns the great-circle distance in meters between two tokens.
///
/// # Errors
///
/// Propagates the decode error of whichever token is malformed, checking `a` first.
///
/// # Examples
///
/// ```
/// use geopin_core::codec::{distance, encode};
///
/// let new_york = encode(40.7128, -74.0060, None, None).unwrap().to_string();
/// let london = encode(51.5074, -0.1278, None, None).unwrap().to_string();
///
/// let meters = distance(&new_york, &london).unwrap();
/// assert!((meters / 1000.0 - 5_570.0).abs() < 5.0);
/// ```
pub fn distance(a: &str, b: &str) -> Result<f64> {
    let from = decode(a)?;
    let to = decode(b)?;
    Ok(haversine(&from.position, &to.position))
}

/// Returns the distance between two tokens in meters, kilometers, miles and nautical miles.
///
/// # Errors
///
/// Same as [`distance`].
pub fn measure(a: &str, b: &str) -> Result<Distance> {
    distance(a, b).map(Distance::from_meters)
}

/// Haversine distance in meters on a sphere of mean Earth radius.
#[must_use]
pub fn haversine(from: &GeoPosition, to: &GeoPosition) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push `a` just past 1 for antipodal points.
    let a = a.min(1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    MEAN_EARTH_RADIUS_M * c
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encode::encode;
    use crate::codec::error::GeoPinError;

    const NEW_YORK: &str = "9RXX-2H8Y-7W7G";
    const LONDON: &str = "22WP-MGAT-5X48";

    #[test]
    fn new_york_to_london() {
        let meters = distance(NEW_YORK, LONDON).unwrap();
        assert!((meters - 5_570_230.0).abs() < 10.0, "distance was {meters}");
    }

    #[test]
    fn distance_is_symmetric() {
        assert_eq!(
            distance(NEW_YORK, LONDON).unwrap(),
            distance(LONDON, NEW_YORK).unwrap()
        );
    }

    #[test]
    fn distance_to_self_is_zero() {
        assert_eq!(distance(NEW_YORK, NEW_YORK).unwrap(), 0.0);
        assert_eq!(distance(NEW_YORK, "9rxx2h8y7w7g").unwrap(), 0.0);
    }

    #[test]
    fn measure_converts_units() {
        let distance = measure(NEW_YORK, LONDON).unwrap();
        assert!((distance.kilometers - 5_570.23).abs() < 0.01);
        assert!((distance.miles - 3_461.18).abs() < 0.05);
        assert!((distance.nautical_miles - 3_007.68).abs() < 0.05);
    }

    #[test]
    fn propagates_first_decode_error() {
        assert_eq!(
            distance("bad", LONDON),
            Err(GeoPinError::InvalidToken { length: 3 })
        );
        assert_eq!(
            distance(NEW_YORK, "0AAA-AAAA-AAAA"),
            Err(GeoPinError::UnknownCharacter {
                character: '0',
                position: 1
            })
        );
    }

    #[test]
    fn haversine_antipodes() {
        let meters = haversine(&GeoPosition::new(0.0, 0.0), &GeoPosition::new(0.0, 180.0));
        assert!((meters - MEAN_EARTH_RADIUS_M * std::f64::consts::PI).abs() < 1e-6);
    }

    #[test]
    fn nearby_points_are_close() {
        let a = encode(48.8584, 2.2945, None, None).unwrap().to_string();
        let b = encode(48.8585, 2.2945, None, None).unwrap().to_string();
        let meters = distance(&a, &b).unwrap();
        assert!((meters - 11.1).abs() < 0.1, "distance was {meters}");
    }
}
