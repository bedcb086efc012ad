//! Boundary operations over `geopin-core`.
//!
//! Each operation validates the raw request, calls the codec and returns an
//! envelope from [`crate::response`]. Logging happens here; the codec never logs.

use std::fmt;

use chrono::Utc;
use geopin_core::codec::{self, is_valid_elevation, is_valid_timestamp, GeoPosition, Token};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{CliError, Result};
use crate::response::{
    DecodeResponse, DistanceResponse, EncodeResponse, ErrorResponse, InfoResponse,
    ValidateResponse,
};

/// Raw encode request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodeRequest {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl EncodeRequest {
    /// Converts the request into a position.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::InvalidTimestamp`] for zero or negative timestamps.
    pub fn to_position(&self) -> Result<GeoPosition> {
        if !is_valid_timestamp(self.timestamp) {
            return Err(CliError::InvalidTimestamp(self.timestamp.unwrap_or_default()));
        }

        let mut position = GeoPosition::new(self.latitude, self.longitude);
        position.elevation = self.elevation;
        position.timestamp = self.timestamp.and_then(|seconds| u64::try_from(seconds).ok());
        Ok(position)
    }
}

/// Raw decode request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeRequest {
    pub geopin: String,
}

/// Encodes a request.
///
/// # Errors
///
/// Returns an error if the timestamp, coordinates or elevation are invalid.
pub fn encode(request: &EncodeRequest) -> Result<EncodeResponse> {
    let position = request.to_position()?;
    encode_position(position)
}

/// Encodes a fix stamped with the current time.
///
/// # Errors
///
/// Returns an error if the coordinates or elevation are invalid.
pub fn encode_now(latitude: f64, longitude: f64, elevation: Option<f64>) -> Result<EncodeResponse> {
    encode_position(GeoPosition::observed_at(
        latitude,
        longitude,
        elevation,
        Utc::now(),
    ))
}

fn encode_position(position: GeoPosition) -> Result<EncodeResponse> {
    if !is_valid_elevation(position.elevation) {
        warn!(
            "Elevation {:?} m is outside the datum range and will be clamped",
            position.elevation
        );
    }

    let token = codec::encode_position(&position)?;
    debug!(
        "Encoded ({}, {}) as {token} [{}]",
        position.latitude,
        position.longitude,
        position.dimensions()
    );
    Ok(EncodeResponse::new(token, position))
}

/// Decodes a token, rounding degrees to `decimals` places.
///
/// # Errors
///
/// Returns an error if the token is malformed.
pub fn decode(geopin: &str, decimals: u32) -> Result<DecodeResponse> {
    let token: Token = geopin.parse()?;
    let decoded = codec::decode_token(&token);
    debug!(
        "Decoded {token} to ({}, {})",
        decoded.latitude(),
        decoded.longitude()
    );
    Ok(DecodeResponse::new(token, &decoded, decimals))
}

/// Measures the distance between two tokens.
///
/// # Errors
///
/// Returns the error of the first malformed token.
pub fn distance(geopin1: &str, geopin2: &str) -> Result<DistanceResponse> {
    let from: Token = geopin1.parse()?;
    let to: Token = geopin2.parse()?;
    let distance = codec::measure(from.symbols(), to.symbols())?;
    debug!("Distance {from} -> {to}: {} m", distance.meters);
    Ok(DistanceResponse::new(from, to, &distance))
}

/// Probes a token without failing.
#[must_use]
pub fn validate(geopin: &str) -> ValidateResponse {
    let reason = geopin.parse::<Token>().err().map(|err| err.to_string());
    ValidateResponse {
        geopin: geopin.to_string(),
        valid: reason.is_none(),
        reason,
    }
}

/// Describes the codec.
#[must_use]
pub fn info() -> InfoResponse {
    InfoResponse::default()
}

/// Operation applied to every item of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchOperation {
    Encode,
    Decode,
}

/// Batch request body.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchRequest {
    pub operation: BatchOperation,
    pub data: Vec<serde_json::Value>,
}

/// Successful batch item.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum BatchOutput {
    Encoded(EncodeResponse),
    Decoded(DecodeResponse),
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchResult {
    pub index: usize,
    #[serde(flatten)]
    pub output: BatchOutput,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchError {
    pub index: usize,
    #[serde(flatten)]
    pub error: ErrorResponse,
    pub input: serde_json::Value,
}

/// Batch summary. A failing item never aborts the batch.
#[derive(Debug, Clone, Serialize)]
pub struct BatchResponse {
    pub operation: BatchOperation,
    pub processed: usize,
    pub successful: usize,
    pub failed: usize,
    pub results: Vec<BatchResult>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<BatchError>,
}

/// Parses a batch request body.
///
/// # Errors
///
/// Returns [`CliError::InvalidRequest`] if the body is not a valid batch request.
pub fn parse_batch(body: &str) -> Result<BatchRequest> {
    Ok(serde_json::from_str(body)?)
}

/// Applies the batch operation to every item.
#[must_use]
pub fn batch(request: BatchRequest, decimals: u32) -> BatchResponse {
    let operation = request.operation;
    let processed = request.data.len();
    let mut results = Vec::new();
    let mut errors = Vec::new();

    for (index, input) in request.data.into_iter().enumerate() {
        match batch_item(operation, &input, decimals) {
            Ok(output) => results.push(BatchResult { index, output }),
            Err(err) => {
                debug!("Batch item {index} failed: {err}");
                errors.push(BatchError {
                    index,
                    error: ErrorResponse::from(&err),
                    input,
                });
            }
        }
    }

    log::info!(
        "Batch {operation:?}: {} of {processed} items succeeded",
        results.len()
    );

    BatchResponse {
        operation,
        processed,
        successful: results.len(),
        failed: errors.len(),
        results,
        errors,
    }
}

impl fmt::Display for BatchResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Processed {} items: {} succeeded, {} failed",
            self.processed, self.successful, self.failed
        )?;
        for result in &self.results {
            match &result.output {
                BatchOutput::Encoded(response) => {
                    write!(f, "\n[{}] {}", result.index, response.geopin)?;
                }
                BatchOutput::Decoded(response) => write!(
                    f,
                    "\n[{}] {}, {}",
                    result.index, response.coordinates.latitude, response.coordinates.longitude
                )?,
            }
        }
        for error in &self.errors {
            write!(f, "\n[{}] {}", error.index, error.error)?;
        }
        Ok(())
    }
}

fn batch_item(
    operation: BatchOperation,
    input: &serde_json::Value,
    decimals: u32,
) -> Result<BatchOutput> {
    match operation {
        BatchOperation::Encode => {
            let request = EncodeRequest::deserialize(input)?;
            encode(&request).map(BatchOutput::Encoded)
        }
        BatchOperation::Decode => {
            let request = DecodeRequest::deserialize(input)?;
            decode(&request.geopin, decimals).map(BatchOutput::Decoded)
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]

    use super::*;
    use geopin_core::codec::Dimensions;
    use serde_json::json;

    fn request(latitude: f64, longitude: f64) -> EncodeRequest {
        EncodeRequest {
            latitude,
            longitude,
            elevation: None,
            timestamp: None,
        }
    }

    #[test]
    fn encode_origin() {
        let response = encode(&request(0.0, 0.0)).unwrap();
        assert_eq!(response.geopin.to_string(), "AAAA-AAAA-AAAD");
        assert_eq!(response.dimensions, Dimensions::TwoD);
    }

    #[test]
    fn encode_reports_dimensions() {
        let mut req = request(27.9881, 86.9250);
        req.elevation = Some(8_848.0);
        req.timestamp = Some(1_700_000_000);
        let response = encode(&req).unwrap();
        assert_eq!(response.dimensions, Dimensions::FourD);
        assert_eq!(response.coordinates.timestamp, Some(1_700_000_000));
    }

    #[test]
    fn encode_rejects_non_positive_timestamp() {
        let mut req = request(0.0, 0.0);
        req.timestamp = Some(0);
        let err = encode(&req).unwrap_err();
        assert_eq!(err.code(), "INVALID_TIMESTAMP");
    }

    #[test]
    fn encode_rejects_bad_coordinates() {
        let err = encode(&request(91.0, 0.0)).unwrap_err();
        assert_eq!(err.code(), "INVALID_COORDINATE");
    }

    #[test]
    fn encode_clamps_out_of_range_elevation() {
        let mut high = request(0.0, 0.0);
        high.elevation = Some(20_000.0);
        let mut top = request(0.0, 0.0);
        top.elevation = Some(9_000.0);
        assert_eq!(encode(&high).unwrap().geopin, encode(&top).unwrap().geopin);
    }

    #[test]
    fn encode_now_is_temporal() {
        let response = encode_now(51.5074, -0.1278, None).unwrap();
        assert_eq!(response.dimensions, Dimensions::Temporal);
        assert!(response.coordinates.timestamp.is_some());
    }

    #[test]
    fn decode_canonicalizes_token() {
        let response = decode("9rxx2h8y7w7g", 8).unwrap();
        assert_eq!(response.geopin.to_string(), "9RXX-2H8Y-7W7G");
        assert_eq!(response.coordinates.latitude, 40.712_799_94);
    }

    #[test]
    fn decode_error_codes() {
        assert_eq!(decode("INVALID-FORMAT", 8).unwrap_err().code(), "INVALID_TOKEN");
        assert_eq!(
            decode("0123-0123-0123", 8).unwrap_err().code(),
            "UNKNOWN_CHARACTER"
        );
    }

    #[test]
    fn distance_new_york_london() {
        let response = distance("9RXX-2H8Y-7W7G", "22WP-MGAT-5X48").unwrap();
        assert_eq!(response.distance.kilometers, 5_570.23);
    }

    #[test]
    fn validate_reports_reason() {
        let ok = validate("AAAA-AAAA-AAAA");
        assert!(ok.valid);
        assert!(ok.reason.is_none());

        let bad = validate("INVALID-FORMAT");
        assert!(!bad.valid);
        assert!(bad.reason.unwrap().contains("found 13"));
    }

    #[test]
    fn batch_encode_collects_results_and_errors() {
        let body = json!({
            "operation": "encode",
            "data": [
                {"latitude": 40.7128, "longitude": -74.0060},
                {"latitude": 91.0, "longitude": 0.0},
                {"latitude": 27.9881, "longitude": 86.9250, "elevation": 8848.0},
                {"longitude": 1.0}
            ]
        });
        let request = parse_batch(&body.to_string()).unwrap();
        let response = batch(request, 8);

        assert_eq!(response.processed, 4);
        assert_eq!(response.successful, 2);
        assert_eq!(response.failed, 2);
        assert_eq!(response.results[0].index, 0);
        assert_eq!(response.results[1].index, 2);
        assert_eq!(response.errors[0].error.code, "INVALID_COORDINATE");
        assert_eq!(response.errors[1].error.code, "INVALID_REQUEST");
        assert_eq!(response.errors[1].input, json!({"longitude": 1.0}));
    }

    #[test]
    fn batch_decode_envelope_shape() {
        let body = json!({
            "operation": "decode",
            "data": [{"geopin": "22WP-MGAT-5X48"}, {"geopin": "0123-0123-0123"}]
        });
        let response = batch(parse_batch(&body.to_string()).unwrap(), 6);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["operation"], "decode");
        assert_eq!(json["results"][0]["index"], 0);
        assert_eq!(json["results"][0]["geopin"], "22WP-MGAT-5X48");
        assert_eq!(json["results"][0]["coordinates"]["latitude"], 51.5074);
        assert_eq!(json["errors"][0]["index"], 1);
        assert_eq!(json["errors"][0]["code"], "UNKNOWN_CHARACTER");
        assert!(json["errors"][0]["error"].is_string());
    }

    #[test]
    fn batch_without_failures_omits_errors() {
        let body = json!({"operation": "decode", "data": [{"geopin": "AAAA-AAAA-AAAA"}]});
        let response = batch(parse_batch(&body.to_string()).unwrap(), 8);
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("errors").is_none());
    }

    #[test]
    fn batch_text_lists_items() {
        let body = json!({
            "operation": "encode",
            "data": [{"latitude": 0.0, "longitude": 0.0}, {"latitude": 0.0}]
        });
        let text = batch(parse_batch(&body.to_string()).unwrap(), 8).to_string();
        assert!(text.starts_with("Processed 2 items: 1 succeeded, 1 failed"));
        assert!(text.contains("[0] AAAA-AAAA-AAAD"));
        assert!(text.contains("[1] error [INVALID_REQUEST]"));
    }

    #[test]
    fn parse_batch_rejects_unknown_operation() {
        let err = parse_batch(r#"{"operation": "delete", "data": []}"#).unwrap_err();
        assert_eq!(err.code(), "INVALID_REQUEST");
    }
}
