//! Legacy v1 authentication scheme and error decoding.
//!
//! v1 signs the base64 encoding of the JSON request body:
//!
//! ```text
//! payload   = base64(body)
//! signature = hex(HMAC-SHA384(api_secret, payload))
//! ```
//!
//! The body must already carry the `request` path and `nonce` fields before
//! it is signed; signing never mutates it. Errors come back as a JSON object
//! with a `message` field.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::Value;

use crate::auth::{Credentials, sign_payload};
use crate::error::BitfinexError;

/// Header carrying the API key.
pub const APIKEY_HEADER: &str = "X-BFX-APIKEY";
/// Header carrying the base64-encoded request body.
pub const PAYLOAD_HEADER: &str = "X-BFX-PAYLOAD";
/// Header carrying the hex HMAC-SHA384 signature of the payload.
pub const SIGNATURE_HEADER: &str = "X-BFX-SIGNATURE";

/// The three v1 authentication header values for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct V1Auth {
    /// The API key.
    pub api_key: String,
    /// base64 of the exact body bytes that will be transmitted.
    pub payload: String,
    /// hex HMAC-SHA384 of the payload.
    pub signature: String,
}

impl V1Auth {
    /// Render the three headers as a [`HeaderMap`] for the transport.
    pub fn headers(&self) -> Result<HeaderMap, BitfinexError> {
        let mut headers = HeaderMap::new();
        headers.insert(APIKEY_HEADER, header_value(&self.api_key)?);
        headers.insert(PAYLOAD_HEADER, header_value(&self.payload)?);
        headers.insert(SIGNATURE_HEADER, header_value(&self.signature)?);
        Ok(headers)
    }
}

/// Build v1 authentication headers for a serialized request body.
///
/// `body` must be the exact byte sequence that will be transmitted; signing a
/// re-serialized body produces a signature the server rejects.
pub fn authenticate(credentials: &Credentials, body: &[u8]) -> Result<V1Auth, BitfinexError> {
    let payload = BASE64.encode(body);
    let signature = sign_payload(credentials, payload.as_bytes())?;

    Ok(V1Auth {
        api_key: credentials.api_key.clone(),
        payload,
        signature,
    })
}

/// Try to decode a v1 error body.
///
/// v1 errors are JSON objects carrying a `message` field. Returns `None` when
/// the body does not match that shape, in which case the caller propagates
/// the raw HTTP error instead.
pub fn decode_error(body: &str) -> Option<BitfinexError> {
    let value: Value = serde_json::from_str(body).ok()?;
    let message = value.get("message")?.as_str()?;

    Some(BitfinexError::V1Api {
        message: message.to_string(),
    })
}

fn header_value(value: &str) -> Result<HeaderValue, BitfinexError> {
    HeaderValue::from_str(value)
        .map_err(|e| BitfinexError::Auth(format!("invalid header value: {e}")))
}
