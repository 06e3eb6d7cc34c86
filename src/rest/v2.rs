//! Current v2 authentication scheme and error decoding.
//!
//! v2 signs a concatenation of path prefix, nonce, and raw body:
//!
//! ```text
//! signed    = "/api" + path + nonce + body
//! signature = hex(HMAC-SHA384(api_secret, signed))
//! ```
//!
//! The path used for signing must exactly match the path the transport
//! requests, version prefix included; a mismatch produces a signature the
//! server silently rejects as invalid. Errors come back as an ordered array
//! `["error", code, message, ...]`.

use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::Value;

use crate::auth::{Credentials, sign_payload};
use crate::error::BitfinexError;

/// Header carrying the nonce.
pub const NONCE_HEADER: &str = "bfx-nonce";
/// Header carrying the API key.
pub const APIKEY_HEADER: &str = "bfx-apikey";
/// Header carrying the hex HMAC-SHA384 signature of the signed string.
pub const SIGNATURE_HEADER: &str = "bfx-signature";

/// The three v2 authentication header values for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct V2Auth {
    /// The nonce, identical to the one inside the signed string.
    pub nonce: String,
    /// The API key.
    pub api_key: String,
    /// hex HMAC-SHA384 of `"/api" + path + nonce + body`.
    pub signature: String,
}

impl V2Auth {
    /// Render the three headers as a [`HeaderMap`] for the transport.
    pub fn headers(&self) -> Result<HeaderMap, BitfinexError> {
        let mut headers = HeaderMap::new();
        headers.insert(NONCE_HEADER, header_value(&self.nonce)?);
        headers.insert(APIKEY_HEADER, header_value(&self.api_key)?);
        headers.insert(SIGNATURE_HEADER, header_value(&self.signature)?);
        Ok(headers)
    }
}

/// Build the exact string v2 signs for a given path, nonce, and body.
///
/// `body` is the raw JSON text, or the empty string for body-less requests.
pub fn signed_payload(path: &str, nonce: &str, body: &str) -> String {
    format!("/api{path}{nonce}{body}")
}

/// Build v2 authentication headers for a request.
///
/// The same `nonce` ends up in the `bfx-nonce` header and inside the signed
/// string; they must never diverge.
pub fn authenticate(
    credentials: &Credentials,
    path: &str,
    nonce: &str,
    body: &str,
) -> Result<V2Auth, BitfinexError> {
    let signed = signed_payload(path, nonce, body);
    let signature = sign_payload(credentials, signed.as_bytes())?;

    Ok(V2Auth {
        nonce: nonce.to_string(),
        api_key: credentials.api_key.clone(),
        signature,
    })
}

/// Try to decode a v2 error body.
///
/// v2 errors are arrays of at least three elements, `[tag, code, message]`,
/// with an integer code and string message. Returns `None` when the body does
/// not match that shape, in which case the caller propagates the raw HTTP
/// error instead.
pub fn decode_error(body: &str) -> Option<BitfinexError> {
    let value: Value = serde_json::from_str(body).ok()?;
    let items = value.as_array()?;
    if items.len() < 3 {
        return None;
    }

    let code = items[1].as_i64()?;
    let message = items[2].as_str()?;

    Some(BitfinexError::V2Api {
        code,
        message: message.to_string(),
    })
}

fn header_value(value: &str) -> Result<HeaderValue, BitfinexError> {
    HeaderValue::from_str(value)
        .map_err(|e| BitfinexError::Auth(format!("invalid header value: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_payload_concatenation() {
        assert_eq!(
            signed_payload("/v2/auth/r/wallets", "123", "{}"),
            "/api/v2/auth/r/wallets123{}"
        );
        assert_eq!(signed_payload("/v2/auth/r/orders", "9", ""), "/api/v2/auth/r/orders9");
    }

    #[test]
    fn test_authenticate_known_vector() {
        let credentials = Credentials::new("k", "s");

        let auth = authenticate(&credentials, "/v2/auth/r/wallets", "123", "{}").unwrap();

        assert_eq!(auth.nonce, "123");
        assert_eq!(auth.api_key, "k");
        assert_eq!(
            auth.signature,
            "dbc6ff442bf1f459178f6ee03fa54351e9836e12539eaf36ed6fe7293e5c27b46cf9e0e82bd4b191dd84cddc2ab6bdea"
        );
    }

    #[test]
    fn test_signature_sensitive_to_path() {
        // A path that drifts from the one actually requested is the classic
        // way to earn an opaque "invalid signature" from the exchange.
        let credentials = Credentials::new("k", "s");

        let good = authenticate(&credentials, "/v2/auth/r/wallets", "123", "{}").unwrap();
        let drifted = authenticate(&credentials, "/auth/r/wallets", "123", "{}").unwrap();

        assert_ne!(good.signature, drifted.signature);
    }

    #[test]
    fn test_header_nonce_matches_signed_nonce() {
        let credentials = Credentials::new("k", "s");
        let auth = authenticate(&credentials, "/v2/auth/r/wallets", "456", "{}").unwrap();
        let headers = auth.headers().unwrap();

        assert_eq!(headers.get(NONCE_HEADER).unwrap(), "456");
        assert_eq!(headers.get(APIKEY_HEADER).unwrap(), "k");
        assert_eq!(headers.len(), 3);
    }

    #[test]
    fn test_decode_error_triple() {
        let error = decode_error(r#"["error",10020,"limit_exceeded"]"#).unwrap();
        match error {
            BitfinexError::V2Api { code, message } => {
                assert_eq!(code, 10020);
                assert_eq!(message, "limit_exceeded");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_decode_error_allows_trailing_elements() {
        let error = decode_error(r#"["error",10100,"apikey: invalid","extra"]"#).unwrap();
        assert!(matches!(error, BitfinexError::V2Api { code: 10100, .. }));
    }

    #[test]
    fn test_decode_error_rejects_other_shapes() {
        assert!(decode_error("not json").is_none());
        assert!(decode_error(r#"["error",10020]"#).is_none());
        assert!(decode_error(r#"["error","10020","limit_exceeded"]"#).is_none());
        assert!(decode_error(r#"["error",10020,42]"#).is_none());
        assert!(decode_error(r#"{"message":"nope"}"#).is_none());
    }
}
