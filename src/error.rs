//! Error types for the Bitfinex client library.

use thiserror::Error;

/// The main error type for all Bitfinex client operations.
#[derive(Error, Debug)]
pub enum BitfinexError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// Failed to serialize a request body or query string
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP succeeded but the response body is not valid JSON
    #[error("response body is not valid JSON: {body}")]
    InvalidJson {
        /// The raw response body
        body: String,
    },

    /// The v1 API returned an error response
    #[error("Bitfinex v1 API error: {message}")]
    V1Api {
        /// Human-readable error message from the `message` field
        message: String,
    },

    /// The v2 API returned an error response
    #[error("Bitfinex v2 API error: [{code}] {message}")]
    V2Api {
        /// Numeric error code from the error triple
        code: i64,
        /// Human-readable error message from the error triple
        message: String,
    },

    /// HTTP error status whose body did not match the expected error shape.
    ///
    /// The raw status and body are carried unmodified so no diagnostic
    /// information is lost.
    #[error("HTTP {status}: {body}")]
    Status {
        /// The HTTP status code
        status: reqwest::StatusCode,
        /// The raw response body
        body: String,
    },

    /// Request parameters were not usable for the call being made
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Authentication error
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Missing required credentials
    #[error("Missing credentials: API key and secret required for authenticated endpoints")]
    MissingCredentials,
}

impl BitfinexError {
    /// Check if this error is a v2 rate limit rejection (code 10020).
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::V2Api { code: 10020, .. })
    }

    /// Check if this is an invalid-nonce rejection from either API version.
    pub fn is_invalid_nonce(&self) -> bool {
        match self {
            Self::V1Api { message } => message.contains("Nonce"),
            Self::V2Api { code, .. } => *code == 10114,
            _ => false,
        }
    }
}
