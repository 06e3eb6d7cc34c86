//! # Bitfinex Client
//!
//! An async Rust client library for the Bitfinex exchange v1 and v2 REST APIs.
//!
//! ## Features
//!
//! - Authenticated and public request execution for both API generations
//! - Version-specific HMAC-SHA384 request signing
//! - Normalized error reporting across the two generations' error shapes
//! - Secure credential handling with redacted secrets
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bitfinex_api_client::rest::RestClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RestClient::v2();
//!     let ticker = client.call_public("ticker/tBTCUSD").await?;
//!     println!("Ticker: {ticker}");
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod error;
pub mod rest;

// Re-export commonly used types at crate root
pub use error::BitfinexError;
pub use rest::{ApiVersion, RestClient};

/// Result type alias using BitfinexError
pub type Result<T> = std::result::Result<T, BitfinexError>;
