//! Bitfinex REST API client.
//!
//! One [`RestClient`] speaks one of the exchange's two REST generations,
//! selected by [`ApiVersion`]. Request dispatch and response post-processing
//! are shared; the per-version signing schemes and error-body shapes live in
//! [`v1`] and [`v2`].

mod client;
pub mod endpoints;
pub mod v1;
pub mod v2;

pub use client::{ApiVersion, RestClient, RestClientBuilder};
pub use endpoints::BITFINEX_BASE_URL;
