//! Bitfinex REST API client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use reqwest_tracing::TracingMiddleware;
use serde_json::Value;
use tracing::debug;

use crate::auth::{CredentialsProvider, IncreasingNonce, NonceProvider};
use crate::error::BitfinexError;
use crate::rest::endpoints::BITFINEX_BASE_URL;
use crate::rest::{v1, v2};

/// The Bitfinex REST API generation a client speaks.
///
/// The two generations differ in their authentication header scheme and in
/// the shape of their error bodies; everything else about request dispatch is
/// shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiVersion {
    /// Legacy v1 API (`/v1/...`, `X-BFX-*` headers, `{"message": ...}` errors).
    V1,
    /// Current v2 API (`/v2/...`, `bfx-*` headers, `[tag, code, message]` errors).
    V2,
}

impl ApiVersion {
    /// URL path prefix for this generation.
    pub fn prefix(self) -> &'static str {
        match self {
            ApiVersion::V1 => "/v1",
            ApiVersion::V2 => "/v2",
        }
    }

    /// Full request path for a method name, e.g. `/v2/auth/r/wallets`.
    fn method_path(self, method: &str) -> String {
        format!("{}/{}", self.prefix(), method)
    }

    /// Try to decode this generation's error body shape.
    fn decode_error(self, body: &str) -> Option<BitfinexError> {
        match self {
            ApiVersion::V1 => v1::decode_error(body),
            ApiVersion::V2 => v2::decode_error(body),
        }
    }
}

/// The Bitfinex REST API client.
///
/// One client speaks one [`ApiVersion`]; construct one per generation you
/// need. Results are returned as raw [`serde_json::Value`]s, passed through
/// unmodified from the exchange.
///
/// # Example
///
/// ```rust,no_run
/// use bitfinex_api_client::rest::RestClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Public endpoints need no credentials
///     let client = RestClient::v2();
///     let status = client.call_public("platform/status").await?;
///     println!("Platform status: {status}");
///     Ok(())
/// }
/// ```
///
/// For authenticated endpoints, provide credentials:
///
/// ```rust,no_run
/// use bitfinex_api_client::auth::StaticCredentials;
/// use bitfinex_api_client::rest::{ApiVersion, RestClient};
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let credentials = Arc::new(StaticCredentials::new("api_key", "api_secret"));
///     let client = RestClient::builder(ApiVersion::V2)
///         .credentials(credentials)
///         .build();
///
///     let wallets = client.call_auth("auth/r/wallets", &serde_json::json!({})).await?;
///     println!("Wallets: {wallets}");
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct RestClient {
    http_client: ClientWithMiddleware,
    base_url: String,
    version: ApiVersion,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    nonce_provider: Arc<dyn NonceProvider>,
}

impl RestClient {
    /// Create a v1 client with default settings (public endpoints only).
    pub fn v1() -> Self {
        Self::builder(ApiVersion::V1).build()
    }

    /// Create a v2 client with default settings (public endpoints only).
    pub fn v2() -> Self {
        Self::builder(ApiVersion::V2).build()
    }

    /// Create a new client builder for the given API generation.
    pub fn builder(version: ApiVersion) -> RestClientBuilder {
        RestClientBuilder::new(version)
    }

    /// The API generation this client speaks.
    pub fn version(&self) -> ApiVersion {
        self.version
    }

    /// Call a public endpoint with no query parameters.
    ///
    /// Issues `GET {base}/v{N}/{method}` and returns the decoded JSON body.
    pub async fn call_public(&self, method: &str) -> Result<Value, BitfinexError> {
        let path = self.version.method_path(method);
        debug!(method, path = %path, "GET");

        let url = format!("{}{}", self.base_url, path);
        let response = self.http_client.get(&url).send().await?;
        self.postprocess(response).await
    }

    /// Call a public endpoint with query parameters.
    ///
    /// `params` is urlencoded into the query string; no signing takes place.
    pub async fn call_public_with_params<Q>(
        &self,
        method: &str,
        params: &Q,
    ) -> Result<Value, BitfinexError>
    where
        Q: serde::Serialize + ?Sized,
    {
        let query_string = serde_urlencoded::to_string(params)
            .map_err(|e| BitfinexError::InvalidRequest(e.to_string()))?;
        let path = self.version.method_path(method);
        debug!(method, path = %path, query = %query_string, "GET");

        let url = if query_string.is_empty() {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}{}?{}", self.base_url, path, query_string)
        };
        let response = self.http_client.get(&url).send().await?;
        self.postprocess(response).await
    }

    /// Call an authenticated endpoint.
    ///
    /// Issues `POST {base}/v{N}/{method}` with this generation's signed
    /// headers attached. For v1, `params` must serialize to a JSON object
    /// (or null); the client merges in the `request` path and a fresh nonce
    /// before signing. For v2, `params` is serialized as-is and the nonce
    /// travels in the `bfx-nonce` header.
    ///
    /// In both cases the signature covers the exact bytes transmitted, and
    /// the nonce that is signed is the nonce that is sent.
    pub async fn call_auth<P>(&self, method: &str, params: &P) -> Result<Value, BitfinexError>
    where
        P: serde::Serialize + ?Sized,
    {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(BitfinexError::MissingCredentials)?;
        let creds = credentials.get_credentials();

        let path = self.version.method_path(method);
        let nonce = self.nonce_provider.next_nonce().to_string();
        debug!(method, path = %path, nonce = %nonce, "POST");

        let (body, auth_headers) = match self.version {
            ApiVersion::V1 => {
                // Merge caller params with the request path and nonce, then
                // serialize exactly once: the signed bytes must be the
                // transmitted bytes.
                let mut object = match serde_json::to_value(params)? {
                    Value::Object(map) => map,
                    Value::Null => serde_json::Map::new(),
                    other => {
                        return Err(BitfinexError::InvalidRequest(format!(
                            "v1 authenticated params must serialize to a JSON object, got {other}"
                        )));
                    }
                };
                object.insert("request".to_string(), Value::String(path.clone()));
                object.insert("nonce".to_string(), Value::String(nonce));

                let body = serde_json::to_string(&Value::Object(object))?;
                let auth = v1::authenticate(creds, body.as_bytes())?;
                (body, auth.headers()?)
            }
            ApiVersion::V2 => {
                let body = serde_json::to_string(params)?;
                let auth = v2::authenticate(creds, &path, &nonce, &body)?;
                (body, auth.headers()?)
            }
        };

        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http_client
            .post(&url)
            .headers(auth_headers)
            .body(body)
            .send()
            .await?;

        self.postprocess(response).await
    }

    /// Map a response into the uniform result/error contract.
    ///
    /// Success statuses must carry valid JSON. Error statuses are matched
    /// against this generation's error shape; on a mismatch the raw status
    /// and body propagate unmodified.
    async fn postprocess(&self, response: reqwest::Response) -> Result<Value, BitfinexError> {
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return serde_json::from_str(&body).map_err(|_| BitfinexError::InvalidJson { body });
        }

        match self.version.decode_error(&body) {
            Some(error) => Err(error),
            None => Err(BitfinexError::Status { status, body }),
        }
    }
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.base_url)
            .field("version", &self.version)
            .field("has_credentials", &self.credentials.is_some())
            .finish()
    }
}

/// Builder for [`RestClient`].
pub struct RestClientBuilder {
    version: ApiVersion,
    base_url: String,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    nonce_provider: Option<Arc<dyn NonceProvider>>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
    max_retries: u32,
}

impl RestClientBuilder {
    /// Create a new builder with default settings.
    pub fn new(version: ApiVersion) -> Self {
        Self {
            version,
            base_url: BITFINEX_BASE_URL.to_string(),
            credentials: None,
            nonce_provider: None,
            user_agent: None,
            timeout: None,
            max_retries: 0,
        }
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the credentials provider for authenticated requests.
    pub fn credentials(mut self, credentials: Arc<dyn CredentialsProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set a custom nonce provider.
    pub fn nonce_provider(mut self, provider: Arc<dyn NonceProvider>) -> Self {
        self.nonce_provider = Some(provider);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set a per-request timeout, handed straight to the HTTP transport.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Enable transport-level retries for transient failures.
    ///
    /// The default is 0: the client performs no retries and every failure
    /// propagates immediately.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Build the client.
    pub fn build(self) -> RestClient {
        // Default headers for every request in this session.
        let mut headers = HeaderMap::new();
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("bitfinex-api-client/{}", env!("CARGO_PKG_VERSION")));
        let header_value = HeaderValue::from_str(&user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("bitfinex-api-client"));
        headers.insert(USER_AGENT, header_value);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut client_builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = self.timeout {
            client_builder = client_builder.timeout(timeout);
        }
        let reqwest_client = client_builder
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        let mut middleware = ClientBuilder::new(reqwest_client).with(TracingMiddleware::default());
        if self.max_retries > 0 {
            let retry_policy =
                ExponentialBackoff::builder().build_with_max_retries(self.max_retries);
            middleware = middleware.with(RetryTransientMiddleware::new_with_policy(retry_policy));
        }
        let client = middleware.build();

        let nonce_provider = self
            .nonce_provider
            .unwrap_or_else(|| Arc::new(IncreasingNonce::new()));

        RestClient {
            http_client: client,
            base_url: self.base_url,
            version: self.version,
            credentials: self.credentials,
            nonce_provider,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_paths() {
        assert_eq!(ApiVersion::V1.method_path("balances"), "/v1/balances");
        assert_eq!(
            ApiVersion::V2.method_path("auth/r/wallets"),
            "/v2/auth/r/wallets"
        );
    }

    #[test]
    fn test_error_decoding_dispatch() {
        let v1_body = r#"{"message":"Unknown symbol"}"#;
        let v2_body = r#"["error",10300,"subscribe: failed"]"#;

        assert!(matches!(
            ApiVersion::V1.decode_error(v1_body),
            Some(BitfinexError::V1Api { .. })
        ));
        assert!(ApiVersion::V1.decode_error(v2_body).is_none());
        assert!(matches!(
            ApiVersion::V2.decode_error(v2_body),
            Some(BitfinexError::V2Api { code: 10300, .. })
        ));
        assert!(ApiVersion::V2.decode_error(v1_body).is_none());
    }

    #[test]
    fn test_debug_hides_credentials() {
        let client = RestClient::v2();
        let debug_str = format!("{client:?}");
        assert!(debug_str.contains("has_credentials: false"));
        assert!(debug_str.contains("api.bitfinex.com"));
    }
}
