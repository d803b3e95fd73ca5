//! Geocoding transport: query composition, client configuration and the HTTP client.

use std::future::Future;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::extractor;
use crate::types::{GeocodeOutcome, ValueForm};

/// Public JSON geocoding endpoint used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Environment variable holding the provider API key.
pub const API_KEY_ENV: &str = "GEOCODE_API_KEY";

/// Environment variable overriding the endpoint.
pub const BASE_URL_ENV: &str = "GEOCODE_BASE_URL";

const USER_AGENT: &str = concat!("geocode-fields/", env!("CARGO_PKG_VERSION"));

/// Build the free-text query sent to the geocoder.
///
/// A separately captured zip code is appended when present, since results are
/// better with one.
///
/// # Errors
///
/// Returns [`Error::InvalidAddress`] if `address` is blank.
///
/// # Example
///
/// ```rust
/// use geocode_fields::compose_query;
///
/// assert_eq!(compose_query("100 Main St", Some("62701"))?, "100 Main St 62701");
/// assert_eq!(compose_query("100 Main St", Some(""))?, "100 Main St");
/// # Ok::<(), geocode_fields::Error>(())
/// ```
pub fn compose_query(address: &str, zip: Option<&str>) -> Result<String> {
    let address = address.trim();
    if address.is_empty() {
        return Err(Error::invalid_address("address is blank"));
    }

    match zip.map(str::trim).filter(|zip| !zip.is_empty()) {
        Some(zip) => Ok(format!("{address} {zip}")),
        None => Ok(address.to_string()),
    }
}

/// Source of geocoding outcomes for a free-text query.
pub trait Geocoder {
    /// Geocode `query`.
    ///
    /// # Errors
    ///
    /// Transport failures surface as [`Error::NetworkError`] or
    /// [`Error::TimeoutError`]; unreadable payloads as
    /// [`Error::MalformedResponseError`].
    fn geocode(&self, query: &str) -> impl Future<Output = Result<GeocodeOutcome>> + Send;
}

/// Configuration for the HTTP geocoding client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Geocoding endpoint
    pub base_url: String,
    /// Provider API key, sent as the `key` parameter when set
    pub api_key: Option<String>,
    /// Request timeout
    pub timeout_seconds: u64,
    /// User-Agent header
    pub user_agent: String,
    /// Which component name to read as the value
    pub value_form: ValueForm,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: std::env::var(API_KEY_ENV).ok().filter(|key| !key.is_empty()),
            timeout_seconds: 30,
            user_agent: USER_AGENT.to_string(),
            value_form: ValueForm::Long,
        }
    }
}

/// Endpoint from the environment, or [`DEFAULT_BASE_URL`].
pub fn default_base_url() -> String {
    match std::env::var(BASE_URL_ENV) {
        Ok(url) if !url.trim().is_empty() => url,
        _ => DEFAULT_BASE_URL.to_string(),
    }
}

/// HTTP geocoding client.
#[derive(Debug, Clone)]
pub struct GeocodeClient {
    http_client: reqwest::Client,
    config: ClientConfig,
}

impl GeocodeClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::config_error(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build the outbound request for `query` without sending it.
    pub fn build_request(&self, query: &str) -> Result<reqwest::Request> {
        let mut params = vec![("address", query)];
        if let Some(key) = self.config.api_key.as_deref() {
            params.push(("key", key));
        }

        self.http_client
            .get(&self.config.base_url)
            .query(&params)
            .build()
            .map_err(|e| Error::config_error(format!("Invalid geocoding request: {e}")))
    }
}

impl Geocoder for GeocodeClient {
    async fn geocode(&self, query: &str) -> Result<GeocodeOutcome> {
        let request = self.build_request(query)?;
        tracing::debug!(url = %self.config.base_url, query, "Querying geocoder");

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::network_error(format!(
                "Geocoder responded with HTTP {status}"
            )));
        }

        let body = response.text().await.map_err(transport_error)?;
        let outcome = extractor::extract(&body, self.config.value_form)?;

        tracing::debug!(
            status = %outcome.status,
            components = outcome.components.len(),
            "Geocoder responded"
        );
        Ok(outcome)
    }
}

fn transport_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::timeout_error(e.to_string())
    } else {
        Error::network_error(e.to_string())
    }
}
