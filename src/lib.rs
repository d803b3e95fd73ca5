//! # geocode-fields
//!
//! Turn a free-text address into fixed postal-address fields using a
//! geocoding service.
//!
//! The geocoder answers with a variable-length, provider-ordered list of
//! address components. This crate maps that list onto seven fixed fields
//! (building number, two street lines, city, county, state and zip) by
//! choosing a positional template from the component count.
//!
//! ## Features
//!
//! - **Field Classification**: Pure, table-driven mapping of components to fields
//! - **Status Gating**: Non-OK provider statuses never reach the classifier
//! - **Explicit Failures**: Every failure is a typed error with a user-facing message
//! - **Pluggable Transport**: Any [`Geocoder`] can feed the pipeline
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use geocode_fields::{AddressFields, FieldMap};
//!
//! # async fn run() -> Result<(), geocode_fields::Error> {
//! let fields = AddressFields::new()?;
//!
//! let parsed = fields.lookup("100 Main St Springfield IL", Some("62701")).await?;
//! println!("City: {}", parsed.city);
//!
//! let mut form = FieldMap::new();
//! fields.lookup_into("100 Main St Springfield IL", None, &mut form).await?;
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod classifier;
pub mod client;
pub mod error;
pub mod extractor;
pub mod stats;
pub mod types;
pub mod writer;

use std::time::Instant;

// Re-export main API
#[cfg(feature = "parallel")]
pub use classifier::classify_batch_parallel;
pub use classifier::{ParsedAddress, Template, classify, classify_batch};
pub use client::{ClientConfig, GeocodeClient, Geocoder, compose_query};
pub use error::{Error, Result};
pub use extractor::extract;
pub use stats::{PipelineStats, StatsSummary};
pub use types::*;
pub use writer::{FieldMap, FieldWriter, HostField};

/// Classify a geocoding outcome, refusing anything but an OK status.
///
/// # Errors
///
/// Returns [`Error::GeocodeStatusError`] for a non-OK status without
/// inspecting the components, and [`Error::ClassificationError`] when the
/// components do not fit the selected template.
pub fn classify_outcome(outcome: GeocodeOutcome) -> Result<ParsedAddress> {
    if !outcome.status.is_ok() {
        tracing::warn!(
            status = %outcome.status,
            detail = outcome.error_message.as_deref().unwrap_or(""),
            "Geocoder returned a non-OK status"
        );
        return Err(Error::GeocodeStatusError {
            status: outcome.status,
        });
    }

    classify(&outcome.components)
}

/// Main entry point: geocode an address and classify the result.
///
/// # Examples
///
/// ```rust,no_run
/// use geocode_fields::{AddressFields, AddressFieldsConfig};
///
/// # async fn run() -> Result<(), geocode_fields::Error> {
/// let config = AddressFieldsConfig::builder()
///     .api_key("my-key")
///     .timeout_seconds(10)
///     .build();
///
/// let fields = AddressFields::with_config(config)?;
/// let parsed = fields.lookup("1600 Amphitheatre Pkwy Mountain View CA", None).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct AddressFields<G = GeocodeClient> {
    geocoder: G,
    stats: PipelineStats,
}

impl AddressFields<GeocodeClient> {
    /// Create a pipeline backed by the HTTP client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        Self::with_config(AddressFieldsConfig::default())
    }

    /// Create a pipeline backed by the HTTP client with custom configuration.
    pub fn with_config(config: AddressFieldsConfig) -> Result<Self> {
        let client = GeocodeClient::new(config.client_config)?;
        Ok(Self::with_geocoder(client))
    }
}

impl<G: Geocoder> AddressFields<G> {
    /// Create a pipeline over any geocoder.
    pub fn with_geocoder(geocoder: G) -> Self {
        Self {
            geocoder,
            stats: PipelineStats::new(),
        }
    }

    /// Get the geocoder.
    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    /// Get the lookup counters.
    pub fn stats(&self) -> &PipelineStats {
        &self.stats
    }

    /// Geocode `address` (with an optional separately captured zip) and
    /// classify the result.
    ///
    /// # Errors
    ///
    /// Any failure is terminal for this address; see [`Error::user_message`]
    /// for the text to show.
    pub async fn lookup(&self, address: &str, zip: Option<&str>) -> Result<ParsedAddress> {
        let result = self.run_lookup(address, zip).await;
        match &result {
            Ok(_) => self.stats.record_success(),
            Err(e) => {
                self.stats.record_failure(e);
                tracing::warn!(error = %e, "Address lookup failed");
            }
        }
        result
    }

    /// Like [`lookup`](Self::lookup), then hand the address to `writer`.
    ///
    /// Nothing is written when the lookup fails.
    pub async fn lookup_into<W: FieldWriter>(
        &self,
        address: &str,
        zip: Option<&str>,
        writer: &mut W,
    ) -> Result<()> {
        let parsed = self.lookup(address, zip).await?;
        writer.write(&parsed);
        Ok(())
    }

    async fn run_lookup(&self, address: &str, zip: Option<&str>) -> Result<ParsedAddress> {
        let query = compose_query(address, zip)?;

        let started = Instant::now();
        let outcome = self.geocoder.geocode(&query).await;
        self.stats.record_geocode(started.elapsed());

        let parsed = classify_outcome(outcome?)?;
        tracing::info!(
            city = %parsed.city,
            state = %parsed.state,
            zip = %parsed.zip,
            "Address classified"
        );
        Ok(parsed)
    }
}

/// Configuration for [`AddressFields`].
#[derive(Debug, Clone, Default)]
pub struct AddressFieldsConfig {
    /// HTTP client configuration
    pub client_config: ClientConfig,
}

impl AddressFieldsConfig {
    /// Create a new configuration builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use geocode_fields::{AddressFieldsConfig, ValueForm};
    ///
    /// let config = AddressFieldsConfig::builder()
    ///     .timeout_seconds(5)
    ///     .value_form(ValueForm::Short)
    ///     .build();
    /// assert_eq!(config.client_config.timeout_seconds, 5);
    /// ```
    pub fn builder() -> AddressFieldsConfigBuilder {
        AddressFieldsConfigBuilder::new()
    }
}

/// Builder for AddressFieldsConfig.
#[derive(Debug, Clone)]
pub struct AddressFieldsConfigBuilder {
    client_config: ClientConfig,
}

impl AddressFieldsConfigBuilder {
    /// Create a new configuration builder with default values.
    pub fn new() -> Self {
        Self {
            client_config: ClientConfig::default(),
        }
    }

    /// Set the provider API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.client_config.api_key = Some(key.into());
        self
    }

    /// Set the geocoding endpoint.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.client_config.base_url = url.into();
        self
    }

    /// Set the request timeout in seconds.
    pub fn timeout_seconds(mut self, seconds: u64) -> Self {
        self.client_config.timeout_seconds = seconds;
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.client_config.user_agent = user_agent.into();
        self
    }

    /// Choose long or short component names.
    pub fn value_form(mut self, form: ValueForm) -> Self {
        self.client_config.value_form = form;
        self
    }

    /// Replace the whole client configuration.
    pub fn client_config(mut self, config: ClientConfig) -> Self {
        self.client_config = config;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> AddressFieldsConfig {
        AddressFieldsConfig {
            client_config: self.client_config,
        }
    }
}

impl Default for AddressFieldsConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::sync::Mutex;

    enum Reply {
        Outcome(GeocodeOutcome),
        Timeout,
    }

    struct FakeGeocoder {
        reply: Reply,
        queries: Mutex<Vec<String>>,
    }

    impl FakeGeocoder {
        fn new(reply: Reply) -> Self {
            Self {
                reply,
                queries: Mutex::new(Vec::new()),
            }
        }

        fn queries(&self) -> Vec<String> {
            self.queries.lock().unwrap().clone()
        }
    }

    impl Geocoder for FakeGeocoder {
        async fn geocode(&self, query: &str) -> Result<GeocodeOutcome> {
            self.queries.lock().unwrap().push(query.to_string());
            match &self.reply {
                Reply::Outcome(outcome) => Ok(outcome.clone()),
                Reply::Timeout => Err(Error::timeout_error("operation timed out")),
            }
        }
    }

    fn springfield() -> GeocodeOutcome {
        GeocodeOutcome::ok(vec![
            AddressComponent::new("100", ["street_number"]),
            AddressComponent::new("Main Street", ["route"]),
            AddressComponent::new("Springfield", ["locality", "political"]),
            AddressComponent::new("Sangamon County", ["administrative_area_level_2"]),
            AddressComponent::new("Illinois", ["administrative_area_level_1"]),
            AddressComponent::new("United States", ["country"]),
            AddressComponent::new("62701", ["postal_code"]),
        ])
    }

    #[tokio::test]
    async fn test_lookup_classifies_ok_outcome() {
        let fields = AddressFields::with_geocoder(FakeGeocoder::new(Reply::Outcome(springfield())));

        let parsed = fields.lookup("100 Main St", Some("62701")).await.unwrap();
        assert_eq!(parsed.building_number, "100");
        assert_eq!(parsed.street1, "Main Street");
        assert_eq!(parsed.county, "Sangamon County");
        assert_eq!(parsed.zip, "62701");
        assert_eq!(fields.geocoder().queries(), vec!["100 Main St 62701"]);

        let summary = fields.stats().summary();
        assert_eq!(summary.lookups, 1);
        assert_eq!(summary.classified, 1);
    }

    #[tokio::test]
    async fn test_non_ok_status_never_classified() {
        // Components are present, but the status must stop classification.
        let mut outcome = springfield();
        outcome.status = StatusCode::OverQueryLimit;
        let fields = AddressFields::with_geocoder(FakeGeocoder::new(Reply::Outcome(outcome)));

        let err = fields.lookup("100 Main St", None).await.unwrap_err();
        assert_matches!(
            err,
            Error::GeocodeStatusError {
                status: StatusCode::OverQueryLimit
            }
        );
        assert!(err
            .user_message()
            .ends_with(StatusCode::OverQueryLimit.explanation()));
        assert_eq!(fields.stats().summary().status_failures, 1);
    }

    #[tokio::test]
    async fn test_blank_address_skips_geocoder() {
        let fields = AddressFields::with_geocoder(FakeGeocoder::new(Reply::Outcome(springfield())));

        assert_matches!(
            fields.lookup("   ", Some("62701")).await,
            Err(Error::InvalidAddress { .. })
        );
        assert!(fields.geocoder().queries().is_empty());

        let summary = fields.stats().summary();
        assert_eq!(summary.lookups, 0);
        assert_eq!(summary.other_failures, 1);
        assert_eq!(summary.failures(), 1);
    }

    #[tokio::test]
    async fn test_lookup_into_writes_fields() {
        let fields = AddressFields::with_geocoder(FakeGeocoder::new(Reply::Outcome(springfield())));
        let mut form = FieldMap::new();

        fields.lookup_into("100 Main St", None, &mut form).await.unwrap();
        assert_eq!(form.get("singleBldg"), Some("100"));
        assert_eq!(form.get("st2"), Some(""));
        assert_eq!(form.get("state"), Some("Illinois"));
    }

    #[tokio::test]
    async fn test_failed_lookup_writes_nothing() {
        let short = GeocodeOutcome::ok(vec![
            AddressComponent::new("Springfield", ["locality"]),
            AddressComponent::new("United States", ["country"]),
        ]);
        let fields = AddressFields::with_geocoder(FakeGeocoder::new(Reply::Outcome(short)));
        let mut form = FieldMap::new();

        let err = fields
            .lookup_into("Springfield", None, &mut form)
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Location not geocoded!");
        assert!(form.values().is_empty());
        assert_eq!(fields.stats().summary().classification_failures, 1);
    }

    #[tokio::test]
    async fn test_transport_failure_counted() {
        let fields = AddressFields::with_geocoder(FakeGeocoder::new(Reply::Timeout));

        assert_matches!(
            fields.lookup("100 Main St", None).await,
            Err(Error::TimeoutError { .. })
        );
        let summary = fields.stats().summary();
        assert_eq!(summary.lookups, 1);
        assert_eq!(summary.transport_failures, 1);
    }

    #[test]
    fn test_classify_outcome_gate() {
        assert_matches!(
            classify_outcome(GeocodeOutcome::failed(StatusCode::ZeroResults)),
            Err(Error::GeocodeStatusError {
                status: StatusCode::ZeroResults
            })
        );
        assert_eq!(classify_outcome(springfield()).unwrap().city, "Springfield");
    }

    #[test]
    fn test_config_builder() {
        let config = AddressFieldsConfig::builder()
            .api_key("abc")
            .base_url("http://localhost:8080/geocode/json")
            .timeout_seconds(3)
            .value_form(ValueForm::Short)
            .build();

        assert_eq!(config.client_config.api_key.as_deref(), Some("abc"));
        assert_eq!(
            config.client_config.base_url,
            "http://localhost:8080/geocode/json"
        );
        assert_eq!(config.client_config.timeout_seconds, 3);
        assert_eq!(config.client_config.value_form, ValueForm::Short);
    }
}
