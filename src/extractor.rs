//! Decoding of geocoder response payloads into [`GeocodeOutcome`]s.

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::types::{AddressComponent, GeocodeOutcome, StatusCode, ValueForm};

#[derive(Debug, Deserialize)]
struct RawResponse {
    status: Option<String>,
    results: Option<Vec<RawResult>>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawResult {
    address_components: Option<Vec<RawComponent>>,
}

#[derive(Debug, Deserialize)]
struct RawComponent {
    long_name: String,
    short_name: Option<String>,
    #[serde(default)]
    types: Vec<String>,
}

impl RawComponent {
    fn into_component(self, form: ValueForm) -> AddressComponent {
        let value = match form {
            ValueForm::Long => self.long_name,
            ValueForm::Short => self.short_name.unwrap_or(self.long_name),
        };
        AddressComponent {
            value,
            types: self.types,
        }
    }
}

/// Decode a JSON geocoding payload.
///
/// Only the first result is read; its components keep provider order and
/// their full tag lists.
///
/// # Errors
///
/// Returns [`Error::MalformedResponseError`] if the body is not JSON, has no
/// `status`, or reports `OK` without any address components. A non-OK status
/// is not an error here; it is carried in the outcome.
pub fn extract(body: &str, form: ValueForm) -> Result<GeocodeOutcome> {
    let raw: RawResponse = serde_json::from_str(body)
        .map_err(|e| Error::malformed_response(format!("Invalid JSON payload: {e}")))?;

    let status = raw
        .status
        .as_deref()
        .map(StatusCode::from_str)
        .ok_or_else(|| Error::malformed_response("Response has no status"))?;

    if !status.is_ok() {
        return Ok(GeocodeOutcome {
            status,
            components: Vec::new(),
            error_message: raw.error_message,
        });
    }

    let components = raw
        .results
        .and_then(|results| results.into_iter().next())
        .and_then(|result| result.address_components)
        .ok_or_else(|| Error::malformed_response("OK response has no address components"))?;

    Ok(GeocodeOutcome::ok(
        components
            .into_iter()
            .map(|component| component.into_component(form))
            .collect(),
    ))
}
