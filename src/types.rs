//! Common types and enums for geocode-fields.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Tag marking a component as the postal-code suffix (ZIP+4 extension).
pub const POSTAL_CODE_SUFFIX: &str = "postal_code_suffix";

/// One labeled fragment of a geocoded address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AddressComponent {
    /// Text of the component (e.g. "Springfield")
    pub value: String,
    /// Provider classification tags (e.g. "locality", "political")
    pub types: Vec<String>,
}

impl AddressComponent {
    /// Create a new component from a value and its tags.
    pub fn new<I, S>(value: impl Into<String>, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            value: value.into(),
            types: types.into_iter().map(Into::into).collect(),
        }
    }

    /// Check whether the component carries the given tag.
    pub fn has_type(&self, tag: &str) -> bool {
        self.types.iter().any(|t| t == tag)
    }

    /// Check whether the component is a postal-code suffix.
    pub fn is_postal_code_suffix(&self) -> bool {
        self.has_type(POSTAL_CODE_SUFFIX)
    }
}

/// Status codes reported by the geocoding provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StatusCode {
    /// Results were returned
    Ok,
    /// The query parsed but matched nothing
    ZeroResults,
    /// The request quota has been exhausted
    OverQueryLimit,
    /// The provider refused the request
    RequestDenied,
    /// The query is missing required parts
    InvalidRequest,
    /// Server-side failure
    UnknownError,
    /// Any status string outside the documented vocabulary
    Custom(String),
}

impl StatusCode {
    /// Provider spelling of the status.
    pub fn as_str(&self) -> &str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::ZeroResults => "ZERO_RESULTS",
            StatusCode::OverQueryLimit => "OVER_QUERY_LIMIT",
            StatusCode::RequestDenied => "REQUEST_DENIED",
            StatusCode::InvalidRequest => "INVALID_REQUEST",
            StatusCode::UnknownError => "UNKNOWN_ERROR",
            StatusCode::Custom(code) => code,
        }
    }

    /// Parse a provider status string. Matching ignores case.
    pub fn from_str(code: &str) -> Self {
        match code.trim().to_uppercase().as_str() {
            "OK" => StatusCode::Ok,
            "ZERO_RESULTS" => StatusCode::ZeroResults,
            "OVER_QUERY_LIMIT" => StatusCode::OverQueryLimit,
            "REQUEST_DENIED" => StatusCode::RequestDenied,
            "INVALID_REQUEST" => StatusCode::InvalidRequest,
            "UNKNOWN_ERROR" => StatusCode::UnknownError,
            _ => StatusCode::Custom(code.trim().to_string()),
        }
    }

    /// Whether classification may proceed.
    pub fn is_ok(&self) -> bool {
        matches!(self, StatusCode::Ok)
    }

    /// User-facing explanation of the status.
    pub fn explanation(&self) -> &'static str {
        match self {
            StatusCode::Ok => "The address was geocoded successfully.",
            StatusCode::ZeroResults => {
                "'ZERO_RESULTS' indicates that the parse was successful but returned no results.\n\
                 This may occur if the geocoder was passed a non-existent address."
            }
            StatusCode::OverQueryLimit => {
                "'OVER_QUERY_LIMIT' indicates that the script is over its verification quota."
            }
            StatusCode::RequestDenied => {
                "'REQUEST_DENIED' indicates that your address parse request was denied.\n\
                 Please report this as soon as possible."
            }
            StatusCode::InvalidRequest => {
                "'INVALID_REQUEST' generally indicates that critical components of the address are missing."
            }
            StatusCode::UnknownError => {
                "'UNKNOWN_ERROR' indicates that the request could not be processed due to a server error.\n\
                 The request may succeed if you try again."
            }
            StatusCode::Custom(_) => "The geocoder returned a status this tool does not recognise.",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one geocoding query.
///
/// `components` is empty unless `status` is [`StatusCode::Ok`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeocodeOutcome {
    /// Provider status
    pub status: StatusCode,
    /// Components of the first result, in provider order
    pub components: Vec<AddressComponent>,
    /// Free-text detail the provider attached to a failure, if any
    pub error_message: Option<String>,
}

impl GeocodeOutcome {
    /// Create a successful outcome.
    pub fn ok(components: Vec<AddressComponent>) -> Self {
        Self {
            status: StatusCode::Ok,
            components,
            error_message: None,
        }
    }

    /// Create a failed outcome carrying no components.
    pub fn failed(status: StatusCode) -> Self {
        Self {
            status,
            components: Vec::new(),
            error_message: None,
        }
    }
}

/// Which provider name is read as a component's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueForm {
    /// Full name (e.g. "Illinois")
    #[default]
    Long,
    /// Abbreviated name (e.g. "IL")
    Short,
}
