//! Error types and handling for geocode-fields.

use crate::types::StatusCode;

/// Result type alias for geocode-fields operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Message shown when a geocoded result cannot be mapped onto the address fields.
pub const NOT_GEOCODED_MESSAGE: &str = "Location not geocoded!";

/// Error types for geocoding and field classification.
///
/// Every variant is terminal for the address being processed; nothing is
/// retried automatically.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input address cannot be sent to the geocoder
    #[error("Invalid address: {message}")]
    InvalidAddress {
        /// Error message
        message: String,
    },

    /// Transport failure reaching the geocoding provider
    #[error("Network error: {message}")]
    NetworkError {
        /// Error message
        message: String,
    },

    /// The provider did not answer within the configured timeout
    #[error("Timeout error: {message}")]
    TimeoutError {
        /// Error message
        message: String,
    },

    /// Payload missing the expected structure
    #[error("Malformed response: {message}")]
    MalformedResponseError {
        /// Error message
        message: String,
    },

    /// Provider returned a non-OK status
    #[error("Geocode response status: {status}")]
    GeocodeStatusError {
        /// Status reported by the provider
        status: StatusCode,
    },

    /// Selected template references a position beyond the component count
    #[error("Component index {required_index} out of range for {actual_length} components")]
    ClassificationError {
        /// Highest component index the template needs
        required_index: usize,
        /// Number of components actually present
        actual_length: usize,
    },

    /// Client configuration could not be applied
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Error message
        message: String,
    },
}

impl Error {
    /// Create a new invalid address error
    pub fn invalid_address(message: impl Into<String>) -> Self {
        Self::InvalidAddress {
            message: message.into(),
        }
    }

    /// Create a new network error
    pub fn network_error(message: impl Into<String>) -> Self {
        Self::NetworkError {
            message: message.into(),
        }
    }

    /// Create a new timeout error
    pub fn timeout_error(message: impl Into<String>) -> Self {
        Self::TimeoutError {
            message: message.into(),
        }
    }

    /// Create a new malformed response error
    pub fn malformed_response(message: impl Into<String>) -> Self {
        Self::MalformedResponseError {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// The single message to present to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidAddress { .. } => "The address is invalid! It is either blank, \
                incomplete, or was not read properly."
                .to_string(),
            Self::NetworkError { message } => {
                format!("Unable to reach the geocoding service: {message}")
            }
            Self::TimeoutError { .. } => {
                "The geocoding service did not respond in time. Please try again.".to_string()
            }
            Self::MalformedResponseError { .. } => {
                "The geocoding service returned a response that could not be read.".to_string()
            }
            Self::GeocodeStatusError { status } => format!(
                "Error! Geocode response status: {status}\n\n{}",
                status.explanation()
            ),
            Self::ClassificationError { .. } => NOT_GEOCODED_MESSAGE.to_string(),
            Self::ConfigError { message } => {
                format!("The geocoding client is misconfigured: {message}")
            }
        }
    }

    /// Whether the error came from talking to the provider rather than from its data.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. } | Self::TimeoutError { .. } | Self::ConfigError { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_message() {
        let err = Error::ClassificationError {
            required_index: 8,
            actual_length: 8,
        };
        assert_eq!(err.user_message(), NOT_GEOCODED_MESSAGE);
        assert_eq!(
            err.to_string(),
            "Component index 8 out of range for 8 components"
        );
    }

    #[test]
    fn test_status_message_names_status() {
        let err = Error::GeocodeStatusError {
            status: StatusCode::ZeroResults,
        };
        let message = err.user_message();
        assert!(message.starts_with("Error! Geocode response status: ZERO_RESULTS"));
        assert!(message.ends_with(StatusCode::ZeroResults.explanation()));
        assert!(!message.contains("OVER_QUERY_LIMIT"));
    }

    #[test]
    fn test_transport_classification() {
        assert!(Error::network_error("refused").is_transport());
        assert!(Error::timeout_error("elapsed").is_transport());
        assert!(!Error::malformed_response("no status").is_transport());
    }
}
