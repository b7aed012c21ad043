//! Error types for the Imply provider.

use thiserror::Error;

use crate::schema::Diagnostic;

/// Errors produced by the provider, its API client, and its data sources.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider or a data source is missing required configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An input value failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The requested data source type is not registered with the provider.
    #[error("Unknown data source type: {0}")]
    UnknownDataSource(String),

    /// The API answered with a status outside the accepted set.
    ///
    /// The display form carries the numeric status and the raw body text
    /// verbatim, so callers can surface exactly what the API returned.
    #[error("status: {status}, body: {body}")]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// Raw response body text, unmodified.
        body: String,
    },

    /// Request construction or network failure.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not valid JSON.
    #[error("Error decoding response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The response decoded, but not into the shape the caller expected.
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// Error for a response whose status is outside the accepted set.
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }
}

impl From<ProviderError> for Diagnostic {
    fn from(err: ProviderError) -> Self {
        Diagnostic::error(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::DiagnosticSeverity;

    #[test]
    fn api_error_carries_status_and_body_verbatim() {
        let err = ProviderError::api(418, r#"{"error":"teapot"}"#);
        assert_eq!(err.to_string(), r#"status: 418, body: {"error":"teapot"}"#);
    }

    #[test]
    fn error_display() {
        let err = ProviderError::Configuration("host cannot be empty".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: host cannot be empty"
        );

        let err = ProviderError::UnknownDataSource("imply_widgets".to_string());
        assert_eq!(err.to_string(), "Unknown data source type: imply_widgets");

        let err = ProviderError::InvalidResponse("no \"values\" field".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid response format: no \"values\" field"
        );
    }

    #[test]
    fn error_converts_to_error_diagnostic() {
        let diag: Diagnostic = ProviderError::api(500, "boom").into();
        assert_eq!(diag.severity, DiagnosticSeverity::Error);
        assert!(diag.summary.contains("status: 500"));
        assert!(diag.summary.contains("boom"));
    }
}
