//! Test harness for exercising the provider without a host process.
//!
//! [`ProviderHarness`] drives the same pipeline a host would: validate the
//! configuration, configure the provider, validate a data source
//! configuration, then read. Error diagnostics become [`HarnessError`]s so
//! tests can assert on failures directly.
//!
//! # Example
//!
//! ```ignore
//! use imply_provider::{ImplyProvider, testing::ProviderHarness};
//! use serde_json::json;
//!
//! #[tokio::test]
//! async fn reads_groups() {
//!     let mut harness = ProviderHarness::new(ImplyProvider::new("test"));
//!     harness
//!         .configure(&json!({"host": "https://foo.app.imply.io", "api_key": "key"}))
//!         .unwrap();
//!     let state = harness.read("imply_groups", &json!({})).await.unwrap();
//!     assert!(state["items"].is_array());
//! }
//! ```

use serde_json::Value;

use crate::error::ProviderError;
use crate::provider::ImplyProvider;
use crate::schema::{Diagnostic, DiagnosticSeverity, ProviderSchema};

/// Drives an [`ImplyProvider`] through the host pipeline in-process.
pub struct ProviderHarness {
    provider: ImplyProvider,
}

impl ProviderHarness {
    /// Wrap a provider for testing.
    pub fn new(provider: ImplyProvider) -> Self {
        Self { provider }
    }

    /// Borrow the underlying provider.
    pub fn provider(&self) -> &ImplyProvider {
        &self.provider
    }

    /// The provider's full schema.
    pub fn schema(&self) -> ProviderSchema {
        self.provider.schema()
    }

    /// Full type names of every registered data source.
    pub fn data_source_types(&self) -> Vec<String> {
        self.provider.metadata().data_sources
    }

    /// Validate the provider configuration.
    pub fn validate_config(&self, config: &Value) -> Result<(), HarnessError> {
        check_diagnostics(self.provider.validate_config(config))
    }

    /// Configure the provider, failing on any error diagnostic.
    pub fn configure(&mut self, config: &Value) -> Result<(), HarnessError> {
        check_diagnostics(self.provider.configure(config))
    }

    /// Validate a data source configuration.
    pub fn validate_data_source_config(
        &self,
        type_name: &str,
        config: &Value,
    ) -> Result<(), HarnessError> {
        let diagnostics = self
            .provider
            .validate_data_source_config(type_name, config)?;
        check_diagnostics(diagnostics)
    }

    /// Validate then read a data source, as the host pipeline would.
    pub async fn read(&self, type_name: &str, config: &Value) -> Result<Value, HarnessError> {
        self.validate_data_source_config(type_name, config)?;
        self.provider
            .read_data_source(type_name, config)
            .await
            .map_err(HarnessError::from)
    }
}

/// A test-facing failure: either error diagnostics or a provider error.
#[derive(Debug)]
pub enum HarnessError {
    /// The operation produced error diagnostics.
    Diagnostics(Vec<Diagnostic>),
    /// The operation failed with a provider error.
    Provider(ProviderError),
}

impl std::fmt::Display for HarnessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HarnessError::Diagnostics(diags) => {
                writeln!(f, "operation failed with {} diagnostic(s):", diags.len())?;
                for diag in diags {
                    write!(f, "  [{:?}] {}", diag.severity, diag.summary)?;
                    if let Some(detail) = &diag.detail {
                        write!(f, ": {detail}")?;
                    }
                    if let Some(attr) = &diag.attribute {
                        write!(f, " (at {attr})")?;
                    }
                    writeln!(f)?;
                }
                Ok(())
            }
            HarnessError::Provider(err) => write!(f, "provider error: {err}"),
        }
    }
}

impl std::error::Error for HarnessError {}

impl From<ProviderError> for HarnessError {
    fn from(err: ProviderError) -> Self {
        HarnessError::Provider(err)
    }
}

impl HarnessError {
    /// The diagnostics carried by this error, when there are any.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            HarnessError::Diagnostics(diags) => diags,
            HarnessError::Provider(_) => &[],
        }
    }
}

fn check_diagnostics(diagnostics: Vec<Diagnostic>) -> Result<(), HarnessError> {
    let errors: Vec<_> = diagnostics
        .into_iter()
        .filter(|d| matches!(d.severity, DiagnosticSeverity::Error))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(HarnessError::Diagnostics(errors))
    }
}

/// Assert that diagnostics contain no errors.
///
/// # Panics
///
/// Panics if there is any error diagnostic.
pub fn assert_no_errors(diagnostics: &[Diagnostic]) {
    let errors: Vec<_> = diagnostics
        .iter()
        .filter(|d| matches!(d.severity, DiagnosticSeverity::Error))
        .collect();

    assert!(
        errors.is_empty(),
        "expected no errors, but got {} error(s): {:?}",
        errors.len(),
        errors.iter().map(|d| &d.summary).collect::<Vec<_>>()
    );
}

/// Assert that diagnostics contain at least one error.
///
/// # Panics
///
/// Panics if there are no error diagnostics.
pub fn assert_has_errors(diagnostics: &[Diagnostic]) {
    let has_errors = diagnostics
        .iter()
        .any(|d| matches!(d.severity, DiagnosticSeverity::Error));

    assert!(has_errors, "expected at least one error, but got none");
}

/// Assert that some error diagnostic's summary contains the substring.
///
/// # Panics
///
/// Panics if no error diagnostic matches.
pub fn assert_error_contains(diagnostics: &[Diagnostic], substring: &str) {
    let matched = diagnostics
        .iter()
        .any(|d| matches!(d.severity, DiagnosticSeverity::Error) && d.summary.contains(substring));

    assert!(
        matched,
        "expected an error containing '{}', but none matched. Errors: {:?}",
        substring,
        diagnostics
            .iter()
            .filter(|d| matches!(d.severity, DiagnosticSeverity::Error))
            .map(|d| &d.summary)
            .collect::<Vec<_>>()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn harness_exposes_schema_and_types() {
        let harness = ProviderHarness::new(ImplyProvider::new("test"));
        assert!(harness
            .data_source_types()
            .contains(&"imply_permissions".to_string()));
        assert!(harness.schema().data_sources.contains_key("imply_users"));
    }

    #[test]
    fn configure_failure_surfaces_diagnostics() {
        let mut harness = ProviderHarness::new(ImplyProvider::new("test"));
        let err = harness
            .configure(&json!({"host": "", "api_key": ""}))
            .unwrap_err();

        assert_eq!(err.diagnostics().len(), 2);
        let display = err.to_string();
        assert!(display.contains("Missing Imply API Host"));
        assert!(display.contains("(at api_key)"));
    }

    #[test]
    fn validate_config_accepts_empty_provider_config() {
        // host and api_key are optional at validation time; resolution
        // happens in configure.
        let harness = ProviderHarness::new(ImplyProvider::new("test"));
        assert!(harness.validate_config(&json!({})).is_ok());
    }

    #[tokio::test]
    async fn read_validates_before_dispatch() {
        let harness = ProviderHarness::new(ImplyProvider::new("test"));
        let err = harness.read("imply_user", &json!({})).await.unwrap_err();
        assert!(matches!(err, HarnessError::Diagnostics(_)));
    }

    #[test]
    fn assertion_helpers() {
        let warnings = vec![Diagnostic::warning("just a warning")];
        assert_no_errors(&warnings);

        let errors = vec![Diagnostic::error("Missing Imply API Key")];
        assert_has_errors(&errors);
        assert_error_contains(&errors, "API Key");
    }

    #[test]
    #[should_panic(expected = "expected no errors")]
    fn assert_no_errors_panics_on_error() {
        assert_no_errors(&[Diagnostic::error("boom")]);
    }
}
