//! Provider configuration resolution.
//!
//! Connection settings come from the provider configuration block, falling
//! back to environment variables. Explicit configuration always wins; after
//! resolution both values must be non-empty or a per-field diagnostic with
//! guidance text is produced.

use serde::Deserialize;
use serde_json::Value;

use crate::schema::Diagnostic;

/// Environment variable consulted when `host` is not configured.
pub const HOST_ENV_VAR: &str = "IMPLY_HOST";

/// Environment variable consulted when `api_key` is not configured.
pub const API_KEY_ENV_VAR: &str = "IMPLY_API_KEY";

/// Raw provider configuration as supplied by the practitioner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProviderConfig {
    /// The Imply API host.
    #[serde(default, deserialize_with = "crate::model::lenient")]
    pub host: Option<String>,
    /// The Imply API key.
    #[serde(default, deserialize_with = "crate::model::lenient")]
    pub api_key: Option<String>,
}

/// Connection settings after environment fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Host to connect to.
    pub host: String,
    /// API key for authentication.
    pub api_key: String,
}

impl ProviderConfig {
    /// Read the configuration out of a JSON value.
    ///
    /// Unknown attributes are ignored and mistyped ones behave as unset,
    /// matching the defensive-read convention used for API responses.
    pub fn from_value(config: &Value) -> Self {
        ProviderConfig::deserialize(config.clone()).unwrap_or_default()
    }

    /// Resolve the configuration against the process environment.
    pub fn resolve(&self) -> Result<ResolvedConfig, Vec<Diagnostic>> {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    /// Resolve with an injectable environment lookup.
    ///
    /// Explicitly configured values take precedence over the environment,
    /// even when empty; an empty result for either field is an error
    /// diagnostic naming the attribute.
    pub fn resolve_with(
        &self,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<ResolvedConfig, Vec<Diagnostic>> {
        let host = match &self.host {
            Some(host) => host.clone(),
            None => env(HOST_ENV_VAR).unwrap_or_default(),
        };
        let api_key = match &self.api_key {
            Some(api_key) => api_key.clone(),
            None => env(API_KEY_ENV_VAR).unwrap_or_default(),
        };

        let mut diagnostics = Vec::new();
        if host.is_empty() {
            diagnostics.push(
                Diagnostic::error("Missing Imply API Host")
                    .with_detail(
                        "The provider cannot create the Imply API client as there is a missing \
                         or empty value for the Imply API host. Set the host value in the \
                         configuration or use the IMPLY_HOST environment variable. If either is \
                         already set, ensure the value is not empty.",
                    )
                    .with_attribute("host"),
            );
        }
        if api_key.is_empty() {
            diagnostics.push(
                Diagnostic::error("Missing Imply API Key")
                    .with_detail(
                        "The provider cannot create the Imply API client as there is a missing \
                         or empty value for the Imply API key. Set the api_key value in the \
                         configuration or use the IMPLY_API_KEY environment variable. If either \
                         is already set, ensure the value is not empty.",
                    )
                    .with_attribute("api_key"),
            );
        }
        if !diagnostics.is_empty() {
            return Err(diagnostics);
        }

        Ok(ResolvedConfig { host, api_key })
    }
}
