//! HTTP client for the Polaris REST API.
//!
//! The client owns the normalized base URL and the credential; every data
//! source shares one instance, injected by the provider at configure time.
//! Requests are synchronous request/response with a bounded timeout. There
//! is no retry, backoff, or pagination handling.

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde_json::{Map, Value};
use tracing::{debug, error};

use crate::error::ProviderError;

/// Control-plane domain suffix rewritten to the API domain.
const CONTROL_PLANE_DOMAIN: &str = ".app.imply.io";

/// Data-plane API domain suffix.
const API_DOMAIN: &str = ".api.imply.io";

/// Versioned path prefix appended to the normalized host.
const API_VERSION: &str = "v1";

/// Per-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Statuses treated as success; everything else is an API error.
const SUCCESS_STATUSES: [u16; 3] = [200, 201, 204];

/// Authenticated client for the Polaris API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a client for the given host and API key.
    ///
    /// Both values must be non-empty. The host is normalized by rewriting
    /// the control-plane domain (`.app.imply.io`) to the API domain
    /// (`.api.imply.io`) once, ensuring a single trailing `/`, and appending
    /// the `v1` prefix.
    pub fn new(host: &str, api_key: &str) -> Result<Self, ProviderError> {
        if host.is_empty() {
            return Err(ProviderError::Validation(
                "host cannot be empty".to_string(),
            ));
        }
        if api_key.is_empty() {
            return Err(ProviderError::Validation(
                "api key cannot be empty".to_string(),
            ));
        }

        let mut base_url = host.replacen(CONTROL_PLANE_DOMAIN, API_DOMAIN, 1);
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        base_url.push_str(API_VERSION);

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            base_url,
            api_key: format!("Basic {api_key}"),
            http,
        })
    }

    /// The normalized base URL requests are issued against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Perform a GET request.
    pub async fn get(&self, path: &str) -> Result<Map<String, Value>, ProviderError> {
        self.request(Method::GET, path, None).await
    }

    /// Perform a POST request with a JSON body.
    pub async fn post(&self, path: &str, body: &Value) -> Result<Map<String, Value>, ProviderError> {
        self.request(Method::POST, path, Some(body)).await
    }

    /// Perform a PUT request with a JSON body.
    pub async fn put(&self, path: &str, body: &Value) -> Result<Map<String, Value>, ProviderError> {
        self.request(Method::PUT, path, Some(body)).await
    }

    /// Perform a DELETE request.
    pub async fn delete(&self, path: &str) -> Result<(), ProviderError> {
        self.request(Method::DELETE, path, None).await.map(|_| ())
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Map<String, Value>, ProviderError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "sending API request");

        let mut request = self
            .http
            .request(method, url.as_str())
            .header(AUTHORIZATION, self.api_key.as_str())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        if !SUCCESS_STATUSES.contains(&status) {
            error!(status, %url, "API request failed");
            return Err(ProviderError::api(status, body));
        }

        if body.is_empty() {
            return Ok(Map::new());
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_host_and_key() {
        assert!(matches!(
            ApiClient::new("", "key"),
            Err(ProviderError::Validation(_))
        ));
        assert!(matches!(
            ApiClient::new("https://foo.app.imply.io", ""),
            Err(ProviderError::Validation(_))
        ));
    }

    #[test]
    fn rewrites_control_plane_domain_to_api_domain() {
        let client = ApiClient::new("https://foo.app.imply.io", "key").unwrap();
        assert_eq!(client.base_url(), "https://foo.api.imply.io/v1");
    }

    #[test]
    fn trailing_slash_is_not_doubled() {
        let client = ApiClient::new("https://foo.app.imply.io/", "key").unwrap();
        assert_eq!(client.base_url(), "https://foo.api.imply.io/v1");
    }

    #[test]
    fn rewrites_domain_at_most_once() {
        let client = ApiClient::new("https://foo.app.imply.io.app.imply.io", "key").unwrap();
        assert_eq!(
            client.base_url(),
            "https://foo.api.imply.io.app.imply.io/v1"
        );
    }

    #[test]
    fn other_hosts_pass_through_unchanged() {
        let client = ApiClient::new("http://127.0.0.1:8080", "key").unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:8080/v1");
    }
}
