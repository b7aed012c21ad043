//! Imply Polaris provider
//!
//! A read-only infrastructure-as-code provider for the Imply Polaris
//! analytics platform. The crate supplies:
//!
//! - **API client**: an authenticated HTTP client for the Polaris REST API
//!   with host normalization and a bounded request timeout
//! - **Data sources**: read-only bindings over users, groups, permissions,
//!   tables, connections, jobs, alerts, data cubes, and dashboards
//! - **Provider shell**: configuration resolution (explicit values override
//!   the `IMPLY_HOST` / `IMPLY_API_KEY` environment variables) and one-time
//!   client construction shared across every data source
//! - **Schema & diagnostics**: declarative attribute schemas and structured
//!   user-facing diagnostics
//! - **Testing**: an in-process harness that drives the validate → configure
//!   → read pipeline without a host
//!
//! # Quick Start
//!
//! ```ignore
//! use imply_provider::ImplyProvider;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     imply_provider::init_logging();
//!
//!     let mut provider = ImplyProvider::new("dev");
//!     let diagnostics = provider.configure(&json!({
//!         "host": "https://example.app.imply.io",
//!         "api_key": "…",
//!     }));
//!     assert!(diagnostics.is_empty());
//!
//!     let groups = provider.read_data_source("imply_groups", &json!({})).await?;
//!     println!("{groups}");
//!     Ok(())
//! }
//! ```
//!
//! # Data sources
//!
//! Listing sources (`imply_users`, `imply_groups`, `imply_permissions`,
//! `imply_tables`, `imply_connections`, `imply_jobs`, `imply_alerts`,
//! `imply_data_cubes`, `imply_dashboards`) take no configuration and return
//! an `items` list. Singular sources (`imply_user`, `imply_group`) take a
//! required `id` and return the entity's attributes at the top level.
//!
//! The provider only reads: there is no create/update/delete surface, no
//! retry or backoff, and no pagination. The remote API is the sole source
//! of truth; state is rebuilt from it on every read.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod config;
pub mod datasource;
pub mod error;
pub mod logging;
pub mod model;
pub mod provider;
pub mod schema;
pub mod testing;
pub mod validation;

// Re-export main types at crate root
pub use client::ApiClient;
pub use config::{ProviderConfig, API_KEY_ENV_VAR, HOST_ENV_VAR};
pub use datasource::DataSource;
pub use error::ProviderError;
pub use logging::{init_logging, try_init_logging};
pub use provider::{ImplyProvider, ProviderMetadata, PROVIDER_TYPE_NAME};
pub use schema::{Diagnostic, DiagnosticSeverity, ProviderSchema};

// Re-export async_trait for data source implementations
pub use async_trait::async_trait;

// Re-export commonly used external crates
pub use serde_json;
pub use tracing;
