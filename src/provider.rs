//! The provider shell.
//!
//! `ImplyProvider` owns the data source registry, resolves connection
//! settings at configure time, constructs the shared [`ApiClient`] once,
//! and hands it to every data source. All configuration failures surface
//! as diagnostics; read failures surface as [`ProviderError`]s.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, info, instrument};

use crate::client::ApiClient;
use crate::config::ProviderConfig;
use crate::datasource::{
    AlertsDataSource, ConnectionsDataSource, DashboardsDataSource, DataCubesDataSource,
    DataSource, GroupDataSource, GroupsDataSource, JobsDataSource, PermissionsDataSource,
    TablesDataSource, UserDataSource, UsersDataSource,
};
use crate::error::ProviderError;
use crate::schema::{Attribute, Diagnostic, ProviderSchema, Schema};
use crate::validation;

/// The provider type name; data source type names are prefixed with it.
pub const PROVIDER_TYPE_NAME: &str = "imply";

/// Provider identity and the data source types it serves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderMetadata {
    /// The provider type name.
    pub type_name: String,
    /// The provider version.
    pub version: String,
    /// Full type names of every registered data source.
    pub data_sources: Vec<String>,
}

/// The Imply Polaris provider.
pub struct ImplyProvider {
    version: String,
    client: Option<Arc<ApiClient>>,
    data_sources: Vec<Box<dyn DataSource>>,
}

impl ImplyProvider {
    /// Create a provider with every data source registered.
    ///
    /// The version is set on release; use `"dev"` for local builds and
    /// `"test"` under acceptance testing.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            client: None,
            data_sources: vec![
                Box::new(UsersDataSource::new()),
                Box::new(UserDataSource::new()),
                Box::new(GroupsDataSource::new()),
                Box::new(GroupDataSource::new()),
                Box::new(PermissionsDataSource::new()),
                Box::new(TablesDataSource::new()),
                Box::new(ConnectionsDataSource::new()),
                Box::new(JobsDataSource::new()),
                Box::new(AlertsDataSource::new()),
                Box::new(DataCubesDataSource::new()),
                Box::new(DashboardsDataSource::new()),
            ],
        }
    }

    /// Provider metadata: type name, version, and data source type names.
    pub fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            type_name: PROVIDER_TYPE_NAME.to_string(),
            version: self.version.clone(),
            data_sources: self
                .data_sources
                .iter()
                .map(|ds| full_type_name(ds.type_name()))
                .collect(),
        }
    }

    /// The provider configuration schema plus every data source schema.
    pub fn schema(&self) -> ProviderSchema {
        let provider_config = Schema::v0()
            .with_attribute(
                "host",
                Attribute::optional_string().with_description(
                    "The Imply API host. Can be set via the IMPLY_HOST environment variable.",
                ),
            )
            .with_attribute(
                "api_key",
                Attribute::optional_string().sensitive().with_description(
                    "The Imply API key. Can be set via the IMPLY_API_KEY environment variable.",
                ),
            );

        self.data_sources
            .iter()
            .fold(
                ProviderSchema::new().with_provider_config(provider_config),
                |schema, ds| schema.with_data_source(full_type_name(ds.type_name()), ds.schema()),
            )
    }

    /// Validate the provider configuration without configuring.
    pub fn validate_config(&self, config: &Value) -> Vec<Diagnostic> {
        validation::validate(&self.schema().provider, config)
    }

    /// Resolve settings, build the API client, and inject it into every
    /// data source.
    ///
    /// Returns the diagnostics describing why configuration failed; an
    /// empty list means the provider is ready. On failure nothing is
    /// injected and the provider stays unconfigured.
    #[instrument(skip(self, config), name = "provider.configure")]
    pub fn configure(&mut self, config: &Value) -> Vec<Diagnostic> {
        let resolved = match ProviderConfig::from_value(config).resolve() {
            Ok(resolved) => resolved,
            Err(diagnostics) => {
                error!(
                    diagnostics = diagnostics.len(),
                    "provider configuration is incomplete"
                );
                return diagnostics;
            }
        };

        let client = match ApiClient::new(&resolved.host, &resolved.api_key) {
            Ok(client) => Arc::new(client),
            Err(err) => {
                error!(error = %err, "unable to create the Imply API client");
                return vec![Diagnostic::error("Unable to Create Imply API Client")
                    .with_detail(err.to_string())];
            }
        };

        for ds in &mut self.data_sources {
            ds.configure(Arc::clone(&client));
        }
        info!(base_url = client.base_url(), "provider configured");
        self.client = Some(client);
        Vec::new()
    }

    /// Whether [`configure`](Self::configure) has completed successfully.
    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    /// Validate a data source configuration against its schema.
    pub fn validate_data_source_config(
        &self,
        type_name: &str,
        config: &Value,
    ) -> Result<Vec<Diagnostic>, ProviderError> {
        let ds = self.find(type_name)?;
        Ok(validation::validate(&ds.schema(), config))
    }

    /// Read a data source into output state.
    #[instrument(skip(self, config), name = "provider.read_data_source")]
    pub async fn read_data_source(
        &self,
        type_name: &str,
        config: &Value,
    ) -> Result<Value, ProviderError> {
        let ds = self.find(type_name)?;
        debug!(data_source = type_name, "reading data source");
        match ds.read(config).await {
            Ok(state) => {
                debug!(data_source = type_name, "data source read completed");
                Ok(state)
            }
            Err(err) => {
                error!(data_source = type_name, error = %err, "data source read failed");
                Err(err)
            }
        }
    }

    fn find(&self, type_name: &str) -> Result<&dyn DataSource, ProviderError> {
        self.data_sources
            .iter()
            .find(|ds| full_type_name(ds.type_name()) == type_name)
            .map(|ds| &**ds)
            .ok_or_else(|| ProviderError::UnknownDataSource(type_name.to_string()))
    }
}

fn full_type_name(suffix: &str) -> String {
    format!("{PROVIDER_TYPE_NAME}_{suffix}")
}
