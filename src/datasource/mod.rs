//! Read-only data sources over the Polaris API.
//!
//! Every data source implements the same capability surface: a type name,
//! a schema, a configure hook that receives the shared API client, and an
//! async read that maps one API call into output state. Listing sources
//! expect the `"values"` envelope and produce `{"items": [...]}`; singular
//! sources take a required `id` and produce the entity at the top level.

mod alerts;
mod analytics;
mod connections;
mod groups;
mod jobs;
mod permissions;
mod tables;
mod users;

pub use alerts::AlertsDataSource;
pub use analytics::{DashboardsDataSource, DataCubesDataSource};
pub use connections::ConnectionsDataSource;
pub use groups::{GroupDataSource, GroupsDataSource};
pub use jobs::JobsDataSource;
pub use permissions::PermissionsDataSource;
pub use tables::TablesDataSource;
pub use users::{UserDataSource, UsersDataSource};

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ProviderError;
use crate::schema::{AttributeType, Schema};

/// A read-only binding that fetches remote state into output state.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Type name suffix; the provider prefixes it with its own type name.
    fn type_name(&self) -> &'static str;

    /// Schema of the data source's attributes.
    fn schema(&self) -> Schema;

    /// Receive the shared API client from the provider.
    fn configure(&mut self, client: Arc<ApiClient>);

    /// Fetch remote state and map it into output state.
    async fn read(&self, config: &Value) -> Result<Value, ProviderError>;
}

/// Borrow the injected client, or fail when the provider never configured us.
pub(crate) fn configured(client: &Option<Arc<ApiClient>>) -> Result<&ApiClient, ProviderError> {
    client.as_deref().ok_or_else(|| {
        ProviderError::Configuration(
            "the data source has not been configured with an API client".to_string(),
        )
    })
}

/// Pull the required `id` attribute out of a singular lookup configuration.
pub(crate) fn required_id(config: &Value) -> Result<&str, ProviderError> {
    config
        .get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| {
            ProviderError::Validation("the \"id\" attribute is required".to_string())
        })
}

/// Attribute type of a permission entry.
pub(crate) fn permission_object() -> AttributeType {
    AttributeType::object([
        ("id", AttributeType::String),
        ("name", AttributeType::String),
        ("resources", AttributeType::list(AttributeType::String)),
    ])
}

/// Attribute type of a group entry, including its nested permissions.
pub(crate) fn group_object() -> AttributeType {
    AttributeType::object([
        ("id", AttributeType::String),
        ("name", AttributeType::String),
        ("read_only", AttributeType::Bool),
        ("permissions", AttributeType::list(permission_object())),
        ("user_count", AttributeType::Int64),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_client_is_a_configuration_error() {
        let err = configured(&None).unwrap_err();
        assert!(matches!(err, ProviderError::Configuration(_)));
    }

    #[test]
    fn required_id_accepts_non_empty_strings_only() {
        use serde_json::json;

        assert_eq!(required_id(&json!({"id": "g1"})).unwrap(), "g1");
        assert!(required_id(&json!({})).is_err());
        assert!(required_id(&json!({"id": ""})).is_err());
        assert!(required_id(&json!({"id": 7})).is_err());
    }
}
