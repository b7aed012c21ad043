//! Group data sources: the full group listing and single-group lookup.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::client::ApiClient;
use crate::error::ProviderError;
use crate::model::{decode_item, decode_values, Group};
use crate::schema::{Attribute, AttributeType, Schema};

use super::{configured, group_object, permission_object, required_id, DataSource};

/// Lists every user group.
#[derive(Debug, Default)]
pub struct GroupsDataSource {
    client: Option<Arc<ApiClient>>,
}

impl GroupsDataSource {
    /// Create an unconfigured groups data source.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DataSource for GroupsDataSource {
    fn type_name(&self) -> &'static str {
        "groups"
    }

    fn schema(&self) -> Schema {
        Schema::v0().with_attribute(
            "items",
            Attribute::computed(AttributeType::list(group_object())),
        )
    }

    fn configure(&mut self, client: Arc<ApiClient>) {
        self.client = Some(client);
    }

    async fn read(&self, _config: &Value) -> Result<Value, ProviderError> {
        let client = configured(&self.client)?;
        let response = client.get("/groups").await?;
        let groups: Vec<Group> = decode_values(response)?;
        debug!(count = groups.len(), "decoded group listing");
        Ok(json!({ "items": groups }))
    }
}

/// Looks up a single group by id.
#[derive(Debug, Default)]
pub struct GroupDataSource {
    client: Option<Arc<ApiClient>>,
}

impl GroupDataSource {
    /// Create an unconfigured group lookup data source.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DataSource for GroupDataSource {
    fn type_name(&self) -> &'static str {
        "group"
    }

    fn schema(&self) -> Schema {
        Schema::v0()
            .with_attribute("id", Attribute::required_string())
            .with_attribute("name", Attribute::computed_string())
            .with_attribute("read_only", Attribute::computed_bool())
            .with_attribute(
                "permissions",
                Attribute::computed(AttributeType::list(permission_object())),
            )
            .with_attribute("user_count", Attribute::computed_int64())
    }

    fn configure(&mut self, client: Arc<ApiClient>) {
        self.client = Some(client);
    }

    async fn read(&self, config: &Value) -> Result<Value, ProviderError> {
        let client = configured(&self.client)?;
        let id = required_id(config)?;
        let response = client.get(&format!("/groups/{id}")).await?;
        let group: Group = decode_item(response)?;
        Ok(serde_json::to_value(&group)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_schema_has_computed_items() {
        let schema = GroupsDataSource::new().schema();
        assert!(schema.attributes["items"].flags.computed);
    }

    #[test]
    fn lookup_schema_requires_id() {
        let schema = GroupDataSource::new().schema();
        assert!(schema.attributes["id"].flags.required);
        assert!(schema.attributes["user_count"].flags.computed);
    }

    #[tokio::test]
    async fn lookup_without_id_fails_validation() {
        let mut source = GroupDataSource::new();
        source.configure(Arc::new(
            ApiClient::new("https://foo.app.imply.io", "key").unwrap(),
        ));
        let err = source.read(&json!({})).await.unwrap_err();
        assert!(matches!(err, ProviderError::Validation(_)));
    }
}
