//! Permission catalog data source.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::client::ApiClient;
use crate::error::ProviderError;
use crate::model::{decode_values, Permission};
use crate::schema::{Attribute, AttributeType, Schema};

use super::{configured, permission_object, DataSource};

/// Lists every permission known to the platform.
#[derive(Debug, Default)]
pub struct PermissionsDataSource {
    client: Option<Arc<ApiClient>>,
}

impl PermissionsDataSource {
    /// Create an unconfigured permissions data source.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DataSource for PermissionsDataSource {
    fn type_name(&self) -> &'static str {
        "permissions"
    }

    fn schema(&self) -> Schema {
        Schema::v0().with_attribute(
            "items",
            Attribute::computed(AttributeType::list(permission_object())),
        )
    }

    fn configure(&mut self, client: Arc<ApiClient>) {
        self.client = Some(client);
    }

    async fn read(&self, _config: &Value) -> Result<Value, ProviderError> {
        let client = configured(&self.client)?;
        let response = client.get("/permissions").await?;
        let permissions: Vec<Permission> = decode_values(response)?;
        debug!(count = permissions.len(), "decoded permission listing");
        Ok(json!({ "items": permissions }))
    }
}
