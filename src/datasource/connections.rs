//! Connection catalog data source.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::client::ApiClient;
use crate::error::ProviderError;
use crate::model::{decode_values, Connection};
use crate::schema::{Attribute, AttributeType, Schema};

use super::{configured, DataSource};

fn connection_object() -> AttributeType {
    AttributeType::object([
        ("id", AttributeType::String),
        ("name", AttributeType::String),
        ("type", AttributeType::String),
        ("description", AttributeType::String),
        ("config", AttributeType::String),
        ("created_on", AttributeType::String),
        ("last_used_on", AttributeType::String),
    ])
}

/// Lists every ingestion source connection.
#[derive(Debug, Default)]
pub struct ConnectionsDataSource {
    client: Option<Arc<ApiClient>>,
}

impl ConnectionsDataSource {
    /// Create an unconfigured connections data source.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DataSource for ConnectionsDataSource {
    fn type_name(&self) -> &'static str {
        "connections"
    }

    fn schema(&self) -> Schema {
        Schema::v0().with_attribute(
            "items",
            Attribute::computed(AttributeType::list(connection_object())),
        )
    }

    fn configure(&mut self, client: Arc<ApiClient>) {
        self.client = Some(client);
    }

    async fn read(&self, _config: &Value) -> Result<Value, ProviderError> {
        let client = configured(&self.client)?;
        let response = client.get("/connections").await?;
        let connections: Vec<Connection> = decode_values(response)?;
        debug!(count = connections.len(), "decoded connection listing");
        Ok(json!({ "items": connections }))
    }
}
