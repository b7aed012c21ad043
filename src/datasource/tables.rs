//! Table catalog data source.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::client::ApiClient;
use crate::error::ProviderError;
use crate::model::{decode_values, Table};
use crate::schema::{Attribute, AttributeType, Schema};

use super::{configured, DataSource};

fn column_object() -> AttributeType {
    AttributeType::object([
        ("name", AttributeType::String),
        ("type", AttributeType::String),
        ("nullable", AttributeType::Bool),
        ("description", AttributeType::String),
    ])
}

fn table_object() -> AttributeType {
    AttributeType::object([
        ("id", AttributeType::String),
        ("name", AttributeType::String),
        ("type", AttributeType::String),
        ("schema_mode", AttributeType::String),
        ("partitioning", AttributeType::String),
        ("rollup", AttributeType::Bool),
        ("created_on", AttributeType::String),
        ("last_modified_on", AttributeType::String),
        ("row_count", AttributeType::Int64),
        ("size_bytes", AttributeType::Int64),
        ("columns", AttributeType::list(column_object())),
    ])
}

/// Lists every ingestion table with its column layout.
#[derive(Debug, Default)]
pub struct TablesDataSource {
    client: Option<Arc<ApiClient>>,
}

impl TablesDataSource {
    /// Create an unconfigured tables data source.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DataSource for TablesDataSource {
    fn type_name(&self) -> &'static str {
        "tables"
    }

    fn schema(&self) -> Schema {
        Schema::v0().with_attribute(
            "items",
            Attribute::computed(AttributeType::list(table_object())),
        )
    }

    fn configure(&mut self, client: Arc<ApiClient>) {
        self.client = Some(client);
    }

    async fn read(&self, _config: &Value) -> Result<Value, ProviderError> {
        let client = configured(&self.client)?;
        let response = client.get("/tables").await?;
        let tables: Vec<Table> = decode_values(response)?;
        debug!(count = tables.len(), "decoded table listing");
        Ok(json!({ "items": tables }))
    }
}
