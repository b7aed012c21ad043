//! Monitoring alert data source.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::client::ApiClient;
use crate::error::ProviderError;
use crate::model::{decode_values, Alert};
use crate::schema::{Attribute, AttributeType, Schema};

use super::{configured, DataSource};

fn alert_object() -> AttributeType {
    AttributeType::object([
        ("id", AttributeType::String),
        ("name", AttributeType::String),
        ("description", AttributeType::String),
        ("query", AttributeType::String),
        ("condition", AttributeType::String),
        ("threshold", AttributeType::Float64),
        ("enabled", AttributeType::Bool),
        ("created_on", AttributeType::String),
        ("last_triggered_on", AttributeType::String),
    ])
}

/// Lists every monitoring alert.
#[derive(Debug, Default)]
pub struct AlertsDataSource {
    client: Option<Arc<ApiClient>>,
}

impl AlertsDataSource {
    /// Create an unconfigured alerts data source.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DataSource for AlertsDataSource {
    fn type_name(&self) -> &'static str {
        "alerts"
    }

    fn schema(&self) -> Schema {
        Schema::v0().with_attribute(
            "items",
            Attribute::computed(AttributeType::list(alert_object())),
        )
    }

    fn configure(&mut self, client: Arc<ApiClient>) {
        self.client = Some(client);
    }

    async fn read(&self, _config: &Value) -> Result<Value, ProviderError> {
        let client = configured(&self.client)?;
        let response = client.get("/alerts").await?;
        let alerts: Vec<Alert> = decode_values(response)?;
        debug!(count = alerts.len(), "decoded alert listing");
        Ok(json!({ "items": alerts }))
    }
}
