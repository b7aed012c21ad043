//! Ingestion job data source.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::client::ApiClient;
use crate::error::ProviderError;
use crate::model::{decode_values, Job};
use crate::schema::{Attribute, AttributeType, Schema};

use super::{configured, DataSource};

fn job_object() -> AttributeType {
    AttributeType::object([
        ("id", AttributeType::String),
        ("name", AttributeType::String),
        ("type", AttributeType::String),
        ("status", AttributeType::String),
        ("source", AttributeType::String),
        ("destination", AttributeType::String),
        ("config", AttributeType::String),
        ("created_on", AttributeType::String),
        ("started_on", AttributeType::String),
        ("completed_on", AttributeType::String),
        ("error", AttributeType::String),
        ("progress", AttributeType::Float64),
        ("rows_processed", AttributeType::Int64),
    ])
}

/// Lists every ingestion job with its progress and status.
#[derive(Debug, Default)]
pub struct JobsDataSource {
    client: Option<Arc<ApiClient>>,
}

impl JobsDataSource {
    /// Create an unconfigured jobs data source.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DataSource for JobsDataSource {
    fn type_name(&self) -> &'static str {
        "jobs"
    }

    fn schema(&self) -> Schema {
        Schema::v0().with_attribute(
            "items",
            Attribute::computed(AttributeType::list(job_object())),
        )
    }

    fn configure(&mut self, client: Arc<ApiClient>) {
        self.client = Some(client);
    }

    async fn read(&self, _config: &Value) -> Result<Value, ProviderError> {
        let client = configured(&self.client)?;
        let response = client.get("/jobs").await?;
        let jobs: Vec<Job> = decode_values(response)?;
        debug!(count = jobs.len(), "decoded job listing");
        Ok(json!({ "items": jobs }))
    }
}
