//! Analytics data sources: data cubes and dashboards.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::client::ApiClient;
use crate::error::ProviderError;
use crate::model::{decode_values, Dashboard, DataCube};
use crate::schema::{Attribute, AttributeType, Schema};

use super::{configured, DataSource};

fn data_cube_object() -> AttributeType {
    AttributeType::object([
        ("id", AttributeType::String),
        ("name", AttributeType::String),
        ("description", AttributeType::String),
        ("table", AttributeType::String),
        ("config", AttributeType::String),
        ("created_on", AttributeType::String),
        ("last_used_on", AttributeType::String),
    ])
}

fn dashboard_object() -> AttributeType {
    AttributeType::object([
        ("id", AttributeType::String),
        ("name", AttributeType::String),
        ("description", AttributeType::String),
        ("layout", AttributeType::String),
        ("created_on", AttributeType::String),
        ("last_used_on", AttributeType::String),
    ])
}

/// Lists every analytics data cube.
#[derive(Debug, Default)]
pub struct DataCubesDataSource {
    client: Option<Arc<ApiClient>>,
}

impl DataCubesDataSource {
    /// Create an unconfigured data cubes data source.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DataSource for DataCubesDataSource {
    fn type_name(&self) -> &'static str {
        "data_cubes"
    }

    fn schema(&self) -> Schema {
        Schema::v0().with_attribute(
            "items",
            Attribute::computed(AttributeType::list(data_cube_object())),
        )
    }

    fn configure(&mut self, client: Arc<ApiClient>) {
        self.client = Some(client);
    }

    async fn read(&self, _config: &Value) -> Result<Value, ProviderError> {
        let client = configured(&self.client)?;
        let response = client.get("/dataCubes").await?;
        let cubes: Vec<DataCube> = decode_values(response)?;
        debug!(count = cubes.len(), "decoded data cube listing");
        Ok(json!({ "items": cubes }))
    }
}

/// Lists every analytics dashboard.
#[derive(Debug, Default)]
pub struct DashboardsDataSource {
    client: Option<Arc<ApiClient>>,
}

impl DashboardsDataSource {
    /// Create an unconfigured dashboards data source.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DataSource for DashboardsDataSource {
    fn type_name(&self) -> &'static str {
        "dashboards"
    }

    fn schema(&self) -> Schema {
        Schema::v0().with_attribute(
            "items",
            Attribute::computed(AttributeType::list(dashboard_object())),
        )
    }

    fn configure(&mut self, client: Arc<ApiClient>) {
        self.client = Some(client);
    }

    async fn read(&self, _config: &Value) -> Result<Value, ProviderError> {
        let client = configured(&self.client)?;
        let response = client.get("/dashboards").await?;
        let dashboards: Vec<Dashboard> = decode_values(response)?;
        debug!(count = dashboards.len(), "decoded dashboard listing");
        Ok(json!({ "items": dashboards }))
    }
}
