//! User data sources: the full account listing and single-account lookup.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::client::ApiClient;
use crate::error::ProviderError;
use crate::model::{decode_item, decode_values, User};
use crate::schema::{Attribute, AttributeType, Schema};

use super::{configured, group_object, permission_object, required_id, DataSource};

fn user_object() -> AttributeType {
    AttributeType::object([
        ("id", AttributeType::String),
        ("username", AttributeType::String),
        ("email", AttributeType::String),
        ("first_name", AttributeType::String),
        ("last_name", AttributeType::String),
        ("enabled", AttributeType::Bool),
        ("email_verified", AttributeType::Bool),
        ("permissions", AttributeType::list(permission_object())),
        ("groups", AttributeType::list(group_object())),
        ("identities", AttributeType::list(AttributeType::String)),
        ("actions", AttributeType::list(AttributeType::String)),
        ("created_on", AttributeType::String),
    ])
}

/// Lists every user account.
#[derive(Debug, Default)]
pub struct UsersDataSource {
    client: Option<Arc<ApiClient>>,
}

impl UsersDataSource {
    /// Create an unconfigured users data source.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DataSource for UsersDataSource {
    fn type_name(&self) -> &'static str {
        "users"
    }

    fn schema(&self) -> Schema {
        Schema::v0().with_attribute("items", Attribute::computed(AttributeType::list(user_object())))
    }

    fn configure(&mut self, client: Arc<ApiClient>) {
        self.client = Some(client);
    }

    async fn read(&self, _config: &Value) -> Result<Value, ProviderError> {
        let client = configured(&self.client)?;
        let response = client.get("/users").await?;
        let users: Vec<User> = decode_values(response)?;
        debug!(count = users.len(), "decoded user listing");
        Ok(json!({ "items": users }))
    }
}

/// Looks up a single user account by id.
#[derive(Debug, Default)]
pub struct UserDataSource {
    client: Option<Arc<ApiClient>>,
}

impl UserDataSource {
    /// Create an unconfigured user lookup data source.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DataSource for UserDataSource {
    fn type_name(&self) -> &'static str {
        "user"
    }

    fn schema(&self) -> Schema {
        Schema::v0()
            .with_attribute("id", Attribute::required_string())
            .with_attribute("username", Attribute::computed_string())
            .with_attribute("email", Attribute::computed_string())
            .with_attribute("first_name", Attribute::computed_string())
            .with_attribute("last_name", Attribute::computed_string())
            .with_attribute("enabled", Attribute::computed_bool())
            .with_attribute("email_verified", Attribute::computed_bool())
            .with_attribute(
                "permissions",
                Attribute::computed(AttributeType::list(permission_object())),
            )
            .with_attribute(
                "groups",
                Attribute::computed(AttributeType::list(group_object())),
            )
            .with_attribute(
                "identities",
                Attribute::computed(AttributeType::list(AttributeType::String)),
            )
            .with_attribute(
                "actions",
                Attribute::computed(AttributeType::list(AttributeType::String)),
            )
            .with_attribute("created_on", Attribute::computed_string())
    }

    fn configure(&mut self, client: Arc<ApiClient>) {
        self.client = Some(client);
    }

    async fn read(&self, config: &Value) -> Result<Value, ProviderError> {
        let client = configured(&self.client)?;
        let id = required_id(config)?;
        let response = client.get(&format!("/users/{id}")).await?;
        let user: User = decode_item(response)?;
        Ok(serde_json::to_value(&user)?)
    }
}
