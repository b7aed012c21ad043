//! Typed mirrors of the Polaris API objects.
//!
//! The API speaks camelCase JSON; output state uses snake_case attribute
//! names. Models are constructed fresh on every read and never persisted.
//!
//! Remote payloads are only loosely typed, so every field decodes through
//! [`lenient`]: a field that is absent **or** carries an unexpected type
//! falls back to its default instead of failing the whole read. The two
//! entry points are [`decode_item`] for item endpoints (fields at the top
//! level) and [`decode_values`] for list endpoints (a top-level `"values"`
//! array, whose absence is a hard error).

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::ProviderError;

/// Decode a value, substituting the default on any mismatch.
///
/// This is the generic replacement for per-field type assertions: apply it
/// with `#[serde(default, deserialize_with = "lenient")]` and the field
/// tolerates both absent and mistyped source data.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// Decode an item endpoint response into a single entity.
pub fn decode_item<T>(response: Map<String, Value>) -> Result<T, ProviderError>
where
    T: DeserializeOwned,
{
    T::deserialize(Value::Object(response)).map_err(ProviderError::from)
}

/// Decode a list endpoint response.
///
/// List endpoints wrap their items in a top-level `"values"` array; a
/// response without one (or where it is not an array) is an invalid-response
/// error naming the actual type. Individual elements that are not objects
/// fail the read outright.
pub fn decode_values<T>(mut response: Map<String, Value>) -> Result<Vec<T>, ProviderError>
where
    T: DeserializeOwned,
{
    let values = match response.remove("values") {
        Some(Value::Array(values)) => values,
        Some(other) => {
            return Err(ProviderError::InvalidResponse(format!(
                "expected an array in the \"values\" field, got {}",
                value_type_name(&other)
            )));
        }
        None => {
            return Err(ProviderError::InvalidResponse(
                "the response has no \"values\" field".to_string(),
            ));
        }
    };

    values
        .into_iter()
        .map(|item| T::deserialize(item).map_err(ProviderError::from))
        .collect()
}

/// Human-readable name of a JSON value's type, for diagnostics.
pub(crate) fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A named permission and the resources it applies to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct Permission {
    /// Permission identifier.
    #[serde(default, deserialize_with = "lenient")]
    pub id: String,
    /// Permission name.
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
    /// Resource names this permission applies to.
    #[serde(default, deserialize_with = "lenient")]
    pub resources: Vec<String>,
}

/// A user group with its permission grants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct Group {
    /// Group identifier.
    #[serde(default, deserialize_with = "lenient")]
    pub id: String,
    /// Group name.
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
    /// Whether the group is managed by the platform and cannot be edited.
    #[serde(default, deserialize_with = "lenient")]
    pub read_only: bool,
    /// Permissions granted through this group.
    #[serde(default, deserialize_with = "lenient")]
    pub permissions: Vec<Permission>,
    /// Number of members.
    #[serde(default, deserialize_with = "lenient")]
    pub user_count: i64,
}

/// A platform user account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct User {
    /// User identifier.
    #[serde(default, deserialize_with = "lenient")]
    pub id: String,
    /// Login name.
    #[serde(default, deserialize_with = "lenient")]
    pub username: String,
    /// Email address.
    #[serde(default, deserialize_with = "lenient")]
    pub email: String,
    /// Given name.
    #[serde(default, deserialize_with = "lenient")]
    pub first_name: String,
    /// Family name.
    #[serde(default, deserialize_with = "lenient")]
    pub last_name: String,
    /// Whether the account is active.
    #[serde(default, deserialize_with = "lenient")]
    pub enabled: bool,
    /// Whether the email address has been verified.
    #[serde(default, deserialize_with = "lenient")]
    pub email_verified: bool,
    /// Permissions granted directly to the user.
    #[serde(default, deserialize_with = "lenient")]
    pub permissions: Vec<Permission>,
    /// Groups the user belongs to.
    #[serde(default, deserialize_with = "lenient")]
    pub groups: Vec<Group>,
    /// Federated identity references.
    #[serde(default, deserialize_with = "lenient")]
    pub identities: Vec<String>,
    /// Actions the user may perform.
    #[serde(default, deserialize_with = "lenient")]
    pub actions: Vec<String>,
    /// Creation timestamp.
    #[serde(default, deserialize_with = "lenient")]
    pub created_on: String,
}

/// A column within a table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct Column {
    /// Column name.
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
    /// Column data type.
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub column_type: String,
    /// Whether the column accepts nulls.
    #[serde(default, deserialize_with = "lenient")]
    pub nullable: bool,
    /// Column description.
    #[serde(default, deserialize_with = "lenient")]
    pub description: String,
}

/// An ingestion table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct Table {
    /// Table identifier.
    #[serde(default, deserialize_with = "lenient")]
    pub id: String,
    /// Table name.
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
    /// Table kind.
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub table_type: String,
    /// Strict or flexible schema handling.
    #[serde(default, deserialize_with = "lenient")]
    pub schema_mode: String,
    /// Time partitioning granularity.
    #[serde(default, deserialize_with = "lenient")]
    pub partitioning: String,
    /// Whether rollup is enabled.
    #[serde(default, deserialize_with = "lenient")]
    pub rollup: bool,
    /// Creation timestamp.
    #[serde(default, deserialize_with = "lenient")]
    pub created_on: String,
    /// Last modification timestamp.
    #[serde(default, deserialize_with = "lenient")]
    pub last_modified_on: String,
    /// Stored row count.
    #[serde(default, deserialize_with = "lenient")]
    pub row_count: i64,
    /// Stored size in bytes.
    #[serde(default, deserialize_with = "lenient")]
    pub size_bytes: i64,
    /// Declared columns.
    #[serde(default, deserialize_with = "lenient")]
    pub columns: Vec<Column>,
}

/// A source connection used for ingestion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct Connection {
    /// Connection identifier.
    #[serde(default, deserialize_with = "lenient")]
    pub id: String,
    /// Connection name.
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
    /// Connection kind.
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub connection_type: String,
    /// Connection description.
    #[serde(default, deserialize_with = "lenient")]
    pub description: String,
    /// Opaque connection configuration.
    #[serde(default, deserialize_with = "lenient")]
    pub config: String,
    /// Creation timestamp.
    #[serde(default, deserialize_with = "lenient")]
    pub created_on: String,
    /// Timestamp of the last ingestion that used this connection.
    #[serde(default, deserialize_with = "lenient")]
    pub last_used_on: String,
}

/// An ingestion or batch job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct Job {
    /// Job identifier.
    #[serde(default, deserialize_with = "lenient")]
    pub id: String,
    /// Job name.
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
    /// Job kind.
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub job_type: String,
    /// Current job status.
    #[serde(default, deserialize_with = "lenient")]
    pub status: String,
    /// Ingestion source.
    #[serde(default, deserialize_with = "lenient")]
    pub source: String,
    /// Destination table.
    #[serde(default, deserialize_with = "lenient")]
    pub destination: String,
    /// Opaque job configuration.
    #[serde(default, deserialize_with = "lenient")]
    pub config: String,
    /// Creation timestamp.
    #[serde(default, deserialize_with = "lenient")]
    pub created_on: String,
    /// Start timestamp.
    #[serde(default, deserialize_with = "lenient")]
    pub started_on: String,
    /// Completion timestamp.
    #[serde(default, deserialize_with = "lenient")]
    pub completed_on: String,
    /// Failure message, when the job failed.
    #[serde(default, deserialize_with = "lenient")]
    pub error: String,
    /// Completion fraction between 0 and 1.
    #[serde(default, deserialize_with = "lenient")]
    pub progress: f64,
    /// Rows processed so far.
    #[serde(default, deserialize_with = "lenient")]
    pub rows_processed: i64,
}

/// An analytics data cube built over a table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct DataCube {
    /// Data cube identifier.
    #[serde(default, deserialize_with = "lenient")]
    pub id: String,
    /// Data cube name.
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
    /// Data cube description.
    #[serde(default, deserialize_with = "lenient")]
    pub description: String,
    /// Backing table name.
    #[serde(default, deserialize_with = "lenient")]
    pub table: String,
    /// Opaque cube configuration.
    #[serde(default, deserialize_with = "lenient")]
    pub config: String,
    /// Creation timestamp.
    #[serde(default, deserialize_with = "lenient")]
    pub created_on: String,
    /// Timestamp of last use.
    #[serde(default, deserialize_with = "lenient")]
    pub last_used_on: String,
}

/// An analytics dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct Dashboard {
    /// Dashboard identifier.
    #[serde(default, deserialize_with = "lenient")]
    pub id: String,
    /// Dashboard name.
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
    /// Dashboard description.
    #[serde(default, deserialize_with = "lenient")]
    pub description: String,
    /// Opaque layout definition.
    #[serde(default, deserialize_with = "lenient")]
    pub layout: String,
    /// Creation timestamp.
    #[serde(default, deserialize_with = "lenient")]
    pub created_on: String,
    /// Timestamp of last use.
    #[serde(default, deserialize_with = "lenient")]
    pub last_used_on: String,
}

/// A monitoring alert over a query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct Alert {
    /// Alert identifier.
    #[serde(default, deserialize_with = "lenient")]
    pub id: String,
    /// Alert name.
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
    /// Alert description.
    #[serde(default, deserialize_with = "lenient")]
    pub description: String,
    /// Monitored query.
    #[serde(default, deserialize_with = "lenient")]
    pub query: String,
    /// Trigger condition.
    #[serde(default, deserialize_with = "lenient")]
    pub condition: String,
    /// Trigger threshold.
    #[serde(default, deserialize_with = "lenient")]
    pub threshold: f64,
    /// Whether the alert is active.
    #[serde(default, deserialize_with = "lenient")]
    pub enabled: bool,
    /// Creation timestamp.
    #[serde(default, deserialize_with = "lenient")]
    pub created_on: String,
    /// Timestamp of the last trigger.
    #[serde(default, deserialize_with = "lenient")]
    pub last_triggered_on: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn as_map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {:?}", other),
        }
    }

    #[test]
    fn group_decodes_camel_case_fields() {
        let group: Group = decode_item(as_map(json!({
            "id": "1",
            "name": "g1",
            "readOnly": true,
            "userCount": 3,
            "permissions": [
                {"id": "p1", "name": "ManageTables", "resources": ["tables/*"]}
            ]
        })))
        .unwrap();

        assert_eq!(group.id, "1");
        assert_eq!(group.name, "g1");
        assert!(group.read_only);
        assert_eq!(group.user_count, 3);
        assert_eq!(group.permissions.len(), 1);
        assert_eq!(group.permissions[0].resources, vec!["tables/*"]);
    }

    #[test]
    fn group_serializes_snake_case_fields() {
        let group = Group {
            id: "1".to_string(),
            name: "g1".to_string(),
            read_only: true,
            user_count: 3,
            permissions: Vec::new(),
        };

        let state = serde_json::to_value(&group).unwrap();
        assert_eq!(state["read_only"], json!(true));
        assert_eq!(state["user_count"], json!(3));
        assert!(state.get("readOnly").is_none());
    }

    #[test]
    fn omitted_sub_lists_decode_to_empty() {
        let user: User = decode_item(as_map(json!({
            "id": "u1",
            "username": "alice",
            "email": "alice@example.com"
        })))
        .unwrap();

        assert!(user.permissions.is_empty());
        assert!(user.groups.is_empty());
        assert!(user.identities.is_empty());
        assert!(user.actions.is_empty());
    }

    #[test]
    fn mistyped_fields_fall_back_to_defaults() {
        let group: Group = decode_item(as_map(json!({
            "id": "1",
            "name": "g1",
            "readOnly": "yes",
            "userCount": "three",
            "permissions": "not a list"
        })))
        .unwrap();

        assert!(!group.read_only);
        assert_eq!(group.user_count, 0);
        assert!(group.permissions.is_empty());
    }

    #[test]
    fn decode_values_returns_each_item() {
        let groups: Vec<Group> = decode_values(as_map(json!({
            "values": [
                {"id": "1", "name": "g1", "userCount": 1},
                {"id": "2", "name": "g2", "userCount": 2}
            ]
        })))
        .unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[1].user_count, 2);
    }

    #[test]
    fn decode_values_without_values_field_is_an_error() {
        let err = decode_values::<Group>(as_map(json!({"groups": []}))).unwrap_err();
        assert!(matches!(err, ProviderError::InvalidResponse(_)));
        assert!(err.to_string().contains("\"values\""));
    }

    #[test]
    fn decode_values_with_non_array_values_is_an_error() {
        let err = decode_values::<Group>(as_map(json!({"values": "nope"}))).unwrap_err();
        assert!(err.to_string().contains("got string"));
    }

    #[test]
    fn decode_values_with_non_object_item_is_an_error() {
        let result = decode_values::<Group>(as_map(json!({"values": ["not an object"]})));
        assert!(matches!(result, Err(ProviderError::Decode(_))));
    }

    #[test]
    fn job_numeric_fields_decode() {
        let job: Job = decode_item(as_map(json!({
            "id": "j1",
            "type": "batch",
            "status": "RUNNING",
            "progress": 0.25,
            "rowsProcessed": 1200
        })))
        .unwrap();

        assert_eq!(job.job_type, "batch");
        assert!((job.progress - 0.25).abs() < f64::EPSILON);
        assert_eq!(job.rows_processed, 1200);
    }

    #[test]
    fn table_columns_decode_with_type_field() {
        let table: Table = decode_item(as_map(json!({
            "id": "t1",
            "name": "wikipedia",
            "type": "detail",
            "schemaMode": "strict",
            "rollup": false,
            "columns": [
                {"name": "__time", "type": "timestamp", "nullable": false},
                {"name": "channel", "type": "string", "nullable": true}
            ]
        })))
        .unwrap();

        assert_eq!(table.columns.len(), 2);
        assert_eq!(table.columns[0].column_type, "timestamp");
        let state = serde_json::to_value(&table).unwrap();
        assert_eq!(state["columns"][1]["type"], json!("string"));
    }

    #[test]
    fn alert_threshold_decodes() {
        let alert: Alert = decode_item(as_map(json!({
            "id": "a1",
            "name": "high latency",
            "threshold": 99.5,
            "enabled": true
        })))
        .unwrap();

        assert!(alert.enabled);
        assert!((alert.threshold - 99.5).abs() < f64::EPSILON);
    }
}
