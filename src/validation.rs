//! Configuration presence checks.
//!
//! Validation here is deliberately shallow: required attributes must be
//! present and non-null, nothing more. The remote API is the source of truth
//! for value shapes, and reads tolerate mismatches by defaulting fields
//! (see [`crate::model`]).
//!
//! # Example
//!
//! ```
//! use imply_provider::schema::{Attribute, Schema};
//! use imply_provider::validation::validate;
//! use serde_json::json;
//!
//! let schema = Schema::v0().with_attribute("id", Attribute::required_string());
//!
//! assert!(validate(&schema, &json!({"id": "u1"})).is_empty());
//!
//! let diagnostics = validate(&schema, &json!({}));
//! assert_eq!(diagnostics.len(), 1);
//! assert_eq!(diagnostics[0].attribute.as_deref(), Some("id"));
//! ```

use serde_json::Value;

use crate::model::value_type_name;
use crate::schema::{Diagnostic, Schema};

/// Validate a configuration value against a schema.
///
/// Returns one error diagnostic per required attribute that is absent or
/// null. A configuration that is not an object (and not null) produces a
/// single error. An empty list means the configuration is acceptable.
pub fn validate(schema: &Schema, config: &Value) -> Vec<Diagnostic> {
    let attributes = match config {
        Value::Object(map) => Some(map),
        Value::Null => None,
        other => {
            return vec![Diagnostic::error("Invalid configuration").with_detail(format!(
                "Expected an object, got {}",
                value_type_name(other)
            ))];
        }
    };

    let mut diagnostics = Vec::new();
    for (name, attr) in &schema.attributes {
        if !attr.flags.required {
            continue;
        }
        let present = attributes
            .and_then(|map| map.get(name))
            .is_some_and(|value| !value.is_null());
        if !present {
            diagnostics.push(
                Diagnostic::error(format!("Missing required attribute \"{name}\""))
                    .with_detail("This attribute must be set in the configuration.")
                    .with_attribute(name.clone()),
            );
        }
    }
    diagnostics
}

/// Validate a configuration value, returning `Err` with the diagnostics when
/// any check fails.
pub fn validate_result(schema: &Schema, config: &Value) -> Result<(), Vec<Diagnostic>> {
    let diagnostics = validate(schema, config);
    if diagnostics.is_empty() {
        Ok(())
    } else {
        Err(diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Attribute;
    use serde_json::json;

    fn lookup_schema() -> Schema {
        Schema::v0()
            .with_attribute("id", Attribute::required_string())
            .with_attribute("name", Attribute::computed_string())
    }

    #[test]
    fn required_attribute_present() {
        let diagnostics = validate(&lookup_schema(), &json!({"id": "g1"}));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn required_attribute_missing() {
        let diagnostics = validate(&lookup_schema(), &json!({}));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].attribute.as_deref(), Some("id"));
        assert!(diagnostics[0].summary.contains("id"));
    }

    #[test]
    fn required_attribute_null() {
        let diagnostics = validate(&lookup_schema(), &json!({"id": null}));
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn null_config_reports_missing_required() {
        let diagnostics = validate(&lookup_schema(), &Value::Null);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].attribute.as_deref(), Some("id"));
    }

    #[test]
    fn non_object_config_is_one_error() {
        let diagnostics = validate(&lookup_schema(), &json!("not an object"));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].summary, "Invalid configuration");
        assert!(diagnostics[0].detail.as_deref().unwrap().contains("string"));
    }

    #[test]
    fn computed_attributes_are_not_required() {
        let schema = Schema::v0().with_attribute("items", Attribute::computed_string());
        assert!(validate(&schema, &json!({})).is_empty());
        assert!(validate_result(&schema, &json!({})).is_ok());
    }

    #[test]
    fn presence_checks_ignore_value_types() {
        // Only presence is validated; the API is the source of truth for shapes.
        let diagnostics = validate(&lookup_schema(), &json!({"id": 42}));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn multiple_missing_attributes_each_report() {
        let schema = Schema::v0()
            .with_attribute("id", Attribute::required_string())
            .with_attribute("name", Attribute::required_string());
        let diagnostics = validate(&schema, &json!({}));
        assert_eq!(diagnostics.len(), 2);
        let mut attrs: Vec<_> = diagnostics
            .iter()
            .filter_map(|d| d.attribute.as_deref())
            .collect();
        attrs.sort_unstable();
        assert_eq!(attrs, vec!["id", "name"]);
    }
}
