// Argument validation for tool calls
//
// Arguments arrive as the optional `arguments` object of a tools/call
// request. Validation is deterministic and network-free: a call with no
// usable arguments fails with "Missing arguments", a call missing one
// required field fails with "Missing <field> parameter", and closed-set
// fields reject out-of-set values with "Invalid <field> parameter: <value>".
// Required fields are checked in the order the tool declares them, so the
// first problem wins.

use crate::error::{DevRevMcpError, Result};
use serde_json::{Map, Value};

/// A value that cannot satisfy a required field
///
/// Null, empty strings, empty arrays, and empty objects are rejected the
/// same way an absent key is. Non-empty containers and scalars count as
/// present.
fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Render an argument value for use inside a result message
///
/// Strings render bare (no quotes); everything else renders as compact JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Read-only view over a tool call's argument object
///
/// Copyable borrow, so validator and payload builder can both walk the same
/// map without cloning it.
#[derive(Debug, Clone, Copy)]
pub struct ToolArguments<'a> {
    map: Option<&'a Map<String, Value>>,
}

impl<'a> ToolArguments<'a> {
    pub fn new(map: Option<&'a Map<String, Value>>) -> Self {
        Self { map }
    }

    /// The argument map, required to exist and carry at least one entry
    ///
    /// An absent, null, or empty `arguments` object all mean the caller
    /// supplied nothing, and every required-field check fails the same way.
    fn present(&self) -> Result<&'a Map<String, Value>> {
        match self.map {
            Some(map) if !map.is_empty() => Ok(map),
            _ => Err(DevRevMcpError::MissingArguments),
        }
    }

    /// Fetch a required field
    ///
    /// # Errors
    /// - `MissingArguments` when no argument map was supplied
    /// - `MissingParameter` when the field is absent, null, or empty
    pub fn require(&self, field: &str) -> Result<&'a Value> {
        let map = self.present()?;
        map.get(field)
            .filter(|value| !is_empty_value(value))
            .ok_or_else(|| DevRevMcpError::MissingParameter(field.to_string()))
    }

    /// Fetch a required field constrained to a closed set of string values
    ///
    /// Presence is checked first, so an absent field reports missing rather
    /// than invalid.
    ///
    /// # Errors
    /// - Everything `require` raises
    /// - `InvalidParameter` when the value is not one of `allowed`
    pub fn require_one_of(&self, field: &str, allowed: &[&str]) -> Result<&'a str> {
        let value = self.require(field)?;
        value
            .as_str()
            .filter(|s| allowed.contains(s))
            .ok_or_else(|| DevRevMcpError::InvalidParameter {
                field: field.to_string(),
                value: display_value(value),
            })
    }

    /// Fetch an optional field
    ///
    /// Absent keys and explicit nulls both read as `None`; an absent
    /// argument map is not an error here.
    pub fn optional(&self, field: &str) -> Option<&'a Value> {
        self.map?.get(field).filter(|value| !value.is_null())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args_from(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test arguments must be an object"),
        }
    }

    #[test]
    fn test_absent_map_is_missing_arguments() {
        let args = ToolArguments::new(None);
        match args.require("id") {
            Err(DevRevMcpError::MissingArguments) => {}
            other => panic!("Expected MissingArguments, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_map_is_missing_arguments() {
        let map = args_from(json!({}));
        let args = ToolArguments::new(Some(&map));
        match args.require("id") {
            Err(DevRevMcpError::MissingArguments) => {}
            other => panic!("Expected MissingArguments, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_field_names_the_field() {
        let map = args_from(json!({"type": "issue"}));
        let args = ToolArguments::new(Some(&map));
        let err = args.require("id").unwrap_err();
        assert_eq!(err.to_string(), "Missing id parameter");
    }

    #[test]
    fn test_null_and_empty_values_count_as_missing() {
        let map = args_from(json!({
            "a": null,
            "b": "",
            "c": [],
            "d": {},
            "marker": true
        }));
        let args = ToolArguments::new(Some(&map));

        for field in ["a", "b", "c", "d"] {
            let err = args.require(field).unwrap_err();
            assert_eq!(err.to_string(), format!("Missing {} parameter", field));
        }
    }

    #[test]
    fn test_arrays_and_objects_satisfy_required_fields() {
        let map = args_from(json!({
            "type": ["issue", "ticket"],
            "cursor": {"next_cursor": "abc", "mode": "after"}
        }));
        let args = ToolArguments::new(Some(&map));

        assert_eq!(args.require("type").unwrap(), &json!(["issue", "ticket"]));
        assert!(args.require("cursor").is_ok());
    }

    #[test]
    fn test_closed_set_check_runs_after_presence() {
        let map = args_from(json!({"query": "test"}));
        let args = ToolArguments::new(Some(&map));
        let err = args
            .require_one_of("namespace", &["article", "issue"])
            .unwrap_err();
        assert_eq!(err.to_string(), "Missing namespace parameter");
    }

    #[test]
    fn test_out_of_set_value_is_invalid() {
        let map = args_from(json!({"namespace": "galaxy"}));
        let args = ToolArguments::new(Some(&map));
        let err = args
            .require_one_of("namespace", &["article", "issue"])
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid namespace parameter: galaxy");
    }

    #[test]
    fn test_non_string_enum_value_is_invalid() {
        let map = args_from(json!({"type": ["issue"]}));
        let args = ToolArguments::new(Some(&map));
        let err = args
            .require_one_of("type", &["issue", "ticket", "task"])
            .unwrap_err();
        assert_eq!(err.to_string(), r#"Invalid type parameter: ["issue"]"#);
    }

    #[test]
    fn test_optional_fields() {
        let map = args_from(json!({"state": "active", "gone": null}));
        let args = ToolArguments::new(Some(&map));

        assert_eq!(args.optional("state"), Some(&json!("active")));
        assert_eq!(args.optional("gone"), None);
        assert_eq!(args.optional("never_sent"), None);

        // No argument map at all is fine for optionals
        let args = ToolArguments::new(None);
        assert_eq!(args.optional("state"), None);
    }

    #[test]
    fn test_display_value_renders_strings_bare() {
        assert_eq!(display_value(&json!("work_1")), "work_1");
        assert_eq!(display_value(&json!(42)), "42");
        assert_eq!(display_value(&json!(["a", "b"])), r#"["a","b"]"#);
    }
}
