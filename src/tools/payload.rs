// Deterministic payload construction for DevRev endpoints
//
// A payload is built by walking the tool's fields in declaration order:
// required fields are validated and copied, optional fields are copied only
// when supplied (never emitted as null), and structured values such as date
// ranges and cursor objects pass through unchanged. serde_json's map keeps
// keys sorted, so identical arguments always serialize to identical bytes.

use crate::error::{DevRevMcpError, Result};
use crate::tools::args::ToolArguments;
use serde_json::{Map, Value};

/// Three-state update for a field the remote API can set or unset
///
/// `update_work` lets callers change a work item's subtype or remove it
/// entirely. The wire sentinel for removal is an explicit JSON null, which
/// is why this is not a plain `Option`.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldPatch {
    /// Leave the field alone; the payload carries no key
    Absent,
    /// Set the field to this value
    Set(Value),
    /// Unset the field; the payload carries an explicit null
    Clear,
}

impl FieldPatch {
    /// Parse the `{"drop": bool, "subtype": <value>}` argument shape
    ///
    /// A `drop` of true wins over any supplied value. An absent argument or
    /// an empty object leaves the field untouched.
    ///
    /// # Errors
    /// - `InvalidParameter` for non-object shapes or objects carrying
    ///   neither a drop flag nor a value
    pub fn from_subtype_argument(field: &str, value: Option<&Value>) -> Result<Self> {
        let Some(value) = value else {
            return Ok(FieldPatch::Absent);
        };

        let invalid = || DevRevMcpError::InvalidParameter {
            field: field.to_string(),
            value: value.to_string(),
        };

        let patch = value.as_object().ok_or_else(invalid)?;
        if patch.is_empty() {
            return Ok(FieldPatch::Absent);
        }
        if patch.get("drop").and_then(Value::as_bool) == Some(true) {
            return Ok(FieldPatch::Clear);
        }
        match patch.get("subtype") {
            Some(subtype) if !subtype.is_null() => Ok(FieldPatch::Set(subtype.clone())),
            _ => Err(invalid()),
        }
    }

    fn apply(self, key: &str, payload: &mut Map<String, Value>) {
        match self {
            FieldPatch::Absent => {}
            FieldPatch::Set(value) => {
                payload.insert(key.to_string(), value);
            }
            FieldPatch::Clear => {
                payload.insert(key.to_string(), Value::Null);
            }
        }
    }
}

/// Field-by-field payload assembly over a tool's validated arguments
///
/// Required-field methods return `Result<Self>` so a chain stops at the
/// first validation failure, preserving the declared field order in the
/// reported error.
#[derive(Debug)]
pub struct PayloadBuilder<'a> {
    args: ToolArguments<'a>,
    payload: Map<String, Value>,
}

impl<'a> PayloadBuilder<'a> {
    pub fn new(args: ToolArguments<'a>) -> Self {
        Self {
            args,
            payload: Map::new(),
        }
    }

    /// Copy a required field under its own name
    pub fn require(mut self, field: &str) -> Result<Self> {
        let value = self.args.require(field)?.clone();
        self.payload.insert(field.to_string(), value);
        Ok(self)
    }

    /// Copy a required field under a different payload key
    pub fn require_as(mut self, field: &str, key: &str) -> Result<Self> {
        let value = self.args.require(field)?.clone();
        self.payload.insert(key.to_string(), value);
        Ok(self)
    }

    /// Copy a required closed-set field under its own name
    pub fn require_one_of(mut self, field: &str, allowed: &[&str]) -> Result<Self> {
        let value = self.args.require_one_of(field, allowed)?;
        self.payload
            .insert(field.to_string(), Value::String(value.to_string()));
        Ok(self)
    }

    /// Copy an optional field when the caller supplied it
    pub fn optional(mut self, field: &str) -> Self {
        if let Some(value) = self.args.optional(field) {
            self.payload.insert(field.to_string(), value.clone());
        }
        self
    }

    /// Copy an optional field, falling back to a default when absent
    pub fn optional_or(mut self, field: &str, default: Value) -> Self {
        let value = self.args.optional(field).cloned().unwrap_or(default);
        self.payload.insert(field.to_string(), value);
        self
    }

    /// Insert a fixed key the tool always sends
    pub fn fixed(mut self, key: &str, value: Value) -> Self {
        self.payload.insert(key.to_string(), value);
        self
    }

    /// Apply the three-state subtype patch for this field
    pub fn subtype_patch(mut self, field: &str) -> Result<Self> {
        let patch = FieldPatch::from_subtype_argument(field, self.args.optional(field))?;
        patch.apply(field, &mut self.payload);
        Ok(self)
    }

    pub fn build(self) -> Value {
        Value::Object(self.payload)
    }
}
