//! Tolerant parsing of inbound request bodies.
//!
//! A body that is not valid JSON, or that is valid JSON but not an object,
//! behaves like an empty mapping: every field lookup misses and there is no
//! original document to forward.

use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum InboundPayload {
    /// The body parsed as a JSON object.
    Object(Map<String, Value>),
    /// Empty, unparsable, or a non-object JSON value.
    Malformed,
}

impl InboundPayload {
    pub fn parse(body: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(map)) => Self::Object(map),
            Ok(other) => {
                tracing::debug!(kind = json_kind(&other), "Request body is not a JSON object");
                Self::Malformed
            }
            Err(e) => {
                tracing::debug!(error = %e, "Request body is not valid JSON, treating as empty");
                Self::Malformed
            }
        }
    }

    /// Field value as received, without coercion.
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Self::Object(map) => map.get(name),
            Self::Malformed => None,
        }
    }

    /// The string value of `name`; any other JSON type counts as absent.
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(Value::as_str)
    }

    /// The integral value of `name`; fractions, strings and overflow count as absent.
    pub fn i64_field(&self, name: &str) -> Option<i64> {
        self.field(name).and_then(Value::as_i64)
    }

    /// The whole document, if it was an object.
    pub fn original(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Object(map) => Some(map),
            Self::Malformed => None,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
