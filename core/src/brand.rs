//! The canonical `Brand` record and its construction from untrusted JSON.
//!
//! Upstream records are loosely typed: any scalar may appear in any field.
//! A field counts as missing when it is absent, `null`, `false`, `0` or `""`.
//! Present scalars are rendered to their string form; arrays and objects are
//! rejected.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::ApiError;

/// A validated brand. `id`, `name`, `logo` and `tagline` are never empty;
/// `description` may be.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Brand {
    pub id: String,
    pub name: String,
    pub logo: String,
    pub tagline: String,
    pub description: String,
}

impl Brand {
    /// Validate and coerce one raw brand object.
    pub fn from_raw(raw: &Map<String, Value>) -> Result<Self, ApiError> {
        let required = |field: &'static str| -> Result<String, ApiError> {
            field_string(raw, field)?.ok_or(ApiError::MissingFields { field })
        };

        Ok(Self {
            id: required("id")?,
            name: required("name")?,
            logo: required("logo")?,
            tagline: required("tagline")?,
            description: field_string(raw, "description")?.unwrap_or_default(),
        })
    }

    /// Validate a value that should be a brand object. Anything other than an
    /// object has none of the required fields.
    pub fn from_value(raw: &Value) -> Result<Self, ApiError> {
        match raw {
            Value::Object(map) => Self::from_raw(map),
            _ => Err(ApiError::MissingFields { field: "id" }),
        }
    }
}

/// `Ok(None)` when the field is missing or falsy.
fn field_string(raw: &Map<String, Value>, field: &'static str) -> Result<Option<String>, ApiError> {
    match raw.get(field) {
        None => Ok(None),
        Some(value) if !is_truthy(value) => Ok(None),
        Some(value) => scalar_to_string(value)
            .map(Some)
            .ok_or(ApiError::NonScalarField { field }),
    }
}

pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// String form of a JSON scalar, `None` for arrays and objects.
pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some("null".to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(number_to_string(n)),
        Value::String(s) => Some(s.clone()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn number_to_string(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        // Integral floats print without a fractional part: 42.0 -> "42".
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{f:.0}"),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}
