//! Field descriptors and the closed set of supported field types.

use crate::config::FieldConfig;
use crate::error::ConfigError;
use crate::store::ID_FIELD;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

/// Swagger primitive type of a declared field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
}

impl FieldType {
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "string" => FieldType::String,
            "number" => FieldType::Number,
            "integer" => FieldType::Integer,
            "boolean" => FieldType::Boolean,
            "array" => FieldType::Array,
            "object" => FieldType::Object,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Integer => "integer",
            FieldType::Boolean => "boolean",
            FieldType::Array => "array",
            FieldType::Object => "object",
        }
    }

    /// Whether a JSON value is acceptable for a field of this type. Null is accepted for every type.
    pub fn accepts(&self, v: &Value) -> bool {
        match (self, v) {
            (_, Value::Null) => true,
            (FieldType::String, Value::String(_)) => true,
            (FieldType::Number, Value::Number(_)) => true,
            (FieldType::Integer, Value::Number(n)) => n.is_i64() || n.is_u64(),
            (FieldType::Boolean, Value::Bool(_)) => true,
            (FieldType::Array, Value::Array(_)) => true,
            (FieldType::Object, Value::Object(_)) => true,
            _ => false,
        }
    }

    /// Convert a raw query-string value into the JSON value stored for this type.
    /// Values that do not parse are kept as strings so the filter simply matches nothing.
    pub fn coerce_query(&self, s: &str) -> Value {
        match self {
            FieldType::String => Value::String(s.to_string()),
            FieldType::Integer => s
                .parse::<i64>()
                .map(|n| Value::Number(n.into()))
                .unwrap_or_else(|_| Value::String(s.to_string())),
            FieldType::Number => {
                if let Ok(n) = s.parse::<i64>() {
                    return Value::Number(n.into());
                }
                s.parse::<f64>()
                    .ok()
                    .and_then(serde_json::Number::from_f64)
                    .map(Value::Number)
                    .unwrap_or_else(|| Value::String(s.to_string()))
            }
            FieldType::Boolean => {
                if s.eq_ignore_ascii_case("true") {
                    Value::Bool(true)
                } else if s.eq_ignore_ascii_case("false") {
                    Value::Bool(false)
                } else {
                    Value::String(s.to_string())
                }
            }
            FieldType::Array => Value::Array(
                s.split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(|p| Value::String(p.to_string()))
                    .collect(),
            ),
            FieldType::Object => {
                serde_json::from_str::<Value>(s).unwrap_or_else(|_| Value::String(s.to_string()))
            }
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub field_type: FieldType,
    pub required: bool,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, field_type: FieldType, required: bool) -> Self {
        FieldDescriptor {
            name: name.into(),
            field_type,
            required,
        }
    }

    /// Build from a raw field spec; `index` is only used in error messages.
    pub fn from_config(model: &str, index: usize, spec: &FieldConfig) -> Result<Self, ConfigError> {
        let name = spec
            .name
            .as_deref()
            .filter(|n| !n.is_empty())
            .ok_or_else(|| ConfigError::MissingFieldName {
                model: model.to_string(),
                index,
            })?;
        let type_name = spec
            .type_
            .as_deref()
            .ok_or_else(|| ConfigError::MissingFieldType {
                model: model.to_string(),
                field: name.to_string(),
            })?;
        let field_type = FieldType::parse(type_name).ok_or_else(|| ConfigError::UnknownFieldType {
            model: model.to_string(),
            field: name.to_string(),
            type_name: type_name.to_string(),
        })?;
        Ok(FieldDescriptor::new(name, field_type, spec.required))
    }
}

/// Field descriptors of one model, in declaration order. Rejects `_id` and repeated names.
pub fn field_descriptors(model: &str, specs: &[FieldConfig]) -> Result<Vec<FieldDescriptor>, ConfigError> {
    let mut seen = HashSet::with_capacity(specs.len());
    let mut fields = Vec::with_capacity(specs.len());
    for (i, spec) in specs.iter().enumerate() {
        let field = FieldDescriptor::from_config(model, i, spec)?;
        if field.name == ID_FIELD {
            return Err(ConfigError::ReservedField {
                model: model.to_string(),
                field: field.name,
            });
        }
        if !seen.insert(field.name.clone()) {
            return Err(ConfigError::DuplicateField {
                model: model.to_string(),
                field: field.name,
            });
        }
        fields.push(field);
    }
    Ok(fields)
}
