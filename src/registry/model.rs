//! A declared model and the name rule shared by registration and path generation.

use crate::registry::field::FieldDescriptor;
use crate::store::Collection;
use indexmap::IndexMap;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Model names become URL path segments and `#/definitions/` keys.
pub fn is_path_segment(name: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("static regex"))
        .is_match(name)
}

#[derive(Clone, Debug)]
pub struct Model {
    pub name: String,
    pub fields: Vec<FieldDescriptor>,
    /// Extra keys of the model block, e.g. `description`.
    pub options: IndexMap<String, Value>,
    pub collection: Collection,
}

impl Model {
    pub fn description(&self) -> Option<&str> {
        self.options.get("description").and_then(Value::as_str)
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Required fields in declaration order.
    pub fn required_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.required)
    }
}
