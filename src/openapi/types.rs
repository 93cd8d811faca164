//! Typed Swagger 2.0 document structures. Serialization order follows field order.

use crate::registry::FieldType;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const JSON_MIME: &str = "application/json";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiDocument {
    pub swagger: String,
    #[serde(rename = "basePath")]
    pub base_path: String,
    pub info: Info,
    pub tags: Vec<Tag>,
    pub paths: IndexMap<String, PathItem>,
    pub definitions: IndexMap<String, Definition>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Info {
    pub description: String,
    pub version: String,
    pub title: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    /// Serialized as `null` when the model has no description.
    pub description: Option<String>,
}

/// Operations on one path. Absent verbs are omitted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PathItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub tags: Vec<String>,
    pub summary: String,
    pub consumes: Vec<String>,
    pub produces: Vec<String>,
    pub parameters: Vec<Parameter>,
    /// Keyed by status code.
    pub responses: IndexMap<String, Response>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Query,
    Path,
    Body,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    pub required: bool,
    /// Set for query and path parameters; body parameters use `schema`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<FieldType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Items>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaRef>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub description: String,
    pub schema: SchemaRef,
}

/// `{"$ref": "#/definitions/<model>"}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaRef {
    #[serde(rename = "$ref")]
    pub reference: String,
}

impl SchemaRef {
    pub fn definition(model: &str) -> Self {
        SchemaRef {
            reference: format!("#/definitions/{}", model),
        }
    }

    /// Definition key this reference points at, if it is a local definition reference.
    pub fn target(&self) -> Option<&str> {
        self.reference.strip_prefix("#/definitions/")
    }
}

/// Element type of array properties and parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Items {
    #[serde(rename = "type")]
    pub type_: FieldType,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Property {
    #[serde(rename = "type")]
    pub type_: FieldType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Items>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    /// Always `object`.
    #[serde(rename = "type")]
    pub type_: FieldType,
    pub required: Vec<String>,
    pub properties: IndexMap<String, Property>,
}

impl ApiDocument {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
