//! Path generator: collection and instance operations of one model.

use crate::openapi::types::{
    Items, Operation, Parameter, ParameterLocation, PathItem, Response, SchemaRef, JSON_MIME,
};
use crate::registry::{FieldDescriptor, FieldType, Model};
use crate::store::ID_FIELD;
use indexmap::IndexMap;

/// What an operation does to the model's documents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    List,
    Create,
    Retrieve,
    Update,
    Delete,
}

impl Action {
    pub fn summary(&self, model: &str) -> String {
        match self {
            Action::List => format!("List all {} objects", model),
            Action::Create => format!("Create a new {}", model),
            Action::Retrieve => format!("Retrieve a {} object", model),
            Action::Update => format!("Update a {} object", model),
            Action::Delete => format!("Delete a {} object", model),
        }
    }

    fn response_description(&self) -> &'static str {
        match self {
            Action::Create => "object created",
            Action::List | Action::Retrieve | Action::Update | Action::Delete => "successful operation",
        }
    }
}

/// `/{model}/`
pub fn collection_path_key(model: &str) -> String {
    format!("/{}/", model)
}

/// `/{model}/{_id}/`
pub fn instance_path_key(model: &str) -> String {
    format!("/{}/{{{}}}/", model, ID_FIELD)
}

fn operation(model: &Model, action: Action, parameters: Vec<Parameter>) -> Operation {
    let mut responses = IndexMap::new();
    responses.insert(
        "200".to_string(),
        Response {
            description: action.response_description().to_string(),
            schema: SchemaRef::definition(&model.name),
        },
    );
    Operation {
        tags: vec![model.name.clone()],
        summary: action.summary(&model.name),
        consumes: vec![JSON_MIME.to_string()],
        produces: vec![JSON_MIME.to_string()],
        parameters,
        responses,
    }
}

/// Optional filter on one declared field. Objects are passed JSON-encoded, hence `string`.
fn query_parameter(model: &Model, field: &FieldDescriptor) -> Parameter {
    let (type_, items) = match field.field_type {
        FieldType::Array => (
            FieldType::Array,
            Some(Items {
                type_: FieldType::String,
            }),
        ),
        FieldType::Object => (FieldType::String, None),
        t @ (FieldType::String | FieldType::Number | FieldType::Integer | FieldType::Boolean) => (t, None),
    };
    Parameter {
        name: field.name.clone(),
        location: ParameterLocation::Query,
        required: false,
        type_: Some(type_),
        items,
        description: format!("Filter for {} objects based on {}", model.name, field.name),
        schema: None,
    }
}

fn id_parameter(model: &Model) -> Parameter {
    Parameter {
        name: ID_FIELD.to_string(),
        location: ParameterLocation::Path,
        required: true,
        type_: Some(FieldType::String),
        items: None,
        description: format!("ID of {} object", model.name),
        schema: None,
    }
}

fn body_parameter(model: &Model) -> Parameter {
    Parameter {
        name: "body".to_string(),
        location: ParameterLocation::Body,
        required: true,
        type_: None,
        items: None,
        description: format!("New {} object", model.name),
        schema: Some(SchemaRef::definition(&model.name)),
    }
}

/// `GET` (list with per-field filters) and `POST` (create) on the collection.
pub fn collection_path(model: &Model) -> PathItem {
    let filters = model.fields.iter().map(|f| query_parameter(model, f)).collect();
    PathItem {
        get: Some(operation(model, Action::List, filters)),
        post: Some(operation(model, Action::Create, vec![body_parameter(model)])),
        ..PathItem::default()
    }
}

/// `GET`, `PUT` and `DELETE` on one document.
pub fn instance_path(model: &Model) -> PathItem {
    PathItem {
        get: Some(operation(model, Action::Retrieve, vec![id_parameter(model)])),
        put: Some(operation(
            model,
            Action::Update,
            vec![id_parameter(model), body_parameter(model)],
        )),
        delete: Some(operation(model, Action::Delete, vec![id_parameter(model)])),
        ..PathItem::default()
    }
}
