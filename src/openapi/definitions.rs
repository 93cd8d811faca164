//! Definition generator: the object schema of one model.

use crate::openapi::types::{Definition, Items, Property};
use crate::registry::{FieldType, Model};
use crate::store::ID_FIELD;
use indexmap::IndexMap;

/// Array fields are always described as arrays of strings.
pub fn property_for(field_type: FieldType) -> Property {
    let items = match field_type {
        FieldType::Array => Some(Items {
            type_: FieldType::String,
        }),
        FieldType::String
        | FieldType::Number
        | FieldType::Integer
        | FieldType::Boolean
        | FieldType::Object => None,
    };
    Property {
        type_: field_type,
        items,
    }
}

/// `_id` first, then declared fields in order; `required` lists required fields in order.
pub fn definition(model: &Model) -> Definition {
    let mut properties = IndexMap::with_capacity(model.fields.len() + 1);
    properties.insert(ID_FIELD.to_string(), property_for(FieldType::String));
    for field in &model.fields {
        properties.insert(field.name.clone(), property_for(field.field_type));
    }
    Definition {
        type_: FieldType::Object,
        required: model.required_fields().map(|f| f.name.clone()).collect(),
        properties,
    }
}
