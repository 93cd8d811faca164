//! Request validation from declared fields: required flags and JSON type compatibility.

use crate::error::AppError;
use crate::registry::Model;
use serde_json::{Map, Value};

pub struct RequestValidator;

impl RequestValidator {
    /// Validate a create/replace body. Required fields must be present and non-null;
    /// declared fields must match their type. Undeclared keys are stored as given.
    pub fn validate(model: &Model, body: &Map<String, Value>) -> Result<(), AppError> {
        for field in &model.fields {
            let val = body.get(&field.name);
            if field.required && (val.is_none() || val == Some(&Value::Null)) {
                return Err(AppError::Validation(format!("{} is required", field.name)));
            }
            if let Some(v) = val {
                if !field.field_type.accepts(v) {
                    return Err(AppError::Validation(format!(
                        "{} must be of type {}",
                        field.name, field.field_type
                    )));
                }
            }
        }
        Ok(())
    }
}
