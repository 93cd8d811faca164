//! Generic CRUD over a model's collection.

use crate::error::AppError;
use crate::registry::Model;
use crate::service::RequestValidator;
use crate::store::DocumentStore;
use serde_json::{Map, Value};
use std::collections::HashMap;

pub struct CrudService;

impl CrudService {
    /// Equality filter from query params. Only declared fields are used, coerced by field type.
    pub fn filter_from_query(model: &Model, params: &HashMap<String, String>) -> Map<String, Value> {
        let mut filter = Map::new();
        for field in &model.fields {
            if let Some(raw) = params.get(&field.name) {
                filter.insert(field.name.clone(), field.field_type.coerce_query(raw));
            }
        }
        filter
    }

    pub async fn list(
        store: &DocumentStore,
        model: &Model,
        params: &HashMap<String, String>,
    ) -> Result<Vec<Value>, AppError> {
        let filter = Self::filter_from_query(model, params);
        store.find(&model.collection, &filter).await
    }

    pub async fn create(store: &DocumentStore, model: &Model, body: Value) -> Result<Value, AppError> {
        let body = body_to_map(body)?;
        RequestValidator::validate(model, &body)
            .inspect_err(|e| tracing::warn!(model = %model.name, error = %e, "rejected body"))?;
        store.insert(&model.collection, body).await
    }

    pub async fn read(store: &DocumentStore, model: &Model, id: &str) -> Result<Value, AppError> {
        store
            .find_one(&model.collection, id)
            .await?
            .ok_or_else(|| not_found(model, id))
    }

    pub async fn update(store: &DocumentStore, model: &Model, id: &str, body: Value) -> Result<Value, AppError> {
        let body = body_to_map(body)?;
        RequestValidator::validate(model, &body)
            .inspect_err(|e| tracing::warn!(model = %model.name, error = %e, "rejected body"))?;
        store
            .replace(&model.collection, id, body)
            .await?
            .ok_or_else(|| not_found(model, id))
    }

    pub async fn delete(store: &DocumentStore, model: &Model, id: &str) -> Result<Value, AppError> {
        store
            .delete(&model.collection, id)
            .await?
            .ok_or_else(|| not_found(model, id))
    }
}

fn not_found(model: &Model, id: &str) -> AppError {
    AppError::NotFound(format!("{} '{}'", model.name, id))
}

fn body_to_map(value: Value) -> Result<Map<String, Value>, AppError> {
    match value {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{FieldDescriptor, FieldType};
    use crate::store::{CollectionSource, Namespace};
    use indexmap::IndexMap;
    use serde_json::json;

    #[test]
    fn filter_uses_declared_fields_only() {
        let model = Model {
            name: "task".into(),
            fields: vec![
                FieldDescriptor::new("title", FieldType::String, true),
                FieldDescriptor::new("done", FieldType::Boolean, false),
                FieldDescriptor::new("points", FieldType::Integer, false),
            ],
            options: IndexMap::new(),
            collection: Namespace::new("database").get_collection("task"),
        };
        let params: HashMap<String, String> = [("done", "true"), ("points", "3"), ("limit", "10")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let filter = CrudService::filter_from_query(&model, &params);
        assert_eq!(Value::Object(filter), json!({"done": true, "points": 3}));
    }

    #[test]
    fn non_object_body_is_bad_request() {
        assert!(matches!(body_to_map(json!([1])), Err(AppError::BadRequest(_))));
    }
}
