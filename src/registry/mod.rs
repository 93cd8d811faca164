//! Model registry: declared models built once from config, then shared read-only.

mod field;
mod model;

pub use field::{field_descriptors, FieldDescriptor, FieldType};
pub use model::{is_path_segment, Model};

use crate::config::{validate, CrudcastConfig, FieldConfig};
use crate::error::{AppError, ConfigError};
use crate::store::{Collection, CollectionSource};
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::HashMap;

/// Models in declaration order with lookup by name. Share as `Arc<ModelRegistry>` once built.
#[derive(Clone, Debug, Default)]
pub struct ModelRegistry {
    models: Vec<Model>,
    index: HashMap<String, usize>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the config and register every model, binding each to its collection.
    pub fn from_config<S>(config: &CrudcastConfig, source: &S) -> Result<Self, ConfigError>
    where
        S: CollectionSource + ?Sized,
    {
        validate(config)?;
        let mut registry = ModelRegistry::new();
        for (name, model) in config.models.iter() {
            registry.register(
                name,
                &model.fields,
                model.options.clone(),
                source.get_collection(name),
            )?;
        }
        tracing::info!(models = registry.len(), "model registry built");
        Ok(registry)
    }

    pub fn register(
        &mut self,
        name: &str,
        field_specs: &[FieldConfig],
        options: IndexMap<String, Value>,
        collection: Collection,
    ) -> Result<&Model, ConfigError> {
        if self.index.contains_key(name) {
            return Err(ConfigError::DuplicateModel(name.to_string()));
        }
        if !is_path_segment(name) {
            return Err(ConfigError::InvalidModelName(name.to_string()));
        }
        let fields = field_descriptors(name, field_specs)?;
        let pos = self.models.len();
        self.models.push(Model {
            name: name.to_string(),
            fields,
            options,
            collection,
        });
        self.index.insert(name.to_string(), pos);
        Ok(&self.models[pos])
    }

    pub fn get(&self, name: &str) -> Result<&Model, AppError> {
        self.index
            .get(name)
            .map(|&i| &self.models[i])
            .ok_or_else(|| AppError::NotFound(format!("model '{}'", name)))
    }

    /// All models in declaration order.
    pub fn all(&self) -> &[Model] {
        &self.models
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
