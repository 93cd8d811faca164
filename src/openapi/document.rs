//! Document assembler: swagger metadata plus tags, paths and definitions of every model.

use crate::config::SwaggerConfig;
use crate::error::GenerationError;
use crate::openapi::definitions::definition;
use crate::openapi::paths::{collection_path, collection_path_key, instance_path, instance_path_key};
use crate::openapi::types::{ApiDocument, Info, Tag};
use crate::registry::{is_path_segment, Model, ModelRegistry};
use indexmap::map::Entry;
use indexmap::IndexMap;

pub fn tag(model: &Model) -> Tag {
    Tag {
        name: model.name.clone(),
        description: model.description().map(String::from),
    }
}

fn insert_unique<V>(
    map: &mut IndexMap<String, V>,
    key: String,
    value: V,
    err: fn(String) -> GenerationError,
) -> Result<(), GenerationError> {
    match map.entry(key) {
        Entry::Occupied(e) => Err(err(e.key().clone())),
        Entry::Vacant(e) => {
            e.insert(value);
            Ok(())
        }
    }
}

impl ApiDocument {
    /// Build the whole document. Models are visited in declaration order; any failure aborts assembly.
    pub fn build(registry: &ModelRegistry, swagger: &SwaggerConfig) -> Result<Self, GenerationError> {
        let mut tags = Vec::with_capacity(registry.len());
        let mut paths = IndexMap::with_capacity(registry.len() * 2);
        let mut definitions = IndexMap::with_capacity(registry.len());

        for model in registry.all() {
            if !is_path_segment(&model.name) {
                return Err(GenerationError::InvalidPathSegment(model.name.clone()));
            }
            tags.push(tag(model));
            insert_unique(
                &mut paths,
                collection_path_key(&model.name),
                collection_path(model),
                GenerationError::DuplicatePath,
            )?;
            insert_unique(
                &mut paths,
                instance_path_key(&model.name),
                instance_path(model),
                GenerationError::DuplicatePath,
            )?;
            insert_unique(
                &mut definitions,
                model.name.clone(),
                definition(model),
                GenerationError::DuplicateDefinition,
            )?;
        }

        tracing::info!(
            models = registry.len(),
            paths = paths.len(),
            "swagger document assembled"
        );
        Ok(ApiDocument {
            swagger: swagger.swagger.clone(),
            base_path: swagger.base_path.clone(),
            info: Info {
                description: swagger.info.description.clone(),
                version: swagger.info.version.clone(),
                title: swagger.info.title.clone(),
            },
            tags,
            paths,
            definitions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{FieldDescriptor, FieldType};
    use crate::store::{CollectionSource, Namespace};

    #[test]
    fn empty_registry_gives_metadata_only() {
        let doc = ApiDocument::build(&ModelRegistry::new(), &SwaggerConfig::default()).unwrap();
        assert_eq!(doc.swagger, "2.0");
        assert_eq!(doc.base_path, "/api");
        assert_eq!(doc.info.title, "My Crudcast app");
        assert!(doc.tags.is_empty() && doc.paths.is_empty() && doc.definitions.is_empty());
    }

    #[test]
    fn tag_description_may_be_absent() {
        let model = Model {
            name: "task".into(),
            fields: vec![FieldDescriptor::new("title", FieldType::String, false)],
            options: IndexMap::new(),
            collection: Namespace::new("database").get_collection("task"),
        };
        assert_eq!(
            tag(&model),
            Tag {
                name: "task".into(),
                description: None
            }
        );
    }

    #[test]
    fn duplicate_key_fails_fast() {
        let mut map = IndexMap::new();
        insert_unique(&mut map, "/a/".into(), 1, GenerationError::DuplicatePath).unwrap();
        let err = insert_unique(&mut map, "/a/".into(), 2, GenerationError::DuplicatePath).unwrap_err();
        assert!(matches!(err, GenerationError::DuplicatePath(ref p) if p == "/a/"));
        assert_eq!(map["/a/"], 1);
    }
}
