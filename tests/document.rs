use crudcast::config::{from_json_str, from_yaml_str};
use crudcast::{ApiDocument, ConfigError, CrudcastConfig, ModelRegistry, Namespace};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

const TODO: &str = r#"
swagger:
  info:
    title: Todo API
models:
  task:
    description: Things to do
    fields:
      - {name: title, type: string, required: true}
      - {name: done, type: boolean, required: false}
  person:
    fields:
      - {name: name, type: string, required: true}
      - {name: tags, type: array}
      - {name: age, type: integer, required: true}
"#;

fn build(config: &CrudcastConfig) -> ApiDocument {
    let registry = ModelRegistry::from_config(config, &Namespace::new(config.db_name.clone())).unwrap();
    ApiDocument::build(&registry, &config.swagger).unwrap()
}

fn document_json(yaml: &str) -> Value {
    serde_json::to_value(build(&from_yaml_str(yaml).unwrap())).unwrap()
}

#[test]
fn task_definition_matches_declared_fields() {
    let doc = document_json(TODO);
    assert_eq!(
        doc["definitions"]["task"],
        json!({
            "type": "object",
            "required": ["title"],
            "properties": {
                "_id": {"type": "string"},
                "title": {"type": "string"},
                "done": {"type": "boolean"}
            }
        })
    );
}

#[test]
fn post_takes_the_model_as_body() {
    let doc = document_json(TODO);
    assert_eq!(
        doc["paths"]["/task/"]["post"]["parameters"],
        json!([{
            "name": "body",
            "in": "body",
            "required": true,
            "description": "New task object",
            "schema": {"$ref": "#/definitions/task"}
        }])
    );
}

#[test]
fn list_operation_shape() {
    let doc = document_json(TODO);
    assert_eq!(
        doc["paths"]["/task/"]["get"],
        json!({
            "tags": ["task"],
            "summary": "List all task objects",
            "consumes": ["application/json"],
            "produces": ["application/json"],
            "parameters": [
                {
                    "name": "title",
                    "in": "query",
                    "required": false,
                    "type": "string",
                    "description": "Filter for task objects based on title"
                },
                {
                    "name": "done",
                    "in": "query",
                    "required": false,
                    "type": "boolean",
                    "description": "Filter for task objects based on done"
                }
            ],
            "responses": {
                "200": {
                    "description": "successful operation",
                    "schema": {"$ref": "#/definitions/task"}
                }
            }
        })
    );
}

#[test]
fn delete_operation_shape() {
    let doc = document_json(TODO);
    assert_eq!(
        doc["paths"]["/task/{_id}/"]["delete"],
        json!({
            "tags": ["task"],
            "summary": "Delete a task object",
            "consumes": ["application/json"],
            "produces": ["application/json"],
            "parameters": [{
                "name": "_id",
                "in": "path",
                "required": true,
                "type": "string",
                "description": "ID of task object"
            }],
            "responses": {
                "200": {
                    "description": "successful operation",
                    "schema": {"$ref": "#/definitions/task"}
                }
            }
        })
    );
}

#[test]
fn array_property_has_string_items() {
    let doc = document_json(TODO);
    assert_eq!(
        doc["definitions"]["person"]["properties"]["tags"],
        json!({"type": "array", "items": {"type": "string"}})
    );
    assert_eq!(doc["definitions"]["person"]["required"], json!(["name", "age"]));
}

#[test]
fn top_level_metadata_and_tags() {
    let doc = document_json(TODO);
    assert_eq!(doc["swagger"], "2.0");
    assert_eq!(doc["basePath"], "/api");
    assert_eq!(
        doc["info"],
        json!({
            "description": "This is an API automatically generated by crudcast",
            "version": "1.0.0",
            "title": "Todo API"
        })
    );
    assert_eq!(
        doc["tags"],
        json!([
            {"name": "task", "description": "Things to do"},
            {"name": "person", "description": null}
        ])
    );
    let mut keys: Vec<_> = doc.as_object().unwrap().keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, ["basePath", "definitions", "info", "paths", "swagger", "tags"]);
}

#[test]
fn paths_and_definitions_per_model() {
    let doc = build(&from_yaml_str(TODO).unwrap());
    let paths: Vec<_> = doc.paths.keys().map(String::as_str).collect();
    assert_eq!(paths, ["/task/", "/task/{_id}/", "/person/", "/person/{_id}/"]);
    let defs: Vec<_> = doc.definitions.keys().map(String::as_str).collect();
    assert_eq!(defs, ["task", "person"]);

    for op in doc.paths.values().flat_map(|item| {
        [&item.get, &item.post, &item.put, &item.delete]
            .into_iter()
            .flatten()
    }) {
        let target = op.responses["200"].schema.target().unwrap();
        assert!(doc.definitions.contains_key(target));
        assert_eq!(op.tags, [target]);
    }
}

#[test]
fn required_lists_match_flags() {
    let config = from_yaml_str(TODO).unwrap();
    let doc = build(&config);
    for (name, model) in config.models.iter() {
        let def = &doc.definitions[name];
        assert!(!def.required.iter().any(|r| r == "_id"));
        let flagged: Vec<_> = model
            .fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name.clone().unwrap())
            .collect();
        assert_eq!(def.required, flagged);
        let unflagged = model.fields.iter().filter(|f| !f.required);
        for f in unflagged {
            assert!(!def.required.contains(f.name.as_ref().unwrap()));
        }
    }
}

#[test]
fn generation_is_byte_identical() {
    let config = from_yaml_str(TODO).unwrap();
    let registry = ModelRegistry::from_config(&config, &Namespace::new("database")).unwrap();
    let first = ApiDocument::build(&registry, &config.swagger).unwrap().to_json().unwrap();
    let second = ApiDocument::build(&registry, &config.swagger).unwrap().to_json().unwrap();
    assert_eq!(first, second);
}

#[test]
fn duplicate_model_in_json_config_is_rejected() {
    let config = from_json_str(
        r#"{"models": {"task": {"fields": []}, "task": {"fields": [{"name": "x", "type": "string"}]}}}"#,
    )
    .unwrap();
    assert_eq!(config.models.len(), 2);
    let err = ModelRegistry::from_config(&config, &Namespace::new("database")).unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateModel(ref n) if n == "task"));
}

#[test]
fn unknown_field_type_is_rejected() {
    let config = from_yaml_str("models:\n  task:\n    fields:\n      - {name: due, type: date}\n").unwrap();
    let err = ModelRegistry::from_config(&config, &Namespace::new("database")).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownFieldType { .. }));
}

#[test]
fn duplicate_model_in_yaml_config_is_rejected() {
    let config = from_yaml_str(
        "models:\n  task:\n    fields: []\n  task:\n    fields:\n      - {name: x, type: string}\n",
    )
    .unwrap();
    assert_eq!(config.models.len(), 2);
    let err = ModelRegistry::from_config(&config, &Namespace::new("database")).unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateModel(ref n) if n == "task"));
}
