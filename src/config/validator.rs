//! Config validation: field specs, model names and swagger paths.

use crate::config::CrudcastConfig;
use crate::error::ConfigError;
use crate::registry::{field_descriptors, is_path_segment};
use serde_json::Value;
use std::collections::HashSet;

pub fn validate(config: &CrudcastConfig) -> Result<(), ConfigError> {
    let swagger = &config.swagger;
    for (key, value) in [
        ("basePath", &swagger.base_path),
        ("url", &swagger.url),
        ("ui_path", &swagger.ui_path),
    ] {
        if !value.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "swagger.{} must start with '/', got '{}'",
                key, value
            )));
        }
    }
    if config.db_name.is_empty() {
        return Err(ConfigError::Validation("db_name must not be empty".into()));
    }

    let mut model_names = HashSet::new();
    for (name, model) in config.models.iter() {
        if !model_names.insert(name) {
            return Err(ConfigError::DuplicateModel(name.to_string()));
        }
        if !is_path_segment(name) {
            return Err(ConfigError::InvalidModelName(name.to_string()));
        }
        field_descriptors(name, &model.fields)?;
        match model.options.get("description") {
            None | Some(Value::Null) | Some(Value::String(_)) => {}
            Some(other) => {
                return Err(ConfigError::Validation(format!(
                    "model '{}': description must be a string, got {}",
                    name, other
                )))
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::from_yaml_str;

    fn check(yaml: &str) -> Result<(), ConfigError> {
        validate(&from_yaml_str(yaml).unwrap())
    }

    #[test]
    fn accepts_minimal_config() {
        check("models:\n  task:\n    fields:\n      - {name: title, type: string, required: true}\n").unwrap();
    }

    #[test]
    fn rejects_reserved_id_field() {
        let err = check("models:\n  task:\n    fields:\n      - {name: _id, type: string}\n").unwrap_err();
        assert!(matches!(err, ConfigError::ReservedField { .. }));
    }

    #[test]
    fn rejects_duplicate_field() {
        let err = check(
            "models:\n  task:\n    fields:\n      - {name: a, type: string}\n      - {name: a, type: number}\n",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateField { ref field, .. } if field == "a"));
    }

    #[test]
    fn rejects_non_string_description() {
        for desc in ["42", "{text: hi}", "[a, b]"] {
            let yaml = format!("models:\n  task:\n    description: {}\n", desc);
            let err = check(&yaml).unwrap_err();
            assert!(matches!(err, ConfigError::Validation(ref m) if m.contains("description")));
        }
        check("models:\n  task:\n    description: Things to do\n").unwrap();
        check("models:\n  task:\n    description: null\n").unwrap();
    }

    #[test]
    fn rejects_relative_base_path() {
        let err = check("swagger:\n  basePath: api\nmodels: {}\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn rejects_model_name_that_is_not_a_segment() {
        let err = check("models:\n  \"a/b\": {}\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidModelName(_)));
    }
}
