//! Raw config types matching the crudcast configuration document (YAML or JSON).

use indexmap::IndexMap;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/crudcast";
pub const DEFAULT_DB_NAME: &str = "database";
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Top-level configuration. Every key is optional except `models`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CrudcastConfig {
    #[serde(default = "default_database_url", alias = "mongo_url")]
    pub database_url: String,
    #[serde(default = "default_db_name")]
    pub db_name: String,
    #[serde(default)]
    pub swagger: SwaggerConfig,
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    pub models: ModelsConfig,
}

fn default_database_url() -> String {
    DEFAULT_DATABASE_URL.into()
}

fn default_db_name() -> String {
    DEFAULT_DB_NAME.into()
}

fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SwaggerConfig {
    pub swagger: String,
    #[serde(rename = "basePath", alias = "base_path")]
    pub base_path: String,
    /// Path the generated document is served at.
    pub url: String,
    /// Path of the Swagger UI page.
    pub ui_path: String,
    pub info: InfoConfig,
}

impl Default for SwaggerConfig {
    fn default() -> Self {
        SwaggerConfig {
            swagger: "2.0".into(),
            base_path: "/api".into(),
            url: "/api/docs".into(),
            ui_path: "/swagger".into(),
            info: InfoConfig::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InfoConfig {
    pub description: String,
    pub version: String,
    pub title: String,
}

impl Default for InfoConfig {
    fn default() -> Self {
        InfoConfig {
            description: "This is an API automatically generated by crudcast".into(),
            version: "1.0.0".into(),
            title: "My Crudcast app".into(),
        }
    }
}

/// One field as written in config. Name and type are optional here so the
/// validator can report which one is missing.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FieldConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub type_: Option<String>,
    #[serde(default)]
    pub required: bool,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
    /// Every other key of the model block (e.g. `description`).
    #[serde(flatten)]
    pub options: IndexMap<String, serde_json::Value>,
}

/// Model blocks in declaration order. Repeated names are kept so that
/// validation can reject them instead of silently overwriting.
#[derive(Clone, Debug, Default)]
pub struct ModelsConfig(pub Vec<(String, ModelConfig)>);

impl ModelsConfig {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ModelConfig)> {
        self.0.iter().map(|(name, m)| (name.as_str(), m))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for ModelsConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.iter())
    }
}

impl<'de> Deserialize<'de> for ModelsConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ModelsVisitor;

        impl<'de> Visitor<'de> for ModelsVisitor {
            type Value = ModelsConfig;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a mapping of model name to model block")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut out = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, model)) = map.next_entry::<String, Option<ModelConfig>>()? {
                    out.push((name, model.unwrap_or_default()));
                }
                Ok(ModelsConfig(out))
            }
        }

        deserializer.deserialize_map(ModelsVisitor)
    }
}
