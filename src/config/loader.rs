//! Load config from a YAML or JSON file, or from an in-memory string.

use crate::config::CrudcastConfig;
use crate::error::ConfigError;
use std::path::Path;

pub fn from_yaml_str(s: &str) -> Result<CrudcastConfig, ConfigError> {
    serde_yaml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))
}

pub fn from_json_str(s: &str) -> Result<CrudcastConfig, ConfigError> {
    serde_json::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))
}

/// Read a config file. `.json` is parsed as JSON; anything else as YAML.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<CrudcastConfig, ConfigError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    tracing::debug!(path = %path.display(), json = is_json, "loading config");
    if is_json {
        from_json_str(&text)
    } else {
        from_yaml_str(&text)
    }
}

/// `DATABASE_URL` and `CRUDCAST_DB_NAME` take precedence over the file.
pub fn apply_env_overrides(config: &mut CrudcastConfig) {
    apply_overrides(config, |key| std::env::var(key).ok());
}

fn apply_overrides<F>(config: &mut CrudcastConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup("DATABASE_URL").filter(|s| !s.is_empty()) {
        config.database_url = url;
    }
    if let Some(name) = lookup("CRUDCAST_DB_NAME").filter(|s| !s.is_empty()) {
        config.db_name = name;
    }
}
