//! Crudcast: CRUD REST API and Swagger 2.0 document generated from a declarative model config.

pub mod config;
pub mod error;
pub mod handlers;
pub mod openapi;
pub mod registry;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{apply_env_overrides, load_from_path, CrudcastConfig, SwaggerConfig};
pub use error::{AppError, ConfigError, GenerationError};
pub use openapi::ApiDocument;
pub use registry::{FieldDescriptor, FieldType, Model, ModelRegistry};
pub use routes::{app_routes, common_routes, docs_routes, model_routes};
pub use service::CrudService;
pub use state::AppState;
pub use store::{ensure_database_exists, Collection, CollectionSource, DocumentStore, Namespace};
