//! Swagger 2.0 generation from the model registry.

pub mod definitions;
pub mod document;
pub mod paths;
pub mod types;

pub use definitions::definition;
pub use document::tag;
pub use paths::{collection_path, collection_path_key, instance_path, instance_path_key, Action};
pub use types::*;
