//! Shared application state for the CRUD routes. Built once at startup, read-only afterwards.

use crate::registry::ModelRegistry;
use crate::store::DocumentStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: DocumentStore,
    pub registry: Arc<ModelRegistry>,
}
