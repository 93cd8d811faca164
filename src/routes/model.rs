//! Model CRUD routes. The model name is a path parameter; handlers resolve it against the registry.

use crate::handlers::model::{create, delete, list, read, update};
use crate::state::AppState;
use axum::{routing::get, Router};
use tower_http::limit::RequestBodyLimitLayer;

pub fn model_routes(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/:model/", get(list).post(create))
        .route("/:model/:id/", get(read).put(update).delete(delete))
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .with_state(state)
}
