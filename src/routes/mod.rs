//! Routers: model CRUD under the base path, generated docs, health.

mod common;
mod docs;
mod model;

pub use common::common_routes;
pub use docs::{docs_routes, swagger_ui_page};
pub use model::model_routes;

use crate::config::CrudcastConfig;
use crate::openapi::ApiDocument;
use crate::state::AppState;
use axum::Router;
use std::sync::Arc;

/// Full application: CRUD routes mounted at `swagger.basePath`, plus docs and common routes.
pub fn app_routes(state: AppState, document: Arc<ApiDocument>, config: &CrudcastConfig) -> Router {
    let models = model_routes(state, config.max_body_bytes);
    let base = config.swagger.base_path.trim_end_matches('/');
    let app = if base.is_empty() {
        Router::new().merge(models)
    } else {
        Router::new().nest(base, models)
    };
    app.merge(docs_routes(document, &config.swagger))
        .merge(common_routes())
}
