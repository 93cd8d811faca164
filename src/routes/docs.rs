//! Generated Swagger document and the Swagger UI page that renders it.

use crate::config::SwaggerConfig;
use crate::openapi::ApiDocument;
use axum::{extract::State, response::Html, routing::get, Json, Router};
use std::sync::Arc;

const SWAGGER_UI_VERSION: &str = "5.17.14";

#[derive(Clone)]
struct DocsState {
    document: Arc<ApiDocument>,
    ui_page: Arc<str>,
}

async fn document(State(state): State<DocsState>) -> Json<ApiDocument> {
    Json(state.document.as_ref().clone())
}

async fn ui(State(state): State<DocsState>) -> Html<String> {
    Html(state.ui_page.to_string())
}

/// HTML page loading Swagger UI from a CDN and pointing it at `doc_url`.
pub fn swagger_ui_page(title: &str, doc_url: &str) -> String {
    let doc_url = serde_json::Value::String(doc_url.to_string());
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>{title}</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@{v}/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@{v}/swagger-ui-bundle.js"></script>
  <script>
    window.ui = SwaggerUIBundle({{ url: {doc_url}, dom_id: "#swagger-ui" }});
  </script>
</body>
</html>
"##,
        title = html_escape(title),
        v = SWAGGER_UI_VERSION,
        doc_url = doc_url,
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// GET `swagger.url` (JSON document) and GET `swagger.ui_path` (Swagger UI).
pub fn docs_routes(document: Arc<ApiDocument>, swagger: &SwaggerConfig) -> Router {
    let state = DocsState {
        ui_page: swagger_ui_page(&swagger.info.title, &swagger.url).into(),
        document,
    };
    Router::new()
        .route(&swagger.url, get(self::document))
        .route(&swagger.ui_path, get(ui))
        .with_state(state)
}
