//! Server: loads the model config (CRUDCAST_CONFIG, default `crudcast.yml`), prepares one collection
//! per model, and serves the CRUD routes, the Swagger document and the Swagger UI.

use crudcast::{
    app_routes, apply_env_overrides, ensure_database_exists, load_from_path, ApiDocument, AppState,
    DocumentStore, ModelRegistry, Namespace,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("crudcast=info")),
        )
        .init();

    let config_path = std::env::var("CRUDCAST_CONFIG").unwrap_or_else(|_| "crudcast.yml".into());
    let mut config = load_from_path(&config_path)?;
    apply_env_overrides(&mut config);

    ensure_database_exists(&config.database_url).await?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;
    let store = DocumentStore::new(pool, Namespace::new(config.db_name.clone()));

    let registry = Arc::new(ModelRegistry::from_config(&config, &store)?);
    let document = Arc::new(ApiDocument::build(&registry, &config.swagger)?);
    store.ensure_collections(&registry).await?;

    let state = AppState { store, registry };
    let app = app_routes(state, document, &config);

    let addr = std::env::var("CRUDCAST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(
        "listening on {} (docs at {}, ui at {})",
        listener.local_addr()?,
        config.swagger.url,
        config.swagger.ui_path
    );
    axum::serve(listener, app).await?;
    Ok(())
}
