//! Example consumer: compiles a crudcast config into its Swagger document and prints it.
//! No database is needed; collection handles are resolved against the configured namespace only.
//!
//! Run from repo root: `cargo run -p example-consumer -- path/to/crudcast.yml`

use crudcast::{load_from_path, ApiDocument, ModelRegistry, Namespace};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("crudcast=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("CRUDCAST_CONFIG").ok())
        .unwrap_or_else(|| "crudcast.yml".into());
    let config = load_from_path(&path)?;
    let registry = ModelRegistry::from_config(&config, &Namespace::new(config.db_name.clone()))?;
    let document = ApiDocument::build(&registry, &config.swagger)?;
    tracing::info!(models = registry.len(), "document generated");
    println!("{}", document.to_json_pretty()?);
    Ok(())
}
