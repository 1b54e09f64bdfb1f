//! Product catalog HTTP server
//!
//! Usage: `catalog-server [config.yaml]`. Without an argument the path is
//! read from `CATALOG_CONFIG`; without either, defaults are used.

use anyhow::Result;
use catalog::config::CatalogConfig;
use catalog::server::ServerBuilder;
use tracing_subscriber::EnvFilter;

const ENV_CONFIG: &str = "CATALOG_CONFIG";

fn load_config() -> Result<CatalogConfig> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var(ENV_CONFIG).ok());

    let config = match path {
        Some(path) => CatalogConfig::from_yaml_file(&path)?,
        None => CatalogConfig::default(),
    };

    let config = config.with_env_overrides()?;
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config()?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.filter))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!(
        bind = %config.server.bind,
        storage = ?config.storage.backend,
        "Starting product catalog"
    );

    ServerBuilder::new().with_config(config).serve().await
}
