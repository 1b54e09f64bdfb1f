//! Storage implementations for different backends

pub mod in_memory;
#[cfg(feature = "postgres")]
pub mod postgres;
pub mod seed;

pub use in_memory::InMemoryProductStore;
#[cfg(feature = "postgres")]
pub use postgres::PostgresProductStore;
pub use seed::{sample_products, seed_if_empty};

use crate::config::{StorageBackend, StorageConfig};
use crate::core::store::ProductStore;
use anyhow::Result;
use std::sync::Arc;

/// Build the store selected by `config`
///
/// For PostgreSQL this connects, runs the embedded migrations and fails if
/// the crate was built without the `postgres` feature. The sample products
/// are loaded when `config.seed` is set and the store is empty.
pub async fn connect_store(config: &StorageConfig) -> Result<Arc<dyn ProductStore>> {
    let store: Arc<dyn ProductStore> = match config.backend {
        StorageBackend::InMemory => {
            tracing::info!("Using in-memory product store");
            Arc::new(InMemoryProductStore::new())
        }
        StorageBackend::Postgres => connect_postgres(config).await?,
    };

    if config.seed {
        seed_if_empty(store.as_ref()).await?;
    }

    Ok(store)
}

#[cfg(feature = "postgres")]
async fn connect_postgres(config: &StorageConfig) -> Result<Arc<dyn ProductStore>> {
    use sqlx::postgres::PgPoolOptions;

    let url = config
        .database_url
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("storage.database_url is required for the postgres backend"))?;

    let mut options = PgPoolOptions::new().max_connections(config.max_connections);
    if let Some(timeout) = config.timeout() {
        options = options.acquire_timeout(timeout);
    }
    let store = PostgresProductStore::new(options.connect(url).await?);

    postgres::run_migrations(store.pool()).await?;
    tracing::info!(max_connections = config.max_connections, "Connected to PostgreSQL product store");

    Ok(Arc::new(store))
}

#[cfg(not(feature = "postgres"))]
async fn connect_postgres(_config: &StorageConfig) -> Result<Arc<dyn ProductStore>> {
    anyhow::bail!("the postgres backend requires building with the `postgres` feature")
}
