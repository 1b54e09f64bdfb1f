//! ServerBuilder for fluent API to build HTTP servers

use super::handlers::AppState;
use super::router::build_router;
use crate::config::CatalogConfig;
use crate::core::service::CatalogService;
use crate::core::store::ProductStore;
use crate::storage::connect_store;
use anyhow::Result;
use axum::Router;
use axum::http::StatusCode;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Builder for the catalog HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config(CatalogConfig::default())
///     .with_store(InMemoryProductStore::new())
///     .build()?;
/// ```
///
/// Without an explicit store, [`build_with_storage`](Self::build_with_storage)
/// and [`serve`](Self::serve) connect the one named by the configuration.
pub struct ServerBuilder {
    config: CatalogConfig,
    store: Option<Arc<dyn ProductStore>>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with default configuration
    pub fn new() -> Self {
        Self {
            config: CatalogConfig::default(),
            store: None,
        }
    }

    pub fn with_config(mut self, config: CatalogConfig) -> Self {
        self.config = config;
        self
    }

    /// Use this store instead of the configured backend
    pub fn with_store(mut self, store: impl ProductStore + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Build the router over the store given to the builder
    ///
    /// Fails if no store was set; see
    /// [`build_with_storage`](Self::build_with_storage).
    pub fn build(mut self) -> Result<Router> {
        self.config.validate()?;
        let store = self
            .store
            .take()
            .ok_or_else(|| anyhow::anyhow!("ProductStore is required. Call .with_store()"))?;

        Ok(self.assemble(store))
    }

    /// Build the router, connecting the configured store if none was set
    pub async fn build_with_storage(mut self) -> Result<Router> {
        self.config.validate()?;
        let store = match self.store.take() {
            Some(store) => store,
            None => connect_store(&self.config.storage).await?,
        };

        Ok(self.assemble(store))
    }

    fn assemble(self, store: Arc<dyn ProductStore>) -> Router {
        let mut service = CatalogService::new(store);
        if let Some(timeout) = self.config.storage.timeout() {
            service = service.with_store_timeout(timeout);
        }

        let state = AppState::new(Arc::new(service), self.config.pagination.clone());

        build_router(state).layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    self.config.server.request_timeout(),
                )),
        )
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the configured address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    ///
    /// # Example
    ///
    /// ```ignore
    /// ServerBuilder::new()
    ///     .with_config(CatalogConfig::from_yaml_file("catalog.yaml")?)
    ///     .serve()
    ///     .await?;
    /// ```
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.server.bind.clone();
        let app = self.build_with_storage().await?;
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for Ctrl+C or SIGTERM
///
/// If a handler cannot be installed that signal is ignored and the other
/// one still triggers shutdown.
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
