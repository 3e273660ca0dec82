//! Server runtime.
//!
//! [`ServerHandle`] owns the whole lifecycle: storage, services, the REST
//! API listener and graceful shutdown.

use std::net::SocketAddr;
use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tracing::{error, info, warn};

use crate::config::{AppConfig, StorageBackend};
use crate::domain::RepositoryProvider;
use crate::interfaces::http::common::ResponseContext;
use crate::interfaces::http::modules::health::HealthState;
use crate::interfaces::http::{create_api_router, ApiState};
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};
use crate::{init_database, InMemoryRepositoryProvider, SeaOrmRepositoryProvider};

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running fleet service.
///
/// ```rust,no_run
/// use fleet_service::config::AppConfig;
/// use fleet_service::server::ServerHandle;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(AppConfig::default()).await?;
///     handle.install_signal_handler();
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// Repository provider the API runs on.
    pub repos: Arc<dyn RepositoryProvider>,
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Address the API is actually bound to.
    pub local_addr: SocketAddr,

    db: Option<DatabaseConnection>,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Open storage, build the router and start serving.
    pub async fn start(config: AppConfig) -> Result<Self, Box<dyn std::error::Error>> {
        info!("Starting fleet service...");

        // ── Storage ────────────────────────────────────────────
        let (repos, db): (Arc<dyn RepositoryProvider>, Option<DatabaseConnection>) =
            match config.database.backend {
                StorageBackend::Sqlite => {
                    let db = init_database(&config.database.connection()).await?;
                    (Arc::new(SeaOrmRepositoryProvider::new(db.clone())), Some(db))
                }
                StorageBackend::Memory => {
                    warn!("Using in-memory storage; data is lost on shutdown");
                    (Arc::new(InMemoryRepositoryProvider::new()), None)
                }
            };

        // ── REST API ───────────────────────────────────────────
        let limits = config.pagination.limits();
        info!(
            default_page_size = limits.default_page_size(),
            max_page_size = limits.max_page_size(),
            "Pagination limits"
        );
        let context = ResponseContext::new(&config.api.public_base_url, limits);
        let state = ApiState::new(repos.clone(), context, HealthState::new(db.clone()));
        let router = create_api_router(state);

        let listener = tokio::net::TcpListener::bind(config.server.address()).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API server listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let shutdown = ShutdownCoordinator::new(config.server.shutdown_timeout);
        let api_shutdown = shutdown.signal();
        let api_server = axum::serve(listener, router.into_make_service())
            .with_graceful_shutdown(async move {
                api_shutdown.wait().await;
                info!("REST API server received shutdown signal");
            });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            repos,
            config,
            local_addr,
            db,
            shutdown,
            api_task,
        })
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown (non-blocking).
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Block until shutdown is triggered, then drain in-flight requests
    /// within the configured timeout and close the database.
    pub async fn wait(self) {
        let Self {
            db,
            shutdown,
            api_task,
            ..
        } = self;

        let drained = shutdown
            .shutdown_with_cleanup(|| async move {
                if let Err(e) = api_task.await {
                    error!("REST API server task panicked: {}", e);
                }
            })
            .await;
        if !drained {
            warn!("In-flight requests were abandoned");
        }

        if let Some(db) = db {
            match db.close().await {
                Ok(()) => info!("Database connection closed"),
                Err(e) => warn!("Error closing database connection: {}", e),
            }
        }

        info!("Fleet service shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("Shutting down fleet service...");
        self.trigger_shutdown();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

/// Initialize tracing (logging) from the application config.
///
/// `RUST_LOG` wins over `logging.level`. Call once at process startup.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}
