//! Energy cost service runtime.
//!
//! [`ServerHandle`] owns the full server lifecycle: metrics recorder, price
//! plan catalog and reading store construction, REST API and graceful
//! shutdown.

use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};

use chrono::Utc;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::{error, info, warn};

use crate::config::AppConfig;
use crate::infrastructure::{InMemoryReadingStore, ReadingGenerator};
use crate::interfaces::http::{create_api_router, ApiState};
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the service.
pub struct ServerOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Install the Prometheus recorder and expose `/metrics` (default: true).
    pub enable_metrics: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            enable_metrics: true,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running energy cost service.
///
/// # Examples
///
/// ```rust,no_run
/// use energy_cost::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.install_signal_handler();
///     handle.shutdown_signal().wait().await;
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// Services and stores behind the router.
    pub state: ApiState,
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Address the REST API is bound to.
    pub local_addr: SocketAddr,

    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Start the service.
    ///
    /// This will:
    /// 1. Install the Prometheus metrics recorder (if enabled)
    /// 2. Build the price plan catalog from the configuration
    /// 3. Create the reading store, seeded with demo readings if configured
    /// 4. Start the REST API server (with Swagger UI)
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;

        info!("Starting energy cost service...");

        // ── Prometheus metrics recorder ────────────────────────
        let prometheus_handle = if opts.enable_metrics {
            prometheus_handle()
        } else {
            None
        };

        // ── Price plans ────────────────────────────────────────
        let catalog = app_cfg.price_plan_catalog()?;
        info!(
            plans = catalog.plans().len(),
            meters = app_cfg.meters.len(),
            "Price plan catalog loaded"
        );

        // ── Readings ───────────────────────────────────────────
        let store = if app_cfg.readings.seed_demo_data {
            let mut generator = ReadingGenerator::new(app_cfg.readings.seed);
            let seeded = generator.generate_for(app_cfg.meter_ids(), Utc::now().timestamp());
            let store = InMemoryReadingStore::with_readings(seeded);
            if store.is_empty() {
                warn!("Demo data enabled but no meters are configured");
            }
            info!(
                meters = store.len(),
                seed = ?app_cfg.readings.seed,
                "Reading store seeded with demo data"
            );
            store
        } else {
            info!("Reading store starts empty");
            InMemoryReadingStore::new()
        };

        let state = ApiState::new(Arc::new(store), Arc::new(catalog));

        // ── Shutdown coordinator ───────────────────────────────
        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let shutdown_signal = shutdown.signal();

        // ── REST API server ────────────────────────────────────
        let api_router = create_api_router(state.clone(), prometheus_handle);

        let api_addr = app_cfg.api_address();
        let listener = tokio::net::TcpListener::bind(&api_addr).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API server listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
            shutdown_signal.wait().await;
            info!("🛑 REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        info!("🚀 Energy cost service started");

        Ok(Self {
            state,
            config: app_cfg,
            local_addr,
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

    /// Wait for the server to stop after shutdown has been triggered.
    ///
    /// In-flight requests get `server.shutdown_timeout` seconds to finish;
    /// the server task is aborted after that.
    pub async fn wait(self) {
        info!("⏳ Waiting for server tasks to complete...");

        let abort = self.api_task.abort_handle();
        let api_task = self.api_task;
        let finished = self
            .shutdown
            .shutdown_with_cleanup(|| async move {
                match api_task.await {
                    Ok(()) => info!("REST API server stopped"),
                    Err(e) => error!("REST API server task panicked: {}", e),
                }
            })
            .await;

        if !finished {
            warn!("Aborting REST API server");
            abort.abort();
        }

        info!("👋 Energy cost service shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("🛑 Shutting down energy cost service...");
        self.trigger_shutdown();
        self.wait().await;
    }

    /// Check if the server is still running.
    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// The process-wide Prometheus recorder handle.
///
/// The global recorder can only be installed once per process, so a restart
/// within the same process reuses it. `None` when installation failed.
fn prometheus_handle() -> Option<PrometheusHandle> {
    static PROM_HANDLE: OnceLock<Option<PrometheusHandle>> = OnceLock::new();

    PROM_HANDLE
        .get_or_init(|| match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => {
                info!("📊 Prometheus metrics recorder installed");
                Some(handle)
            }
            Err(e) => {
                warn!("Prometheus recorder unavailable, /metrics disabled: {}", e);
                None
            }
        })
        .clone()
}

/// Initialize tracing (logging) from the application config.
///
/// `RUST_LOG` takes precedence over `logging.level`. Call this once at
/// process startup (before [`ServerHandle::start`]).
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

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    use super::*;

    fn test_options() -> ServerOptions {
        let mut config = AppConfig::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 0;
        config.server.shutdown_timeout = 5;
        config.readings.seed = Some(7);
        ServerOptions {
            config,
            enable_metrics: false,
        }
    }

    async fn http_get(addr: SocketAddr, path: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        let request =
            format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
        stream.write_all(request.as_bytes()).await.unwrap();

        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    #[tokio::test]
    async fn serves_seeded_meters_and_shuts_down() {
        let handle = ServerHandle::start(test_options()).await.unwrap();
        assert!(handle.is_running());
        assert_ne!(handle.local_addr.port(), 0);

        let health = http_get(handle.local_addr, "/health").await;
        assert!(health.starts_with("HTTP/1.1 200"));

        let compare = http_get(
            handle.local_addr,
            "/api/v1/price-plans/compare/smart-meter-4",
        )
        .await;
        assert!(compare.starts_with("HTTP/1.1 200"));
        assert!(compare.contains("\"meterId\":\"smart-meter-4\""));

        let meters = handle.state.reading_service.meter_ids().await.unwrap();
        assert_eq!(meters.len(), 5);

        tokio::time::timeout(std::time::Duration::from_secs(5), handle.shutdown())
            .await
            .expect("server should stop");
    }

    #[tokio::test]
    async fn starts_empty_without_demo_data() {
        let mut opts = test_options();
        opts.config.readings.seed_demo_data = false;

        let handle = ServerHandle::start(opts).await.unwrap();
        assert!(handle
            .state
            .reading_service
            .meter_ids()
            .await
            .unwrap()
            .is_empty());

        let weekly = http_get(
            handle.local_addr,
            "/api/v1/price-plans/weekly-usage/smart-meter-0",
        )
        .await;
        assert!(weekly.starts_with("HTTP/1.1 404"));

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn seeding_without_meters_leaves_store_empty() {
        let mut opts = test_options();
        opts.config.meters.clear();

        let handle = ServerHandle::start(opts).await.unwrap();
        let meters = handle.state.reading_service.meter_ids().await.unwrap();
        assert!(meters.is_empty());

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn invalid_catalog_fails_to_start() {
        let mut opts = test_options();
        opts.config.price_plans[0].rate = f64::NAN;
        assert!(ServerHandle::start(opts).await.is_err());
    }
}
