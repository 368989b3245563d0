//! room-inventory server entry point.
//!
//! Loads configuration, prepares the inventory table, and starts the Axum
//! HTTP server.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use room_inventory::api;
use room_inventory::app_state::AppState;
use room_inventory::config::{AppConfig, LogFormat, StoreBackend};
use room_inventory::persistence::{InventoryStore, MemoryStore, PostgresStore};
use room_inventory::service::{InventoryService, TripService};
use room_inventory::upstream::{self, GeminiClient, PlanGenerator, PlanLookup, SheetsClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config =
        AppConfig::from_env().map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;

    init_tracing(config.log_format);
    tracing::info!(addr = %config.listen_addr, "starting room-inventory");

    // Build persistence layer
    let store: Arc<dyn InventoryStore> = match config.store_backend {
        StoreBackend::Postgres => Arc::new(
            PostgresStore::connect(&config.database)
                .await
                .context("connecting to PostgreSQL")?,
        ),
        StoreBackend::Memory => {
            tracing::warn!("using in-memory store; room counts reset on restart");
            Arc::new(MemoryStore::new())
        }
    };

    // Build service layer
    let inventory = InventoryService::new(store, config.inventory);
    inventory
        .initialize()
        .await
        .context("initializing hotel_config table")?;

    let http = upstream::http_client(Duration::from_secs(config.upstream_timeout_secs))
        .context("building upstream HTTP client")?;

    let generator = config.generative.as_ref().map(|cfg| {
        tracing::info!(model = %cfg.model, "generative backend enabled");
        Arc::new(GeminiClient::new(http.clone(), cfg)) as Arc<dyn PlanGenerator>
    });
    if generator.is_none() {
        tracing::warn!("GENERATIVE_API_KEY not set; trip plans served from cache only");
    }

    let lookup = config
        .sheets
        .as_ref()
        .map(|cfg| SheetsClient::new(http.clone(), cfg))
        .transpose()
        .context("configuring spreadsheet lookup")?
        .map(|client| Arc::new(client) as Arc<dyn PlanLookup>);

    // Build application state
    let app_state = AppState {
        inventory: Arc::new(inventory),
        trips: Arc::new(TripService::new(generator, lookup, config.trip_deadline())),
    };

    // Build router
    let app = api::build_app(app_state, Duration::from_secs(config.request_timeout_secs));

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
