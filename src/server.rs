//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, migrations, click workers, the availability
//! monitor and the Axum server lifecycle.

use crate::application::services::{AvailabilityMonitor, LinkService};
use crate::config::Config;
use crate::domain::availability::LogNotifier;
use crate::domain::click_pipeline::{ClickPipeline, spawn_click_workers};
use crate::infrastructure::http::HttpProbe;
use crate::infrastructure::persistence::{self, SqliteClickRepository, SqliteLinkRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - SQLite connection pool
/// - Schema migrations
/// - Click workers
/// - Availability monitor (unless disabled)
/// - Axum HTTP server with graceful shutdown
///
/// After the server stops, click workers get up to
/// [`Config::shutdown_grace`] to persist queued events.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - The probe HTTP client cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = persistence::connect(&config.database_url, config.db_max_connections)
        .await
        .context("Failed to connect to database")?;
    info!("Connected to database");

    persistence::run_migrations(&pool)
        .await
        .context("Failed to run migrations")?;

    let pool = Arc::new(pool);
    let link_repository = Arc::new(SqliteLinkRepository::new(pool.clone()));
    let click_repository = Arc::new(SqliteClickRepository::new(pool.clone()));

    let link_service = Arc::new(
        LinkService::new(
            link_repository.clone(),
            click_repository.clone(),
            config.base_url.clone(),
        )
        .with_code_length(config.short_code_length),
    );

    let (click_pipeline, click_receiver) = ClickPipeline::new(config.click_queue_capacity);
    let counters = click_pipeline.counters();
    let workers = spawn_click_workers(
        click_receiver,
        click_repository,
        config.click_worker_count,
        click_pipeline.counters(),
    );
    info!(
        workers = workers.len(),
        capacity = click_pipeline.capacity(),
        "Click workers started"
    );

    let monitor_task = if config.monitor_enabled {
        let probe = HttpProbe::new(config.probe_timeout())?;
        let monitor = Arc::new(AvailabilityMonitor::new(
            link_repository,
            Arc::new(probe),
            Arc::new(LogNotifier),
        ));
        Some(monitor.spawn(config.monitor_interval()))
    } else {
        info!("Availability monitor disabled");
        None
    };

    let state = AppState::new(link_service, click_pipeline, config.behind_proxy);
    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    info!("Server stopped, draining click queue");

    if let Some(task) = monitor_task {
        task.abort();
    }

    // Every pipeline handle went away with the router, so workers exit once the queue is empty.
    if tokio::time::timeout(config.shutdown_grace(), workers.join())
        .await
        .is_err()
    {
        warn!(
            grace_secs = config.shutdown_grace_seconds,
            "Click workers still busy after grace period, remaining events are lost"
        );
    }

    info!(
        accepted = counters.accepted(),
        persisted = counters.persisted(),
        dropped = counters.dropped(),
        failed = counters.failed(),
        "Shutdown complete"
    );

    pool.close().await;

    Ok(())
}

/// Resolves on SIGINT or SIGTERM (Ctrl+C only on non-unix targets).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
