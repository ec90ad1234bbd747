//! vape-shop HTTP server.
//!
//! Run from repo root: `cargo run -p vape-shop-server`. Settings come from the
//! environment or a `.env` file; `DATABASE_URL` is required.

use std::future::IntoFuture;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use vape_shop::{
    catalog, catalog_routes, common_routes_with_ready, connect, ensure_tables, resolve, AppState,
    RequestTimeout, Settings,
};

/// In-flight requests get this long to finish once a shutdown signal arrives.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("vape_shop=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let model = resolve(&catalog())?;
    let pool = connect(&settings).await?;
    if settings.ensure_schema {
        ensure_tables(&pool, &model).await?;
    }

    let state = AppState {
        pool: pool.clone(),
        request_timeout: RequestTimeout(settings.request_timeout),
    };
    let app = common_routes_with_ready(state.clone())
        .merge(catalog_routes(&state, &model))
        .layer(RequestBodyLimitLayer::new(settings.body_limit_bytes))
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(settings.bind_addr()).await?;
    tracing::info!(addr = %listener.local_addr()?, entities = model.entities.len(), "vape-shop listening");

    let (stop_tx, mut stop_rx) = watch::channel(false);
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = stop_tx.send(true);
    });
    let drain_deadline = async move {
        let _ = stop_rx.changed().await;
        tokio::time::sleep(DRAIN_TIMEOUT).await;
    };

    tokio::select! {
        result = server.into_future() => result?,
        () = drain_deadline => tracing::warn!(timeout = ?DRAIN_TIMEOUT, "drain timed out, dropping open connections"),
    }

    pool.close().await;
    tracing::info!("shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
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
    tracing::info!("shutdown signal received, draining");
}
