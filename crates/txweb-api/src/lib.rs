//! HTTP API server
//!
//! Routes are organized into modules:
//! - routes::transactions: Transaction list, detail, create and the home page

pub mod error;
pub mod routes;

use axum::{routing::get, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use txweb_config::Config;
use txweb_core::{InMemoryTransactionsRepository, TransactionsController};

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub controller: TransactionsController,
    pub config: Config,
}

impl AppState {
    pub fn new(controller: TransactionsController, config: Config) -> Self {
        Self { controller, config }
    }

    /// State backed by an in-memory repository built from `config.store`
    pub fn in_memory(config: Config) -> Self {
        let repository = Arc::new(InMemoryTransactionsRepository::from_config(&config.store));
        Self::new(TransactionsController::new(repository), config)
    }
}

/// Create the application router
///
/// The transactions API answers on both `/api/Transactions` and
/// `/api/transactions`.
pub fn create_router(state: AppState) -> Router {
    use routes::transactions::page_home;

    let router = Router::new()
        .route("/", get(page_home))
        .route("/api/health", get(health_check))
        .nest("/api/Transactions", routes::transactions::router())
        .nest("/api/transactions", routes::transactions::router());

    let router = if state.config.server.cors_permissive {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    router.with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{}</title>
    <script src="https://cdn.tailwindcss.com"></script>
</head>
<body class="bg-gray-50 text-gray-900">
    {}
</body>
</html>"#,
        title, content
    )
}

/// Resolves when the process receives Ctrl-C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                log::error!("Failed to listen for SIGTERM: {}", e);
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
    log::info!("Shutdown signal received");
}

/// Start the HTTP server
///
/// Binds to `config.server.host:config.server.port` and serves until a
/// shutdown signal arrives.
pub async fn start_server(state: AppState) -> anyhow::Result<()> {
    let addr = state.config.bind_address();
    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting txweb server on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - / (Home page)");
    log::info!("  - GET  /api/Transactions");
    log::info!("  - GET  /api/Transactions/:id");
    log::info!("  - POST /api/Transactions");
    log::info!("  - GET  /api/health");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Server stopped gracefully");
    Ok(())
}
