/// Axum webserver implementation
///
/// Server lifecycle: bind, serve, graceful shutdown on Ctrl-C.
use axum::http::Method;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::{
    logger::{self, LogTag},
    webserver::{routes, state::AppState},
};

/// Start the webserver
///
/// This function blocks until the server is shut down
pub async fn start_server(state: Arc<AppState>) -> Result<(), String> {
    let addr: SocketAddr = format!("{}:{}", state.config.host, state.config.port)
        .parse()
        .map_err(|e| format!("Invalid bind address: {}", e))?;

    let listener = TcpListener::bind(&addr).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::AddrInUse => {
            format!("Failed to bind to {}: Address already in use", addr)
        }
        std::io::ErrorKind::PermissionDenied => format!(
            "Failed to bind to {}: Permission denied (port {} may require elevated privileges)",
            addr, state.config.port
        ),
        _ => format!("Failed to bind to {}: {}", addr, e),
    })?;

    logger::info(
        LogTag::Webserver,
        &format!("Listening on http://{} (POST /trade)", addr),
    );

    let app = build_app(state);

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            logger::error(
                LogTag::Webserver,
                &format!("Failed to listen for Ctrl-C: {}", e),
            );
            std::future::pending::<()>().await;
        }
        logger::info(LogTag::Webserver, "Received shutdown signal, stopping webserver...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|e| format!("Server error: {}", e))?;

    logger::info(LogTag::Webserver, "Webserver stopped gracefully");

    Ok(())
}

/// Build the Axum application with all routes and middleware
pub fn build_app(state: Arc<AppState>) -> Router {
    // Preflight only; actual responses carry the envelope's CORS headers
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    routes::create_router(state).layer(ServiceBuilder::new().layer(cors))
}
