//! HTTP interface
//!
//! | Method | Path                     | Body                                   |
//! |--------|--------------------------|----------------------------------------|
//! | POST   | `/generate_report`       | `{"variant", "format"?, "patient"?}`   |
//! | POST   | `/generate_variant_list` | `{"effect"}`                           |
//! | GET    | `/health`                |                                        |

pub mod error;
pub mod handlers;
pub mod state;

pub use state::AppState;

use crate::config::ServerConfig;
use crate::domain::errors::ReportError;
use crate::domain::result::Result;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builds the application router
pub fn router(state: AppState, cors_enabled: bool) -> Router {
    let router = Router::new()
        .route("/generate_report", post(handlers::generate_report))
        .route("/generate_variant_list", post(handlers::generate_variant_list))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if cors_enabled {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

/// Serves the API until `shutdown` flips to `true`
///
/// In-flight requests complete before this returns.
pub async fn serve(
    config: &ServerConfig,
    state: AppState,
    mut shutdown: watch::Receiver<bool>,
) -> Result<()> {
    let app = router(state, config.cors_enabled);
    let address = config.bind_address();

    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| ReportError::Io(format!("Failed to bind {address}: {e}")))?;

    tracing::info!(address = %address, cors_enabled = config.cors_enabled, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            while !*shutdown.borrow() {
                if shutdown.changed().await.is_err() {
                    break;
                }
            }
        })
        .await
        .map_err(|e| ReportError::Io(format!("Server error: {e}")))?;

    tracing::info!("Server stopped");
    Ok(())
}
