//! REST API for sizing reports.
//!
//! Provides two endpoints:
//! - `GET /report` — the report computed from the loaded scenario
//! - `POST /size` — run a sizing for a caller-supplied input bundle

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

use crate::sizing::SizingReport;

/// Immutable application state shared across all request handlers.
///
/// Constructed once from the scenario loaded at startup and wrapped in
/// `Arc` — no locks needed since the baseline report is read-only and
/// `POST /size` computes fresh reports per request.
pub struct AppState {
    /// Report computed from the startup scenario.
    pub report: SizingReport,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/report", get(handlers::get_report))
        .route("/size", post(handlers::post_size))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Panics
///
/// Panics if the TCP listener cannot bind to `addr`.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind to {addr}: {e}"));
    eprintln!("API server listening on http://{addr}");
    axum::serve(listener, app)
        .await
        .unwrap_or_else(|e| panic!("server error: {e}"));
}
