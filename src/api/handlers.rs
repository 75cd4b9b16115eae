//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::sizing::{SizingReport, run_sizing};

use super::AppState;
use super::types::{ErrorResponse, SizeRequest};

/// Returns the report computed from the startup scenario.
///
/// `GET /report` → 200 + `SizingReport` JSON
pub async fn get_report(State(state): State<Arc<AppState>>) -> Json<SizingReport> {
    Json(state.report.clone())
}

/// Runs a sizing for the supplied input bundle.
///
/// `POST /size` → 200 + `SizingReport` JSON
/// Invalid inputs (bad samples, incompatible periods, missing water data)
/// → 422 + `ErrorResponse`
pub async fn post_size(Json(req): Json<SizeRequest>) -> impl IntoResponse {
    match run_sizing(req.input, req.assumptions, req.scope) {
        Ok(report) => Ok(Json(report)),
        Err(e) => Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )),
    }
}
