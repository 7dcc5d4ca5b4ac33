//! Liveness and readiness probes
//!
//! `/healthz` only says the process is serving. `/readyz` answers 200 once the
//! `leads` table can be reached, and 503 otherwise, so a load balancer holds
//! traffic until `register` would actually succeed.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tracing::warn;

use crate::app::AppState;

#[derive(Debug, Serialize)]
pub struct LivenessResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    /// Table the readiness check looked for
    pub table: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

async fn healthz() -> Json<LivenessResponse> {
    Json(LivenessResponse {
        status: "healthy",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn readyz(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let leads = state.db.leads();
    let table = leads.table_name().to_string();

    let reason = match leads.table_exists().await {
        Ok(true) => None,
        Ok(false) => Some(format!("table {} does not exist", table)),
        Err(e) => Some(e.to_string()),
    };

    match reason {
        None => (
            StatusCode::OK,
            Json(ReadinessResponse {
                ready: true,
                table,
                reason: None,
            }),
        ),
        Some(reason) => {
            warn!(table = %table, reason = %reason, "Not ready");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadinessResponse {
                    ready: false,
                    table,
                    reason: Some(reason),
                }),
            )
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
}
