//! Liveness and schema readiness.
//!
//! `/health` is mounted at the root, outside `/api/v1`. It reports `ok` only
//! when the database answers and every embedded migration has been applied,
//! otherwise `degraded` with a 503.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use newsdesk_db::SchemaStatus;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Absent when the database could not be queried.
    pub schema: Option<SchemaStatus>,
    pub schema_current: bool,
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let schema = match newsdesk_db::schema_status(&state.pool).await {
        Ok(schema) => Some(schema),
        Err(e) => {
            tracing::warn!(error = %e, "Schema status query failed");
            None
        }
    };
    let db_healthy = schema.is_some();
    let schema_current = schema.is_some_and(|s| s.is_current());

    let (code, status) = if db_healthy && schema_current {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
            schema,
            schema_current,
        }),
    )
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
