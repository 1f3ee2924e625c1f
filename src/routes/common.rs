//! Common routes: root, health, readiness, version, OpenAPI document.

use crate::doc::ApiDoc;
use crate::state::AppState;
use crate::store;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

#[derive(Serialize, ToSchema)]
pub struct HealthBody {
    pub status: &'static str,
    /// Seconds since the Unix epoch.
    pub timestamp: f64,
    pub version: &'static str,
}

#[derive(Serialize, ToSchema)]
pub struct ReadyBody {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<&'static str>,
}

#[derive(Serialize)]
struct RootBody {
    message: &'static str,
    docs: &'static str,
    health: &'static str,
}

async fn root() -> Json<RootBody> {
    Json(RootBody {
        message: "Welcome to Student Management API",
        docs: "/openapi.json",
        health: "/health",
    })
}

/// Liveness. Never touches the database.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Process is up", body = HealthBody))
)]
pub async fn health() -> Json<HealthBody> {
    let timestamp = chrono::Utc::now().timestamp_micros() as f64 / 1_000_000.0;
    Json(HealthBody {
        status: "healthy",
        timestamp,
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses(
        (status = 200, description = "Database reachable", body = ReadyBody),
        (status = 503, description = "Database unavailable", body = ReadyBody)
    )
)]
pub async fn ready(State(state): State<AppState>) -> Result<Json<ReadyBody>, (StatusCode, Json<ReadyBody>)> {
    if let Err(e) = store::ping(&state.pool).await {
        tracing::warn!(error = %e, "readiness check failed");
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadyBody {
                status: "degraded",
                database: Some("unavailable"),
            }),
        ));
    }
    Ok(Json(ReadyBody {
        status: "ok",
        database: Some("ok"),
    }))
}

async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Common routes including readiness with DB check.
pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
        .route("/openapi.json", get(openapi))
        .with_state(state)
}
