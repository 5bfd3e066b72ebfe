//! Common routes: welcome, API document, health, readiness, version.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use utoipa::openapi::OpenApi;

/// Liveness and readiness report. `database` is only filled in by `/ready`.
#[derive(Serialize)]
struct Status {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    database: Option<&'static str>,
}

impl Status {
    const ALIVE: Status = Status {
        status: "ok",
        database: None,
    };
    const READY: Status = Status {
        status: "ok",
        database: Some("ok"),
    };
    const STORE_DOWN: Status = Status {
        status: "degraded",
        database: Some("unavailable"),
    };
}

#[derive(Serialize)]
struct BuildInfo {
    name: &'static str,
    version: &'static str,
}

async fn welcome() -> &'static str {
    "Welcome to root!"
}

async fn api_docs(State(state): State<AppState>) -> Json<OpenApi> {
    Json(state.api_doc.as_ref().clone())
}

async fn health() -> Json<Status> {
    Json(Status::ALIVE)
}

async fn ready(State(state): State<AppState>) -> (StatusCode, Json<Status>) {
    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, Json(Status::READY)),
        Err(e) => {
            tracing::warn!(error = %e, "store is not reachable");
            (StatusCode::SERVICE_UNAVAILABLE, Json(Status::STORE_DOWN))
        }
    }
}

async fn version() -> Json<BuildInfo> {
    Json(BuildInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /, /api-docs, /health, /ready, /version.
pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/api-docs", get(api_docs))
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
        .with_state(state)
}
