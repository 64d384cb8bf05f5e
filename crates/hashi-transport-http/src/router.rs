//! Axum router for the XML-RPC HTTP transport.
//! Routes: `POST <rpc_path>` (calls), `GET <rpc_path>` (method listing),
//! `GET /health` (liveness), `GET /health/ready` (readiness).

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tracing::error;

use hashi_dispatch::Dispatcher;
use hashi_types::Fault;

use crate::listing;

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// The XML-RPC dispatcher.
    pub dispatcher: Arc<Dispatcher>,
    /// Path the endpoint is mounted on (e.g. `/RPC2`).
    pub rpc_path: String,
}

/// Builds the axum `Router` with the XML-RPC and health routes.
pub fn build_router(state: AppState) -> Router {
    let rpc_path = state.rpc_path.clone();
    Router::new()
        .route(&rpc_path, post(handle_rpc).get(handle_listing))
        .route("/health", get(handle_health))
        .route("/health/ready", get(handle_ready))
        .with_state(state)
}

async fn handle_health() -> impl IntoResponse {
    Json(json!({"status": "ok", "service": "hashi"}))
}

/// Readiness probe: returns `200 OK` once the server is accepting requests.
async fn handle_ready() -> impl IntoResponse {
    Json(json!({"status": "ready", "service": "hashi"}))
}

async fn handle_listing(State(state): State<AppState>) -> impl IntoResponse {
    Html(listing::render(&state.dispatcher, &state.rpc_path))
}

/// Dispatches one XML-RPC call.
///
/// Method implementations are synchronous, so the call runs on the
/// blocking pool and a slow method only holds its own thread.
async fn handle_rpc(State(state): State<AppState>, body: String) -> impl IntoResponse {
    let dispatcher = Arc::clone(&state.dispatcher);
    match tokio::task::spawn_blocking(move || dispatcher.handle(&body)).await {
        Ok(xml) => (StatusCode::OK, [(header::CONTENT_TYPE, "text/xml")], xml),
        Err(e) => {
            error!(error = %e, "dispatch task failed");
            let fault = Fault::internal(format!("dispatch task failed: {e}"));
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, "text/xml")],
                state.dispatcher.codec().encode_fault(&fault),
            )
        }
    }
}
