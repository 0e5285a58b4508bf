//! Server info page and the not-found fallback.

use axum::{
    extract::State,
    http::{Method, StatusCode, Uri},
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use super::{Endpoint, ENDPOINTS};
use crate::config::StorageMode;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub storage: StorageMode,
    pub endpoints: &'static [Endpoint],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotFoundResponse {
    pub error: &'static str,
    pub message: String,
    pub available_endpoints: Vec<String>,
}

/// GET /
pub async fn index(State(state): State<AppState>) -> Json<ServerInfo> {
    Json(ServerInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        description: env!("CARGO_PKG_DESCRIPTION"),
        storage: state.store.mode(),
        endpoints: ENDPOINTS,
    })
}

/// Fallback for every unmatched route.
pub async fn not_found(method: Method, uri: Uri) -> impl IntoResponse {
    tracing::debug!(%method, path = %uri.path(), "No route matched");

    let body = NotFoundResponse {
        error: "Not Found",
        message: format!("Route {} {} not found", method, uri.path()),
        available_endpoints: ENDPOINTS.iter().map(Endpoint::to_string).collect(),
    };

    (StatusCode::NOT_FOUND, Json(body))
}
