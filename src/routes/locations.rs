//! Handlers for reading, adding and clearing location reports.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request, State},
    http::{header::CONTENT_TYPE, HeaderMap},
    Form, Json,
};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::instrument;

use crate::error::AppError;
use crate::store::LocationRecord;
use crate::state::AppState;

/// Success body for a POST.
#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub success: bool,
    pub message: &'static str,
    /// Number of locations in the request, accepted or not
    pub count: usize,
    pub total: usize,
}

/// Success body for a DELETE.
#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub success: bool,
    pub message: &'static str,
}

/// Turn a request body into the list of candidates handed to the store.
///
/// An array is used as-is and any other value becomes a single candidate.
/// An empty body counts as one empty object.
fn candidates_from_body(body: &[u8]) -> Result<Vec<Value>, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(vec![Value::Object(Default::default())]);
    }

    Ok(match serde_json::from_slice(body)? {
        Value::Array(items) => items,
        other => vec![other],
    })
}

/// Whether the request carries an HTML form body.
fn is_form_body(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|mime| {
            mime.trim()
                .eq_ignore_ascii_case("application/x-www-form-urlencoded")
        })
}

/// GET /api/locations
#[instrument(name = "locations::list", skip(state))]
pub async fn list(State(state): State<AppState>) -> Json<Vec<LocationRecord>> {
    let locations = state.store.list().await;
    tracing::debug!(count = locations.len(), "Fetched all locations");
    Json(locations)
}

/// POST /api/locations
///
/// A form-encoded body is one candidate whose fields are all strings. Any
/// other body is parsed as JSON whatever its content type.
#[instrument(name = "locations::create", skip(state, request), fields(form = tracing::field::Empty))]
pub async fn create(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<SaveResponse>, AppError> {
    let form = is_form_body(request.headers());
    tracing::Span::current().record("form", form);

    let candidates = if form {
        let Form(fields) = Form::<Map<String, Value>>::from_request(request, &()).await?;
        vec![Value::Object(fields)]
    } else {
        let body = Bytes::from_request(request, &()).await?;
        candidates_from_body(&body)?
    };

    let outcome = state
        .store
        .append(&candidates)
        .await
        .map_err(AppError::SaveFailed)?;

    tracing::info!(
        submitted = outcome.submitted,
        accepted = outcome.accepted,
        total = outcome.total,
        "Saved locations"
    );

    Ok(Json(SaveResponse {
        success: true,
        message: "Locations saved",
        count: outcome.submitted,
        total: outcome.total,
    }))
}

/// DELETE /api/locations
#[instrument(name = "locations::clear", skip(state))]
pub async fn clear(State(state): State<AppState>) -> Result<Json<ClearResponse>, AppError> {
    state.store.clear().await.map_err(AppError::ClearFailed)?;

    tracing::info!("Cleared all locations");

    Ok(Json(ClearResponse {
        success: true,
        message: "All locations cleared",
    }))
}
