//! HTTP API surface
//!
//! The thin transport shell over the monitor: two POST routes, JSON in and
//! out. Decode failures are rejected with 400 before the monitor is
//! touched; nothing here holds state beyond the shared monitor handle.

/// Request decoding with explicit tag dispatch
pub mod wire;

use crate::error::DecodeError;
use crate::monitor::Monitor;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    monitor: Arc<Monitor>,
}

/// Build the service router over a shared monitor
pub fn router(monitor: Arc<Monitor>) -> Router {
    Router::new()
        .route("/add-config", post(add_config))
        .route("/record-event", post(record_event))
        .with_state(AppState { monitor })
}

/// API error rendered as a JSON body with a status code
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<DecodeError> for ApiError {
    fn from(err: DecodeError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// Response for a successful rule registration
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddConfigResponse {
    message: String,
    client: String,
    event_type: String,
}

/// Response for a recorded event
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordEventResponse {
    client: String,
    event_type: String,
    /// Empty when no rule triggered
    alert_message: String,
    triggered: bool,
}

async fn add_config(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<AddConfigResponse>, ApiError> {
    let rule = wire::decode_rule(&body)?;
    let client = rule.client.clone();
    let event_type = rule.event_type.clone();

    state.monitor.register_rule(rule);

    Ok(Json(AddConfigResponse {
        message: "Alert configuration added successfully".to_string(),
        client,
        event_type,
    }))
}

async fn record_event(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<RecordEventResponse>, ApiError> {
    let event = wire::decode_event(&body)?;
    let client = event.client.clone();
    let event_type = event.event_type.clone();

    let outcome = state.monitor.record_event(event);

    Ok(Json(RecordEventResponse {
        client,
        event_type,
        alert_message: outcome.alert_message.unwrap_or_default(),
        triggered: outcome.triggered,
    }))
}
