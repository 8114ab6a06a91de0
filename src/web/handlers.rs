//! HTTP request handlers

use super::state::AppState;
use crate::error::SearchError;
use crate::presenters::{TitleLanguage, ViewerContext};
use crate::search::SearchRequest;
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, error};

/// Header carrying the viewer's title language preference
pub const TITLE_LANGUAGE_HEADER: &str = "x-title-language";

/// Search handler
pub async fn search(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(request): Query<SearchRequest>,
) -> Response {
    let viewer = viewer_context(&headers);

    match state.dispatcher.dispatch(&request, &viewer).await {
        Ok(response) => Json(response).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Stats handler
pub async fn stats(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.metrics.snapshot())
}

/// Health check handler
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
        "instance": state.instance_name(),
        "sources": state.registry.kinds(),
    }))
}

/// Title language from the upstream session header; Canonical when absent
/// or unrecognised
fn viewer_context(headers: &HeaderMap) -> ViewerContext {
    let language = headers
        .get(TITLE_LANGUAGE_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| match value.parse::<TitleLanguage>() {
            Ok(language) => Some(language),
            Err(e) => {
                debug!("Ignoring {} header: {}", TITLE_LANGUAGE_HEADER, e);
                None
            }
        })
        .unwrap_or_default();

    ViewerContext::new(language)
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.is_client_error() {
            debug!("Rejected search request: {:?}", self);
        } else if status.is_server_error() {
            error!("Search failed: {}", self);
        }

        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
