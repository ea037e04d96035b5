use axum::Json;
use axum::extract::State;

use ideas_core::UpdateIdeaResponse;

use super::AppState;

/// `POST /v1/ideas/update`
///
/// The body is an invocation event. The reply is always `200`; failures are
/// reported inside the response body. Bodies that are not JSON at all are
/// turned away by the extractor.
pub async fn update_idea(
    State(state): State<AppState>,
    Json(event): Json<serde_json::Value>,
) -> Json<UpdateIdeaResponse> {
    Json(state.handler.handle_event(event).await)
}
