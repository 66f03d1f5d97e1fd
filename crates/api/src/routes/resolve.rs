use axum::body::Bytes;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};

use crate::error::AppError;
use crate::event::ResolverEvent;
use crate::response::ResolverResponse;
use crate::state::AppState;

/// POST /resolve
///
/// Runs a resolver event through the dispatcher. Always answers 200; the
/// outcome is carried in the envelope. The body is decoded here rather
/// than by the `Json` extractor so a malformed event becomes a
/// `ValidationError` envelope instead of an axum rejection.
async fn resolve(State(state): State<AppState>, body: Bytes) -> Json<ResolverResponse> {
    let event: ResolverEvent = match serde_json::from_slice(&body) {
        Ok(event) => event,
        Err(err) => {
            tracing::debug!(error = %err, "Rejected malformed resolver event");
            return Json(ResolverResponse::error(
                AppError::BadInput(err.to_string()).into_resolver_error(false),
            ));
        }
    };
    Json(state.dispatcher.handle(&event).await)
}

pub fn router() -> Router<AppState> {
    Router::new().route("/resolve", post(resolve))
}
