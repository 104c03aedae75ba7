//! `POST /webhook`: run one action and collect its responses.

use axum::extract::State;
use axum::Json;

use crate::actions::CollectingDispatcher;
use crate::api::error::ApiError;
use crate::api::types::{ActionRequest, ActionResponse, ApiContext};

pub async fn invoke(
    State(ctx): State<ApiContext>,
    Json(request): Json<ActionRequest>,
) -> Result<Json<ActionResponse>, ApiError> {
    let message = request.tracker.to_message();

    let mut out = CollectingDispatcher::new();
    ctx.registry.handle(&request.next_action, &message, &mut out)?;

    let response = ActionResponse::from_utterances(out.into_utterances());
    tracing::info!(
        action = %request.next_action,
        sender = %request.sender_id,
        responses = response.responses.len(),
        "action completed"
    );
    Ok(Json(response))
}
