//! `GET /actions`: names this server will execute.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::types::ApiContext;

#[derive(Serialize)]
pub struct ActionsResponse {
    pub actions: Vec<&'static str>,
}

pub async fn list(State(ctx): State<ApiContext>) -> Json<ActionsResponse> {
    Json(ActionsResponse {
        actions: ctx.registry.action_names().to_vec(),
    })
}
