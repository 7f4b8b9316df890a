use axum::{extract::State, http::StatusCode, Json};

use crate::api::dto::{AssistantModeRequest, AssistantResponse, PromptRequest};
use crate::api::state::AppState;
use crate::domain::HubError;
use crate::services::AssistantMessage;

pub async fn get_assistant(State(state): State<AppState>) -> Json<AssistantResponse> {
    Json(state.hub.assistant().await.into())
}

pub async fn set_mode(
    State(state): State<AppState>,
    Json(req): Json<AssistantModeRequest>,
) -> Json<AssistantResponse> {
    Json(state.hub.set_assistant_mode(req.mode).await.into())
}

/// Waits out the assistant's "thinking" delay before answering.
pub async fn prompt(
    State(state): State<AppState>,
    Json(req): Json<PromptRequest>,
) -> Result<(StatusCode, Json<AssistantMessage>), HubError> {
    let reply = state
        .hub
        .ask_assistant(&req.prompt)
        .await
        .ok_or_else(|| HubError::Validation("Prompt is empty".into()))?;
    Ok((StatusCode::CREATED, Json(reply)))
}
