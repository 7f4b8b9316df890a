use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::api::dto::{BoardResponse, CreateIssueRequest, SessionResponse};
use crate::api::state::AppState;
use crate::domain::{HubError, HubEvent, Issue};
use crate::services::DragEnd;

pub async fn get_board(State(state): State<AppState>) -> Json<BoardResponse> {
    Json(state.hub.store_snapshot().await.into())
}

pub async fn create_issue(
    State(state): State<AppState>,
    Json(req): Json<CreateIssueRequest>,
) -> Result<(StatusCode, Json<Issue>), HubError> {
    let new_issue = match req.into_new_issue() {
        Ok(new_issue) => new_issue,
        Err(err) => {
            if let HubError::Validation(msg) = &err {
                state
                    .hub
                    .notifications()
                    .publish(HubEvent::error_toast(msg.clone()));
            }
            return Err(err);
        }
    };

    let issue = state.hub.create_issue(new_issue).await?;
    tracing::info!(issue_id = issue.id.as_str(), "Issue created");
    Ok((StatusCode::CREATED, Json(issue)))
}

pub async fn drag_end(
    State(state): State<AppState>,
    Json(drag): Json<DragEnd>,
) -> Result<Json<BoardResponse>, HubError> {
    let store = state.hub.drag_end(drag).await?;
    Ok(Json(store.into()))
}

pub async fn view_review(
    State(state): State<AppState>,
    Path(issue_id): Path<String>,
) -> Result<Json<SessionResponse>, HubError> {
    let route = state.hub.view_code_review(&issue_id).await?;
    Ok(Json(SessionResponse { route }))
}
