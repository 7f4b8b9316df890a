use axum::{extract::State, Json};

use crate::api::dto::{NavigateRequest, SessionResponse};
use crate::api::state::AppState;
use crate::domain::HubError;

pub async fn get_session(State(state): State<AppState>) -> Json<SessionResponse> {
    Json(SessionResponse {
        route: state.hub.current_route().await,
    })
}

pub async fn navigate(
    State(state): State<AppState>,
    Json(req): Json<NavigateRequest>,
) -> Result<Json<SessionResponse>, HubError> {
    let route = state.hub.navigate(req.route).await?;
    Ok(Json(SessionResponse { route }))
}
