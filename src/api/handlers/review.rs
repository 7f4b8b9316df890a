use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::api::dto::{
    CreateTicketRequest, ExampleSummary, ReviewResponse, SelectIssueRequest, SessionResponse,
};
use crate::api::state::AppState;
use crate::domain::{HubError, ReviewIssue, SeverityFilter};
use crate::seed;
use crate::services::TicketCreated;

pub async fn list_examples() -> Json<Vec<ExampleSummary>> {
    let examples = seed::code_examples();
    Json(examples.iter().map(ExampleSummary::from).collect())
}

pub async fn load_example(
    State(state): State<AppState>,
    Path(example_id): Path<String>,
) -> Result<Json<SessionResponse>, HubError> {
    let route = state.hub.load_example(&example_id).await?;
    Ok(Json(SessionResponse { route }))
}

pub async fn get_review(
    State(state): State<AppState>,
    Query(filter): Query<SeverityFilter>,
) -> Result<Json<ReviewResponse>, HubError> {
    let session = state.hub.review_snapshot().await?;
    Ok(Json(ReviewResponse::new(&session, &filter)))
}

pub async fn select_issue(
    State(state): State<AppState>,
    Json(req): Json<SelectIssueRequest>,
) -> Result<Json<ReviewResponse>, HubError> {
    let session = state.hub.select_review_issue(&req.issue_id).await?;
    Ok(Json(ReviewResponse::new(&session, &SeverityFilter::default())))
}

/// Findings annotated on one line of the reviewed code, as shown in its
/// hover card.
pub async fn issues_on_line(
    State(state): State<AppState>,
    Path(line): Path<u32>,
) -> Result<Json<Vec<ReviewIssue>>, HubError> {
    let session = state.hub.review_snapshot().await?;
    Ok(Json(
        session.issues_on_line(line).into_iter().cloned().collect(),
    ))
}

pub async fn create_ticket(
    State(state): State<AppState>,
    Json(req): Json<CreateTicketRequest>,
) -> Result<(StatusCode, Json<TicketCreated>), HubError> {
    let created = state.hub.create_ticket(&req.assignee).await?;
    tracing::info!(
        ticket_id = created.ticket_id.as_str(),
        review_issue_id = created.review_issue_id.as_str(),
        "Ticket created from review"
    );
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn open_ticket(
    State(state): State<AppState>,
) -> Result<Json<SessionResponse>, HubError> {
    let route = state.hub.open_ticket().await?;
    Ok(Json(SessionResponse { route }))
}
