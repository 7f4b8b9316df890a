use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::handlers;
use crate::api::state::AppState;
use crate::config::Config;

pub fn create_router(state: AppState, config: &Config) -> Router {
    let origins: Vec<HeaderValue> = config
        .cors_origin
        .split(',')
        .filter_map(|s| s.trim().parse::<HeaderValue>().ok())
        .collect();
    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any);

    let board_routes = Router::new()
        .route("/", get(handlers::board::get_board))
        .route("/issues", post(handlers::board::create_issue))
        .route("/drag", post(handlers::board::drag_end))
        .route(
            "/issues/{id}/view-review",
            post(handlers::board::view_review),
        );

    let review_routes = Router::new()
        .route("/", get(handlers::review::get_review))
        .route("/select", post(handlers::review::select_issue))
        .route("/lines/{line}", get(handlers::review::issues_on_line))
        .route("/ticket", post(handlers::review::create_ticket))
        .route("/open-ticket", post(handlers::review::open_ticket));

    let assistant_routes = Router::new()
        .route("/", get(handlers::assistant::get_assistant))
        .route("/mode", post(handlers::assistant::set_mode))
        .route("/prompt", post(handlers::assistant::prompt));

    Router::new()
        .route("/health", get(handlers::health_check))
        .route(
            "/api/session",
            get(handlers::session::get_session),
        )
        .route("/api/navigate", post(handlers::session::navigate))
        .route("/api/examples", get(handlers::review::list_examples))
        .route(
            "/api/examples/{id}/load",
            post(handlers::review::load_example),
        )
        .route("/api/events", get(handlers::sse::sse_handler))
        .nest("/api/board", board_routes)
        .nest("/api/review", review_routes)
        .nest("/api/assistant", assistant_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
