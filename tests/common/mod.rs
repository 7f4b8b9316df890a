use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use tokio::sync::broadcast;
use tower::ServiceExt;

use devops_hub::api::{create_router, AppState};
use devops_hub::config::Config;
use devops_hub::infrastructure::{MemoryScratchpad, Scratchpad};
use devops_hub::services::{Hub, IssueStore, NotificationService};

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        select_signal_delay_ms: 10,
        assistant_delay_ms: 5,
        ..Config::default()
    }
}

pub fn setup_app_with_store(
    scratchpad: Arc<dyn Scratchpad>,
    store: IssueStore,
) -> (Router, Arc<Hub>) {
    let config = Arc::new(test_config());
    let (event_tx, _) = broadcast::channel(100);
    let hub = Arc::new(Hub::with_store(
        Arc::clone(&config),
        scratchpad,
        NotificationService::new(event_tx),
        store,
    ));

    let state = AppState::new(Arc::clone(&hub));
    (create_router(state, &config), hub)
}

pub fn setup_app_with(scratchpad: Arc<dyn Scratchpad>) -> (Router, Arc<Hub>) {
    setup_app_with_store(scratchpad, IssueStore::seeded())
}

pub fn setup_app() -> (Router, Arc<Hub>) {
    setup_app_with(Arc::new(MemoryScratchpad::new()))
}

pub async fn make_request(
    app: Router,
    method: &str,
    uri: &str,
    body: Option<String>,
) -> (StatusCode, String) {
    let mut request = Request::builder().uri(uri).method(method);

    if body.is_some() {
        request = request.header("content-type", "application/json");
    }

    let request = request
        .body(Body::from(body.unwrap_or_default()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body_str = String::from_utf8(body.to_vec()).unwrap();

    (status, body_str)
}

pub async fn request_json(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let (status, body) =
        make_request(app.clone(), method, uri, body.map(|b| b.to_string())).await;
    // extractor rejections answer in plain text
    let value = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_str(&body).unwrap_or(serde_json::Value::String(body))
    };
    (status, value)
}
