use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, Mutex, RwLock};
use tokio::task::JoinHandle;

use crate::config::Config;
use crate::domain::{HubError, HubEvent, Issue, NewIssue, Route};
use crate::infrastructure::scratchpad::{self, Scratchpad};
use crate::seed;
use crate::services::assistant::{Assistant, AssistantMessage, AssistantMode};
use crate::services::reorder::{DragEnd, ReorderEngine};
use crate::services::signal::{PageSignal, SignalBus};
use crate::services::{ImportBridge, IssueStore, NotificationService, ReviewSession};

struct Navigation {
    route: Route,
    review_listener: Option<JoinHandle<()>>,
}

/// The single UI session: which page is showing, and the state each page owns.
pub struct Hub {
    pub(crate) config: Arc<Config>,
    pub(crate) scratchpad: Arc<dyn Scratchpad>,
    pub(crate) notifications: NotificationService,
    pub(crate) signals: SignalBus,
    pub(crate) store: RwLock<IssueStore>,
    pub(crate) review: Arc<RwLock<Option<ReviewSession>>>,
    assistant: RwLock<Assistant>,
    nav: Mutex<Navigation>,
    mounts: AtomicU64,
}

impl Hub {
    pub fn new(
        config: Arc<Config>,
        scratchpad: Arc<dyn Scratchpad>,
        notifications: NotificationService,
    ) -> Self {
        Self::with_store(config, scratchpad, notifications, IssueStore::seeded())
    }

    pub fn with_store(
        config: Arc<Config>,
        scratchpad: Arc<dyn Scratchpad>,
        notifications: NotificationService,
        store: IssueStore,
    ) -> Self {
        Self {
            config,
            scratchpad,
            notifications,
            signals: SignalBus::default(),
            store: RwLock::new(store),
            review: Arc::new(RwLock::new(None)),
            assistant: RwLock::new(Assistant::default()),
            nav: Mutex::new(Navigation {
                route: Route::Landing,
                review_listener: None,
            }),
            mounts: AtomicU64::new(0),
        }
    }

    pub fn notifications(&self) -> &NotificationService {
        &self.notifications
    }

    pub async fn current_route(&self) -> Route {
        self.nav.lock().await.route
    }

    /// Unmounts the current page and mounts `route`. Navigating to the page
    /// already showing does nothing.
    pub async fn navigate(&self, route: Route) -> Result<Route, HubError> {
        let mut nav = self.nav.lock().await;
        if nav.route == route {
            return Ok(route);
        }

        let from = nav.route;
        if from == Route::Review {
            self.unmount_review(&mut nav).await;
        }
        nav.route = route;

        if route == Route::Review {
            self.mount_review(&mut nav).await;
        } else if route.shows_board() {
            self.mount_board().await;
        }

        tracing::info!(from = %from, to = %route, "Navigated");
        self.notifications.publish(HubEvent::Navigated { route });
        Ok(route)
    }

    async fn unmount_review(&self, nav: &mut Navigation) {
        if let Some(listener) = nav.review_listener.take() {
            listener.abort();
        }
        *self.review.write().await = None;
    }

    async fn mount_review(&self, nav: &mut Navigation) {
        let mount_id = self.mounts.fetch_add(1, Ordering::Relaxed) + 1;
        let rx = self.signals.subscribe();

        let session = ReviewSession::mount(mount_id, self.scratchpad.as_ref()).await;
        *self.review.write().await = Some(session);

        nav.review_listener = Some(tokio::spawn(listen_for_signals(
            rx,
            Arc::clone(&self.review),
            mount_id,
            self.notifications.clone(),
        )));
    }

    async fn mount_board(&self) {
        let reviews = ImportBridge::pending_reviews(self.scratchpad.as_ref()).await;
        let mut store = self.store.write().await;

        match ImportBridge::merge(&mut store, &reviews) {
            Ok(0) => {}
            Ok(count) => {
                self.notifications.toast(
                    "Code review tickets imported",
                    format!("{} tickets were imported from your code review", count),
                );
                self.notifications.publish(HubEvent::BoardChanged {
                    issue_count: store.len(),
                });
            }
            Err(err) => tracing::error!(error = %err, "Code review import failed"),
        }
    }

    pub async fn store_snapshot(&self) -> IssueStore {
        self.store.read().await.clone()
    }

    pub async fn create_issue(&self, new_issue: NewIssue) -> Result<Issue, HubError> {
        let mut store = self.store.write().await;
        let id = store.create_issue(new_issue);
        let issue = store
            .issue(&id)
            .cloned()
            .ok_or_else(|| HubError::Internal(format!("Created issue vanished: {}", id)))?;

        self.notifications
            .toast("Issue created", "New issue has been added to the backlog");
        self.notifications.publish(HubEvent::BoardChanged {
            issue_count: store.len(),
        });
        Ok(issue)
    }

    pub async fn drag_end(&self, drag: DragEnd) -> Result<IssueStore, HubError> {
        let mut store = self.store.write().await;
        let outcome = ReorderEngine::on_drag_end(store.board(), &drag)?;

        if outcome.is_noop(store.board()) {
            return Ok(store.clone());
        }

        let notice = outcome.notice();
        let moved_to = outcome.moved_to;
        store.apply_reorder(outcome.board)?;

        if let (Some(notice), Some(to_column)) = (notice, moved_to) {
            self.notifications.toast("Issue moved", notice);
            self.notifications.publish(HubEvent::IssueMoved {
                issue_id: drag.issue_id.clone(),
                to_column,
            });
        }
        self.notifications.publish(HubEvent::BoardChanged {
            issue_count: store.len(),
        });
        Ok(store.clone())
    }

    pub async fn review_snapshot(&self) -> Result<ReviewSession, HubError> {
        self.review
            .read()
            .await
            .clone()
            .ok_or_else(review_not_open)
    }

    pub async fn select_review_issue(&self, issue_id: &str) -> Result<ReviewSession, HubError> {
        let mut guard = self.review.write().await;
        let session = guard.as_mut().ok_or_else(review_not_open)?;

        if !session.select(issue_id) {
            return Err(HubError::NotFound(format!(
                "Review issue not found: {}",
                issue_id
            )));
        }
        self.notifications.publish(HubEvent::ReviewSelectionChanged {
            issue_id: issue_id.to_string(),
        });
        Ok(session.clone())
    }

    /// Landing page: hand an example to the review page and open it.
    pub async fn load_example(&self, example_id: &str) -> Result<Route, HubError> {
        let example = seed::find_example(example_id)
            .ok_or_else(|| HubError::NotFound(format!("Example not found: {}", example_id)))?;

        scratchpad::store_review(self.scratchpad.as_ref(), example.code, &example.issues).await?;
        self.notifications.toast(
            &format!("{} loaded", example.name),
            "Analyzing code for issues...",
        );

        self.navigate(Route::Review).await
    }

    pub async fn assistant(&self) -> Assistant {
        self.assistant.read().await.clone()
    }

    pub async fn set_assistant_mode(&self, mode: AssistantMode) -> Assistant {
        let mut assistant = self.assistant.write().await;
        assistant.set_mode(mode);
        self.notifications.toast(
            "Mode changed",
            format!("Switched to {} mode", mode.title()),
        );
        assistant.clone()
    }

    /// Records the prompt, "thinks", then appends a canned reply. Dropping
    /// the returned future before the delay elapses drops the reply.
    pub async fn ask_assistant(&self, prompt: &str) -> Option<AssistantMessage> {
        let mode = {
            let mut assistant = self.assistant.write().await;
            assistant.push_prompt(prompt, Utc::now())?;
            assistant.mode()
        };

        tokio::time::sleep(self.config.assistant_delay()).await;

        let reply = {
            let mut rng = rand::thread_rng();
            Assistant::compose_reply(mode, prompt, Utc::now(), &mut rng)
        };
        self.assistant.write().await.push_reply(reply.clone());

        self.notifications
            .toast("AI Assistant", "Response generated successfully");
        self.notifications.publish(HubEvent::AssistantReplied {
            message_id: reply.id.clone(),
        });
        Some(reply)
    }
}

pub(crate) fn review_not_open() -> HubError {
    HubError::BadRequest("Review page is not open".into())
}

/// Applies page signals to the review page mounted as `mount_id`. Signals
/// reaching a page that has since been unmounted are ignored.
async fn listen_for_signals(
    mut rx: broadcast::Receiver<PageSignal>,
    review: Arc<RwLock<Option<ReviewSession>>>,
    mount_id: u64,
    notifications: NotificationService,
) {
    loop {
        match rx.recv().await {
            Ok(PageSignal::SelectIssue { issue_id }) => {
                let mut guard = review.write().await;
                let Some(session) = guard.as_mut().filter(|s| s.mount_id() == mount_id) else {
                    tracing::debug!(mount_id, "Review page gone, ignoring signal");
                    return;
                };

                if session.select(&issue_id) {
                    notifications.publish(HubEvent::ReviewSelectionChanged { issue_id });
                } else {
                    tracing::debug!(issue_id = issue_id.as_str(), "Signal names unknown review issue");
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Review listener lagged behind signals");
            }
            Err(RecvError::Closed) => return,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ColumnId, IssueType, Priority, TrackerTab};
    use crate::infrastructure::MemoryScratchpad;
    use crate::services::{DragLocation, NotificationService};

    fn test_hub(pad: Arc<MemoryScratchpad>) -> (Hub, broadcast::Receiver<String>) {
        let config = Config {
            select_signal_delay_ms: 10,
            assistant_delay_ms: 1,
            ..Config::default()
        };
        let (tx, rx) = broadcast::channel(64);
        (
            Hub::new(Arc::new(config), pad, NotificationService::new(tx)),
            rx,
        )
    }

    fn drain(rx: &mut broadcast::Receiver<String>) -> Vec<serde_json::Value> {
        let mut events = Vec::new();
        while let Ok(payload) = rx.try_recv() {
            events.push(serde_json::from_str(&payload).unwrap());
        }
        events
    }

    fn toast_titles(events: &[serde_json::Value]) -> Vec<String> {
        events
            .iter()
            .filter(|e| e["type"] == "toast")
            .map(|e| e["title"].as_str().unwrap().to_string())
            .collect()
    }

    async fn stash_ticketed_review(pad: &MemoryScratchpad, ticketed: &[&str]) {
        let example = seed::find_example("example1").unwrap();
        let issues: Vec<_> = example
            .issues
            .into_iter()
            .map(|mut issue| {
                if ticketed.contains(&issue.id.as_str()) {
                    issue.ticket_id = Some(format!("TICKET-{}", issue.line));
                }
                issue
            })
            .collect();
        scratchpad::store_review(pad, example.code, &issues).await.unwrap();
    }

    #[tokio::test]
    async fn test_board_mount_imports_pending_tickets() {
        let pad = Arc::new(MemoryScratchpad::new());
        stash_ticketed_review(&pad, &["issue2", "issue3"]).await;
        let (hub, mut rx) = test_hub(Arc::clone(&pad));

        hub.navigate(Route::board()).await.unwrap();

        let store = hub.store_snapshot().await;
        let todo = &store.board().column(ColumnId::Todo).issue_ids;
        assert_eq!(&todo[..3], ["cr-issue2", "cr-issue3", "issue-4"]);
        assert_eq!(store.len(), 12);

        let events = drain(&mut rx);
        assert!(toast_titles(&events).contains(&"Code review tickets imported".to_string()));
    }

    #[tokio::test]
    async fn test_board_remount_does_not_duplicate() {
        let pad = Arc::new(MemoryScratchpad::new());
        stash_ticketed_review(&pad, &["issue2"]).await;
        let (hub, mut rx) = test_hub(Arc::clone(&pad));

        hub.navigate(Route::board()).await.unwrap();
        hub.navigate(Route::Landing).await.unwrap();
        drain(&mut rx);
        hub.navigate(Route::Issues(TrackerTab::Planning)).await.unwrap();
        hub.navigate(Route::board()).await.unwrap();

        assert_eq!(hub.store_snapshot().await.len(), 11);
        assert!(toast_titles(&drain(&mut rx)).is_empty());
    }

    #[tokio::test]
    async fn test_same_route_is_noop() {
        let (hub, mut rx) = test_hub(Arc::new(MemoryScratchpad::new()));
        hub.navigate(Route::Review).await.unwrap();
        let mount_id = hub.review_snapshot().await.unwrap().mount_id();
        drain(&mut rx);

        hub.navigate(Route::Review).await.unwrap();

        assert_eq!(hub.review_snapshot().await.unwrap().mount_id(), mount_id);
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test]
    async fn test_leaving_review_drops_session() {
        let (hub, _rx) = test_hub(Arc::new(MemoryScratchpad::new()));
        hub.navigate(Route::Review).await.unwrap();
        hub.select_review_issue("issue3").await.unwrap();

        hub.navigate(Route::Landing).await.unwrap();
        assert!(matches!(
            hub.review_snapshot().await,
            Err(HubError::BadRequest(_))
        ));

        hub.navigate(Route::Review).await.unwrap();
        assert_eq!(
            hub.review_snapshot().await.unwrap().selected_issue_id(),
            Some("issue1")
        );
    }

    #[tokio::test]
    async fn test_drag_across_columns_toasts_destination() {
        let (hub, mut rx) = test_hub(Arc::new(MemoryScratchpad::new()));

        let store = hub
            .drag_end(DragEnd {
                issue_id: "issue-1".into(),
                source: DragLocation {
                    column_id: ColumnId::Backlog,
                    index: 0,
                },
                destination: Some(DragLocation {
                    column_id: ColumnId::Done,
                    index: 1,
                }),
            })
            .await
            .unwrap();

        assert_eq!(
            store.board().column(ColumnId::Done).issue_ids,
            ["issue-9", "issue-1", "issue-10"]
        );
        let events = drain(&mut rx);
        let toast = events.iter().find(|e| e["type"] == "toast").unwrap();
        assert_eq!(toast["description"], "Issue moved to Done");
        assert!(events.iter().any(|e| e["type"] == "issueMoved"));
    }

    #[tokio::test]
    async fn test_drag_outside_columns_changes_nothing() {
        let (hub, mut rx) = test_hub(Arc::new(MemoryScratchpad::new()));
        let before = hub.store_snapshot().await;

        let after = hub
            .drag_end(DragEnd {
                issue_id: "issue-6".into(),
                source: DragLocation {
                    column_id: ColumnId::InProgress,
                    index: 0,
                },
                destination: None,
            })
            .await
            .unwrap();

        assert_eq!(after.board(), before.board());
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test]
    async fn test_create_issue_lands_in_backlog() {
        let (hub, mut rx) = test_hub(Arc::new(MemoryScratchpad::new()));

        let issue = hub
            .create_issue(NewIssue {
                title: "Add dark mode".into(),
                description: String::new(),
                priority: Priority::Low,
                issue_type: IssueType::Feature,
                assignee: None,
                due_date: None,
            })
            .await
            .unwrap();

        let store = hub.store_snapshot().await;
        assert_eq!(
            store.board().column(ColumnId::Backlog).issue_ids.last(),
            Some(&issue.id)
        );
        assert_eq!(toast_titles(&drain(&mut rx)), ["Issue created"]);
    }

    #[tokio::test]
    async fn test_load_unknown_example() {
        let (hub, _rx) = test_hub(Arc::new(MemoryScratchpad::new()));
        assert!(matches!(
            hub.load_example("example9").await,
            Err(HubError::NotFound(_))
        ));
        assert_eq!(hub.current_route().await, Route::Landing);
    }

    #[tokio::test]
    async fn test_assistant_replies_after_delay() {
        let (hub, _rx) = test_hub(Arc::new(MemoryScratchpad::new()));
        hub.set_assistant_mode(AssistantMode::Ticket).await;

        let reply = hub.ask_assistant("Plan the release").await.unwrap();

        let assistant = hub.assistant().await;
        assert_eq!(assistant.mode(), AssistantMode::Ticket);
        assert_eq!(assistant.transcript().len(), 2);
        assert_eq!(assistant.transcript()[1].id, reply.id);
        assert!(hub.ask_assistant("   ").await.is_none());
    }
}
