use tokio::sync::broadcast;

use crate::domain::HubEvent;

/// Publishes [`HubEvent`]s as JSON to the session's event stream.
#[derive(Debug, Clone)]
pub struct NotificationService {
    tx: broadcast::Sender<String>,
}

impl NotificationService {
    pub fn new(tx: broadcast::Sender<String>) -> Self {
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.tx.subscribe()
    }

    pub fn publish(&self, event: HubEvent) {
        match serde_json::to_string(&event) {
            Ok(payload) => {
                // no subscribers is fine; events are fire-and-forget
                if self.tx.send(payload).is_err() {
                    tracing::debug!(?event, "Event published with no subscribers");
                }
            }
            Err(err) => tracing::error!(error = %err, "Failed to serialize event"),
        }
    }

    pub fn toast(&self, title: &str, description: impl Into<String>) {
        self.publish(HubEvent::toast(title, description));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_serializes_event() {
        let (tx, _) = broadcast::channel(8);
        let notifications = NotificationService::new(tx);
        let mut rx = notifications.subscribe();

        notifications.toast("Issue created", "New issue has been added to the backlog");

        let payload = rx.recv().await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(value["type"], "toast");
        assert_eq!(value["title"], "Issue created");
        assert_eq!(value["variant"], "default");
    }

    #[test]
    fn test_publish_without_subscribers_does_not_panic() {
        let (tx, rx) = broadcast::channel(8);
        drop(rx);
        NotificationService::new(tx).publish(HubEvent::BoardChanged { issue_count: 3 });
    }
}
