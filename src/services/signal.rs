use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

/// A named event one page sends to another after navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum PageSignal {
    SelectIssue { issue_id: String },
}

/// Best-effort, at-most-once delivery of [`PageSignal`]s to whichever page
/// listener is subscribed at the moment of dispatch. Nothing is queued for
/// listeners that subscribe later and nothing is retried.
#[derive(Debug, Clone)]
pub struct SignalBus {
    tx: broadcast::Sender<PageSignal>,
}

impl SignalBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PageSignal> {
        self.tx.subscribe()
    }

    /// Returns whether any listener received the signal.
    pub fn dispatch(&self, signal: PageSignal) -> bool {
        match self.tx.send(signal) {
            Ok(receivers) => receivers > 0,
            Err(broadcast::error::SendError(signal)) => {
                tracing::debug!(?signal, "No page listening, signal dropped");
                false
            }
        }
    }

    /// Dispatches after `delay`, giving the target page time to mount.
    pub fn dispatch_after(&self, signal: PageSignal, delay: Duration) -> JoinHandle<bool> {
        let bus = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            bus.dispatch(signal)
        })
    }
}

impl Default for SignalBus {
    fn default() -> Self {
        Self::new(16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select(id: &str) -> PageSignal {
        PageSignal::SelectIssue {
            issue_id: id.into(),
        }
    }

    #[test]
    fn test_signal_json_shape() {
        let value = serde_json::to_value(select("issue4")).unwrap();
        assert_eq!(value["name"], "selectIssue");
        assert_eq!(value["issueId"], "issue4");
    }

    #[tokio::test]
    async fn test_dispatch_without_listener_is_dropped() {
        let bus = SignalBus::default();
        assert!(!bus.dispatch(select("issue1")));

        // a listener that subscribes afterwards never sees it
        let mut rx = bus.subscribe();
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_delayed_dispatch_reaches_listener() {
        let bus = SignalBus::default();
        let mut rx = bus.subscribe();

        let handle = bus.dispatch_after(select("issue2"), Duration::from_millis(5));

        assert_eq!(rx.recv().await.unwrap(), select("issue2"));
        assert!(handle.await.unwrap());
    }

    #[tokio::test]
    async fn test_listener_mounted_late_misses_signal() {
        let bus = SignalBus::default();
        let delivered = bus
            .dispatch_after(select("issue3"), Duration::from_millis(1))
            .await
            .unwrap();
        assert!(!delivered);
    }
}
