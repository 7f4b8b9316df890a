use serde::{Deserialize, Serialize};

use super::{ColumnId, Route};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    Default,
    Destructive,
}

/// Events pushed to the session's event stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum HubEvent {
    Toast {
        title: String,
        description: String,
        variant: ToastVariant,
    },
    BoardChanged {
        issue_count: usize,
    },
    IssueMoved {
        issue_id: String,
        to_column: ColumnId,
    },
    ReviewSelectionChanged {
        issue_id: String,
    },
    Navigated {
        route: Route,
    },
    AssistantReplied {
        message_id: String,
    },
}

impl HubEvent {
    pub fn toast(title: impl Into<String>, description: impl Into<String>) -> Self {
        HubEvent::Toast {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Default,
        }
    }

    pub fn error_toast(description: impl Into<String>) -> Self {
        HubEvent::Toast {
            title: "Error".into(),
            description: description.into(),
            variant: ToastVariant::Destructive,
        }
    }
}
