use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Board, HubError, Issue, IssueType, NewIssue, Priority};
use crate::services::IssueStore;

fn default_issue_type() -> IssueType {
    IssueType::Task
}

fn default_priority() -> Priority {
    Priority::Medium
}

/// Body of the "Create Issue" form.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIssueRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type", default = "default_issue_type")]
    pub issue_type: IssueType,
    #[serde(default = "default_priority")]
    pub priority: Priority,
    #[serde(default)]
    pub assignee: Option<String>,
    /// `YYYY-MM-DD`; the form sends an empty string when unset.
    #[serde(default)]
    pub due_date: Option<String>,
}

impl CreateIssueRequest {
    pub fn into_new_issue(self) -> Result<NewIssue, HubError> {
        let title = self.title.trim().to_string();
        if title.chars().count() < 3 {
            return Err(HubError::Validation("Title is required".into()));
        }

        let due_date = match self.due_date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map_err(|_| HubError::Validation(format!("Invalid due date: {}", raw)))?,
            ),
        };

        Ok(NewIssue {
            title,
            description: self.description.unwrap_or_default(),
            priority: self.priority,
            issue_type: self.issue_type,
            assignee: self.assignee,
            due_date,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardResponse {
    pub columns: Board,
    pub issues: BTreeMap<String, Issue>,
}

impl From<IssueStore> for BoardResponse {
    fn from(store: IssueStore) -> Self {
        Self {
            columns: store.board().clone(),
            issues: store
                .issues()
                .iter()
                .map(|(id, issue)| (id.clone(), issue.clone()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: &str) -> CreateIssueRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_defaults_match_form() {
        let new_issue = request(r#"{"title":"Add search"}"#).into_new_issue().unwrap();
        assert_eq!(new_issue.issue_type, IssueType::Task);
        assert_eq!(new_issue.priority, Priority::Medium);
        assert_eq!(new_issue.due_date, None);
    }

    #[test]
    fn test_short_title_is_rejected() {
        let err = request(r#"{"title":" ab "}"#).into_new_issue().unwrap_err();
        assert!(matches!(err, HubError::Validation(_)));
    }

    #[test]
    fn test_empty_due_date_is_none() {
        let new_issue = request(r#"{"title":"Fix login","dueDate":"","type":"bug"}"#)
            .into_new_issue()
            .unwrap();
        assert_eq!(new_issue.due_date, None);
        assert_eq!(new_issue.issue_type, IssueType::Bug);
    }

    #[test]
    fn test_bad_due_date_is_rejected() {
        assert!(request(r#"{"title":"Fix login","dueDate":"tomorrow"}"#)
            .into_new_issue()
            .is_err());
    }
}
