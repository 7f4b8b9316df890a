use std::collections::BTreeMap;

use rand::Rng;

use crate::domain::{
    count_by_severity, CodeExample, HubError, ReviewIssue, Severity, SeverityFilter,
};
use crate::infrastructure::scratchpad::{self, Scratchpad, REVIEW_CODE_KEY};
use crate::seed;

/// State of the mounted review page.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewSession {
    mount_id: u64,
    code: String,
    issues: Vec<ReviewIssue>,
    selected_issue_id: Option<String>,
}

impl ReviewSession {
    pub fn new(mount_id: u64, code: String, issues: Vec<ReviewIssue>) -> Self {
        Self {
            mount_id,
            code,
            issues,
            selected_issue_id: None,
        }
    }

    /// Loads an example and selects its first finding.
    pub fn from_example(mount_id: u64, example: &CodeExample) -> Self {
        let mut session = Self::new(mount_id, example.code.to_string(), example.issues.clone());
        session.selected_issue_id = session.issues.first().map(|i| i.id.clone());
        session
    }

    /// Restores the hand-off from the scratchpad, or falls back to the first
    /// built-in example when none (or an unreadable one) is stored.
    pub async fn mount(mount_id: u64, pad: &dyn Scratchpad) -> Self {
        let stored = async {
            let code = pad.get(REVIEW_CODE_KEY).await?;
            let issues = scratchpad::load_review_issues(pad).await?;
            Ok::<_, HubError>(code.zip(issues))
        }
        .await;

        match stored {
            Ok(Some((code, issues))) => return Self::new(mount_id, code, issues),
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(error = %err, "Stored review is unreadable, using example");
            }
        }

        match seed::code_examples().first() {
            Some(example) => Self::from_example(mount_id, example),
            None => Self::new(mount_id, String::new(), Vec::new()),
        }
    }

    pub fn mount_id(&self) -> u64 {
        self.mount_id
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn issues(&self) -> &[ReviewIssue] {
        &self.issues
    }

    pub fn selected_issue_id(&self) -> Option<&str> {
        self.selected_issue_id.as_deref()
    }

    pub fn selected(&self) -> Option<&ReviewIssue> {
        let id = self.selected_issue_id.as_deref()?;
        self.issues.iter().find(|i| i.id == id)
    }

    /// Selects a finding by id. Unknown ids leave the selection as it was.
    pub fn select(&mut self, issue_id: &str) -> bool {
        if self.issues.iter().any(|i| i.id == issue_id) {
            self.selected_issue_id = Some(issue_id.to_string());
            true
        } else {
            false
        }
    }

    pub fn issues_on_line(&self, line: u32) -> Vec<&ReviewIssue> {
        self.issues.iter().filter(|i| i.line == line).collect()
    }

    pub fn counts(&self) -> BTreeMap<Severity, usize> {
        count_by_severity(&self.issues)
    }

    pub fn filtered(&self, filter: &SeverityFilter) -> Vec<&ReviewIssue> {
        filter.apply(&self.issues)
    }

    /// Gives the selected finding a ticket id and returns it.
    pub fn assign_ticket(&mut self, assignee: &str) -> Result<String, HubError> {
        if assignee.trim().is_empty() {
            return Err(HubError::Validation("Please select an assignee".into()));
        }

        let selected_id = self
            .selected_issue_id
            .clone()
            .ok_or_else(|| HubError::Validation("Select a review issue first".into()))?;

        let issue = self
            .issues
            .iter_mut()
            .find(|i| i.id == selected_id)
            .ok_or_else(|| HubError::NotFound(format!("Review issue not found: {}", selected_id)))?;

        if let Some(existing) = issue.ticket_id.as_deref().filter(|t| !t.is_empty()) {
            return Err(HubError::BadRequest(format!(
                "Review issue {} already has ticket {}",
                selected_id, existing
            )));
        }

        let ticket_id = format!("TICKET-{}", rand::thread_rng().gen_range(0..1000));
        issue.ticket_id = Some(ticket_id.clone());

        tracing::info!(
            review_issue = selected_id.as_str(),
            ticket_id = ticket_id.as_str(),
            assignee,
            "Ticket requested from code review"
        );
        Ok(ticket_id)
    }

    pub async fn persist(&self, pad: &dyn Scratchpad) -> Result<(), HubError> {
        scratchpad::store_review(pad, &self.code, &self.issues).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::scratchpad::REVIEW_ISSUES_KEY;
    use crate::infrastructure::MemoryScratchpad;

    fn example_session() -> ReviewSession {
        ReviewSession::from_example(1, &seed::code_examples()[0])
    }

    #[tokio::test]
    async fn test_mount_without_handoff_uses_first_example() {
        let pad = MemoryScratchpad::new();
        let session = ReviewSession::mount(7, &pad).await;

        assert_eq!(session.mount_id(), 7);
        assert_eq!(session.issues().len(), 4);
        assert_eq!(session.selected_issue_id(), Some("issue1"));
        assert!(session.code().contains("UserProfile"));
    }

    #[tokio::test]
    async fn test_mount_restores_handoff_without_selection() {
        let pad = MemoryScratchpad::new();
        let example = &seed::code_examples()[1];
        scratchpad::store_review(&pad, example.code, &example.issues)
            .await
            .unwrap();

        let session = ReviewSession::mount(1, &pad).await;

        assert_eq!(session.issues(), example.issues.as_slice());
        assert_eq!(session.selected_issue_id(), None);
    }

    #[tokio::test]
    async fn test_mount_needs_both_keys() {
        let pad = MemoryScratchpad::new();
        pad.set(REVIEW_ISSUES_KEY, "[]").await.unwrap();

        let session = ReviewSession::mount(1, &pad).await;
        assert_eq!(session.issues().len(), 4);
    }

    #[tokio::test]
    async fn test_mount_with_malformed_issues_falls_back() {
        let pad = MemoryScratchpad::new();
        pad.set(REVIEW_CODE_KEY, "code").await.unwrap();
        pad.set(REVIEW_ISSUES_KEY, "nope").await.unwrap();

        let session = ReviewSession::mount(1, &pad).await;
        assert_eq!(session.selected_issue_id(), Some("issue1"));
    }

    #[test]
    fn test_select_unknown_keeps_selection() {
        let mut session = example_session();
        assert!(session.select("issue3"));
        assert!(!session.select("issue99"));
        assert_eq!(session.selected_issue_id(), Some("issue3"));
    }

    #[test]
    fn test_issues_on_line() {
        let session = example_session();
        let on_line: Vec<&str> = session.issues_on_line(24).iter().map(|i| i.id.as_str()).collect();
        assert_eq!(on_line, vec!["issue4"]);
        assert!(session.issues_on_line(1).is_empty());
    }

    #[test]
    fn test_counts_and_filters() {
        let session = example_session();
        assert_eq!(session.counts().get(&Severity::Error), Some(&2));
        let warnings_only = SeverityFilter {
            error: false,
            warning: true,
            info: false,
            success: false,
        };
        assert_eq!(session.filtered(&warnings_only).len(), 2);
    }

    #[test]
    fn test_assign_ticket_requires_assignee() {
        let mut session = example_session();
        let err = session.assign_ticket("  ").unwrap_err();
        assert!(matches!(err, HubError::Validation(ref msg) if msg == "Please select an assignee"));
        assert!(session.selected().unwrap().ticket_id.is_none());
    }

    #[test]
    fn test_assign_ticket_requires_selection() {
        let example = &seed::code_examples()[1];
        let mut session = ReviewSession::new(2, example.code.to_string(), example.issues.clone());

        let err = session.assign_ticket("Alex Chen").unwrap_err();

        assert!(matches!(err, HubError::Validation(ref msg) if msg == "Select a review issue first"));
        assert!(session.issues().iter().all(|i| i.ticket_id.is_none()));
    }

    #[test]
    fn test_assign_ticket_sets_ticket_on_selected() {
        let mut session = example_session();
        session.select("issue2");

        let ticket = session.assign_ticket("Maya Johnson").unwrap();

        assert!(ticket.starts_with("TICKET-"));
        assert_eq!(session.selected().unwrap().ticket_id.as_deref(), Some(ticket.as_str()));
        assert!(session.assign_ticket("Maya Johnson").is_err());
    }
}
