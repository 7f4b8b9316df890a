use std::collections::HashSet;

use crate::domain::{HubError, Issue, IssueType, Priority, ReviewIssue, Severity, UNASSIGNED};
use crate::infrastructure::scratchpad::{self, Scratchpad};
use crate::services::IssueStore;

/// Turns review findings that were flagged for a ticket into board issues.
pub struct ImportBridge;

impl ImportBridge {
    /// Findings stored by the review page. Unreadable or malformed content
    /// counts as nothing to import.
    pub async fn pending_reviews(pad: &dyn Scratchpad) -> Vec<ReviewIssue> {
        match scratchpad::load_review_issues(pad).await {
            Ok(Some(issues)) => issues,
            Ok(None) => Vec::new(),
            Err(err) => {
                tracing::warn!(error = %err, "Ignoring unreadable review issues in scratchpad");
                Vec::new()
            }
        }
    }

    pub fn synthesize(review: &ReviewIssue) -> Issue {
        let priority = match review.severity {
            Severity::Error => Priority::High,
            Severity::Warning => Priority::Medium,
            Severity::Info | Severity::Success => Priority::Low,
        };
        let issue_type = match review.severity {
            Severity::Error => IssueType::Bug,
            _ => IssueType::Task,
        };

        Issue {
            id: format!("cr-{}", review.id),
            title: format!("Fix: {}", review.message),
            description: review
                .suggestion
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| review.message.clone()),
            priority,
            assignee: UNASSIGNED.into(),
            due_date: None,
            issue_type,
            code_review_id: Some(review.id.clone()),
        }
    }

    /// Ticketed findings not yet on the board, in their original order.
    pub fn select_new(store: &IssueStore, reviews: &[ReviewIssue]) -> Vec<Issue> {
        let mut taken = HashSet::new();

        reviews
            .iter()
            .filter(|review| review.has_ticket())
            .filter(|review| store.find_by_code_review(&review.id).is_none())
            .filter(|review| taken.insert(review.id.as_str()))
            .map(Self::synthesize)
            .filter(|issue| store.issue(&issue.id).is_none())
            .collect()
    }

    /// Merges pending tickets into the store and returns how many were added.
    pub fn merge(store: &mut IssueStore, reviews: &[ReviewIssue]) -> Result<usize, HubError> {
        let fresh = Self::select_new(store, reviews);
        if fresh.is_empty() {
            return Ok(0);
        }

        let count = store.import(fresh)?;
        tracing::info!(count, "Imported code review tickets");
        Ok(count)
    }

    pub async fn run(store: &mut IssueStore, pad: &dyn Scratchpad) -> Result<usize, HubError> {
        let reviews = Self::pending_reviews(pad).await;
        Self::merge(store, &reviews)
    }
}
