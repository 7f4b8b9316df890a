use std::collections::HashMap;

use chrono::Utc;

use crate::domain::{Board, ColumnId, HubError, Issue, NewIssue};
use crate::seed;

/// Issues of the board together with their column placement.
///
/// Column membership only changes by proposing a whole new [`Board`], which
/// is committed after [`Board::check_placement`] accepts it.
#[derive(Debug, Clone, PartialEq)]
pub struct IssueStore {
    issues: HashMap<String, Issue>,
    board: Board,
}

impl Default for IssueStore {
    fn default() -> Self {
        Self {
            issues: HashMap::new(),
            board: Board::default(),
        }
    }
}

impl IssueStore {
    pub fn new(issues: HashMap<String, Issue>, board: Board) -> Result<Self, HubError> {
        board.check_placement(&issues)?;
        Ok(Self { issues, board })
    }

    pub fn seeded() -> Self {
        Self {
            issues: seed::sample_issues(),
            board: seed::sample_board(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn issue(&self, id: &str) -> Option<&Issue> {
        self.issues.get(id)
    }

    pub fn issues(&self) -> &HashMap<String, Issue> {
        &self.issues
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn find_by_code_review(&self, review_id: &str) -> Option<&Issue> {
        self.issues
            .values()
            .find(|issue| issue.code_review_id.as_deref() == Some(review_id))
    }

    fn next_id(&self) -> String {
        let mut stamp = Utc::now().timestamp_millis();
        loop {
            let id = format!("issue-{}", stamp);
            if !self.issues.contains_key(&id) {
                return id;
            }
            stamp += 1;
        }
    }

    /// Adds a form-submitted issue to the end of the backlog.
    pub fn create_issue(&mut self, new_issue: NewIssue) -> String {
        let id = self.next_id();
        let issue = new_issue.into_issue(id.clone());

        self.issues.insert(id.clone(), issue);
        self.board
            .column_mut(ColumnId::Backlog)
            .issue_ids
            .push(id.clone());

        tracing::debug!(issue_id = id.as_str(), "Issue created in backlog");
        id
    }

    /// Replaces the whole board. Rejected boards leave the store untouched.
    pub fn apply_reorder(&mut self, new_board: Board) -> Result<(), HubError> {
        if let Err(err) = new_board.check_placement(&self.issues) {
            tracing::error!(error = %err, "Rejected reordered board");
            return Err(err);
        }
        self.board = new_board;
        Ok(())
    }

    /// Prepends `incoming` to the todo column, keeping their relative order.
    pub fn import(&mut self, incoming: Vec<Issue>) -> Result<usize, HubError> {
        if incoming.is_empty() {
            return Ok(0);
        }

        let mut issues = self.issues.clone();
        let mut board = self.board.clone();

        let new_ids: Vec<String> = incoming.iter().map(|i| i.id.clone()).collect();
        for issue in incoming {
            if issues.contains_key(&issue.id) {
                return Err(HubError::BoardInvariant(format!(
                    "issue {} already exists",
                    issue.id
                )));
            }
            issues.insert(issue.id.clone(), issue);
        }

        let todo = board.column_mut(ColumnId::Todo);
        let mut ids = new_ids;
        let count = ids.len();
        ids.append(&mut todo.issue_ids);
        todo.issue_ids = ids;

        if let Err(err) = board.check_placement(&issues) {
            tracing::error!(error = %err, "Rejected imported issues");
            return Err(err);
        }

        self.issues = issues;
        self.board = board;
        Ok(count)
    }
}
