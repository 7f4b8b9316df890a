use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{HubError, Issue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnId {
    Backlog,
    Todo,
    InProgress,
    Review,
    Done,
}

impl ColumnId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnId::Backlog => "backlog",
            ColumnId::Todo => "todo",
            ColumnId::InProgress => "inProgress",
            ColumnId::Review => "review",
            ColumnId::Done => "done",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ColumnId::Backlog => "Backlog",
            ColumnId::Todo => "To Do",
            ColumnId::InProgress => "In Progress",
            ColumnId::Review => "Review",
            ColumnId::Done => "Done",
        }
    }

    pub fn all() -> &'static [ColumnId] {
        &[
            ColumnId::Backlog,
            ColumnId::Todo,
            ColumnId::InProgress,
            ColumnId::Review,
            ColumnId::Done,
        ]
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ColumnId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "backlog" => Ok(ColumnId::Backlog),
            "todo" => Ok(ColumnId::Todo),
            "inProgress" => Ok(ColumnId::InProgress),
            "review" => Ok(ColumnId::Review),
            "done" => Ok(ColumnId::Done),
            _ => Err(format!("Invalid column: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: ColumnId,
    pub title: &'static str,
    pub issue_ids: Vec<String>,
}

impl Column {
    pub fn new(id: ColumnId, issue_ids: Vec<String>) -> Self {
        Self {
            id,
            title: id.title(),
            issue_ids,
        }
    }
}

/// The five fixed columns of the issue board, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub backlog: Column,
    pub todo: Column,
    pub in_progress: Column,
    pub review: Column,
    pub done: Column,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            backlog: Column::new(ColumnId::Backlog, vec![]),
            todo: Column::new(ColumnId::Todo, vec![]),
            in_progress: Column::new(ColumnId::InProgress, vec![]),
            review: Column::new(ColumnId::Review, vec![]),
            done: Column::new(ColumnId::Done, vec![]),
        }
    }
}

impl Board {
    pub fn column(&self, id: ColumnId) -> &Column {
        match id {
            ColumnId::Backlog => &self.backlog,
            ColumnId::Todo => &self.todo,
            ColumnId::InProgress => &self.in_progress,
            ColumnId::Review => &self.review,
            ColumnId::Done => &self.done,
        }
    }

    pub fn column_mut(&mut self, id: ColumnId) -> &mut Column {
        match id {
            ColumnId::Backlog => &mut self.backlog,
            ColumnId::Todo => &mut self.todo,
            ColumnId::InProgress => &mut self.in_progress,
            ColumnId::Review => &mut self.review,
            ColumnId::Done => &mut self.done,
        }
    }

    pub fn with_column(mut self, id: ColumnId, issue_ids: Vec<String>) -> Self {
        self.column_mut(id).issue_ids = issue_ids;
        self
    }

    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        ColumnId::all().iter().map(move |id| self.column(*id))
    }

    pub fn issue_count(&self) -> usize {
        self.columns().map(|c| c.issue_ids.len()).sum()
    }

    /// Column and index currently holding `issue_id`.
    pub fn locate(&self, issue_id: &str) -> Option<(ColumnId, usize)> {
        self.columns().find_map(|column| {
            column
                .issue_ids
                .iter()
                .position(|id| id == issue_id)
                .map(|index| (column.id, index))
        })
    }

    /// Every known issue is placed exactly once and every placed id is known.
    pub fn check_placement(&self, issues: &HashMap<String, Issue>) -> Result<(), HubError> {
        let mut seen = HashSet::with_capacity(issues.len());

        for column in self.columns() {
            for id in &column.issue_ids {
                if !issues.contains_key(id) {
                    return Err(HubError::BoardInvariant(format!(
                        "column {} references unknown issue {}",
                        column.id, id
                    )));
                }
                if !seen.insert(id.as_str()) {
                    return Err(HubError::BoardInvariant(format!(
                        "issue {} is placed more than once",
                        id
                    )));
                }
            }
        }

        if let Some(orphan) = issues.keys().find(|id| !seen.contains(id.as_str())) {
            return Err(HubError::BoardInvariant(format!(
                "issue {} is not placed in any column",
                orphan
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{IssueType, Priority};

    fn issue(id: &str) -> Issue {
        Issue {
            id: id.into(),
            title: id.into(),
            description: String::new(),
            priority: Priority::Medium,
            assignee: "Unassigned".into(),
            due_date: None,
            issue_type: IssueType::Task,
            code_review_id: None,
        }
    }

    fn issues(ids: &[&str]) -> HashMap<String, Issue> {
        ids.iter().map(|id| (id.to_string(), issue(id))).collect()
    }

    #[test]
    fn test_columns_in_fixed_order() {
        let board = Board::default();
        let ids: Vec<ColumnId> = board.columns().map(|c| c.id).collect();
        assert_eq!(ids, ColumnId::all());
        assert_eq!(board.column(ColumnId::InProgress).title, "In Progress");
    }

    #[test]
    fn test_column_serializes_camel_case() {
        let board = Board::default().with_column(ColumnId::InProgress, vec!["a".into()]);
        let value = serde_json::to_value(&board).unwrap();
        assert_eq!(value["inProgress"]["id"], "inProgress");
        assert_eq!(value["inProgress"]["issueIds"][0], "a");
    }

    #[test]
    fn test_locate() {
        let board = Board::default().with_column(ColumnId::Review, vec!["a".into(), "b".into()]);
        assert_eq!(board.locate("b"), Some((ColumnId::Review, 1)));
        assert_eq!(board.locate("z"), None);
    }

    #[test]
    fn test_check_placement_accepts_valid_board() {
        let board = Board::default()
            .with_column(ColumnId::Backlog, vec!["a".into()])
            .with_column(ColumnId::Done, vec!["b".into()]);
        assert!(board.check_placement(&issues(&["a", "b"])).is_ok());
    }

    #[test]
    fn test_check_placement_rejects_duplicates() {
        let board = Board::default()
            .with_column(ColumnId::Backlog, vec!["a".into()])
            .with_column(ColumnId::Todo, vec!["a".into()]);
        assert!(matches!(
            board.check_placement(&issues(&["a"])),
            Err(HubError::BoardInvariant(_))
        ));
    }

    #[test]
    fn test_check_placement_rejects_unknown_and_orphans() {
        let unknown = Board::default().with_column(ColumnId::Backlog, vec!["ghost".into()]);
        assert!(unknown.check_placement(&issues(&[])).is_err());

        let orphaned = Board::default().with_column(ColumnId::Backlog, vec!["a".into()]);
        assert!(orphaned.check_placement(&issues(&["a", "b"])).is_err());
    }

    #[test]
    fn test_parse_column_id() {
        assert_eq!("inProgress".parse::<ColumnId>(), Ok(ColumnId::InProgress));
        assert!("in_progress".parse::<ColumnId>().is_err());
    }
}
