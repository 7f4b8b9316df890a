use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const UNASSIGNED: &str = "Unassigned";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(format!("Invalid priority: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueType {
    Bug,
    Feature,
    Task,
    Improvement,
    Maintenance,
    Documentation,
}

impl IssueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueType::Bug => "bug",
            IssueType::Feature => "feature",
            IssueType::Task => "task",
            IssueType::Improvement => "improvement",
            IssueType::Maintenance => "maintenance",
            IssueType::Documentation => "documentation",
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for IssueType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bug" => Ok(IssueType::Bug),
            "feature" => Ok(IssueType::Feature),
            "task" => Ok(IssueType::Task),
            "improvement" => Ok(IssueType::Improvement),
            "maintenance" => Ok(IssueType::Maintenance),
            "documentation" => Ok(IssueType::Documentation),
            _ => Err(format!("Invalid issue type: {}", s)),
        }
    }
}

/// A card on the issue board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub assignee: String,
    pub due_date: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    /// Id of the review issue this ticket was raised from.
    pub code_review_id: Option<String>,
}

/// Fields submitted from the "Create Issue" form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIssue {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub issue_type: IssueType,
    pub assignee: Option<String>,
    pub due_date: Option<NaiveDate>,
}

impl NewIssue {
    pub fn into_issue(self, id: String) -> Issue {
        let assignee = self
            .assignee
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| UNASSIGNED.into());

        Issue {
            id,
            title: self.title,
            description: self.description,
            priority: self.priority,
            assignee,
            due_date: self.due_date,
            issue_type: self.issue_type,
            code_review_id: None,
        }
    }
}
