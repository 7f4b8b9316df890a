use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
    Success,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
            Severity::Success => "success",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A finding attached to one line of reviewed code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewIssue {
    pub id: String,
    pub line: u32,
    #[serde(rename = "type")]
    pub severity: Severity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_id: Option<String>,
}

impl ReviewIssue {
    pub fn has_ticket(&self) -> bool {
        self.ticket_id.as_deref().is_some_and(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeExample {
    pub id: &'static str,
    pub name: &'static str,
    pub language: &'static str,
    pub code: &'static str,
    pub issues: Vec<ReviewIssue>,
}

/// Which severities the issue sidebar shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityFilter {
    pub error: bool,
    pub warning: bool,
    pub info: bool,
    pub success: bool,
}

impl Default for SeverityFilter {
    fn default() -> Self {
        Self {
            error: true,
            warning: true,
            info: true,
            success: true,
        }
    }
}

impl SeverityFilter {
    pub fn allows(&self, severity: Severity) -> bool {
        match severity {
            Severity::Error => self.error,
            Severity::Warning => self.warning,
            Severity::Info => self.info,
            Severity::Success => self.success,
        }
    }

    fn is_empty(&self) -> bool {
        !(self.error || self.warning || self.info || self.success)
    }

    /// With every flag off the filter shows everything.
    pub fn apply<'a>(&self, issues: &'a [ReviewIssue]) -> Vec<&'a ReviewIssue> {
        if self.is_empty() {
            return issues.iter().collect();
        }
        issues.iter().filter(|i| self.allows(i.severity)).collect()
    }
}

pub fn count_by_severity(issues: &[ReviewIssue]) -> BTreeMap<Severity, usize> {
    issues.iter().fold(BTreeMap::new(), |mut acc, issue| {
        *acc.entry(issue.severity).or_insert(0) += 1;
        acc
    })
}
