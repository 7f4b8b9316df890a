use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{CodeExample, ReviewIssue, Route, Severity, SeverityFilter};
use crate::services::{Assistant, AssistantMessage, AssistantMode, ReviewSession};

#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    pub route: Route,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub route: Route,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleSummary {
    pub id: &'static str,
    pub name: &'static str,
    pub language: &'static str,
    pub issue_count: usize,
}

impl From<&CodeExample> for ExampleSummary {
    fn from(example: &CodeExample) -> Self {
        Self {
            id: example.id,
            name: example.name,
            language: example.language,
            issue_count: example.issues.len(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub code: String,
    pub total: usize,
    pub counts: BTreeMap<Severity, usize>,
    pub issues: Vec<ReviewIssue>,
    pub selected_issue_id: Option<String>,
    pub selected_issue: Option<ReviewIssue>,
}

impl ReviewResponse {
    pub fn new(session: &ReviewSession, filter: &SeverityFilter) -> Self {
        Self {
            code: session.code().to_string(),
            total: session.issues().len(),
            counts: session.counts(),
            issues: session.filtered(filter).into_iter().cloned().collect(),
            selected_issue_id: session.selected_issue_id().map(str::to_owned),
            selected_issue: session.selected().cloned(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectIssueRequest {
    pub issue_id: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateTicketRequest {
    #[serde(default)]
    pub assignee: String,
}

#[derive(Debug, Deserialize)]
pub struct AssistantModeRequest {
    pub mode: AssistantMode,
}

#[derive(Debug, Deserialize)]
pub struct PromptRequest {
    pub prompt: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantResponse {
    pub mode: AssistantMode,
    pub title: &'static str,
    pub placeholder: &'static str,
    pub transcript: Vec<AssistantMessage>,
}

impl From<Assistant> for AssistantResponse {
    fn from(assistant: Assistant) -> Self {
        let mode = assistant.mode();
        Self {
            mode,
            title: mode.title(),
            placeholder: mode.placeholder(),
            transcript: assistant.transcript().to_vec(),
        }
    }
}
