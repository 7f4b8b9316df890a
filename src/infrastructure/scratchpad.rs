//! Key-value hand-off buffer shared by the review page and the issue board.
//!
//! The review page writes the code under review and its findings here before
//! leaving; the board reads the findings back when it mounts.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tokio::sync::RwLock;

use crate::domain::{HubError, ReviewIssue};

pub const REVIEW_CODE_KEY: &str = "reviewCode";
pub const REVIEW_ISSUES_KEY: &str = "reviewIssues";

#[async_trait]
pub trait Scratchpad: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, HubError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), HubError>;
}

#[derive(Debug, Clone)]
pub struct SqliteScratchpad {
    pool: SqlitePool,
}

impl SqliteScratchpad {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Scratchpad for SqliteScratchpad {
    async fn get(&self, key: &str) -> Result<Option<String>, HubError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM scratchpad WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|(value,)| value))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), HubError> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO scratchpad (key, value, updated_at) VALUES (?, ?, ?) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(value)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryScratchpad {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryScratchpad {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Scratchpad for MemoryScratchpad {
    async fn get(&self, key: &str) -> Result<Option<String>, HubError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), HubError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Writes the review hand-off: the raw code and its serialized findings.
pub async fn store_review(
    pad: &dyn Scratchpad,
    code: &str,
    issues: &[ReviewIssue],
) -> Result<(), HubError> {
    let serialized = serde_json::to_string(issues)?;
    pad.set(REVIEW_CODE_KEY, code).await?;
    pad.set(REVIEW_ISSUES_KEY, &serialized).await?;
    Ok(())
}

/// Reads the stored findings. `Ok(None)` when nothing was handed off.
pub async fn load_review_issues(pad: &dyn Scratchpad) -> Result<Option<Vec<ReviewIssue>>, HubError> {
    match pad.get(REVIEW_ISSUES_KEY).await? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}
