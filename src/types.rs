//! Core types for the task tracker.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Format SQLite uses for `CURRENT_TIMESTAMP`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A persisted task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    /// `None` serializes as `null`; clients rely on the key being present.
    pub description: Option<String>,
    pub completed: bool,
    /// Store-assigned insertion time in UTC, as written by SQLite.
    pub created_at: String,
}

impl Task {
    /// Parse `created_at` into a UTC timestamp.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        NaiveDateTime::parse_from_str(&self.created_at, TIMESTAMP_FORMAT)
            .ok()
            .map(|naive| naive.and_utc())
    }
}

/// Validated input for creating a task.
///
/// Both fields are already trimmed. An empty description is still `Some` here;
/// the persistence layer decides how it is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
}

impl NewTask {
    pub fn new(title: &str, description: Option<&str>) -> Self {
        Self {
            title: title.to_string(),
            description: description.map(str::to_string),
        }
    }
}
