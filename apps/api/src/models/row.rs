//! snake_case row shapes used at the remote store boundary.
//!
//! The in-process model is camelCase; only the remote gateway speaks rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::lead::{Lead, LeadPatch, LeadStatus, Priority, Task};
use crate::scoring::clamp_score;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadRow {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub post_applied_for: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    pub status: LeadStatus,
    pub created_at: DateTime<Utc>,
    pub priority: Priority,
    pub score: i64,
    #[serde(default)]
    pub tasks: Option<Vec<Task>>,
    #[serde(default)]
    pub next_follow_up: Option<DateTime<Utc>>,
    #[serde(default)]
    pub cv_base64: Option<String>,
    #[serde(default)]
    pub cv_file_name: Option<String>,
}

impl From<LeadRow> for Lead {
    fn from(row: LeadRow) -> Self {
        Lead {
            id: row.id,
            full_name: row.full_name,
            email: row.email,
            phone: row.phone,
            post_applied_for: row.post_applied_for,
            bio: row.bio.unwrap_or_default(),
            source: row.source.unwrap_or_default(),
            status: row.status,
            created_at: row.created_at,
            priority: row.priority,
            score: clamp_score(row.score),
            tasks: row.tasks.unwrap_or_default(),
            next_follow_up: row.next_follow_up,
            cv_base64: row.cv_base64,
            cv_file_name: row.cv_file_name,
        }
    }
}

/// Insert payload. `id` and `created_at` are assigned by the store.
#[derive(Debug, Clone, Serialize)]
pub struct NewLeadRow<'a> {
    pub full_name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub post_applied_for: &'a str,
    pub bio: &'a str,
    pub source: &'a str,
    pub status: LeadStatus,
    pub score: u8,
    pub priority: Priority,
    pub tasks: Vec<Task>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cv_base64: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cv_file_name: Option<&'a str>,
}

/// PATCH payload. Absent fields are omitted from the request body.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct LeadRowPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LeadStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<Task>>,
    /// `Some(None)` is sent as an explicit `null`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_follow_up: Option<Option<DateTime<Utc>>>,
}

impl From<&LeadPatch> for LeadRowPatch {
    fn from(patch: &LeadPatch) -> Self {
        LeadRowPatch {
            status: patch.status,
            priority: patch.priority,
            score: patch.score.map(clamp_score),
            bio: patch.bio.clone(),
            tasks: patch.tasks.clone(),
            next_follow_up: patch.next_follow_up,
        }
    }
}
