use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::scoring::clamp_score;

/// Pipeline stage of a lead. Any stage may move to any other stage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum LeadStatus {
    Lead,
    Interviewing,
    Formation,
    Recruiter,
    Rejected,
}

impl LeadStatus {
    /// Board column order.
    pub const ALL: [LeadStatus; 5] = [
        LeadStatus::Lead,
        LeadStatus::Interviewing,
        LeadStatus::Formation,
        LeadStatus::Recruiter,
        LeadStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::Lead => "Lead",
            LeadStatus::Interviewing => "Interviewing",
            LeadStatus::Formation => "Formation",
            LeadStatus::Recruiter => "Recruiter",
            LeadStatus::Rejected => "Rejected",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];
}

/// Follow-up checklist item owned by a single lead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub text: String,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

/// A candidate application moving through the hiring pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub post_applied_for: String,
    pub bio: String,
    pub source: String,
    pub status: LeadStatus,
    pub created_at: DateTime<Utc>,
    pub priority: Priority,
    pub score: u8,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_follow_up: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cv_base64: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cv_file_name: Option<String>,
}

impl Lead {
    /// Applies a partial patch. Fields absent from the patch are left untouched.
    pub fn apply(&mut self, patch: &LeadPatch) {
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(score) = patch.score {
            self.score = clamp_score(score);
        }
        if let Some(bio) = &patch.bio {
            self.bio = bio.clone();
        }
        if let Some(tasks) = &patch.tasks {
            self.tasks = tasks.clone();
        }
        if let Some(next) = patch.next_follow_up {
            self.next_follow_up = next;
        }
    }
}

/// Raw candidate submission as collected by the intake form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadFormData {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub post_applied_for: String,
    pub bio: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub cv_base64: Option<String>,
    #[serde(default)]
    pub cv_file_name: Option<String>,
}

impl LeadFormData {
    /// The submitted source, treating a blank value as missing.
    pub fn source(&self) -> Option<&str> {
        self.source
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Partial update of a lead's mutable fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LeadPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<LeadStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<Task>>,
    /// `Some(None)` clears the follow-up; `None` leaves it untouched.
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub next_follow_up: Option<Option<DateTime<Utc>>>,
}

/// Keeps an explicit `null` apart from a missing field.
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl LeadPatch {
    pub fn status(status: LeadStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    /// Whole-record overwrite of every staff-editable field.
    pub fn full(lead: &Lead) -> Self {
        Self {
            status: Some(lead.status),
            priority: Some(lead.priority),
            score: Some(i64::from(lead.score)),
            bio: Some(lead.bio.clone()),
            tasks: Some(lead.tasks.clone()),
            next_follow_up: Some(lead.next_follow_up),
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_lead(id: &str, priority: Priority, created_at: DateTime<Utc>) -> Lead {
    Lead {
        id: id.to_string(),
        full_name: format!("Candidate {id}"),
        email: format!("{id}@example.lu"),
        phone: "+352 000".to_string(),
        post_applied_for: "Promoter".to_string(),
        bio: "bio".to_string(),
        source: "Website".to_string(),
        status: LeadStatus::Lead,
        created_at,
        priority,
        score: 50,
        tasks: vec![],
        next_follow_up: None,
        cv_base64: None,
        cv_file_name: None,
    }
}
