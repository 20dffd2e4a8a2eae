use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{Lead, LeadStatus, Priority, Task};
use crate::scoring::clamp_score;

/// A detached copy of one lead, edited in the detail view.
///
/// Nothing here touches the pipeline collection; hand the result to
/// `PipelineStore::save_detail` to apply and persist it.
#[derive(Debug, Clone)]
pub struct DetailEditor {
    lead: Lead,
}

impl DetailEditor {
    pub fn new(lead: Lead) -> Self {
        Self { lead }
    }

    pub fn lead(&self) -> &Lead {
        &self.lead
    }

    pub fn into_lead(self) -> Lead {
        self.lead
    }

    /// Adds a task to the top of the list. Blank text is ignored.
    pub fn add_task(&mut self, text: &str) -> Option<&Task> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.lead.tasks.insert(
            0,
            Task {
                id: Uuid::new_v4().to_string(),
                text: text.to_string(),
                is_completed: false,
                created_at: Utc::now(),
            },
        );
        self.lead.tasks.first()
    }

    /// Flips completion of the task. Returns false if no such task exists.
    pub fn toggle_task(&mut self, task_id: &str) -> bool {
        match self.lead.tasks.iter_mut().find(|t| t.id == task_id) {
            Some(task) => {
                task.is_completed = !task.is_completed;
                true
            }
            None => false,
        }
    }

    pub fn remove_task(&mut self, task_id: &str) -> bool {
        let before = self.lead.tasks.len();
        self.lead.tasks.retain(|t| t.id != task_id);
        self.lead.tasks.len() != before
    }

    pub fn set_status(&mut self, status: LeadStatus) {
        self.lead.status = status;
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.lead.priority = priority;
    }

    /// Manual override; never recomputed from the intake rules.
    pub fn set_score(&mut self, score: i64) {
        self.lead.score = clamp_score(score);
    }

    pub fn set_bio(&mut self, bio: &str) {
        self.lead.bio = bio.to_string();
    }

    pub fn set_next_follow_up(&mut self, at: Option<DateTime<Utc>>) {
        self.lead.next_follow_up = at;
    }
}
