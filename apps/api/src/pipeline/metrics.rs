use serde::{Deserialize, Serialize};

use crate::models::{Lead, LeadStatus, Priority};

/// Stage counted as a successful hire for the conversion rate.
const CONVERTED_STATUS: LeadStatus = LeadStatus::Recruiter;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusCount {
    pub status: LeadStatus,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriorityCount {
    pub priority: Priority,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PipelineMetrics {
    pub total_applicants: usize,
    /// Percentage of leads that reached `Recruiter`, rounded.
    pub conversion_rate: u32,
    /// Mean score, rounded.
    pub average_score: u32,
    pub by_status: Vec<StatusCount>,
    pub by_priority: Vec<PriorityCount>,
    pub open_tasks: usize,
}

pub fn compute_pipeline_metrics(leads: &[Lead]) -> PipelineMetrics {
    let total = leads.len();

    let (conversion_rate, average_score) = if total == 0 {
        (0, 0)
    } else {
        let converted = leads
            .iter()
            .filter(|l| l.status == CONVERTED_STATUS)
            .count();
        let score_sum: u64 = leads.iter().map(|l| u64::from(l.score)).sum();
        (
            (converted as f64 / total as f64 * 100.0).round() as u32,
            (score_sum as f64 / total as f64).round() as u32,
        )
    };

    let by_status = LeadStatus::ALL
        .iter()
        .map(|status| StatusCount {
            status: *status,
            count: leads.iter().filter(|l| l.status == *status).count(),
        })
        .collect();

    let by_priority = Priority::ALL
        .iter()
        .map(|priority| PriorityCount {
            priority: *priority,
            count: leads.iter().filter(|l| l.priority == *priority).count(),
        })
        .collect();

    let open_tasks = leads
        .iter()
        .flat_map(|l| l.tasks.iter())
        .filter(|t| !t.is_completed)
        .count();

    PipelineMetrics {
        total_applicants: total,
        conversion_rate,
        average_score,
        by_status,
        by_priority,
        open_tasks,
    }
}
