//! Read-side shaping of the pipeline: default ordering, search, board columns.
//! Recomputed from the current collection on every read, never stored.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::{Lead, LeadStatus, Priority};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PipelineQuery {
    pub search: Option<String>,
    pub status: Option<LeadStatus>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BoardColumn {
    pub status: LeadStatus,
    pub leads: Vec<Lead>,
}

/// High priority first, then newest first.
pub fn default_order(a: &Lead, b: &Lead) -> Ordering {
    let a_high = a.priority == Priority::High;
    let b_high = b.priority == Priority::High;
    b_high
        .cmp(&a_high)
        .then_with(|| b.created_at.cmp(&a.created_at))
}

/// Case-insensitive match on name, email or role applied for.
pub fn matches_search(lead: &Lead, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    lead.full_name.to_lowercase().contains(&needle)
        || lead.email.to_lowercase().contains(&needle)
        || lead.post_applied_for.to_lowercase().contains(&needle)
}

/// Filters by the query and sorts in default order.
pub fn apply_query(leads: &[Lead], query: &PipelineQuery) -> Vec<Lead> {
    let search = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let mut result: Vec<Lead> = leads
        .iter()
        .filter(|l| search.map_or(true, |s| matches_search(l, s)))
        .filter(|l| query.status.map_or(true, |s| l.status == s))
        .cloned()
        .collect();
    result.sort_by(default_order);
    result
}

/// One column per status, in pipeline order, each in default order.
pub fn board_columns(leads: &[Lead], search: Option<&str>) -> Vec<BoardColumn> {
    let visible = apply_query(
        leads,
        &PipelineQuery {
            search: search.map(String::from),
            status: None,
        },
    );
    LeadStatus::ALL
        .iter()
        .map(|status| BoardColumn {
            status: *status,
            leads: visible
                .iter()
                .filter(|l| l.status == *status)
                .cloned()
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::lead::sample_lead;
    use chrono::{Duration, Utc};

    #[test]
    fn test_high_priority_sorts_before_newer_low() {
        let t0 = Utc::now();
        let t1 = t0 + Duration::minutes(5);
        let leads = vec![
            sample_lead("low", Priority::Low, t1),
            sample_lead("high", Priority::High, t0),
        ];
        let sorted = apply_query(&leads, &PipelineQuery::default());
        assert_eq!(sorted[0].id, "high");
        assert_eq!(sorted[1].id, "low");
    }

    #[test]
    fn test_medium_is_not_promoted() {
        let t0 = Utc::now();
        let leads = vec![
            sample_lead("medium-old", Priority::Medium, t0),
            sample_lead("low-new", Priority::Low, t0 + Duration::minutes(1)),
        ];
        let sorted = apply_query(&leads, &PipelineQuery::default());
        assert_eq!(sorted[0].id, "low-new");
    }

    #[test]
    fn test_search_matches_name_email_and_role() {
        let mut lead = sample_lead("1", Priority::Low, Utc::now());
        lead.full_name = "Elena Popov".into();
        lead.post_applied_for = "Sales Manager".into();
        assert!(matches_search(&lead, "popov"));
        assert!(matches_search(&lead, "EXAMPLE.LU"));
        assert!(matches_search(&lead, "sales"));
        assert!(!matches_search(&lead, "leader"));
    }

    #[test]
    fn test_status_filter_and_blank_search() {
        let now = Utc::now();
        let mut rejected = sample_lead("r", Priority::Low, now);
        rejected.status = LeadStatus::Rejected;
        let leads = vec![rejected, sample_lead("l", Priority::Low, now)];

        let query = PipelineQuery {
            search: Some("  ".into()),
            status: Some(LeadStatus::Rejected),
        };
        let result = apply_query(&leads, &query);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "r");
    }

    #[test]
    fn test_board_has_every_column_in_order() {
        let now = Utc::now();
        let mut formation = sample_lead("f", Priority::Low, now);
        formation.status = LeadStatus::Formation;
        let leads = vec![formation, sample_lead("l", Priority::Low, now)];

        let board = board_columns(&leads, None);
        let statuses: Vec<LeadStatus> = board.iter().map(|c| c.status).collect();
        assert_eq!(statuses, LeadStatus::ALL.to_vec());
        assert_eq!(board[0].leads[0].id, "l");
        assert_eq!(board[2].leads[0].id, "f");
        assert!(board[4].leads.is_empty());
    }
}
