use serde::{Deserialize, Serialize};

use crate::models::lead::Priority;

pub const BASE_SCORE: i64 = 50;

/// Channels that earn the job-board bonus.
const JOB_BOARD_SOURCES: &[&str] = &["LinkedIn", "Moovijob"];
const JOB_BOARD_BONUS: i64 = 20;
const REFERRAL_SOURCE: &str = "Referral";
const REFERRAL_BONUS: i64 = 30;

/// Roles we are hiring for most urgently, with their bonus.
const ROLE_BONUSES: &[(&str, i64)] = &[("Team Leader", 15), ("Sales Manager", 10)];

const HIGH_THRESHOLD: u8 = 80;
const MEDIUM_THRESHOLD: u8 = 60;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeadScore {
    pub score: u8,
    pub priority: Priority,
}

/// Computes the intake score for a submission from its source channel and role.
///
/// Every rule is an independent additive check. Called once at submission;
/// later score/priority edits are manual overrides and never pass through here.
pub fn score_submission(source: Option<&str>, post_applied_for: &str) -> LeadScore {
    let mut score = BASE_SCORE;

    if let Some(source) = source {
        if JOB_BOARD_SOURCES.contains(&source) {
            score += JOB_BOARD_BONUS;
        }
        if source == REFERRAL_SOURCE {
            score += REFERRAL_BONUS;
        }
    }

    for (role, bonus) in ROLE_BONUSES {
        if post_applied_for == *role {
            score += bonus;
        }
    }

    let score = clamp_score(score);
    LeadScore {
        score,
        priority: priority_for_score(score),
    }
}

/// score >= 80 -> High, 60..80 -> Medium, otherwise Low.
pub fn priority_for_score(score: u8) -> Priority {
    match score {
        s if s >= HIGH_THRESHOLD => Priority::High,
        s if s >= MEDIUM_THRESHOLD => Priority::Medium,
        _ => Priority::Low,
    }
}

pub fn clamp_score(score: i64) -> u8 {
    score.clamp(0, 100) as u8
}
