use chrono::{Duration, Utc};

use crate::models::{Lead, LeadStatus, Priority, Task};

struct Seed {
    full_name: &'static str,
    email: &'static str,
    phone: &'static str,
    post_applied_for: &'static str,
    bio: &'static str,
    source: &'static str,
    status: LeadStatus,
    age: Duration,
    priority: Priority,
    score: u8,
    task: Option<(&'static str, bool)>,
    follow_up_in: Option<Duration>,
}

/// Sample leads for running without a remote store, one per pipeline stage.
pub fn demo_leads() -> Vec<Lead> {
    let now = Utc::now();
    let seeds = [
        Seed {
            full_name: "Alexandre Dubois",
            email: "a.dubois@example.lu",
            phone: "+352 691 123 456",
            post_applied_for: "Team Leader",
            bio: "4 years of door-to-door sales. Has managed small teams against daily KPIs.",
            source: "Moovijob",
            status: LeadStatus::Interviewing,
            age: Duration::days(2),
            priority: Priority::High,
            score: 85,
            task: Some(("Check reference letters", false)),
            follow_up_in: Some(Duration::days(1)),
        },
        Seed {
            full_name: "Sarah Wagner",
            email: "s.wagner@example.de",
            phone: "+49 151 987 6543",
            post_applied_for: "Promoter / Brand Ambassador",
            bio: "Student looking for summer work. Fluent in German and French.",
            source: "LinkedIn",
            status: LeadStatus::Lead,
            age: Duration::hours(4),
            priority: Priority::Medium,
            score: 72,
            task: None,
            follow_up_in: None,
        },
        Seed {
            full_name: "Jean-Pierre Muller",
            email: "jp.muller@example.lu",
            phone: "+352 661 555 000",
            post_applied_for: "Door-to-Door Sales Representative",
            bio: "Career changer with strong communication skills.",
            source: "Facebook",
            status: LeadStatus::Rejected,
            age: Duration::minutes(30),
            priority: Priority::Low,
            score: 45,
            task: Some(("Call to gauge motivation", true)),
            follow_up_in: None,
        },
        Seed {
            full_name: "Elena Popov",
            email: "elena.p@example.com",
            phone: "+352 691 999 888",
            post_applied_for: "Sales Manager",
            bio: "10 years in field marketing and event planning for telecom brands.",
            source: "Website",
            status: LeadStatus::Recruiter,
            age: Duration::days(15),
            priority: Priority::High,
            score: 95,
            task: None,
            follow_up_in: None,
        },
        Seed {
            full_name: "Marc Weber",
            email: "marc.w@example.lu",
            phone: "+352 621 111 222",
            post_applied_for: "Promoter",
            bio: "Energetic and ready to learn.",
            source: "Walk-in",
            status: LeadStatus::Formation,
            age: Duration::days(5),
            priority: Priority::Low,
            score: 55,
            task: None,
            follow_up_in: None,
        },
    ];

    let mut leads: Vec<Lead> = seeds
        .into_iter()
        .enumerate()
        .map(|(i, seed)| Lead {
            id: format!("demo-{}", i + 1),
            full_name: seed.full_name.to_string(),
            email: seed.email.to_string(),
            phone: seed.phone.to_string(),
            post_applied_for: seed.post_applied_for.to_string(),
            bio: seed.bio.to_string(),
            source: seed.source.to_string(),
            status: seed.status,
            created_at: now - seed.age,
            priority: seed.priority,
            score: seed.score,
            tasks: seed
                .task
                .map(|(text, done)| Task {
                    id: format!("demo-{}-t1", i + 1),
                    text: text.to_string(),
                    is_completed: done,
                    created_at: now,
                })
                .into_iter()
                .collect(),
            next_follow_up: seed.follow_up_in.map(|d| now + d),
            cv_base64: None,
            cv_file_name: None,
        })
        .collect();

    leads.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    leads
}
