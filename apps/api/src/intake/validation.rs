use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::models::LeadFormData;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeValidationResult {
    pub passed: bool,
    pub issues: Vec<FieldIssue>,
}

impl IntakeValidationResult {
    /// One line per issue, for error responses.
    pub fn summary(&self) -> String {
        self.issues
            .iter()
            .map(|i| format!("{}: {}", i.field, i.reason))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Checks a submission before it reaches the gateway.
///
/// FAIL conditions:
/// - A required field (fullName, email, phone, postAppliedFor, bio) is blank
/// - Email is not `local@domain`
/// - A CV is attached without a file name
/// - The CV is not valid base64 (a `data:` URL prefix is allowed)
/// - The decoded CV exceeds `max_cv_bytes`
pub fn validate_submission(form: &LeadFormData, max_cv_bytes: usize) -> IntakeValidationResult {
    let mut issues = Vec::new();

    let required = [
        ("fullName", &form.full_name),
        ("email", &form.email),
        ("phone", &form.phone),
        ("postAppliedFor", &form.post_applied_for),
        ("bio", &form.bio),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            issues.push(issue(field, "is required"));
        }
    }

    if !form.email.trim().is_empty() && !looks_like_email(form.email.trim()) {
        issues.push(issue("email", "must be a valid email address"));
    }

    if let Some(cv) = form.cv_base64.as_deref().filter(|c| !c.is_empty()) {
        if form
            .cv_file_name
            .as_deref()
            .map_or(true, |n| n.trim().is_empty())
        {
            issues.push(issue("cvFileName", "is required when a CV is attached"));
        }
        match BASE64.decode(strip_data_url(cv)) {
            Ok(bytes) if bytes.len() > max_cv_bytes => issues.push(issue(
                "cvBase64",
                &format!(
                    "attachment is {} bytes, the limit is {} bytes",
                    bytes.len(),
                    max_cv_bytes
                ),
            )),
            Ok(_) => {}
            Err(_) => issues.push(issue("cvBase64", "is not valid base64")),
        }
    }

    IntakeValidationResult {
        passed: issues.is_empty(),
        issues,
    }
}

fn issue(field: &str, reason: &str) -> FieldIssue {
    FieldIssue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    }
}

/// `data:application/pdf;base64,JVBER...` -> `JVBER...`
fn strip_data_url(payload: &str) -> &str {
    if payload.starts_with("data:") {
        payload
            .split_once(',')
            .map(|(_, data)| data)
            .unwrap_or(payload)
    } else {
        payload
    }
}
