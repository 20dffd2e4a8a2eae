use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::intake::validation::validate_submission;
use crate::models::{Lead, LeadFormData, LeadStatus};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct IntakeResponse {
    pub id: String,
    pub status: LeadStatus,
}

/// Validates the form and submits it through the pipeline store.
pub async fn submit_form(state: &AppState, form: LeadFormData) -> Result<Lead, AppError> {
    let validation = validate_submission(&form, state.config.max_cv_bytes);
    if !validation.passed {
        return Err(AppError::Validation(validation.summary()));
    }
    Ok(state.pipeline.submit(&form).await?)
}

/// POST /api/v1/leads
///
/// Public application form. Scoring happens in the gateway; the candidate
/// only learns that the application was received.
pub async fn handle_submit_lead(
    State(state): State<AppState>,
    Json(form): Json<LeadFormData>,
) -> Result<(StatusCode, Json<IntakeResponse>), AppError> {
    let lead = submit_form(&state, form).await?;
    Ok((
        StatusCode::CREATED,
        Json(IntakeResponse {
            id: lead.id,
            status: lead.status,
        }),
    ))
}
