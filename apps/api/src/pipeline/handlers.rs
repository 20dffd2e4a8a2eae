//! Axum route handlers for the recruiter pipeline.
//!
//! Every mutation is applied to the pipeline store before the gateway is
//! contacted; handlers await the confirmation and report its outcome.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::auth::extract::RequireRecruiter;
use crate::errors::AppError;
use crate::intake::handlers::submit_form;
use crate::models::{Lead, LeadFormData, LeadStatus};
use crate::persistence::Backend;
use crate::pipeline::editor::DetailEditor;
use crate::pipeline::metrics::{compute_pipeline_metrics, PipelineMetrics};
use crate::pipeline::store::{BatchOutcome, MutationOutcome};
use crate::pipeline::view::{apply_query, board_columns, BoardColumn, PipelineQuery};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct PipelineListResponse {
    pub leads: Vec<Lead>,
    pub loading: bool,
    pub backend: Backend,
}

#[derive(Debug, Deserialize)]
pub struct BoardQuery {
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct MutationResponse {
    #[serde(flatten)]
    pub outcome: MutationOutcome,
    /// The lead as the pipeline holds it after the outcome settled.
    pub lead: Option<Lead>,
}

#[derive(Debug, Deserialize)]
pub struct StatusChangeRequest {
    pub status: LeadStatus,
}

#[derive(Debug, Deserialize)]
pub struct AddTaskRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct BatchDeleteRequest {
    pub ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct BatchStatusRequest {
    pub ids: Vec<String>,
    pub status: LeadStatus,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/pipeline?search=&status=
pub async fn handle_list(
    State(state): State<AppState>,
    _recruiter: RequireRecruiter,
    Query(query): Query<PipelineQuery>,
) -> Json<PipelineListResponse> {
    Json(PipelineListResponse {
        leads: apply_query(&state.pipeline.snapshot(), &query),
        loading: state.pipeline.is_loading(),
        backend: state.pipeline.gateway().backend(),
    })
}

/// GET /api/v1/pipeline/board?search=
pub async fn handle_board(
    State(state): State<AppState>,
    _recruiter: RequireRecruiter,
    Query(query): Query<BoardQuery>,
) -> Json<Vec<BoardColumn>> {
    let search = query.search.as_deref().filter(|s| !s.trim().is_empty());
    Json(board_columns(&state.pipeline.snapshot(), search))
}

/// GET /api/v1/pipeline/metrics
pub async fn handle_metrics(
    State(state): State<AppState>,
    _recruiter: RequireRecruiter,
) -> Json<PipelineMetrics> {
    Json(compute_pipeline_metrics(&state.pipeline.snapshot()))
}

/// POST /api/v1/pipeline/reload
pub async fn handle_reload(
    State(state): State<AppState>,
    _recruiter: RequireRecruiter,
) -> Result<Json<ReloadResponse>, AppError> {
    let count = state.pipeline.load().await?;
    Ok(Json(ReloadResponse { count }))
}

/// POST /api/v1/pipeline/leads
///
/// Staff-side manual registration of an applicant.
pub async fn handle_create_lead(
    State(state): State<AppState>,
    _recruiter: RequireRecruiter,
    Json(form): Json<LeadFormData>,
) -> Result<(StatusCode, Json<Lead>), AppError> {
    let lead = submit_form(&state, form).await?;
    Ok((StatusCode::CREATED, Json(lead)))
}

/// GET /api/v1/pipeline/leads/:id
pub async fn handle_get_lead(
    State(state): State<AppState>,
    _recruiter: RequireRecruiter,
    Path(id): Path<String>,
) -> Result<Json<Lead>, AppError> {
    state
        .pipeline
        .get(&id)
        .map(Json)
        .ok_or_else(|| not_found(&id))
}

/// PUT /api/v1/pipeline/leads/:id
///
/// Saves the detail editor's full record.
pub async fn handle_save_lead(
    State(state): State<AppState>,
    _recruiter: RequireRecruiter,
    Path(id): Path<String>,
    Json(lead): Json<Lead>,
) -> Result<Json<MutationResponse>, AppError> {
    if lead.id != id {
        return Err(AppError::Validation(format!(
            "body id '{}' does not match path id '{id}'",
            lead.id
        )));
    }
    if state.pipeline.get(&id).is_none() {
        return Err(not_found(&id));
    }
    let outcome = state.pipeline.save_detail(lead).await;
    Ok(Json(settled(&state, &id, outcome)))
}

/// PATCH /api/v1/pipeline/leads/:id/status
pub async fn handle_set_status(
    State(state): State<AppState>,
    _recruiter: RequireRecruiter,
    Path(id): Path<String>,
    Json(req): Json<StatusChangeRequest>,
) -> Result<Json<MutationResponse>, AppError> {
    if state.pipeline.get(&id).is_none() {
        return Err(not_found(&id));
    }
    let outcome = state.pipeline.set_status(&id, req.status).await;
    Ok(Json(settled(&state, &id, outcome)))
}

/// POST /api/v1/pipeline/leads/:id/tasks
pub async fn handle_add_task(
    State(state): State<AppState>,
    _recruiter: RequireRecruiter,
    Path(id): Path<String>,
    Json(req): Json<AddTaskRequest>,
) -> Result<(StatusCode, Json<MutationResponse>), AppError> {
    let mut editor = open_editor(&state, &id)?;
    if editor.add_task(&req.text).is_none() {
        return Err(AppError::Validation("task text cannot be empty".to_string()));
    }
    let outcome = state.pipeline.save_detail(editor.into_lead()).await;
    Ok((StatusCode::CREATED, Json(settled(&state, &id, outcome))))
}

/// PATCH /api/v1/pipeline/leads/:id/tasks/:task_id
///
/// Toggles completion.
pub async fn handle_toggle_task(
    State(state): State<AppState>,
    _recruiter: RequireRecruiter,
    Path((id, task_id)): Path<(String, String)>,
) -> Result<Json<MutationResponse>, AppError> {
    let mut editor = open_editor(&state, &id)?;
    if !editor.toggle_task(&task_id) {
        return Err(AppError::NotFound(format!("Task {task_id} not found")));
    }
    let outcome = state.pipeline.save_detail(editor.into_lead()).await;
    Ok(Json(settled(&state, &id, outcome)))
}

/// DELETE /api/v1/pipeline/leads/:id/tasks/:task_id
pub async fn handle_remove_task(
    State(state): State<AppState>,
    _recruiter: RequireRecruiter,
    Path((id, task_id)): Path<(String, String)>,
) -> Result<Json<MutationResponse>, AppError> {
    let mut editor = open_editor(&state, &id)?;
    if !editor.remove_task(&task_id) {
        return Err(AppError::NotFound(format!("Task {task_id} not found")));
    }
    let outcome = state.pipeline.save_detail(editor.into_lead()).await;
    Ok(Json(settled(&state, &id, outcome)))
}

/// POST /api/v1/pipeline/batch/delete
pub async fn handle_batch_delete(
    State(state): State<AppState>,
    _recruiter: RequireRecruiter,
    Json(req): Json<BatchDeleteRequest>,
) -> Json<BatchOutcome> {
    Json(state.pipeline.batch_delete(req.ids).await)
}

/// POST /api/v1/pipeline/batch/status
pub async fn handle_batch_status(
    State(state): State<AppState>,
    _recruiter: RequireRecruiter,
    Json(req): Json<BatchStatusRequest>,
) -> Json<BatchOutcome> {
    Json(state.pipeline.batch_set_status(req.ids, req.status).await)
}

fn open_editor(state: &AppState, id: &str) -> Result<DetailEditor, AppError> {
    state.pipeline.edit(id).ok_or_else(|| not_found(id))
}

fn settled(state: &AppState, id: &str, outcome: MutationOutcome) -> MutationResponse {
    MutationResponse {
        outcome,
        lead: state.pipeline.get(id),
    }
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Lead {id} not found"))
}
