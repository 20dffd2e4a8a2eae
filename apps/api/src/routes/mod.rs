pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::auth::handlers as auth;
use crate::intake::handlers as intake;
use crate::pipeline::handlers as pipeline;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Public intake
        .route("/api/v1/leads", post(intake::handle_submit_lead))
        // Staff sessions
        .route("/api/v1/auth/login", post(auth::handle_login))
        .route("/api/v1/auth/logout", post(auth::handle_logout))
        .route("/api/v1/auth/me", get(auth::handle_me))
        // Recruiter pipeline
        .route("/api/v1/pipeline", get(pipeline::handle_list))
        .route("/api/v1/pipeline/board", get(pipeline::handle_board))
        .route("/api/v1/pipeline/metrics", get(pipeline::handle_metrics))
        .route("/api/v1/pipeline/reload", post(pipeline::handle_reload))
        .route("/api/v1/pipeline/leads", post(pipeline::handle_create_lead))
        .route(
            "/api/v1/pipeline/leads/:id",
            get(pipeline::handle_get_lead).put(pipeline::handle_save_lead),
        )
        .route(
            "/api/v1/pipeline/leads/:id/status",
            patch(pipeline::handle_set_status),
        )
        .route(
            "/api/v1/pipeline/leads/:id/tasks",
            post(pipeline::handle_add_task),
        )
        .route(
            "/api/v1/pipeline/leads/:id/tasks/:task_id",
            patch(pipeline::handle_toggle_task).delete(pipeline::handle_remove_task),
        )
        .route(
            "/api/v1/pipeline/batch/delete",
            post(pipeline::handle_batch_delete),
        )
        .route(
            "/api/v1/pipeline/batch/status",
            post(pipeline::handle_batch_status),
        )
        .with_state(state)
}
