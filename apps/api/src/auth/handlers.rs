use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::extract::StaffSession;
use crate::auth::{Credentials, Role};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: Uuid,
    pub role: Role,
    pub landing_view: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub role: Role,
    pub landing_view: &'static str,
}

/// POST /api/v1/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<LoginResponse>, AppError> {
    let role = state
        .authenticator
        .authenticate(&credentials)
        .await
        .map_err(|e| AppError::Unauthorized(e.to_string()))?;

    let token = state.sessions.issue(role);
    info!("Staff login as {:?}", role);
    Ok(Json(LoginResponse {
        token,
        role,
        landing_view: role.landing_view(),
    }))
}

/// POST /api/v1/auth/logout
pub async fn handle_logout(
    State(state): State<AppState>,
    session: StaffSession,
) -> StatusCode {
    state.sessions.revoke(&session.token);
    StatusCode::NO_CONTENT
}

/// GET /api/v1/auth/me
pub async fn handle_me(session: StaffSession) -> Json<SessionResponse> {
    Json(SessionResponse {
        role: session.role,
        landing_view: session.role.landing_view(),
    })
}
