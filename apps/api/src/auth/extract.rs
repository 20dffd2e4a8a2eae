//! Session extractors for Axum handlers.

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::auth::Role;
use crate::errors::AppError;
use crate::state::AppState;

/// A signed-in staff member, resolved from `Authorization: Bearer <token>`.
#[derive(Debug, Clone, Copy)]
pub struct StaffSession {
    pub token: Uuid,
    pub role: Role,
}

#[async_trait]
impl FromRequestParts<AppState> for StaffSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".into()))?;

        let token = header
            .strip_prefix("Bearer ")
            .and_then(|t| Uuid::parse_str(t.trim()).ok())
            .ok_or_else(|| {
                AppError::Unauthorized("Expected Authorization: Bearer <session token>".into())
            })?;

        let role = state
            .sessions
            .role_for(&token)
            .ok_or_else(|| AppError::Unauthorized("Session is not active".into()))?;

        Ok(StaffSession { token, role })
    }
}

/// Requires the recruiter role. Pipeline routes use this.
pub struct RequireRecruiter(pub StaffSession);

#[async_trait]
impl FromRequestParts<AppState> for RequireRecruiter {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = StaffSession::from_request_parts(parts, state).await?;
        if session.role != Role::Recruiter {
            return Err(AppError::Forbidden("Recruiter role required".into()));
        }
        Ok(RequireRecruiter(session))
    }
}
