//! Staff authentication.
//!
//! The pipeline only ever sees a `Role`. How that role was established sits
//! behind the `Authenticator` trait, carried in `AppState` as `Arc<dyn Authenticator>`.

pub mod extract;
pub mod handlers;

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Recruiter,
    Worker,
    Manager,
}

impl Role {
    /// The dashboard each role lands on after signing in.
    pub fn landing_view(&self) -> &'static str {
        match self {
            Role::Recruiter => "pipeline",
            Role::Worker => "worker_dashboard",
            Role::Manager => "manager_dashboard",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "RECRUITER" => Some(Role::Recruiter),
            "WORKER" => Some(Role::Worker),
            "MANAGER" => Some(Role::Manager),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffAccount {
    pub username: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthFailure {
    #[error("Invalid credentials")]
    InvalidCredentials,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid staff account entry '{0}'")]
pub struct AccountParseError(pub String);

/// Parses `user:password:ROLE` entries separated by `;`. Empty input yields no accounts.
pub fn parse_staff_accounts(raw: &str) -> Result<Vec<StaffAccount>, AccountParseError> {
    raw.split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let mut parts = entry.splitn(3, ':');
            match (parts.next(), parts.next(), parts.next()) {
                (Some(user), Some(password), Some(role)) if !user.is_empty() => {
                    let role =
                        Role::parse(role).ok_or_else(|| AccountParseError(entry.to_string()))?;
                    Ok(StaffAccount {
                        username: user.to_string(),
                        password: password.to_string(),
                        role,
                    })
                }
                _ => Err(AccountParseError(entry.to_string())),
            }
        })
        .collect()
}

#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Role, AuthFailure>;
}

/// Checks credentials against a fixed account table supplied by configuration.
pub struct StaticAuthenticator {
    accounts: Vec<StaffAccount>,
}

impl StaticAuthenticator {
    pub fn new(accounts: Vec<StaffAccount>) -> Self {
        Self { accounts }
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[async_trait]
impl Authenticator for StaticAuthenticator {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Role, AuthFailure> {
        self.accounts
            .iter()
            .find(|a| a.username == credentials.username && a.password == credentials.password)
            .map(|a| a.role)
            .ok_or(AuthFailure::InvalidCredentials)
    }
}

/// Opaque bearer tokens issued at login.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, Role>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self, role: Role) -> Uuid {
        let token = Uuid::new_v4();
        self.sessions
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(token, role);
        token
    }

    pub fn role_for(&self, token: &Uuid) -> Option<Role> {
        self.sessions
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(token)
            .copied()
    }

    /// Returns true if the token was live.
    pub fn revoke(&self, token: &Uuid) -> bool {
        self.sessions
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(token)
            .is_some()
    }
}
