use anyhow::{Context, Result};

use crate::auth::{parse_staff_accounts, StaffAccount};
use crate::persistence::RemoteStoreConfig;

pub const DEFAULT_MAX_CV_BYTES: usize = 2 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Nothing is required: without remote store settings the in-memory fallback is used.
#[derive(Debug, Clone)]
pub struct Config {
    /// Present only when both SUPABASE_URL and SUPABASE_ANON_KEY are set and non-empty.
    pub remote_store: Option<RemoteStoreConfig>,
    pub port: u16,
    pub rust_log: String,
    pub staff_accounts: Vec<StaffAccount>,
    /// Seed the in-memory fallback with sample leads.
    pub demo_seed: bool,
    /// Simulate network latency in the in-memory fallback.
    pub demo_latency: bool,
    pub max_cv_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Config {
            remote_store: RemoteStoreConfig::from_parts(
                var("SUPABASE_URL"),
                var("SUPABASE_ANON_KEY"),
            ),
            port: var("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            staff_accounts: parse_staff_accounts(&var("STAFF_ACCOUNTS").unwrap_or_default())
                .context("STAFF_ACCOUNTS must be ';'-separated user:password:ROLE entries")?,
            demo_seed: flag(var("DEMO_SEED"), "DEMO_SEED", true)?,
            demo_latency: flag(var("DEMO_LATENCY"), "DEMO_LATENCY", true)?,
            max_cv_bytes: match var("MAX_CV_BYTES") {
                Some(v) => v
                    .parse::<usize>()
                    .context("MAX_CV_BYTES must be a byte count")?,
                None => DEFAULT_MAX_CV_BYTES,
            },
        })
    }
}

fn flag(value: Option<String>, key: &str, default: bool) -> Result<bool> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(default),
        Some(v) if ["1", "true", "yes", "on"].contains(&v.to_ascii_lowercase().as_str()) => Ok(true),
        Some(v) if ["0", "false", "no", "off"].contains(&v.to_ascii_lowercase().as_str()) => Ok(false),
        Some(v) => anyhow::bail!("{key} must be a boolean, got '{v}'"),
    }
}
