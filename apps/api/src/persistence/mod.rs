//! Persistence gateway: create, read, update and delete of lead records.
//!
//! Two interchangeable backends sit behind `LeadGateway`:
//! - `RemoteLeadGateway`: hosted REST table, selected when both remote settings are present.
//! - `InMemoryLeadGateway`: process-local fallback over an injected `LeadMemoryStore`.
//!
//! The backend is chosen once at startup and never changes mid-process.

pub mod demo;
pub mod memory;
pub mod remote;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::config::Config;
use crate::models::{Lead, LeadFormData, LeadPatch};

pub use memory::{InMemoryLeadGateway, LeadMemoryStore, SimulatedLatency};
pub use remote::{RemoteLeadGateway, RemoteStoreConfig};

/// Source recorded when a submission does not name one.
pub const DEFAULT_SOURCE: &str = "Web Form";

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{message}")]
    Backend { status: u16, message: String },

    #[error("Unexpected response from store: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    Remote,
    InMemory,
}

/// Storage contract for lead records.
///
/// Carried in `AppState` and `PipelineStore` as `Arc<dyn LeadGateway>`.
#[async_trait]
pub trait LeadGateway: Send + Sync {
    /// Capability probe: which backend serves this process.
    fn backend(&self) -> Backend;

    /// All known leads, most recent first.
    async fn fetch_all(&self) -> Result<Vec<Lead>, GatewayError>;

    /// Scores the submission, stores it with status `Lead` and returns the stored record.
    async fn create(&self, form: &LeadFormData) -> Result<Lead, GatewayError>;

    /// Applies a partial patch. An unknown id is a no-op.
    async fn update(&self, id: &str, patch: &LeadPatch) -> Result<(), GatewayError>;

    /// Removes the record. An unknown id is a no-op.
    async fn delete(&self, id: &str) -> Result<(), GatewayError>;
}

/// Picks the backend for the lifetime of the process.
pub fn select_gateway(
    config: &Config,
    memory: Arc<LeadMemoryStore>,
) -> anyhow::Result<Arc<dyn LeadGateway>> {
    match &config.remote_store {
        Some(remote) => {
            info!("Remote lead store configured at {}", remote.url);
            Ok(Arc::new(RemoteLeadGateway::new(remote.clone())?))
        }
        None => {
            info!("No remote lead store configured, using in-memory fallback");
            let latency = if config.demo_latency {
                SimulatedLatency::demo()
            } else {
                SimulatedLatency::none()
            };
            Ok(Arc::new(InMemoryLeadGateway::new(memory, latency)))
        }
    }
}
