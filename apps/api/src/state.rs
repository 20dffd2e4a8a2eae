use std::sync::Arc;

use crate::auth::{Authenticator, SessionRegistry};
use crate::config::Config;
use crate::persistence::LeadGateway;
use crate::pipeline::PipelineStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Selected once at startup. Default: in-memory fallback unless both remote settings are set.
    pub gateway: Arc<dyn LeadGateway>,
    /// Recruiter working set, backed by `gateway`.
    pub pipeline: PipelineStore,
    /// Pluggable staff authentication. Default: StaticAuthenticator over STAFF_ACCOUNTS.
    pub authenticator: Arc<dyn Authenticator>,
    pub sessions: SessionRegistry,
}

impl AppState {
    pub fn new(
        config: Config,
        gateway: Arc<dyn LeadGateway>,
        authenticator: Arc<dyn Authenticator>,
    ) -> Self {
        Self {
            pipeline: PipelineStore::new(gateway.clone()),
            config,
            gateway,
            authenticator,
            sessions: SessionRegistry::new(),
        }
    }
}
