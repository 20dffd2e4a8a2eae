use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::models::{Lead, LeadFormData, LeadPatch, LeadStatus};
use crate::persistence::{Backend, GatewayError, LeadGateway, DEFAULT_SOURCE};
use crate::scoring::score_submission;

const MANUAL_MARKER: &str = "(Manual)";
const MANUAL_SOURCE: &str = "Manual Entry";

/// Process-local lead collection, most recent first.
///
/// Owned by the composition root and handed to `InMemoryLeadGateway`;
/// each test builds its own.
#[derive(Debug, Default)]
pub struct LeadMemoryStore {
    leads: RwLock<Vec<Lead>>,
}

impl LeadMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_leads(leads: Vec<Lead>) -> Self {
        Self {
            leads: RwLock::new(leads),
        }
    }

    pub fn snapshot(&self) -> Vec<Lead> {
        self.read().clone()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Lead>> {
        self.leads.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Lead>> {
        self.leads.write().unwrap_or_else(|e| e.into_inner())
    }
}

/// Artificial per-operation delay so the fallback behaves like a network store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulatedLatency {
    pub fetch: Duration,
    pub create: Duration,
    pub update: Duration,
    pub delete: Duration,
}

impl SimulatedLatency {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn demo() -> Self {
        Self {
            fetch: Duration::from_millis(400),
            create: Duration::from_millis(800),
            update: Duration::from_millis(300),
            delete: Duration::from_millis(300),
        }
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

pub struct InMemoryLeadGateway {
    store: Arc<LeadMemoryStore>,
    latency: SimulatedLatency,
}

impl InMemoryLeadGateway {
    pub fn new(store: Arc<LeadMemoryStore>, latency: SimulatedLatency) -> Self {
        Self { store, latency }
    }
}

fn fallback_source(form: &LeadFormData) -> String {
    match form.source() {
        Some(source) => source.to_string(),
        None if form.full_name.contains(MANUAL_MARKER) => MANUAL_SOURCE.to_string(),
        None => DEFAULT_SOURCE.to_string(),
    }
}

#[async_trait]
impl LeadGateway for InMemoryLeadGateway {
    fn backend(&self) -> Backend {
        Backend::InMemory
    }

    async fn fetch_all(&self) -> Result<Vec<Lead>, GatewayError> {
        pause(self.latency.fetch).await;
        Ok(self.store.snapshot())
    }

    async fn create(&self, form: &LeadFormData) -> Result<Lead, GatewayError> {
        let scored = score_submission(form.source(), &form.post_applied_for);
        pause(self.latency.create).await;

        let lead = Lead {
            id: Uuid::new_v4().to_string(),
            full_name: form.full_name.clone(),
            email: form.email.clone(),
            phone: form.phone.clone(),
            post_applied_for: form.post_applied_for.clone(),
            bio: form.bio.clone(),
            source: fallback_source(form),
            status: LeadStatus::Lead,
            created_at: Utc::now(),
            priority: scored.priority,
            score: scored.score,
            tasks: vec![],
            next_follow_up: None,
            cv_base64: form.cv_base64.clone(),
            cv_file_name: form.cv_file_name.clone(),
        };

        self.store.write().insert(0, lead.clone());
        debug!("In-memory store: created lead {}", lead.id);
        Ok(lead)
    }

    async fn update(&self, id: &str, patch: &LeadPatch) -> Result<(), GatewayError> {
        pause(self.latency.update).await;
        if let Some(lead) = self.store.write().iter_mut().find(|l| l.id == id) {
            lead.apply(patch);
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), GatewayError> {
        pause(self.latency.delete).await;
        self.store.write().retain(|l| l.id != id);
        Ok(())
    }
}
