//! Gateway double for unit tests: records calls and fails on demand.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::models::{Lead, LeadFormData, LeadPatch};
use crate::persistence::{
    Backend, GatewayError, InMemoryLeadGateway, LeadGateway, LeadMemoryStore, SimulatedLatency,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    FetchAll,
    Create(String),
    Update(String, LeadPatch),
    Delete(String),
}

pub struct RecordingGateway {
    pub store: Arc<LeadMemoryStore>,
    inner: InMemoryLeadGateway,
    calls: Mutex<Vec<Call>>,
    failing_ids: Mutex<HashSet<String>>,
    fail_fetch: AtomicBool,
}

impl RecordingGateway {
    pub fn new(leads: Vec<Lead>) -> Self {
        Self::with_latency(leads, SimulatedLatency::none())
    }

    pub fn with_latency(leads: Vec<Lead>, latency: SimulatedLatency) -> Self {
        let store = Arc::new(LeadMemoryStore::with_leads(leads));
        Self {
            inner: InMemoryLeadGateway::new(store.clone(), latency),
            store,
            calls: Mutex::new(vec![]),
            failing_ids: Mutex::new(HashSet::new()),
            fail_fetch: AtomicBool::new(false),
        }
    }

    /// Writes touching `id` are rejected without reaching the store.
    pub fn fail_writes_for(&self, id: &str) {
        self.failing_ids.lock().unwrap().insert(id.to_string());
    }

    pub fn fail_fetches(&self) {
        self.fail_fetch.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn rejects(&self, id: &str) -> bool {
        self.failing_ids.lock().unwrap().contains(id)
    }
}

fn rejected() -> GatewayError {
    GatewayError::Backend {
        status: 500,
        message: "simulated failure".to_string(),
    }
}

#[async_trait]
impl LeadGateway for RecordingGateway {
    fn backend(&self) -> Backend {
        Backend::InMemory
    }

    async fn fetch_all(&self) -> Result<Vec<Lead>, GatewayError> {
        self.record(Call::FetchAll);
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(rejected());
        }
        self.inner.fetch_all().await
    }

    async fn create(&self, form: &LeadFormData) -> Result<Lead, GatewayError> {
        self.record(Call::Create(form.full_name.clone()));
        self.inner.create(form).await
    }

    async fn update(&self, id: &str, patch: &LeadPatch) -> Result<(), GatewayError> {
        self.record(Call::Update(id.to_string(), patch.clone()));
        if self.rejects(id) {
            return Err(rejected());
        }
        self.inner.update(id, patch).await
    }

    async fn delete(&self, id: &str) -> Result<(), GatewayError> {
        self.record(Call::Delete(id.to_string()));
        if self.rejects(id) {
            return Err(rejected());
        }
        self.inner.delete(id).await
    }
}
