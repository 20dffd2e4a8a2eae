//! Working set of leads plus the optimistic mutation protocol.
//!
//! Every mutation applies to the local collection synchronously, before the
//! returned future is first polled, and only then talks to the gateway.
//! The lock is never held across an `.await`.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;
use tracing::{info, warn};

use crate::models::{Lead, LeadFormData, LeadPatch, LeadStatus};
use crate::persistence::{GatewayError, LeadGateway};
use crate::pipeline::editor::DetailEditor;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MutationOutcome {
    Confirmed,
    /// The store rejected the write; local state was reloaded from the store.
    RolledBack { error: String },
    /// The store rejected the write and the reload failed too. Local state
    /// still holds the unconfirmed change.
    Diverged {
        error: String,
        #[serde(rename = "reloadError")]
        reload_error: String,
    },
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FailedItem {
    pub id: String,
    pub error: String,
}

/// Per-item result of a batch mutation.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BatchOutcome {
    pub succeeded: Vec<String>,
    pub failed: Vec<FailedItem>,
    /// False when failed items could not be re-read from the store and may still diverge.
    pub reconciled: bool,
}

/// Counts a load as in flight until dropped, including when the load is cancelled.
struct LoadingGuard<'a>(&'a AtomicUsize);

impl<'a> LoadingGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

struct Inner {
    gateway: Arc<dyn LeadGateway>,
    leads: RwLock<Vec<Lead>>,
    loads_in_flight: AtomicUsize,
}

#[derive(Clone)]
pub struct PipelineStore {
    inner: Arc<Inner>,
}

impl PipelineStore {
    pub fn new(gateway: Arc<dyn LeadGateway>) -> Self {
        Self {
            inner: Arc::new(Inner {
                gateway,
                leads: RwLock::new(Vec::new()),
                loads_in_flight: AtomicUsize::new(0),
            }),
        }
    }

    pub fn gateway(&self) -> &Arc<dyn LeadGateway> {
        &self.inner.gateway
    }

    /// Current local collection in insertion/fetch order.
    pub fn snapshot(&self) -> Vec<Lead> {
        self.read().clone()
    }

    pub fn get(&self, id: &str) -> Option<Lead> {
        self.read().iter().find(|l| l.id == id).cloned()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.loads_in_flight.load(Ordering::SeqCst) > 0
    }

    /// Opens a detached copy of a lead for editing. Changes reach the
    /// collection only through `save_detail`.
    pub fn edit(&self, id: &str) -> Option<DetailEditor> {
        self.get(id).map(DetailEditor::new)
    }

    /// Replaces the whole local collection with the store's contents.
    ///
    /// Concurrent loads are not coordinated: the last one to finish wins.
    /// On failure the local collection is left as it was.
    pub async fn load(&self) -> Result<usize, GatewayError> {
        let result = {
            let _loading = LoadingGuard::enter(&self.inner.loads_in_flight);
            self.inner.gateway.fetch_all().await
        };

        let leads = result?;
        let count = leads.len();
        *self.write() = leads;
        info!("Pipeline loaded {count} leads");
        Ok(count)
    }

    /// Creates a lead through the gateway and prepends it locally.
    pub async fn submit(&self, form: &LeadFormData) -> Result<Lead, GatewayError> {
        let lead = self.inner.gateway.create(form).await?;
        self.write().insert(0, lead.clone());
        info!(
            "Lead {} submitted (score {}, {:?})",
            lead.id, lead.score, lead.priority
        );
        Ok(lead)
    }

    /// Moves a lead to `status` locally right away; the returned future confirms
    /// with the store and reloads everything if the store rejects the write.
    pub fn set_status(
        &self,
        id: &str,
        status: LeadStatus,
    ) -> impl Future<Output = MutationOutcome> + Send + 'static {
        let patch = LeadPatch::status(status);
        if let Some(lead) = self.write().iter_mut().find(|l| l.id == id) {
            lead.apply(&patch);
        }

        let store = self.clone();
        let id = id.to_string();
        async move { store.confirm(&id, &patch).await }
    }

    /// Overwrites every editable field of the matching lead with `lead`'s values,
    /// locally first, then persists the whole record in one update.
    pub fn save_detail(&self, lead: Lead) -> impl Future<Output = MutationOutcome> + Send + 'static {
        let patch = LeadPatch::full(&lead);
        if let Some(existing) = self.write().iter_mut().find(|l| l.id == lead.id) {
            existing.apply(&patch);
        }

        let store = self.clone();
        async move { store.confirm(&lead.id, &patch).await }
    }

    /// Removes the selected leads locally, then deletes them one by one in selection order.
    pub fn batch_delete(
        &self,
        ids: Vec<String>,
    ) -> impl Future<Output = BatchOutcome> + Send + 'static {
        let ids = dedup_in_order(ids);
        {
            let selected: HashSet<&str> = ids.iter().map(String::as_str).collect();
            self.write().retain(|l| !selected.contains(l.id.as_str()));
        }

        let store = self.clone();
        async move {
            let mut outcome = BatchOutcome::default();
            for id in ids {
                let result = store.inner.gateway.delete(&id).await;
                record(&mut outcome, id, result);
            }
            store.reconcile_failed(&mut outcome).await;
            outcome
        }
    }

    /// Moves the selected leads to `status` locally, then updates them one by one.
    pub fn batch_set_status(
        &self,
        ids: Vec<String>,
        status: LeadStatus,
    ) -> impl Future<Output = BatchOutcome> + Send + 'static {
        let ids = dedup_in_order(ids);
        let patch = LeadPatch::status(status);
        {
            let mut leads = self.write();
            for id in &ids {
                if let Some(lead) = leads.iter_mut().find(|l| &l.id == id) {
                    lead.apply(&patch);
                }
            }
        }

        let store = self.clone();
        async move {
            let mut outcome = BatchOutcome::default();
            for id in ids {
                let result = store.inner.gateway.update(&id, &patch).await;
                record(&mut outcome, id, result);
            }
            store.reconcile_failed(&mut outcome).await;
            outcome
        }
    }

    async fn confirm(&self, id: &str, patch: &LeadPatch) -> MutationOutcome {
        match self.inner.gateway.update(id, patch).await {
            Ok(()) => MutationOutcome::Confirmed,
            Err(e) => {
                warn!("Update of lead {id} rejected ({e}); reloading pipeline");
                match self.load().await {
                    Ok(_) => MutationOutcome::RolledBack {
                        error: e.to_string(),
                    },
                    Err(reload) => {
                        warn!("Reload after rejected update failed: {reload}");
                        MutationOutcome::Diverged {
                            error: e.to_string(),
                            reload_error: reload.to_string(),
                        }
                    }
                }
            }
        }
    }

    /// Re-reads the store and resets only the failed ids to what it holds.
    /// Successful items keep their optimistic local state.
    async fn reconcile_failed(&self, outcome: &mut BatchOutcome) {
        if outcome.failed.is_empty() {
            outcome.reconciled = true;
            return;
        }

        let remote = match self.inner.gateway.fetch_all().await {
            Ok(remote) => remote,
            Err(e) => {
                warn!(
                    "Could not reconcile {} failed batch items: {e}",
                    outcome.failed.len()
                );
                outcome.reconciled = false;
                return;
            }
        };

        let remote_rank: HashMap<&str, usize> = remote
            .iter()
            .enumerate()
            .map(|(i, l)| (l.id.as_str(), i))
            .collect();

        let mut leads = self.write();
        for item in &outcome.failed {
            let truth = remote.iter().find(|l| l.id == item.id);
            let local = leads.iter().position(|l| l.id == item.id);
            match (truth, local) {
                (Some(truth), Some(pos)) => leads[pos] = truth.clone(),
                (Some(truth), None) => {
                    let rank = remote_rank[truth.id.as_str()];
                    let at = leads
                        .iter()
                        .position(|l| remote_rank.get(l.id.as_str()).is_some_and(|r| *r > rank))
                        .unwrap_or(leads.len());
                    leads.insert(at, truth.clone());
                }
                (None, Some(pos)) => {
                    leads.remove(pos);
                }
                (None, None) => {}
            }
        }
        outcome.reconciled = true;
        info!("Reconciled {} failed batch items", outcome.failed.len());
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Lead>> {
        self.inner.leads.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Lead>> {
        self.inner.leads.write().unwrap_or_else(|e| e.into_inner())
    }
}

fn record(outcome: &mut BatchOutcome, id: String, result: Result<(), GatewayError>) {
    match result {
        Ok(()) => outcome.succeeded.push(id),
        Err(e) => {
            warn!("Batch write for lead {id} failed: {e}");
            outcome.failed.push(FailedItem {
                id,
                error: e.to_string(),
            });
        }
    }
}

fn dedup_in_order(mut ids: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.retain(|id| seen.insert(id.clone()));
    ids
}
