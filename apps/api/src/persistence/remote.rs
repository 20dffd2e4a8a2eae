//! Remote gateway over the hosted `leads` table (PostgREST-style REST API).
//!
//! All field names on the wire are snake_case; mapping to the camelCase
//! model happens here and nowhere else.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::models::row::{LeadRow, LeadRowPatch, NewLeadRow};
use crate::models::{Lead, LeadFormData, LeadPatch, LeadStatus};
use crate::persistence::{Backend, GatewayError, LeadGateway, DEFAULT_SOURCE};
use crate::scoring::score_submission;

const TABLE_PATH: &str = "rest/v1/leads";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Address and access key of the hosted store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteStoreConfig {
    pub url: String,
    pub api_key: String,
}

impl RemoteStoreConfig {
    /// Both values must be present and non-empty, otherwise there is no remote store.
    /// Their validity is not checked here.
    pub fn from_parts(url: Option<String>, api_key: Option<String>) -> Option<Self> {
        let url = url.filter(|u| !u.trim().is_empty())?;
        let api_key = api_key.filter(|k| !k.trim().is_empty())?;
        Some(Self {
            url: url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn table_url(&self) -> String {
        format!("{}/{}", self.url, TABLE_PATH)
    }
}

#[derive(Debug, Deserialize)]
struct StoreErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct RemoteLeadGateway {
    client: Client,
    config: RemoteStoreConfig,
}

impl RemoteLeadGateway {
    pub fn new(config: RemoteStoreConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client, config })
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.config.api_key)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("content-type", "application/json")
    }

    fn id_filter(id: &str) -> [(&'static str, String); 1] {
        [("id", format!("eq.{id}"))]
    }
}

/// Turns a non-2xx response into `GatewayError::Backend`, keeping the store's message.
async fn check_status(response: Response) -> Result<Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    warn!("Lead store returned {}: {}", status, body);
    Err(GatewayError::Backend {
        status: status.as_u16(),
        message: backend_message(&body),
    })
}

fn backend_message(body: &str) -> String {
    serde_json::from_str::<StoreErrorBody>(body)
        .map(|e| e.message)
        .unwrap_or_else(|_| body.to_string())
}

#[async_trait]
impl LeadGateway for RemoteLeadGateway {
    fn backend(&self) -> Backend {
        Backend::Remote
    }

    async fn fetch_all(&self) -> Result<Vec<Lead>, GatewayError> {
        let response = self
            .authorized(self.client.get(self.config.table_url()))
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .send()
            .await?;
        let rows: Vec<LeadRow> = check_status(response).await?.json().await?;
        debug!("Fetched {} leads from remote store", rows.len());
        Ok(rows.into_iter().map(Lead::from).collect())
    }

    async fn create(&self, form: &LeadFormData) -> Result<Lead, GatewayError> {
        let scored = score_submission(form.source(), &form.post_applied_for);
        let row = NewLeadRow {
            full_name: &form.full_name,
            email: &form.email,
            phone: &form.phone,
            post_applied_for: &form.post_applied_for,
            bio: &form.bio,
            source: form.source().unwrap_or(DEFAULT_SOURCE),
            status: LeadStatus::Lead,
            score: scored.score,
            priority: scored.priority,
            tasks: vec![],
            cv_base64: form.cv_base64.as_deref(),
            cv_file_name: form.cv_file_name.as_deref(),
        };

        let response = self
            .authorized(self.client.post(self.config.table_url()))
            .header("Prefer", "return=representation")
            .json(&[row])
            .send()
            .await?;
        let mut rows: Vec<LeadRow> = check_status(response).await?.json().await?;
        let created = rows
            .pop()
            .ok_or_else(|| GatewayError::Decode("insert returned no rows".to_string()))?;
        debug!("Created lead {} in remote store", created.id);
        Ok(created.into())
    }

    async fn update(&self, id: &str, patch: &LeadPatch) -> Result<(), GatewayError> {
        let response = self
            .authorized(self.client.patch(self.config.table_url()))
            .query(&Self::id_filter(id))
            .json(&LeadRowPatch::from(patch))
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), GatewayError> {
        let response = self
            .authorized(self.client.delete(self.config.table_url()))
            .query(&Self::id_filter(id))
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }
}
