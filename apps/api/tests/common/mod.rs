#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use lead_capture::auth::StaticAuthenticator;
use lead_capture::config::Config;
use lead_capture::persistence::demo::demo_leads;
use lead_capture::persistence::{InMemoryLeadGateway, LeadMemoryStore, SimulatedLatency};
use lead_capture::{build_router, AppState};

pub const STAFF_ACCOUNTS: &str = "rita:recruit-pw:RECRUITER;will:work-pw:WORKER;mona:manage-pw:MANAGER";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    /// Backing store of the in-memory gateway, i.e. the persisted truth.
    pub store: Arc<LeadMemoryStore>,
}

/// Builds the application over an in-memory gateway seeded with the demo leads,
/// with latency disabled and the pipeline already loaded.
pub async fn build_test_app() -> TestApp {
    let config = Config::from_lookup(|key| match key {
        "STAFF_ACCOUNTS" => Some(STAFF_ACCOUNTS.to_string()),
        "DEMO_LATENCY" => Some("false".to_string()),
        _ => None,
    })
    .unwrap();

    let store = Arc::new(LeadMemoryStore::with_leads(demo_leads()));
    let gateway = Arc::new(InMemoryLeadGateway::new(
        store.clone(),
        SimulatedLatency::none(),
    ));
    let authenticator = Arc::new(StaticAuthenticator::new(config.staff_accounts.clone()));
    let state = AppState::new(config, gateway, authenticator);
    state.pipeline.load().await.unwrap();

    TestApp {
        router: build_router(state.clone()),
        state,
        store,
    }
}

impl TestApp {
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Signs in and returns the bearer token.
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .send(
                Method::POST,
                "/api/v1/auth/login",
                None,
                Some(json!({ "username": username, "password": password })),
            )
            .await;
        let json = body_json(response).await;
        json["token"].as_str().unwrap().to_string()
    }

    pub async fn recruiter(&self) -> String {
        self.login("rita", "recruit-pw").await
    }
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn application() -> Value {
    json!({
        "fullName": "Nadia Schmit",
        "email": "nadia@example.lu",
        "phone": "+352 691 000 111",
        "postAppliedFor": "Team Leader",
        "bio": "Ran a student sales team for two summers.",
        "source": "Referral"
    })
}
