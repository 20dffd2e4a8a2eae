use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use lead_capture::auth::StaticAuthenticator;
use lead_capture::config::Config;
use lead_capture::persistence::demo::demo_leads;
use lead_capture::persistence::{select_gateway, LeadMemoryStore};
use lead_capture::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Lead Capture API v{}", env!("CARGO_PKG_VERSION"));

    // In-memory fallback, seeded only when no remote store is configured
    let memory = if config.demo_seed && config.remote_store.is_none() {
        let seed = demo_leads();
        info!("Seeding in-memory store with {} demo leads", seed.len());
        Arc::new(LeadMemoryStore::with_leads(seed))
    } else {
        Arc::new(LeadMemoryStore::new())
    };
    let gateway = select_gateway(&config, memory)?;
    info!("Lead store backend: {:?}", gateway.backend());

    let authenticator = StaticAuthenticator::new(config.staff_accounts.clone());
    if authenticator.is_empty() {
        warn!("STAFF_ACCOUNTS is empty; staff sign-in is disabled");
    }

    let state = AppState::new(config.clone(), gateway, Arc::new(authenticator));

    if let Err(e) = state.pipeline.load().await {
        warn!("Initial pipeline load failed: {e}");
    }

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
