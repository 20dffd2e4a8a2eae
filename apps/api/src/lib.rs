pub mod auth;
pub mod config;
pub mod errors;
pub mod intake;
pub mod models;
pub mod persistence;
pub mod pipeline;
pub mod routes;
pub mod scoring;
pub mod state;

pub use routes::build_router;
pub use state::AppState;
