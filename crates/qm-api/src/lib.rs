pub mod analytics;
pub mod auth;
pub mod chat;
pub mod config;
pub mod error;
pub mod generator;
pub mod jobs;
pub mod metrics;
pub mod progress;
pub mod quiz;
pub mod router;
pub mod state;
pub mod topic;
pub mod tracing;

pub use config::ApiConfig;
pub use state::ApiState;
