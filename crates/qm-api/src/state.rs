use std::sync::Arc;
use std::time::Duration;

use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::PgPool;

use qm_engine::SessionRegistry;

use crate::config::{ApiConfig, Environment};
use crate::generator::QuestionGenerator;
use crate::metrics::init_metrics;

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct ApiState {
    /// Postgres connection pool
    pub pool: PgPool,
    /// Registry of live quiz sessions (process-local)
    pub sessions: Arc<SessionRegistry>,
    /// AI question generator with deterministic fallback
    pub generator: Arc<QuestionGenerator>,
    /// Secret for verifying bearer tokens
    pub jwt_secret: String,
    /// Idle session lifetime before the sweeper evicts it
    pub session_ttl_minutes: i64,
    /// Deployment environment
    pub environment: Environment,
    /// Prometheus recorder handle backing the /metrics endpoint
    pub metrics: PrometheusHandle,
}

impl ApiState {
    /// Build the state from configuration and an existing pool.
    pub fn new(config: ApiConfig, pool: PgPool) -> anyhow::Result<Self> {
        let generator = QuestionGenerator::new(
            config.anthropic_api_key,
            Duration::from_secs(config.ai_timeout_secs),
        );
        let metrics = init_metrics()?;

        Ok(Self {
            pool,
            sessions: Arc::new(SessionRegistry::new()),
            generator: Arc::new(generator),
            jwt_secret: config.jwt_secret,
            session_ttl_minutes: config.session_ttl_minutes,
            environment: config.env,
            metrics,
        })
    }
}
