//! Prometheus metrics for monitoring API performance and health.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::sync::{Mutex, OnceLock};
use std::time::Instant;

use crate::state::ApiState;

static RECORDER: OnceLock<PrometheusHandle> = OnceLock::new();
static INSTALL_LOCK: Mutex<()> = Mutex::new(());

/// Initialize Prometheus metrics exporter
///
/// The recorder is process-global, so repeated calls (state rebuilt in
/// tests) return the handle installed first.
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let _guard = INSTALL_LOCK
        .lock()
        .map_err(|_| anyhow::anyhow!("metrics install lock poisoned"))?;
    if let Some(handle) = RECORDER.get() {
        return Ok(handle.clone());
    }

    let builder = PrometheusBuilder::new();

    // Configure histogram buckets for request duration (in seconds)
    let builder = builder.set_buckets_for_metric(
        Matcher::Full("http_request_duration_seconds".to_string()),
        &[
            0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
        ],
    )?;

    let handle = builder.install_recorder()?;

    Ok(RECORDER.get_or_init(|| handle).clone())
}

/// Middleware to record HTTP request metrics
pub async fn track_metrics(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let path = req.uri().path().to_string();

    // Normalize path to avoid high cardinality (replace IDs with placeholders)
    let normalized_path = normalize_path(&path);

    let response: Response = next.run(req).await;

    let duration = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => normalized_path.clone(),
        "status" => status.clone()
    )
    .increment(1);

    histogram!(
        "http_request_duration_seconds",
        "method" => method,
        "path" => normalized_path,
        "status" => status
    )
    .record(duration);

    response
}

/// Record the outcome of one AI generation call.
pub fn record_generation(kind: &str, fallback: bool) {
    let source = if fallback { "fallback" } else { "generated" };
    counter!(
        "question_generations_total",
        "kind" => kind.to_string(),
        "source" => source.to_string()
    )
    .increment(1);
}

/// Record a quiz session lifecycle event (started / completed / evicted).
pub fn record_session_event(event: &str) {
    counter!("quiz_sessions_total", "event" => event.to_string()).increment(1);
}

/// Normalize URL paths to reduce cardinality in metrics
/// Replaces UUIDs and numeric IDs with placeholders
fn normalize_path(path: &str) -> String {
    let uuid_regex =
        regex::Regex::new(r"[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}").unwrap();
    let number_regex = regex::Regex::new(r"/\d+").unwrap();

    let mut normalized = uuid_regex.replace_all(path, ":id").to_string();
    normalized = number_regex.replace_all(&normalized, "/:id").to_string();

    normalized
}

/// Handler for the /metrics endpoint
pub async fn metrics_handler(State(state): State<ApiState>) -> impl IntoResponse {
    (StatusCode::OK, state.metrics.render())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_replaces_ids() {
        assert_eq!(
            normalize_path("/quiz/123e4567-e89b-12d3-a456-426614174000/answer"),
            "/quiz/:id/answer"
        );
        assert_eq!(normalize_path("/topics/42"), "/topics/:id");
        assert_eq!(normalize_path("/health"), "/health");
    }
}
