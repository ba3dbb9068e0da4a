//! Background jobs for periodic maintenance tasks.
//!
//! The session registry has no inline expiry: a client that never calls
//! `complete` would leak its session forever. This sweeper reclaims
//! sessions older than the configured TTL.

use std::time::Duration;

use tokio::time::interval;

use crate::metrics;
use crate::state::ApiState;

/// How often the sweeper wakes up.
const SWEEP_INTERVAL_SECS: u64 = 600;

/// Start all background jobs
///
/// Returns a vector of join handles that can be awaited on shutdown
pub fn start_background_jobs(state: ApiState) -> Vec<tokio::task::JoinHandle<()>> {
    vec![tokio::spawn(periodic_session_sweep_job(state))]
}

/// Evict quiz sessions idle past the TTL, every 10 minutes.
async fn periodic_session_sweep_job(state: ApiState) {
    let ttl = chrono::Duration::minutes(state.session_ttl_minutes);
    let mut interval = interval(Duration::from_secs(SWEEP_INTERVAL_SECS));
    // The first tick fires immediately; skip it so startup stays quiet
    interval.tick().await;

    loop {
        interval.tick().await;

        let evicted = state.sessions.evict_idle(ttl).await;
        if evicted > 0 {
            for _ in 0..evicted {
                metrics::record_session_event("evicted");
            }
            tracing::info!(
                "Session sweep complete: evicted {} sessions idle for over {} minutes",
                evicted,
                state.session_ttl_minutes
            );
        } else {
            tracing::debug!("Session sweep complete: no idle sessions found");
        }
    }
}
