use axum::middleware;
use qm_api::{
    config::ApiConfig, jobs, metrics::track_metrics, state::ApiState, tracing::init_tracing,
};
use tower_http::cors::CorsLayer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment variables
    dotenvy::dotenv().ok();
    let config = ApiConfig::from_env()?;

    init_tracing(&config.env);

    // Database: pool, schema, starter question bank
    let pool = qm_db::create_pool(&config.database_url, 10).await?;
    qm_db::ensure_schema(&pool).await?;
    let seeded = qm_db::seed::seed_questions(&pool).await?;
    if seeded > 0 {
        tracing::info!("Seeded {seeded} starter questions");
    }

    let port = config.port;
    let state = ApiState::new(config, pool)?;

    // Session TTL sweeper
    let _job_handles = jobs::start_background_jobs(state.clone());

    // Create the application router
    let app = qm_api::router::router()
        .layer(middleware::from_fn(track_metrics))
        .with_state(state)
        .layer(CorsLayer::very_permissive());

    // Start the server
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("Server running on http://localhost:{port}");
    axum::serve(listener, app).await?;

    Ok(())
}
