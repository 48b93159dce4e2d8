use analytics::MetricsEngine;
use axum::{Router, routing::get};
use configuration::ReportSettings;
use database::DailyRecordSource;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

pub use handlers::{DashboardDocument, ReportLabel};

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn DailyRecordSource>,
    pub engine: MetricsEngine,
    pub report: ReportSettings,
}

/// Assembles the routes and middleware around the given state.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/metrics", get(handlers::get_metrics))
        .route("/api/records", get(handlers::get_daily_records))
        .with_state(Arc::new(state))
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// Binds `addr` and serves the API until the process is stopped.
///
/// Tracing is expected to be initialized by the caller.
pub async fn run_server(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    tracing::info!(
        source = %state.source.describe(),
        policy = ?state.engine.policy(),
        "Web server listening on http://{}",
        addr
    );

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
