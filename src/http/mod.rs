use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::AppConfig;
use crate::db::DbPool;
use crate::processor::AlertPolicy;

pub mod error;
pub mod handlers;

pub struct AppState {
    pub pool: DbPool,
    pub policy: AlertPolicy,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/location/update", post(handlers::update_location))
        .route("/location/:vehicle_id/latest", get(handlers::latest_location))
        .route("/location/:vehicle_id/history", get(handlers::location_history))
        .route("/health", get(handlers::health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

pub async fn serve(config: &AppConfig, pool: DbPool) -> anyhow::Result<()> {
    let state = Arc::new(AppState {
        pool,
        policy: config.alert_policy(),
    });

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.http_host, config.http_port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, router).await?;
    Ok(())
}
