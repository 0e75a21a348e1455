//! Router and HTTP server setup

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::handlers::{assets, export, live_ws};
use crate::AppState;

/// All routes, without middleware
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(live_ws::live_updates_websocket))
        .route("/api/get-routes", get(assets::get_open_routes))
        .route("/api/routes", get(assets::get_route_markers))
        .route("/api/save-electric-pole", post(assets::save_electric_pole))
        .route("/api/marker/", get(assets::missing_marker_id))
        .route("/api/marker/{name_id}", get(assets::get_marker))
        .route("/api/export-notify-to-excel", get(export::export_notify))
        .route("/api/export-repair-to-excel", get(export::export_repair_completed))
        .with_state(state)
}

/// Router with tracing and (optionally) permissive CORS
pub fn build_app(config: &AppConfig, state: AppState) -> Router {
    let mut router = build_router(state).layer(TraceLayer::new_for_http());

    if config.enable_cors {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    router
}

/// Bind and serve until the process is stopped
pub async fn run_server(
    config: AppConfig,
    state: AppState,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let addr = config.socket_addr()?;
    let app = build_app(&config, state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Server is running on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
