use anyhow::Result;
use axum::http::{header, HeaderValue, Method};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{
    ConfigFunctionChecker, FunctionChecker, LevelPrivilegeChecker, PrivilegeChecker,
};
use crate::config::Config;
use crate::db::DbPool;

pub mod handlers;
pub mod router;

pub struct AppState {
    pub db: DbPool,
    /// Public base URL of the panel, for links in confirmation payloads.
    pub web_path: String,
    pub functions: Arc<dyn FunctionChecker>,
    pub privileges: Arc<dyn PrivilegeChecker>,
}

pub async fn serve(cfg: Config, db: DbPool) -> Result<()> {
    let bind_addr = format!("{}:{}", cfg.api.bind, cfg.api.port);
    let state = Arc::new(AppState {
        db,
        web_path: cfg.site.web_path.clone(),
        functions: Arc::new(ConfigFunctionChecker::new(&cfg.site.features)),
        privileges: Arc::new(LevelPrivilegeChecker::new(cfg.site.granted_level)),
    });
    let cors = build_cors_layer(&cfg.api.cors_allowed_origins);
    let app = build_app(state, cors);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Management API listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}

fn build_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    if origins.is_empty() {
        tracing::warn!("No valid CORS origins configured; CORS will block all cross-origin requests");
        return CorsLayer::new();
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

pub fn build_app(state: Arc<AppState>, cors: CorsLayer) -> Router {
    Router::new()
        .merge(router::routes(state))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
