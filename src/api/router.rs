use axum::{routing::get, Router};
use std::sync::Arc;

use super::handlers;
use super::AppState;

pub fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        // Health (public)
        .route("/health", get(handlers::health::health_check))
        // Access list (requires the access_control feature)
        .route(
            "/api/v1/access-list",
            get(handlers::access_list::list).post(handlers::access_list::create),
        )
        .route(
            "/api/v1/access-list/{id}",
            get(handlers::access_list::show).put(handlers::access_list::update),
        )
        // Feed token administration (admin only)
        .route(
            "/api/v1/users/{id}/rss-token",
            get(handlers::users::show_regenerate_rss_token)
                .post(handlers::users::regenerate_rss_token),
        )
        .with_state(state)
}
