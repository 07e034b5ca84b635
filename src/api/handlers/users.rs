use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

use crate::acl::{level, AccessType};
use crate::api::AppState;
use crate::error::{AppError, AppResult};

fn require_admin(state: &AppState, user_id: i64) -> AppResult<()> {
    if !state.privileges.check(AccessType::Interface, level::ADMIN, Some(user_id)) {
        return Err(AppError::Unauthorized(
            "Administrator privileges required".to_string(),
        ));
    }
    Ok(())
}

async fn fetch_username(state: &AppState, id: i64) -> AppResult<String> {
    let row: Option<(String,)> = sqlx::query_as("SELECT username FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(&state.db)
        .await?;

    row.map(|(username,)| username)
        .ok_or_else(|| AppError::NotFound(format!("User {}", id)))
}

/// Confirmation payload shown before a token is replaced. Nothing is
/// changed by this request; the client posts to `confirm_url` to proceed.
pub async fn show_regenerate_rss_token(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> AppResult<Json<Value>> {
    require_admin(&state, id)?;
    let username = fetch_username(&state, id).await?;

    Ok(Json(json!({
        "title": "Are you sure?",
        "text": "This will replace the existing RSS token. Feeds using the old token might not work properly.",
        "user": { "id": id, "username": username },
        "confirm_url": format!("{}/api/v1/users/{}/rss-token", state.web_path, id),
    })))
}

pub async fn regenerate_rss_token(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> AppResult<Json<Value>> {
    require_admin(&state, id)?;
    let username = fetch_username(&state, id).await?;

    let token = Uuid::new_v4().simple().to_string();
    let now = Utc::now().to_rfc3339();

    sqlx::query("UPDATE users SET rss_token = ?, updated_at = ? WHERE id = ?")
        .bind(&token)
        .bind(&now)
        .bind(id)
        .execute(&state.db)
        .await?;

    tracing::info!(user_id = id, "RSS token regenerated");

    Ok(Json(json!({
        "id": id,
        "username": username,
        "rss_token": token,
        "updated_at": now,
    })))
}
