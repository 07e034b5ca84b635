use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::acl::{AccessEntryInput, AccessEntryStore};
use crate::api::AppState;
use crate::db::models::AccessEntry;
use crate::error::{AppError, AppResult};

fn require_access_control(state: &AppState) -> AppResult<()> {
    if !state.functions.check("access_control") {
        return Err(AppError::Unauthorized(
            "Access control is not enabled on this server".to_string(),
        ));
    }
    Ok(())
}

fn entry_json(entry: &AccessEntry) -> Value {
    json!({
        "id": entry.id,
        "name": entry.name,
        "start": entry.start_text(),
        "end": entry.end_text(),
        "level": entry.level,
        "user": entry.user,
        "type": entry.access_type,
        "enabled": entry.enabled,
    })
}

pub async fn list(State(state): State<Arc<AppState>>) -> AppResult<Json<Value>> {
    require_access_control(&state)?;

    let entries = AccessEntryStore::new(state.db.clone()).list().await?;
    let data: Vec<Value> = entries.iter().map(entry_json).collect();
    let count = data.len();
    Ok(Json(json!({ "data": data, "total": count })))
}

pub async fn show(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> AppResult<Json<Value>> {
    require_access_control(&state)?;

    let entry = AccessEntryStore::new(state.db.clone()).load(id).await?;
    if entry.start.is_empty() {
        return Err(AppError::NotFound(format!("Access list entry {}", id)));
    }
    Ok(Json(entry_json(&entry)))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AccessEntryInput>,
) -> AppResult<Json<Value>> {
    require_access_control(&state)?;

    AccessEntryStore::new(state.db.clone()).create(&body).await?;
    tracing::info!(name = %body.name, "Access list entry created");
    Ok(Json(json!({ "status": "created" })))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<AccessEntryInput>,
) -> AppResult<Json<Value>> {
    require_access_control(&state)?;

    let store = AccessEntryStore::new(state.db.clone());
    store.update(id, &body).await?;
    tracing::info!(id, "Access list entry updated");

    let entry = store.load(id).await?;
    Ok(Json(entry_json(&entry)))
}
