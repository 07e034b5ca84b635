//! Persistence for access list entries.

use serde::Deserialize;
use serde_json::Value;

use crate::db::models::AccessEntry;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};

use super::range::{decode_addr, decode_start, validate_range};
use super::AccessType;

/// Incoming form data for a new or replacement entry. `user` defaults to
/// -1 (all users); `enabled` accepts whatever the form posts and is
/// coerced to a boolean.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessEntryInput {
    pub name: String,
    pub level: i64,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub user: Option<i64>,
    #[serde(rename = "type", default)]
    pub access_type: String,
    #[serde(default)]
    pub enabled: Value,
}

/// Truthiness the way admin forms mean it: absent, false, zero, the empty
/// string and "false" are off, everything else is on.
fn coerce_bool(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => {
            let s = s.trim();
            !(s.is_empty() || s == "0" || s.eq_ignore_ascii_case("false"))
        }
        _ => true,
    }
}

/// Validates, persists and loads access list entries. Every call is a
/// single statement against the shared pool; concurrent updates to the
/// same id are last-writer-wins.
pub struct AccessEntryStore {
    db: DbPool,
}

struct NormalizedEntry {
    start: Vec<u8>,
    end: Vec<u8>,
    access_type: AccessType,
    user: i64,
    enabled: i64,
}

impl AccessEntryStore {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// Look up one entry by id. An unknown id is not an error: the
    /// returned entry carries only the id, every other field empty.
    pub async fn load(&self, id: i64) -> AppResult<AccessEntry> {
        let row: Option<AccessEntry> = sqlx::query_as(
            "SELECT id, name, start, \"end\", level, user, type, enabled
             FROM access_list WHERE id = ?"
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row.unwrap_or_else(|| AccessEntry {
            id,
            ..Default::default()
        }))
    }

    pub async fn list(&self) -> AppResult<Vec<AccessEntry>> {
        let rows = sqlx::query_as(
            "SELECT id, name, start, \"end\", level, user, type, enabled
             FROM access_list ORDER BY id"
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    /// Insert a new entry. On validation failure nothing is written and
    /// the field errors are returned. The fresh id is not reported back.
    pub async fn create(&self, input: &AccessEntryInput) -> AppResult<()> {
        let entry = normalize(input)?;

        sqlx::query(
            "INSERT INTO access_list (name, level, start, \"end\", user, type, enabled)
             VALUES (?, ?, ?, ?, ?, ?, ?)"
        )
        .bind(&input.name)
        .bind(input.level)
        .bind(&entry.start)
        .bind(&entry.end)
        .bind(entry.user)
        .bind(entry.access_type.as_str())
        .bind(entry.enabled)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    /// Replace every mutable field of the entry with the given id. There
    /// is no existence pre-check; an unknown id is one no-op statement.
    pub async fn update(&self, id: i64, input: &AccessEntryInput) -> AppResult<()> {
        let entry = normalize(input)?;

        sqlx::query(
            "UPDATE access_list
             SET start = ?, \"end\" = ?, level = ?, user = ?, name = ?, type = ?, enabled = ?
             WHERE id = ?"
        )
        .bind(&entry.start)
        .bind(&entry.end)
        .bind(input.level)
        .bind(entry.user)
        .bind(&input.name)
        .bind(entry.access_type.as_str())
        .bind(entry.enabled)
        .bind(id)
        .execute(&self.db)
        .await?;

        Ok(())
    }
}

fn normalize(input: &AccessEntryInput) -> AppResult<NormalizedEntry> {
    validate_range(&input.start, &input.end).map_err(AppError::Fields)?;

    // Validation guarantees both bounds decode (the start possibly via
    // its sentinel form), so these lookups cannot fail after it.
    let start = decode_start(&input.start)
        .ok_or_else(|| AppError::Internal("undecodable start after validation".to_string()))?;
    let end = decode_addr(&input.end)
        .ok_or_else(|| AppError::Internal("undecodable end after validation".to_string()))?;

    Ok(NormalizedEntry {
        start,
        end,
        access_type: AccessType::normalize(&input.access_type),
        user: input.user.unwrap_or(-1),
        enabled: if coerce_bool(&input.enabled) { 1 } else { 0 },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn setup_store() -> AccessEntryStore {
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory SQLite pool");

        sqlx::migrate!("./src/db/migrations")
            .run(&pool)
            .await
            .expect("Migration failed");

        AccessEntryStore::new(pool)
    }

    fn input(start: &str, end: &str) -> AccessEntryInput {
        AccessEntryInput {
            name: "office".to_string(),
            level: 25,
            start: start.to_string(),
            end: end.to_string(),
            user: None,
            access_type: "bogus".to_string(),
            enabled: json!("1"),
        }
    }

    #[tokio::test]
    async fn create_then_load_round_trips_normalized_values() {
        let store = setup_store().await;
        store.create(&input("10.0.0.1", "10.0.0.254")).await.unwrap();

        let entries = store.list().await.unwrap();
        assert_eq!(entries.len(), 1);

        let loaded = store.load(entries[0].id).await.unwrap();
        assert_eq!(loaded.name, "office");
        assert_eq!(loaded.start, vec![10, 0, 0, 1]);
        assert_eq!(loaded.end, vec![10, 0, 0, 254]);
        assert_eq!(loaded.level, 25);
        assert_eq!(loaded.user, -1);
        assert_eq!(loaded.access_type, "stream");
        assert!(loaded.enabled);
    }

    #[tokio::test]
    async fn invalid_range_writes_nothing() {
        let store = setup_store().await;
        let err = store.create(&input("not-an-ip", "10.0.0.1")).await.unwrap_err();

        match err {
            AppError::Fields(fields) => {
                assert_eq!(fields.len(), 1);
                assert_eq!(fields[0].field, "start");
            }
            other => panic!("expected field errors, got {other:?}"),
        }

        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn mixed_family_range_writes_nothing() {
        let store = setup_store().await;
        assert!(store.create(&input("10.0.0.1", "::1")).await.is_err());
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn load_of_unknown_id_yields_empty_entry() {
        let store = setup_store().await;
        let entry = store.load(42).await.unwrap();
        assert_eq!(entry.id, 42);
        assert!(entry.name.is_empty());
        assert!(entry.start.is_empty());
        assert!(!entry.enabled);
    }

    #[tokio::test]
    async fn update_of_unknown_id_is_a_successful_no_op() {
        let store = setup_store().await;
        store.update(99, &input("10.0.0.1", "10.0.0.2")).await.unwrap();
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_replaces_all_fields() {
        let store = setup_store().await;
        store.create(&input("10.0.0.1", "10.0.0.254")).await.unwrap();
        let id = store.list().await.unwrap()[0].id;

        let replacement = AccessEntryInput {
            name: "lab".to_string(),
            level: 75,
            start: "::".to_string(),
            end: "::1".to_string(),
            user: Some(7),
            access_type: "rpc".to_string(),
            enabled: json!(false),
        };
        store.update(id, &replacement).await.unwrap();

        let loaded = store.load(id).await.unwrap();
        assert_eq!(loaded.name, "lab");
        assert_eq!(loaded.level, 75);
        assert_eq!(loaded.start, vec![0u8; 16]);
        assert_eq!(loaded.user, 7);
        assert_eq!(loaded.access_type, "rpc");
        assert!(!loaded.enabled);
    }

    #[test]
    fn bool_coercion_matches_form_semantics() {
        assert!(!coerce_bool(&Value::Null));
        assert!(!coerce_bool(&json!(false)));
        assert!(!coerce_bool(&json!(0)));
        assert!(!coerce_bool(&json!("")));
        assert!(!coerce_bool(&json!("0")));
        assert!(!coerce_bool(&json!("False")));
        assert!(coerce_bool(&json!(true)));
        assert!(coerce_bool(&json!(1)));
        assert!(coerce_bool(&json!("1")));
        assert!(coerce_bool(&json!("yes")));
    }
}
