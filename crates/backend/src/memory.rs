//! In-memory twin of the hosted backend.
//!
//! Intended for tests/dev. Implements the same predicate semantics as the
//! REST dialect, including the embedded-relation filter, over plain JSON
//! rows. Not optimized for performance.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use uuid::Uuid;

use campana_auth::ScopeFilter;
use campana_core::ProfileId;

use crate::auth_api::{AccessSession, AuthApi, AuthApiError};
use crate::error::BackendError;
use crate::query::{Query, relation_source};
use crate::store::Backend;

#[derive(Debug, Clone)]
struct MemoryUser {
    password: String,
    user_id: ProfileId,
    confirmed: bool,
}

/// In-memory row store + identity service.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    tables: RwLock<HashMap<String, Vec<JsonValue>>>,
    users: RwLock<HashMap<String, MemoryUser>>,
    sessions: RwLock<HashMap<String, ProfileId>>,
    fail_requests: AtomicBool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a row directly, bypassing the trait surface.
    pub fn seed_row(&self, table: &str, row: JsonValue) {
        let mut tables = self.tables.write().expect("lock poisoned");
        tables.entry(table.to_string()).or_default().push(row);
    }

    /// Register sign-in credentials for an identity.
    pub fn register_user(&self, email: &str, password: &str, user_id: ProfileId) {
        self.register_user_with_confirmation(email, password, user_id, true);
    }

    /// Register credentials whose email has not been confirmed yet.
    pub fn register_unconfirmed_user(&self, email: &str, password: &str, user_id: ProfileId) {
        self.register_user_with_confirmation(email, password, user_id, false);
    }

    fn register_user_with_confirmation(
        &self,
        email: &str,
        password: &str,
        user_id: ProfileId,
        confirmed: bool,
    ) {
        let mut users = self.users.write().expect("lock poisoned");
        users.insert(
            email.to_string(),
            MemoryUser {
                password: password.to_string(),
                user_id,
                confirmed,
            },
        );
    }

    /// Make every subsequent request fail, to exercise degradation paths.
    pub fn set_fail_requests(&self, fail: bool) {
        self.fail_requests.store(fail, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), BackendError> {
        if self.fail_requests.load(Ordering::SeqCst) {
            return Err(BackendError::transport("injected failure"));
        }
        Ok(())
    }

    fn matches(&self, tables: &HashMap<String, Vec<JsonValue>>, row: &JsonValue, query: &Query) -> bool {
        let filter_ok = match &query.filter {
            ScopeFilter::All => true,
            ScopeFilter::Eq { column, value } => field_eq(row, column, value),
            ScopeFilter::AnyOf(arms) => arms
                .iter()
                .any(|(column, value)| field_eq(row, column, value)),
            ScopeFilter::RelatedEq {
                relation,
                column,
                value,
            } => related_eq(tables, row, relation, column, value),
            ScopeFilter::DenyAll => false,
        };

        filter_ok
            && query
                .eq
                .iter()
                .all(|(column, value)| field_eq(row, column, value))
    }

    fn query_rows(&self, table: &str, query: &Query) -> Result<Vec<JsonValue>, BackendError> {
        let tables = self
            .tables
            .read()
            .map_err(|_| BackendError::transport("lock poisoned"))?;

        let mut rows: Vec<JsonValue> = tables
            .get(table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| self.matches(&tables, row, query))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some((column, direction)) = query.order {
            rows.sort_by(|a, b| {
                let left = field_text(a, column);
                let right = field_text(b, column);
                match direction {
                    crate::query::Direction::Asc => left.cmp(&right),
                    crate::query::Direction::Desc => right.cmp(&left),
                }
            });
        }

        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }

        Ok(rows)
    }
}

fn field_text(row: &JsonValue, column: &str) -> String {
    match &row[column] {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn field_eq(row: &JsonValue, column: &str, value: &str) -> bool {
    match &row[column] {
        JsonValue::Null => false,
        JsonValue::String(s) => s == value,
        other => other.to_string() == value,
    }
}

fn related_eq(
    tables: &HashMap<String, Vec<JsonValue>>,
    row: &JsonValue,
    relation: &str,
    column: &str,
    value: &str,
) -> bool {
    let Some((source_table, fk_column)) = relation_source(relation) else {
        return false;
    };
    let Some(fk) = row[fk_column].as_str() else {
        return false;
    };
    tables
        .get(source_table)
        .map(|rows| {
            rows.iter()
                .any(|related| field_eq(related, "id", fk) && field_eq(related, column, value))
        })
        .unwrap_or(false)
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn select(&self, table: &str, query: &Query) -> Result<Vec<JsonValue>, BackendError> {
        self.check_available()?;
        self.query_rows(table, query)
    }

    async fn insert(&self, table: &str, row: JsonValue) -> Result<JsonValue, BackendError> {
        self.check_available()?;
        let mut tables = self
            .tables
            .write()
            .map_err(|_| BackendError::transport("lock poisoned"))?;
        tables.entry(table.to_string()).or_default().push(row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        table: &str,
        query: &Query,
        patch: JsonValue,
    ) -> Result<Vec<JsonValue>, BackendError> {
        self.check_available()?;

        // Evaluate matches against a snapshot so the relation join sees a
        // consistent view, then apply under the write lock.
        let matching_ids: Vec<String> = self
            .query_rows(table, query)?
            .iter()
            .map(|row| field_text(row, "id"))
            .collect();

        let mut tables = self
            .tables
            .write()
            .map_err(|_| BackendError::transport("lock poisoned"))?;
        let mut updated = Vec::new();
        if let Some(rows) = tables.get_mut(table) {
            for row in rows.iter_mut() {
                if matching_ids.iter().any(|id| field_eq(row, "id", id)) {
                    merge_patch(row, &patch);
                    updated.push(row.clone());
                }
            }
        }
        Ok(updated)
    }

    async fn delete(&self, table: &str, query: &Query) -> Result<usize, BackendError> {
        self.check_available()?;

        let matching_ids: Vec<String> = self
            .query_rows(table, query)?
            .iter()
            .map(|row| field_text(row, "id"))
            .collect();

        let mut tables = self
            .tables
            .write()
            .map_err(|_| BackendError::transport("lock poisoned"))?;
        let Some(rows) = tables.get_mut(table) else {
            return Ok(0);
        };
        let before = rows.len();
        rows.retain(|row| !matching_ids.iter().any(|id| field_eq(row, "id", id)));
        Ok(before - rows.len())
    }
}

fn merge_patch(row: &mut JsonValue, patch: &JsonValue) {
    if let (Some(target), Some(fields)) = (row.as_object_mut(), patch.as_object()) {
        for (key, value) in fields {
            target.insert(key.clone(), value.clone());
        }
    }
}

#[async_trait]
impl AuthApi for MemoryBackend {
    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AccessSession, AuthApiError> {
        if self.fail_requests.load(Ordering::SeqCst) {
            return Err(AuthApiError::Transport("injected failure".to_string()));
        }

        let user = {
            let users = self
                .users
                .read()
                .map_err(|_| AuthApiError::Transport("lock poisoned".to_string()))?;
            users.get(email).cloned()
        };

        let Some(user) = user else {
            return Err(AuthApiError::Rejected("Invalid login credentials".to_string()));
        };
        if user.password != password {
            return Err(AuthApiError::Rejected("Invalid login credentials".to_string()));
        }
        if !user.confirmed {
            return Err(AuthApiError::Rejected("Email not confirmed".to_string()));
        }

        let token = Uuid::now_v7().to_string();
        self.sessions
            .write()
            .map_err(|_| AuthApiError::Transport("lock poisoned".to_string()))?
            .insert(token.clone(), user.user_id);

        Ok(AccessSession {
            access_token: token,
            user_id: user.user_id,
        })
    }

    async fn user_for_token(&self, token: &str) -> Result<ProfileId, AuthApiError> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| AuthApiError::Transport("lock poisoned".to_string()))?;
        sessions
            .get(token)
            .copied()
            .ok_or(AuthApiError::InvalidSession)
    }

    async fn sign_out(&self, token: &str) -> Result<(), AuthApiError> {
        self.sessions
            .write()
            .map_err(|_| AuthApiError::Transport("lock poisoned".to_string()))?
            .remove(token);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn eq_filter_selects_matching_rows() {
        let backend = MemoryBackend::new();
        backend.seed_row("alerts", json!({ "id": "a1", "affected_user_id": "V1" }));
        backend.seed_row("alerts", json!({ "id": "a2", "affected_user_id": "V2" }));

        let query = Query::scoped(ScopeFilter::eq("affected_user_id", "V1"));
        let rows = backend.select("alerts", &query).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["id"], "a1");
    }

    #[tokio::test]
    async fn deny_all_matches_nothing() {
        let backend = MemoryBackend::new();
        backend.seed_row("alerts", json!({ "id": "a1" }));

        let rows = backend
            .select("alerts", &Query::scoped(ScopeFilter::DenyAll))
            .await
            .unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn related_filter_joins_through_the_territory() {
        let backend = MemoryBackend::new();
        backend.seed_row(
            "territories",
            json!({ "id": "t1", "responsible_user_id": "C1" }),
        );
        backend.seed_row("voters", json!({ "id": "v1", "territory_id": "t1" }));
        backend.seed_row("voters", json!({ "id": "v2", "territory_id": "t9" }));

        let query = Query::scoped(ScopeFilter::RelatedEq {
            relation: "territory",
            column: "responsible_user_id",
            value: "C1".to_string(),
        });
        let rows = backend.select("voters", &query).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["id"], "v1");
    }

    #[tokio::test]
    async fn ordering_descends_by_column() {
        let backend = MemoryBackend::new();
        backend.seed_row("tasks", json!({ "id": "t1", "created_at": "2025-01-01T00:00:00Z" }));
        backend.seed_row("tasks", json!({ "id": "t2", "created_at": "2025-02-01T00:00:00Z" }));

        let query = Query::unscoped().order_desc("created_at");
        let rows = backend.select("tasks", &query).await.unwrap();
        assert_eq!(rows[0]["id"], "t2");
    }

    #[tokio::test]
    async fn update_is_scoped_by_the_filter() {
        let backend = MemoryBackend::new();
        backend.seed_row("alerts", json!({ "id": "a1", "created_by": "C1", "title": "x" }));
        backend.seed_row("alerts", json!({ "id": "a2", "created_by": "C2", "title": "x" }));

        let query = Query::scoped(ScopeFilter::eq("created_by", "C1")).and_eq("id", "a2");
        let updated = backend
            .update("alerts", &query, json!({ "title": "y" }))
            .await
            .unwrap();
        // a2 exists but is outside the C1 scope.
        assert!(updated.is_empty());
    }

    #[tokio::test]
    async fn sign_in_classifies_failures_by_message() {
        let backend = MemoryBackend::new();
        backend.register_user("ana@campana.co", "secret", ProfileId::new());
        backend.register_unconfirmed_user("beto@campana.co", "secret", ProfileId::new());

        let wrong = backend.sign_in("ana@campana.co", "nope").await.unwrap_err();
        assert_eq!(
            wrong,
            AuthApiError::Rejected("Invalid login credentials".to_string())
        );

        let unconfirmed = backend
            .sign_in("beto@campana.co", "secret")
            .await
            .unwrap_err();
        assert_eq!(
            unconfirmed,
            AuthApiError::Rejected("Email not confirmed".to_string())
        );
    }

    #[tokio::test]
    async fn sessions_roundtrip_and_sign_out() {
        let backend = MemoryBackend::new();
        let user_id = ProfileId::new();
        backend.register_user("ana@campana.co", "secret", user_id);

        let session = backend.sign_in("ana@campana.co", "secret").await.unwrap();
        assert_eq!(
            backend.user_for_token(&session.access_token).await.unwrap(),
            user_id
        );

        backend.sign_out(&session.access_token).await.unwrap();
        assert_eq!(
            backend.user_for_token(&session.access_token).await.unwrap_err(),
            AuthApiError::InvalidSession
        );
    }
}
