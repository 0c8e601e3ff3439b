//! The shared plumbing every entity operation goes through.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use campana_auth::{ScopeFilter, ScopeKind, Viewer, scope_filter};
use campana_backend::{Backend, Query};

use crate::cache::ListCache;
use crate::error::AccessError;

/// Scoped entity access for one process.
///
/// Cheap to share behind an `Arc`; holds no per-viewer state beyond the list
/// cache.
pub struct DataAccess<B: ?Sized> {
    backend: Arc<B>,
    cache: ListCache,
}

pub(crate) fn table_for(kind: ScopeKind) -> &'static str {
    match kind {
        ScopeKind::Territory => "territories",
        ScopeKind::Voter => "voters",
        ScopeKind::Alert => "alerts",
        ScopeKind::Event => "events",
        ScopeKind::Message => "messages",
        ScopeKind::Task => "tasks",
        ScopeKind::Profile => "profiles",
    }
}

impl<B: Backend + ?Sized> DataAccess<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            cache: ListCache::new(),
        }
    }

    /// List the viewer's slice of a collection, newest first.
    ///
    /// Reads soft-fail: a backend error is logged and degraded to an empty
    /// collection so list views stay resilient. Writes never do this.
    pub(crate) async fn list_rows(&self, kind: ScopeKind, viewer: &Viewer) -> Vec<JsonValue> {
        if let Some(rows) = self.cache.get(kind, viewer.id) {
            return rows;
        }

        let query = Query::scoped(scope_filter(kind, Some(viewer))).order_desc("created_at");
        match self.backend.select(table_for(kind), &query).await {
            Ok(rows) => {
                self.cache.put(kind, viewer.id, rows.clone());
                rows
            }
            Err(err) => {
                tracing::warn!(table = table_for(kind), error = %err, "list failed; returning empty");
                Vec::new()
            }
        }
    }

    pub(crate) async fn list_as<T: DeserializeOwned>(
        &self,
        kind: ScopeKind,
        viewer: &Viewer,
    ) -> Vec<T> {
        self.list_rows(kind, viewer)
            .await
            .into_iter()
            .filter_map(|row| match serde_json::from_value(row) {
                Ok(record) => Some(record),
                Err(err) => {
                    tracing::warn!(table = table_for(kind), error = %err, "skipping undecodable row");
                    None
                }
            })
            .collect()
    }

    /// Fetch one record by id, inside the viewer's scope. A row outside the
    /// scope is reported as missing, not as forbidden.
    pub(crate) async fn fetch_scoped<T: DeserializeOwned>(
        &self,
        kind: ScopeKind,
        viewer: &Viewer,
        id: &str,
    ) -> Result<T, AccessError> {
        let query = Query::scoped(scope_filter(kind, Some(viewer)))
            .and_eq("id", id)
            .limit(1);
        let rows = self.backend.select(table_for(kind), &query).await?;
        let row = rows.into_iter().next().ok_or(AccessError::NotFound)?;
        Ok(serde_json::from_value(row)?)
    }

    pub(crate) async fn insert_as<T: DeserializeOwned>(
        &self,
        kind: ScopeKind,
        row: JsonValue,
    ) -> Result<T, AccessError> {
        let stored = self.backend.insert(table_for(kind), row).await?;
        self.cache.invalidate(kind);
        Ok(serde_json::from_value(stored)?)
    }

    pub(crate) async fn update_scoped<T: DeserializeOwned>(
        &self,
        kind: ScopeKind,
        viewer: &Viewer,
        id: &str,
        patch: JsonValue,
    ) -> Result<T, AccessError> {
        let query = Query::scoped(scope_filter(kind, Some(viewer))).and_eq("id", id);
        let updated = self.backend.update(table_for(kind), &query, patch).await?;
        self.cache.invalidate(kind);
        let row = updated.into_iter().next().ok_or(AccessError::NotFound)?;
        Ok(serde_json::from_value(row)?)
    }

    pub(crate) async fn delete_scoped(
        &self,
        kind: ScopeKind,
        viewer: &Viewer,
        id: &str,
    ) -> Result<(), AccessError> {
        let query = Query::scoped(scope_filter(kind, Some(viewer))).and_eq("id", id);
        let removed = self.backend.delete(table_for(kind), &query).await?;
        self.cache.invalidate(kind);
        if removed == 0 {
            return Err(AccessError::NotFound);
        }
        Ok(())
    }

    /// Creation gate for collections without a dedicated capability flag: a
    /// viewer whose scope filter is deny-all cannot see the collection, so it
    /// cannot add to it either.
    pub(crate) fn ensure_can_touch(
        &self,
        kind: ScopeKind,
        viewer: &Viewer,
        action: &'static str,
    ) -> Result<(), AccessError> {
        if scope_filter(kind, Some(viewer)) == ScopeFilter::DenyAll {
            return Err(AccessError::Forbidden(action));
        }
        Ok(())
    }
}
