//! The row-store seam.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::error::BackendError;
use crate::query::Query;

/// Row-level access to the hosted store.
///
/// Rows cross this boundary as JSON values; typed mapping happens in the
/// access layer. Implementations must apply the whole query (scope filter
/// and extra predicates) on every operation, including mutations, so a row
/// outside the caller's scope is indistinguishable from a missing row.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Fetch rows matching the query.
    async fn select(&self, table: &str, query: &Query) -> Result<Vec<JsonValue>, BackendError>;

    /// Insert one row and return the stored representation.
    async fn insert(&self, table: &str, row: JsonValue) -> Result<JsonValue, BackendError>;

    /// Patch rows matching the query; returns the updated representations.
    async fn update(
        &self,
        table: &str,
        query: &Query,
        patch: JsonValue,
    ) -> Result<Vec<JsonValue>, BackendError>;

    /// Delete rows matching the query; returns how many were removed.
    async fn delete(&self, table: &str, query: &Query) -> Result<usize, BackendError>;
}

#[async_trait]
impl<B> Backend for Arc<B>
where
    B: Backend + ?Sized,
{
    async fn select(&self, table: &str, query: &Query) -> Result<Vec<JsonValue>, BackendError> {
        (**self).select(table, query).await
    }

    async fn insert(&self, table: &str, row: JsonValue) -> Result<JsonValue, BackendError> {
        (**self).insert(table, row).await
    }

    async fn update(
        &self,
        table: &str,
        query: &Query,
        patch: JsonValue,
    ) -> Result<Vec<JsonValue>, BackendError> {
        (**self).update(table, query, patch).await
    }

    async fn delete(&self, table: &str, query: &Query) -> Result<usize, BackendError> {
        (**self).delete(table, query).await
    }
}
