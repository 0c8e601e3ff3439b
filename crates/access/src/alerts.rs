//! Alert operations, including the terminal-state rule.

use chrono::Utc;
use serde_json::Value as JsonValue;

use campana_auth::{ScopeKind, Viewer};
use campana_backend::Backend;
use campana_core::AlertId;
use campana_domain::{Alert, AlertPatch, AlertStatus, NewAlert};

use crate::error::AccessError;
use crate::store::DataAccess;

impl<B: Backend + ?Sized> DataAccess<B> {
    pub async fn list_alerts(&self, viewer: &Viewer) -> Vec<Alert> {
        self.list_as(ScopeKind::Alert, viewer).await
    }

    pub async fn create_alert(
        &self,
        viewer: &Viewer,
        draft: NewAlert,
    ) -> Result<Alert, AccessError> {
        self.ensure_can_touch(ScopeKind::Alert, viewer, "create alert")?;

        let alert = Alert {
            id: AlertId::new(),
            title: draft.title,
            description: draft.description,
            kind: draft.kind,
            status: AlertStatus::Active,
            priority: draft.priority,
            territory_id: draft.territory_id,
            affected_user_id: draft.affected_user_id,
            created_by: viewer.id,
            resolved_by: None,
            resolved_at: None,
            created_at: Utc::now(),
        };
        self.insert_as(ScopeKind::Alert, serde_json::to_value(&alert)?)
            .await
    }

    /// Apply a patch to an alert the viewer can see.
    ///
    /// Status changes are validated against the lifecycle: an alert that has
    /// settled (resolved or dismissed) never changes status again. Moving to
    /// `resolved` stamps `resolved_by`/`resolved_at`.
    pub async fn update_alert(
        &self,
        viewer: &Viewer,
        id: AlertId,
        patch: AlertPatch,
    ) -> Result<Alert, AccessError> {
        let current: Alert = self
            .fetch_scoped(ScopeKind::Alert, viewer, &id.to_string())
            .await?;

        let mut row = serde_json::to_value(&patch)?;
        if let Some(next) = patch.status {
            if !current.status.can_transition_to(next) {
                return Err(AccessError::Invariant(format!(
                    "alert cannot move from {:?} to {next:?}",
                    current.status
                )));
            }
            if next == AlertStatus::Resolved {
                stamp(&mut row, "resolved_by", viewer.id.to_string());
                stamp(&mut row, "resolved_at", Utc::now().to_rfc3339());
            }
        }

        self.update_scoped(ScopeKind::Alert, viewer, &id.to_string(), row)
            .await
    }

    pub async fn resolve_alert(&self, viewer: &Viewer, id: AlertId) -> Result<Alert, AccessError> {
        self.update_alert(
            viewer,
            id,
            AlertPatch {
                status: Some(AlertStatus::Resolved),
                ..AlertPatch::default()
            },
        )
        .await
    }

    pub async fn dismiss_alert(&self, viewer: &Viewer, id: AlertId) -> Result<Alert, AccessError> {
        self.update_alert(
            viewer,
            id,
            AlertPatch {
                status: Some(AlertStatus::Dismissed),
                ..AlertPatch::default()
            },
        )
        .await
    }

    pub async fn delete_alert(&self, viewer: &Viewer, id: AlertId) -> Result<(), AccessError> {
        self.delete_scoped(ScopeKind::Alert, viewer, &id.to_string())
            .await
    }
}

fn stamp(row: &mut JsonValue, field: &str, value: String) {
    if let Some(fields) = row.as_object_mut() {
        fields.insert(field.to_string(), JsonValue::String(value));
    }
}
