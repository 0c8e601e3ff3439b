//! Mass-message operations and the one-way status progression.

use chrono::{DateTime, Utc};
use serde_json::json;

use campana_auth::{ScopeKind, Viewer};
use campana_backend::Backend;
use campana_core::MessageId;
use campana_domain::{Message, MessagePatch, MessageStatus, NewMessage};

use crate::error::AccessError;
use crate::store::DataAccess;

impl<B: Backend + ?Sized> DataAccess<B> {
    pub async fn list_messages(&self, viewer: &Viewer) -> Vec<Message> {
        self.list_as(ScopeKind::Message, viewer).await
    }

    pub async fn create_message(
        &self,
        viewer: &Viewer,
        draft: NewMessage,
    ) -> Result<Message, AccessError> {
        self.ensure_can_touch(ScopeKind::Message, viewer, "create message")?;

        let message = Message {
            id: MessageId::new(),
            subject: draft.subject,
            content: draft.content,
            category: draft.category,
            priority: draft.priority,
            status: MessageStatus::Draft,
            territory_id: draft.territory_id,
            scheduled_for: None,
            sent_at: None,
            created_by: viewer.id,
            created_at: Utc::now(),
        };
        self.insert_as(ScopeKind::Message, serde_json::to_value(&message)?)
            .await
    }

    pub async fn update_message(
        &self,
        viewer: &Viewer,
        id: MessageId,
        patch: MessagePatch,
    ) -> Result<Message, AccessError> {
        self.update_scoped(ScopeKind::Message, viewer, &id.to_string(), serde_json::to_value(&patch)?)
            .await
    }

    /// Move a draft to `scheduled` for a delivery time. Delivery itself is an
    /// external workflow's job.
    pub async fn schedule_message(
        &self,
        viewer: &Viewer,
        id: MessageId,
        scheduled_for: DateTime<Utc>,
    ) -> Result<Message, AccessError> {
        let patch = json!({
            "status": MessageStatus::Scheduled,
            "scheduled_for": scheduled_for,
        });
        self.progress_message(viewer, id, MessageStatus::Scheduled, patch)
            .await
    }

    /// Record that the external workflow delivered the message.
    pub async fn mark_message_sent(
        &self,
        viewer: &Viewer,
        id: MessageId,
    ) -> Result<Message, AccessError> {
        let patch = json!({
            "status": MessageStatus::Sent,
            "sent_at": Utc::now(),
        });
        self.progress_message(viewer, id, MessageStatus::Sent, patch)
            .await
    }

    pub async fn delete_message(&self, viewer: &Viewer, id: MessageId) -> Result<(), AccessError> {
        self.delete_scoped(ScopeKind::Message, viewer, &id.to_string())
            .await
    }

    async fn progress_message(
        &self,
        viewer: &Viewer,
        id: MessageId,
        next: MessageStatus,
        patch: serde_json::Value,
    ) -> Result<Message, AccessError> {
        let current: Message = self
            .fetch_scoped(ScopeKind::Message, viewer, &id.to_string())
            .await?;
        if !current.status.can_transition_to(next) {
            return Err(AccessError::Invariant(format!(
                "message cannot move from {:?} to {next:?}",
                current.status
            )));
        }
        self.update_scoped(ScopeKind::Message, viewer, &id.to_string(), patch)
            .await
    }
}
