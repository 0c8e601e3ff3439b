//! Campaign-event operations.

use chrono::Utc;

use campana_auth::{ScopeKind, Viewer};
use campana_backend::Backend;
use campana_core::EventId;
use campana_domain::{CampaignEvent, EventPatch, EventStatus, NewEvent};

use crate::error::AccessError;
use crate::store::DataAccess;

impl<B: Backend + ?Sized> DataAccess<B> {
    pub async fn list_events(&self, viewer: &Viewer) -> Vec<CampaignEvent> {
        self.list_as(ScopeKind::Event, viewer).await
    }

    pub async fn create_event(
        &self,
        viewer: &Viewer,
        draft: NewEvent,
    ) -> Result<CampaignEvent, AccessError> {
        self.ensure_can_touch(ScopeKind::Event, viewer, "create event")?;

        let event = CampaignEvent {
            id: EventId::new(),
            title: draft.title,
            description: draft.description,
            location: draft.location,
            starts_at: draft.starts_at,
            ends_at: draft.ends_at,
            status: EventStatus::Planned,
            territory_id: draft.territory_id,
            responsible_user_id: draft.responsible_user_id,
            created_by: viewer.id,
            created_at: Utc::now(),
        };
        self.insert_as(ScopeKind::Event, serde_json::to_value(&event)?)
            .await
    }

    pub async fn update_event(
        &self,
        viewer: &Viewer,
        id: EventId,
        patch: EventPatch,
    ) -> Result<CampaignEvent, AccessError> {
        self.update_scoped(ScopeKind::Event, viewer, &id.to_string(), serde_json::to_value(&patch)?)
            .await
    }

    pub async fn delete_event(&self, viewer: &Viewer, id: EventId) -> Result<(), AccessError> {
        self.delete_scoped(ScopeKind::Event, viewer, &id.to_string())
            .await
    }
}
