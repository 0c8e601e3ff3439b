//! Territory operations.

use chrono::Utc;

use campana_auth::{ScopeKind, Viewer, capabilities_for};
use campana_backend::Backend;
use campana_core::TerritoryId;
use campana_domain::{NewTerritory, Territory, TerritoryPatch};

use crate::error::AccessError;
use crate::store::DataAccess;

impl<B: Backend + ?Sized> DataAccess<B> {
    pub async fn list_territories(&self, viewer: &Viewer) -> Vec<Territory> {
        self.list_as(ScopeKind::Territory, viewer).await
    }

    pub async fn create_territory(
        &self,
        viewer: &Viewer,
        draft: NewTerritory,
    ) -> Result<Territory, AccessError> {
        if !capabilities_for(Some(viewer)).can_create_territory {
            return Err(AccessError::Forbidden("create territory"));
        }

        let territory = Territory {
            id: TerritoryId::new(),
            name: draft.name,
            kind: draft.kind,
            responsible_user_id: draft.responsible_user_id,
            created_by: viewer.id,
            created_at: Utc::now(),
        };
        self.insert_as(ScopeKind::Territory, serde_json::to_value(&territory)?)
            .await
    }

    pub async fn update_territory(
        &self,
        viewer: &Viewer,
        id: TerritoryId,
        patch: TerritoryPatch,
    ) -> Result<Territory, AccessError> {
        self.update_scoped(
            ScopeKind::Territory,
            viewer,
            &id.to_string(),
            serde_json::to_value(&patch)?,
        )
        .await
    }

    pub async fn delete_territory(
        &self,
        viewer: &Viewer,
        id: TerritoryId,
    ) -> Result<(), AccessError> {
        self.delete_scoped(ScopeKind::Territory, viewer, &id.to_string())
            .await
    }
}
