//! Profile (user) operations and the creation ladder.

use chrono::Utc;

use campana_auth::{ScopeKind, Viewer, capabilities_for};
use campana_backend::Backend;
use campana_core::ProfileId;
use campana_domain::{NewProfile, Profile, ProfilePatch};

use crate::error::AccessError;
use crate::store::DataAccess;

impl<B: Backend + ?Sized> DataAccess<B> {
    pub async fn list_users(&self, viewer: &Viewer) -> Vec<Profile> {
        self.list_as(ScopeKind::Profile, viewer).await
    }

    /// Mint an account one step down the hierarchy.
    ///
    /// The creator may only create the single role its own role is allowed
    /// to; everything else is forbidden regardless of other capabilities.
    /// Credential provisioning stays with the hosted identity service.
    pub async fn create_user(
        &self,
        viewer: &Viewer,
        draft: NewProfile,
    ) -> Result<Profile, AccessError> {
        let caps = capabilities_for(Some(viewer));
        if !caps.can_create_role(draft.role) {
            return Err(AccessError::Forbidden("create user with this role"));
        }

        let profile = Profile {
            id: ProfileId::new(),
            display_name: draft.display_name,
            role: draft.role,
            created_by: Some(viewer.id),
            created_at: Utc::now(),
        };
        self.insert_as(ScopeKind::Profile, serde_json::to_value(&profile)?)
            .await
    }

    pub async fn update_user(
        &self,
        viewer: &Viewer,
        id: ProfileId,
        patch: ProfilePatch,
    ) -> Result<Profile, AccessError> {
        if !capabilities_for(Some(viewer)).can_manage_users {
            return Err(AccessError::Forbidden("manage users"));
        }
        self.update_scoped(ScopeKind::Profile, viewer, &id.to_string(), serde_json::to_value(&patch)?)
            .await
    }

    pub async fn delete_user(&self, viewer: &Viewer, id: ProfileId) -> Result<(), AccessError> {
        if !capabilities_for(Some(viewer)).can_manage_users {
            return Err(AccessError::Forbidden("manage users"));
        }
        self.delete_scoped(ScopeKind::Profile, viewer, &id.to_string())
            .await
    }
}
