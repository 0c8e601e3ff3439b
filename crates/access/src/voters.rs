//! Voter-roll operations.

use chrono::Utc;

use campana_auth::{ScopeKind, Viewer};
use campana_backend::Backend;
use campana_core::VoterId;
use campana_domain::{NewVoter, Voter, VoterPatch};

use crate::error::AccessError;
use crate::store::DataAccess;

impl<B: Backend + ?Sized> DataAccess<B> {
    pub async fn list_voters(&self, viewer: &Viewer) -> Vec<Voter> {
        self.list_as(ScopeKind::Voter, viewer).await
    }

    pub async fn register_voter(
        &self,
        viewer: &Viewer,
        draft: NewVoter,
    ) -> Result<Voter, AccessError> {
        self.ensure_can_touch(ScopeKind::Voter, viewer, "register voter")?;

        let voter = Voter {
            id: VoterId::new(),
            name: draft.name,
            phone: draft.phone,
            email: draft.email,
            address: draft.address,
            territory_id: draft.territory_id,
            registered_by: viewer.id,
            commitment_level: draft.commitment_level,
            created_at: Utc::now(),
        };
        self.insert_as(ScopeKind::Voter, serde_json::to_value(&voter)?)
            .await
    }

    pub async fn update_voter(
        &self,
        viewer: &Viewer,
        id: VoterId,
        patch: VoterPatch,
    ) -> Result<Voter, AccessError> {
        self.update_scoped(ScopeKind::Voter, viewer, &id.to_string(), serde_json::to_value(&patch)?)
            .await
    }

    pub async fn delete_voter(&self, viewer: &Viewer, id: VoterId) -> Result<(), AccessError> {
        self.delete_scoped(ScopeKind::Voter, viewer, &id.to_string())
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use campana_auth::Role;
    use campana_backend::MemoryBackend;
    use campana_core::{ProfileId, TerritoryId};
    use campana_domain::CommitmentLevel;

    use super::*;

    fn viewer(role: Role) -> Viewer {
        Viewer::new(ProfileId::new(), role)
    }

    fn draft(territory_id: TerritoryId) -> NewVoter {
        NewVoter {
            name: "Carlos Pineda".to_string(),
            phone: Some("3005551234".to_string()),
            email: None,
            address: None,
            territory_id,
            commitment_level: CommitmentLevel::Undecided,
        }
    }

    #[tokio::test]
    async fn votante_sees_only_its_own_registrations() {
        let backend = Arc::new(MemoryBackend::new());
        let access = DataAccess::new(Arc::clone(&backend));
        let votante = viewer(Role::Votante);
        let territory = TerritoryId::new();

        let own = access
            .register_voter(&votante, draft(territory))
            .await
            .unwrap();
        assert_eq!(own.registered_by, votante.id);

        // Another registrar's record in the same territory.
        backend.seed_row(
            "voters",
            json!({
                "id": VoterId::new().to_string(),
                "name": "Otro",
                "territory_id": territory.to_string(),
                "registered_by": ProfileId::new().to_string(),
                "commitment_level": "likely",
                "created_at": "2025-01-01T00:00:00Z",
            }),
        );

        let listed = access.list_voters(&votante).await;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, own.id);
    }

    #[tokio::test]
    async fn candidato_sees_voters_of_its_territories() {
        let backend = Arc::new(MemoryBackend::new());
        let access = DataAccess::new(Arc::clone(&backend));
        let candidato = viewer(Role::Candidato);

        let mine = TerritoryId::new();
        let theirs = TerritoryId::new();
        backend.seed_row(
            "territories",
            json!({
                "id": mine.to_string(),
                "responsible_user_id": candidato.id.to_string(),
            }),
        );
        backend.seed_row(
            "territories",
            json!({
                "id": theirs.to_string(),
                "responsible_user_id": ProfileId::new().to_string(),
            }),
        );

        let lider = viewer(Role::Lider);
        for (territory, name) in [(mine, "Dentro"), (theirs, "Fuera")] {
            backend.seed_row(
                "voters",
                json!({
                    "id": VoterId::new().to_string(),
                    "name": name,
                    "territory_id": territory.to_string(),
                    "registered_by": lider.id.to_string(),
                    "commitment_level": "committed",
                    "created_at": "2025-01-01T00:00:00Z",
                }),
            );
        }

        let listed = access.list_voters(&candidato).await;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Dentro");
    }

    #[tokio::test]
    async fn lider_cannot_touch_the_roll() {
        let access = DataAccess::new(Arc::new(MemoryBackend::new()));
        let lider = viewer(Role::Lider);

        let err = access
            .register_voter(&lider, draft(TerritoryId::new()))
            .await
            .unwrap_err();
        assert!(matches!(err, AccessError::Forbidden(_)));
        assert!(access.list_voters(&lider).await.is_empty());
    }

    #[tokio::test]
    async fn commitment_updates_stay_scoped() {
        let access = DataAccess::new(Arc::new(MemoryBackend::new()));
        let votante = viewer(Role::Votante);

        let created = access
            .register_voter(&votante, draft(TerritoryId::new()))
            .await
            .unwrap();

        let patch = VoterPatch {
            commitment_level: Some(CommitmentLevel::Committed),
            ..VoterPatch::default()
        };
        let updated = access
            .update_voter(&votante, created.id, patch)
            .await
            .unwrap();
        assert_eq!(updated.commitment_level, CommitmentLevel::Committed);
    }
}
