//! Task operations.

use chrono::Utc;

use campana_auth::{ScopeKind, Viewer};
use campana_backend::Backend;
use campana_core::TaskId;
use campana_domain::{NewTask, Task, TaskPatch, TaskStatus};

use crate::error::AccessError;
use crate::store::DataAccess;

impl<B: Backend + ?Sized> DataAccess<B> {
    pub async fn list_tasks(&self, viewer: &Viewer) -> Vec<Task> {
        self.list_as(ScopeKind::Task, viewer).await
    }

    pub async fn create_task(
        &self,
        viewer: &Viewer,
        draft: NewTask,
    ) -> Result<Task, AccessError> {
        self.ensure_can_touch(ScopeKind::Task, viewer, "create task")?;

        let task = Task {
            id: TaskId::new(),
            title: draft.title,
            description: draft.description,
            assigned_to: draft.assigned_to,
            assigned_by: viewer.id,
            due_date: draft.due_date,
            status: TaskStatus::Pending,
            priority: draft.priority,
            created_at: Utc::now(),
        };
        self.insert_as(ScopeKind::Task, serde_json::to_value(&task)?)
            .await
    }

    pub async fn update_task(
        &self,
        viewer: &Viewer,
        id: TaskId,
        patch: TaskPatch,
    ) -> Result<Task, AccessError> {
        self.update_scoped(ScopeKind::Task, viewer, &id.to_string(), serde_json::to_value(&patch)?)
            .await
    }

    pub async fn delete_task(&self, viewer: &Viewer, id: TaskId) -> Result<(), AccessError> {
        self.delete_scoped(ScopeKind::Task, viewer, &id.to_string())
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use campana_auth::Role;
    use campana_backend::MemoryBackend;
    use campana_core::ProfileId;
    use campana_domain::TaskPriority;

    use super::*;

    fn viewer(role: Role) -> Viewer {
        Viewer::new(ProfileId::new(), role)
    }

    fn draft(assigned_to: ProfileId) -> NewTask {
        NewTask {
            title: "Llamar a los líderes de zona".to_string(),
            description: "Confirmar asistencia a la reunión".to_string(),
            assigned_to,
            due_date: None,
            priority: TaskPriority::Medium,
        }
    }

    #[tokio::test]
    async fn assignment_is_stamped_from_the_viewer() {
        let access = DataAccess::new(Arc::new(MemoryBackend::new()));
        let candidato = viewer(Role::Candidato);
        let votante = viewer(Role::Votante);

        let task = access
            .create_task(&candidato, draft(votante.id))
            .await
            .unwrap();
        assert_eq!(task.assigned_by, candidato.id);
        assert_eq!(task.status, TaskStatus::Pending);
    }

    #[tokio::test]
    async fn assignees_see_and_progress_their_tasks() {
        let access = DataAccess::new(Arc::new(MemoryBackend::new()));
        let candidato = viewer(Role::Candidato);
        let votante = viewer(Role::Votante);

        let task = access
            .create_task(&candidato, draft(votante.id))
            .await
            .unwrap();

        let mine = access.list_tasks(&votante).await;
        assert_eq!(mine.len(), 1);

        let patch = TaskPatch {
            status: Some(TaskStatus::InProgress),
            ..TaskPatch::default()
        };
        let updated = access.update_task(&votante, task.id, patch).await.unwrap();
        assert_eq!(updated.status, TaskStatus::InProgress);
    }

    #[tokio::test]
    async fn tasks_of_others_stay_invisible() {
        let access = DataAccess::new(Arc::new(MemoryBackend::new()));
        let candidato = viewer(Role::Candidato);
        let votante = viewer(Role::Votante);

        access
            .create_task(&candidato, draft(ProfileId::new()))
            .await
            .unwrap();

        assert!(access.list_tasks(&votante).await.is_empty());
    }
}
