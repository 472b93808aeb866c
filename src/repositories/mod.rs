//! Relationship repositories for the sample model, backed by the [`LinkStore`](crate::store::LinkStore).
//!
//! Each repository updates the owner's relationship field in place and records the link under
//! the owner's type, id and field name.

pub mod error;
pub mod task_to_project;
pub mod user_to_project;

pub use error::SampleError;
pub use task_to_project::TaskToProjectRepository;
pub use user_to_project::UserToProjectRepository;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::{RelationshipRepository, ResourceId};
    use crate::model::{Project, Task, User};
    use crate::store::{LinkKey, LinkStore};

    #[tokio::test]
    async fn task_repository_sets_field_and_records_link() {
        let (store, links) = LinkStore::new(8);
        let handle = tokio::spawn(store.run());
        let repository = TaskToProjectRepository::new(links.clone());

        let mut task = Task {
            id: Some(7),
            ..Task::default()
        };
        repository
            .set_one(&mut task, ResourceId::Long(3), Task::PROJECT)
            .await
            .unwrap();

        assert_eq!(task.project, Some(3));
        let key = LinkKey::new(Task::TYPE, ResourceId::Long(7), Task::PROJECT);
        assert_eq!(links.target(key).await.unwrap(), Some(ResourceId::Long(3)));

        drop(repository);
        drop(links);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn task_repository_rejects_other_owner() {
        let (_store, links) = LinkStore::new(8);
        let repository = TaskToProjectRepository::new(links);

        let mut project = Project::new(1, "Apollo");
        let err = repository
            .set_one(&mut project, ResourceId::Long(3), Task::PROJECT)
            .await
            .unwrap_err();

        assert_eq!(
            err.downcast_ref::<SampleError>(),
            Some(&SampleError::WrongOwner { expected: Task::TYPE })
        );
    }

    #[tokio::test]
    async fn task_repository_requires_owner_id() {
        let (_store, links) = LinkStore::new(8);
        let repository = TaskToProjectRepository::new(links);

        let mut task = Task::default();
        let err = repository
            .set_one(&mut task, ResourceId::Long(3), Task::PROJECT)
            .await
            .unwrap_err();

        assert_eq!(
            err.downcast_ref::<SampleError>(),
            Some(&SampleError::MissingOwnerId(Task::TYPE))
        );
        assert_eq!(task.project, None);
    }

    #[tokio::test]
    async fn user_repository_keeps_order() {
        let (store, links) = LinkStore::new(8);
        let handle = tokio::spawn(store.run());
        let repository = UserToProjectRepository::new(links.clone());

        let mut user = User {
            id: Some(2),
            ..User::default()
        };
        let targets = vec![ResourceId::Long(9), ResourceId::Long(4)];
        repository
            .set_many(&mut user, targets.clone(), User::ASSIGNED_PROJECTS)
            .await
            .unwrap();

        assert_eq!(user.assigned_projects, vec![9, 4]);
        let key = LinkKey::new(User::TYPE, ResourceId::Long(2), User::ASSIGNED_PROJECTS);
        assert_eq!(links.targets(key).await.unwrap(), targets);

        drop(repository);
        drop(links);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn user_repository_rejects_string_ids() {
        let (_store, links) = LinkStore::new(8);
        let repository = UserToProjectRepository::new(links);

        let mut user = User {
            id: Some(2),
            ..User::default()
        };
        let err = repository
            .set_many(
                &mut user,
                vec![ResourceId::String("abc".into())],
                User::ASSIGNED_PROJECTS,
            )
            .await
            .unwrap_err();

        assert_eq!(
            err.downcast_ref::<SampleError>(),
            Some(&SampleError::NonNumericId("abc".into()))
        );
    }

    #[tokio::test]
    async fn store_shutdown_surfaces_as_store_error() {
        let (store, links) = LinkStore::new(8);
        drop(store);
        let repository = UserToProjectRepository::new(links);

        let mut user = User {
            id: Some(2),
            ..User::default()
        };
        let err = repository
            .set_many(&mut user, vec![ResourceId::Long(1)], User::ASSIGNED_PROJECTS)
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<SampleError>(),
            Some(SampleError::Store(_))
        ));
        assert!(user.assigned_projects.is_empty());
    }
}
