use crate::framework::{RelationshipRepository, RepositoryError, Resource, ResourceId};
use crate::model::Task;
use crate::repositories::SampleError;
use crate::store::{LinkKey, LinkStoreClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Links a [`Task`] to the project it belongs to.
#[derive(Debug, Clone)]
pub struct TaskToProjectRepository {
    links: LinkStoreClient,
}

impl TaskToProjectRepository {
    pub fn new(links: LinkStoreClient) -> Self {
        Self { links }
    }
}

#[async_trait]
impl RelationshipRepository for TaskToProjectRepository {
    #[instrument(skip(self, owner), fields(entity_type = Task::TYPE))]
    async fn set_one(
        &self,
        owner: &mut dyn Resource,
        target_id: ResourceId,
        field_name: &str,
    ) -> Result<(), RepositoryError> {
        let task = owner
            .downcast_mut::<Task>()
            .ok_or(SampleError::WrongOwner { expected: Task::TYPE })?;
        if field_name != Task::PROJECT {
            return Err(SampleError::UnsupportedField {
                owner: Task::TYPE,
                field: field_name.to_string(),
            }
            .into());
        }
        let project_id = target_id
            .as_i64()
            .ok_or_else(|| SampleError::NonNumericId(target_id.to_string()))?;
        let task_id = task.id.ok_or(SampleError::MissingOwnerId(Task::TYPE))?;

        let key = LinkKey::new(Task::TYPE, ResourceId::Long(task_id), field_name);
        self.links
            .set(key, vec![target_id])
            .await
            .map_err(SampleError::from)?;
        task.project = Some(project_id);
        debug!(task_id, project_id, "Task linked to project");
        Ok(())
    }

    async fn set_many(
        &self,
        _owner: &mut dyn Resource,
        _target_ids: Vec<ResourceId>,
        field_name: &str,
    ) -> Result<(), RepositoryError> {
        Err(SampleError::UnsupportedField {
            owner: Task::TYPE,
            field: field_name.to_string(),
        }
        .into())
    }
}
