use crate::framework::{RelationshipRepository, RepositoryError, Resource, ResourceId};
use crate::model::User;
use crate::repositories::SampleError;
use crate::store::{LinkKey, LinkStoreClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Assigns a [`User`] to an ordered list of projects.
#[derive(Debug, Clone)]
pub struct UserToProjectRepository {
    links: LinkStoreClient,
}

impl UserToProjectRepository {
    pub fn new(links: LinkStoreClient) -> Self {
        Self { links }
    }
}

#[async_trait]
impl RelationshipRepository for UserToProjectRepository {
    async fn set_one(
        &self,
        _owner: &mut dyn Resource,
        _target_id: ResourceId,
        field_name: &str,
    ) -> Result<(), RepositoryError> {
        Err(SampleError::UnsupportedField {
            owner: User::TYPE,
            field: field_name.to_string(),
        }
        .into())
    }

    #[instrument(skip(self, owner, target_ids), fields(entity_type = User::TYPE, count = target_ids.len()))]
    async fn set_many(
        &self,
        owner: &mut dyn Resource,
        target_ids: Vec<ResourceId>,
        field_name: &str,
    ) -> Result<(), RepositoryError> {
        let user = owner
            .downcast_mut::<User>()
            .ok_or(SampleError::WrongOwner { expected: User::TYPE })?;
        if field_name != User::ASSIGNED_PROJECTS {
            return Err(SampleError::UnsupportedField {
                owner: User::TYPE,
                field: field_name.to_string(),
            }
            .into());
        }
        let project_ids = target_ids
            .iter()
            .map(|id| id.as_i64().ok_or_else(|| SampleError::NonNumericId(id.to_string())))
            .collect::<Result<Vec<_>, _>>()?;
        let user_id = user.id.ok_or(SampleError::MissingOwnerId(User::TYPE))?;

        let key = LinkKey::new(User::TYPE, ResourceId::Long(user_id), field_name);
        self.links
            .set(key, target_ids)
            .await
            .map_err(SampleError::from)?;
        debug!(user_id, ?project_ids, "User assigned to projects");
        user.assigned_projects = project_ids;
        Ok(())
    }
}
