//! # Relationship Repositories
//!
//! A [`RelationshipRepository`] knows how to link an owning resource to resources of one related
//! type. Repositories are registered per (owner type, related type) pair and are called by the
//! engine after all attributes of the owner are bound.
//!
//! Implementations may write through to storage immediately or only update the owner and stage
//! the link; the engine awaits each call in turn and does not retry.

use crate::framework::error::RepositoryError;
use crate::framework::identifier::ResourceId;
use crate::framework::resource::Resource;
use async_trait::async_trait;

#[async_trait]
pub trait RelationshipRepository: Send + Sync {
    /// Points the to-one relationship `field_name` of `owner` at `target_id`.
    async fn set_one(
        &self,
        owner: &mut dyn Resource,
        target_id: ResourceId,
        field_name: &str,
    ) -> Result<(), RepositoryError>;

    /// Replaces the to-many relationship `field_name` of `owner` with `target_ids`, in order.
    /// An empty list clears the relationship.
    async fn set_many(
        &self,
        owner: &mut dyn Resource,
        target_ids: Vec<ResourceId>,
        field_name: &str,
    ) -> Result<(), RepositoryError>;
}
