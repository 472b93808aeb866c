//! # Resource Registry
//!
//! The registry maps resource type names to a [`RegistryEntry`]: the type's schema plus the
//! relationship repositories owned by that type, keyed by related type name.
//!
//! It is assembled once with a [`RegistryBuilder`] and never mutated afterwards, so it can be
//! shared behind an `Arc` and read from any number of tasks without locking.

use crate::framework::error::{RegistryError, UpsertError};
use crate::framework::identifier::ResourceId;
use crate::framework::repository::RelationshipRepository;
use crate::framework::resource::Resource;
use crate::framework::schema::ResourceSchema;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// A registered resource type.
pub struct RegistryEntry {
    schema: ResourceSchema,
    repositories: HashMap<String, Arc<dyn RelationshipRepository>>,
}

impl RegistryEntry {
    pub fn type_name(&self) -> &str {
        self.schema.type_name()
    }

    pub fn schema(&self) -> &ResourceSchema {
        &self.schema
    }

    /// The repository that links this type to resources of `target_type`.
    pub fn relationship_repository(
        &self,
        target_type: &str,
    ) -> Result<&Arc<dyn RelationshipRepository>, UpsertError> {
        self.repositories
            .get(target_type)
            .ok_or_else(|| UpsertError::RepositoryNotFound {
                owner: self.type_name().to_string(),
                target: target_type.to_string(),
            })
    }

    pub fn id_of(&self, instance: &dyn Resource) -> Option<ResourceId> {
        self.schema.id_of(instance)
    }
}

impl std::fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut targets: Vec<_> = self.repositories.keys().collect();
        targets.sort();
        f.debug_struct("RegistryEntry")
            .field("schema", &self.schema)
            .field("repositories", &targets)
            .finish()
    }
}

/// Immutable lookup table of every registered resource type.
#[derive(Debug)]
pub struct ResourceRegistry {
    entries: HashMap<String, RegistryEntry>,
}

impl ResourceRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    pub fn lookup(&self, type_name: &str) -> Result<&RegistryEntry, UpsertError> {
        self.entries
            .get(type_name)
            .ok_or_else(|| UpsertError::TypeNotFound(type_name.to_string()))
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.entries.contains_key(type_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Collects schemas and repositories, then validates them into a [`ResourceRegistry`].
#[derive(Default)]
pub struct RegistryBuilder {
    entries: HashMap<String, RegistryEntry>,
    pending: Vec<(String, String, Arc<dyn RelationshipRepository>)>,
    duplicate: Option<String>,
}

impl RegistryBuilder {
    pub fn register(mut self, schema: ResourceSchema) -> Self {
        let type_name = schema.type_name().to_string();
        if self.entries.contains_key(&type_name) {
            self.duplicate.get_or_insert(type_name);
            return self;
        }
        debug!(type_name, rust_type = schema.rust_type(), "Registering resource type");
        self.entries.insert(
            type_name,
            RegistryEntry {
                schema,
                repositories: HashMap::new(),
            },
        );
        self
    }

    /// Registers `repository` for links from `owner_type` to `target_type`.
    pub fn relationship_repository(
        mut self,
        owner_type: impl Into<String>,
        target_type: impl Into<String>,
        repository: Arc<dyn RelationshipRepository>,
    ) -> Self {
        self.pending
            .push((owner_type.into(), target_type.into(), repository));
        self
    }

    /// Checks that type names are unique and that every repository and relationship
    /// refers to a registered type.
    pub fn build(mut self) -> Result<ResourceRegistry, RegistryError> {
        if let Some(type_name) = self.duplicate {
            return Err(RegistryError::DuplicateType(type_name));
        }

        for entry in self.entries.values() {
            for relationship in entry.schema.relationships() {
                if !self.entries.contains_key(&relationship.target_type) {
                    return Err(RegistryError::UnknownType {
                        referenced_by: format!("{}.{}", entry.type_name(), relationship.name),
                        type_name: relationship.target_type.clone(),
                    });
                }
            }
        }

        for (owner, target, repository) in self.pending {
            if !self.entries.contains_key(&target) {
                return Err(RegistryError::UnknownType {
                    referenced_by: format!("relationship repository of {owner}"),
                    type_name: target,
                });
            }
            let entry = self
                .entries
                .get_mut(&owner)
                .ok_or_else(|| RegistryError::UnknownType {
                    referenced_by: format!("relationship repository to {target}"),
                    type_name: owner.clone(),
                })?;
            entry.repositories.insert(target, repository);
        }

        info!(types = self.entries.len(), "Resource registry ready");
        Ok(ResourceRegistry {
            entries: self.entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::identifier::IdKind;
    use crate::framework::mock::MockRelationshipRepository;
    use crate::framework::schema::SchemaBuilder;

    #[derive(Debug, Default)]
    struct Shelf {
        id: Option<i64>,
    }

    #[derive(Debug, Default)]
    struct Book {
        id: Option<i64>,
    }

    fn shelf_schema() -> ResourceSchema {
        SchemaBuilder::<Shelf>::new("shelves")
            .default_constructor()
            .id("id", IdKind::Long, |s: &Shelf| s.id.map(ResourceId::Long))
            .to_many("books", "books")
            .build()
            .unwrap()
    }

    fn book_schema() -> ResourceSchema {
        SchemaBuilder::<Book>::new("books")
            .default_constructor()
            .id("id", IdKind::Long, |b: &Book| b.id.map(ResourceId::Long))
            .build()
            .unwrap()
    }

    #[test]
    fn lookup_finds_registered_type() {
        let registry = ResourceRegistry::builder()
            .register(book_schema())
            .build()
            .unwrap();

        assert_eq!(registry.lookup("books").unwrap().type_name(), "books");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn lookup_of_unknown_type_fails() {
        let registry = ResourceRegistry::builder().build().unwrap();
        assert!(registry.is_empty());
        assert!(matches!(
            registry.lookup("fridges"),
            Err(UpsertError::TypeNotFound(name)) if name == "fridges"
        ));
    }

    #[test]
    fn duplicate_type_name_is_rejected() {
        let result = ResourceRegistry::builder()
            .register(book_schema())
            .register(book_schema())
            .build();
        assert_eq!(
            result.unwrap_err(),
            RegistryError::DuplicateType("books".into())
        );
    }

    #[test]
    fn relationship_to_unregistered_type_is_rejected() {
        let result = ResourceRegistry::builder().register(shelf_schema()).build();
        assert!(matches!(
            result,
            Err(RegistryError::UnknownType { type_name, .. }) if type_name == "books"
        ));
    }

    #[test]
    fn repository_for_unregistered_owner_is_rejected() {
        let result = ResourceRegistry::builder()
            .register(book_schema())
            .relationship_repository(
                "magazines",
                "books",
                Arc::new(MockRelationshipRepository::new()),
            )
            .build();
        assert!(matches!(
            result,
            Err(RegistryError::UnknownType { type_name, .. }) if type_name == "magazines"
        ));
    }

    #[test]
    fn repository_is_found_by_target_type() {
        let registry = ResourceRegistry::builder()
            .register(shelf_schema())
            .register(book_schema())
            .relationship_repository(
                "shelves",
                "books",
                Arc::new(MockRelationshipRepository::new()),
            )
            .build()
            .unwrap();

        let shelves = registry.lookup("shelves").unwrap();
        assert!(shelves.relationship_repository("books").is_ok());
        assert!(matches!(
            shelves.relationship_repository("shelves"),
            Err(UpsertError::RepositoryNotFound { .. })
        ));
    }
}
