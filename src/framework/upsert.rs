//! # Upsert Engine
//!
//! [`ResourceUpsert`] turns a [`RequestDocument`] into a bound domain object using nothing but
//! the metadata in the [`ResourceRegistry`].
//!
//! ## Binding steps
//!
//! 1. **Type check**: the document's `type` must equal the type implied by the request path.
//! 2. **Construction**: a fresh instance comes from the schema's constructor.
//! 3. **Attributes**: each attribute is set through the schema's typed setter.
//! 4. **Relationships**: each linkage is resolved through the registry and must name the type the
//!    relationship was declared with; its identifier is coerced to
//!    the related type's [`IdKind`](crate::framework::IdKind), and the owning type's
//!    [`RelationshipRepository`](crate::framework::RelationshipRepository) is asked to link it.
//!
//! Attributes are always bound before any relationship, since a repository may need the owner's
//! attributes (or identity) to store a link. The first failure aborts the call and the partial
//! instance is dropped; the engine itself never persists anything.
//!
//! The engine only holds an `Arc` of the immutable registry, so one `ResourceUpsert` can be
//! cloned into any number of tasks.

use crate::framework::document::{Linkage, RelationshipValue, RequestDocument};
use crate::framework::error::{RepositoryError, UpsertError};
use crate::framework::identifier::ResourceId;
use crate::framework::registry::{RegistryEntry, ResourceRegistry};
use crate::framework::resource::Resource;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Binds request documents onto resource instances.
#[derive(Debug, Clone)]
pub struct ResourceUpsert {
    registry: Arc<ResourceRegistry>,
}

impl ResourceUpsert {
    pub fn new(registry: Arc<ResourceRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ResourceRegistry {
        &self.registry
    }

    /// Looks up `type_name` and builds a new instance of it from `document`.
    pub async fn build(
        &self,
        type_name: &str,
        document: &RequestDocument,
    ) -> Result<Box<dyn Resource>, UpsertError> {
        let entry = self.registry.lookup(type_name).inspect_err(|e| {
            warn!(type_name, error = %e, "Build failed");
        })?;
        self.build_and_bind(type_name, document, entry).await
    }

    /// Builds a new instance of `entry`'s type and binds `document` onto it.
    #[instrument(skip(self, document, entry))]
    pub async fn build_and_bind(
        &self,
        type_name: &str,
        document: &RequestDocument,
        entry: &RegistryEntry,
    ) -> Result<Box<dyn Resource>, UpsertError> {
        debug!(?document, "build_and_bind called");
        let result = self.try_build(type_name, document, entry).await;
        match &result {
            Ok(instance) => info!(
                type_name,
                id = ?entry.id_of(&**instance),
                attributes = document.attributes.as_ref().map_or(0, |a| a.len()),
                relationships = document.relationships.as_ref().map_or(0, |r| r.len()),
                "Resource bound"
            ),
            Err(e) => warn!(type_name, error = %e, "Build failed"),
        }
        result
    }

    /// Binds `document` onto an existing `instance` of `entry`'s type.
    #[instrument(skip(self, instance, document, entry))]
    pub async fn apply(
        &self,
        instance: &mut dyn Resource,
        type_name: &str,
        document: &RequestDocument,
        entry: &RegistryEntry,
    ) -> Result<(), UpsertError> {
        debug!(?document, "apply called");
        let result = self.bind(instance, type_name, document, entry).await;
        match &result {
            Ok(()) => info!(type_name, id = ?entry.id_of(instance), "Resource updated"),
            Err(e) => warn!(type_name, error = %e, "Update failed"),
        }
        result
    }

    async fn try_build(
        &self,
        type_name: &str,
        document: &RequestDocument,
        entry: &RegistryEntry,
    ) -> Result<Box<dyn Resource>, UpsertError> {
        check_type(type_name, document)?;
        let mut instance = entry
            .schema()
            .instantiate()
            .map_err(|reason| UpsertError::Instantiation {
                type_name: entry.type_name().to_string(),
                reason,
            })?;
        self.bind(&mut *instance, type_name, document, entry).await?;
        Ok(instance)
    }

    async fn bind(
        &self,
        instance: &mut dyn Resource,
        type_name: &str,
        document: &RequestDocument,
        entry: &RegistryEntry,
    ) -> Result<(), UpsertError> {
        check_type(type_name, document)?;
        set_attributes(instance, document, entry)?;
        self.set_relations(instance, document, entry).await
    }

    async fn set_relations(
        &self,
        instance: &mut dyn Resource,
        document: &RequestDocument,
        entry: &RegistryEntry,
    ) -> Result<(), UpsertError> {
        let Some(relationships) = &document.relationships else {
            return Ok(());
        };
        for (name, value) in relationships {
            match value {
                RelationshipValue::Single(linkage) => {
                    self.set_relation_field(instance, name, linkage, entry).await?
                }
                RelationshipValue::Many(linkages) => {
                    self.set_relations_field(instance, name, value, linkages, entry)
                        .await?
                }
            }
        }
        Ok(())
    }

    async fn set_relation_field(
        &self,
        instance: &mut dyn Resource,
        name: &str,
        linkage: &Linkage,
        entry: &RegistryEntry,
    ) -> Result<(), UpsertError> {
        let related = self.registry.lookup(&linkage.type_name)?;
        let id = related.schema().id_field().kind.coerce(&linkage.id)?;
        let field = relationship_field(entry, name, related.type_name())?;
        debug!(relationship = field, target = related.type_name(), %id, "Setting relation");

        entry
            .relationship_repository(related.type_name())?
            .set_one(instance, id, field)
            .await
            .map_err(|source| persistence_error(entry, field, source))
    }

    async fn set_relations_field(
        &self,
        instance: &mut dyn Resource,
        name: &str,
        value: &RelationshipValue,
        linkages: &[Linkage],
        entry: &RegistryEntry,
    ) -> Result<(), UpsertError> {
        let linkage_type = value.linkage_type().map_err(|types| {
            debug!(relationship = name, ?types, "Mixed linkage types");
            UpsertError::MixedLinkageType {
                name: name.to_string(),
            }
        })?;

        let related = match linkage_type {
            Some(type_name) => self.registry.lookup(type_name)?,
            // An empty collection names no type; fall back to the declared target.
            None => {
                let declared = entry.schema().relationship(name).ok_or_else(|| {
                    UpsertError::UnknownRelationship {
                        type_name: entry.type_name().to_string(),
                        name: name.to_string(),
                    }
                })?;
                self.registry.lookup(&declared.target_type)?
            }
        };

        let kind = related.schema().id_field().kind;
        let ids = linkages
            .iter()
            .map(|linkage| kind.coerce(&linkage.id))
            .collect::<Result<Vec<ResourceId>, _>>()?;
        let field = relationship_field(entry, name, related.type_name())?;
        debug!(relationship = field, target = related.type_name(), count = ids.len(), "Setting relations");

        entry
            .relationship_repository(related.type_name())?
            .set_many(instance, ids, field)
            .await
            .map_err(|source| persistence_error(entry, field, source))
    }
}

fn check_type(type_name: &str, document: &RequestDocument) -> Result<(), UpsertError> {
    if document.type_name != type_name {
        return Err(UpsertError::InconsistentType {
            path: type_name.to_string(),
            body: document.type_name.clone(),
        });
    }
    Ok(())
}

fn set_attributes(
    instance: &mut dyn Resource,
    document: &RequestDocument,
    entry: &RegistryEntry,
) -> Result<(), UpsertError> {
    let Some(attributes) = &document.attributes else {
        return Ok(());
    };
    for (name, value) in attributes {
        let field = entry
            .schema()
            .attribute(name)
            .ok_or_else(|| UpsertError::UnknownAttribute {
                type_name: entry.type_name().to_string(),
                name: name.clone(),
            })?;
        field
            .set(instance, value.clone())
            .map_err(|reason| UpsertError::InvalidAttributeValue {
                type_name: entry.type_name().to_string(),
                name: name.clone(),
                reason,
            })?;
    }
    Ok(())
}

/// Finds relationship `name` on `entry` and checks that it points at `target_type`.
fn relationship_field<'a>(
    entry: &'a RegistryEntry,
    name: &str,
    target_type: &str,
) -> Result<&'a str, UpsertError> {
    let field = entry
        .schema()
        .relationship(name)
        .ok_or_else(|| UpsertError::UnknownRelationship {
            type_name: entry.type_name().to_string(),
            name: name.to_string(),
        })?;
    if field.target_type != target_type {
        return Err(UpsertError::LinkageTypeMismatch {
            name: field.name.clone(),
            expected: field.target_type.clone(),
            found: target_type.to_string(),
        });
    }
    Ok(field.name.as_str())
}

fn persistence_error(
    entry: &RegistryEntry,
    field: &str,
    source: RepositoryError,
) -> UpsertError {
    UpsertError::RelationshipPersistence {
        type_name: entry.type_name().to_string(),
        field: field.to_string(),
        source,
    }
}
