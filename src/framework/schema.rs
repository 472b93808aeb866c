//! # Resource Schemas
//!
//! A [`ResourceSchema`] is the per-type metadata the engine binds against: how to construct an
//! instance, which field holds the identifier, and which attribute and relationship names exist.
//!
//! Schemas are assembled once at startup with a typed [`SchemaBuilder<T>`]. Field setters are
//! ordinary closures over `&mut T`, so every name-based lookup at request time ends in a
//! compile-checked assignment instead of a reflective one.
//!
//! ```rust
//! use resource_upsert::framework::{IdKind, ResourceId, SchemaBuilder};
//!
//! #[derive(Debug, Default)]
//! struct Project { id: Option<i64>, name: String }
//!
//! let schema = SchemaBuilder::<Project>::new("projects")
//!     .default_constructor()
//!     .id("id", IdKind::Long, |p: &Project| p.id.map(ResourceId::Long))
//!     .attribute("name", |p: &mut Project, name: String| p.name = name)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(schema.type_name(), "projects");
//! assert!(schema.attribute("name").is_some());
//! ```

use crate::framework::error::RegistryError;
use crate::framework::identifier::{IdKind, ResourceId};
use crate::framework::resource::{short_type_name, Resource};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::marker::PhantomData;

type Constructor = Box<dyn Fn() -> Result<Box<dyn Resource>, String> + Send + Sync>;
type AttributeSetter = Box<dyn Fn(&mut dyn Resource, Value) -> Result<(), String> + Send + Sync>;
type IdGetter = Box<dyn Fn(&dyn Resource) -> Option<ResourceId> + Send + Sync>;

/// Whether a relationship holds one related resource or many.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    ToOne,
    ToMany,
}

/// The identifier field of a resource type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdField {
    pub name: String,
    pub kind: IdKind,
}

/// A named, settable attribute.
pub struct AttributeField {
    name: String,
    setter: AttributeSetter,
}

impl AttributeField {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Assigns `value` to this field on `instance`.
    ///
    /// The value is converted only as far as the field's own type demands; a value of the wrong
    /// shape (or an instance of the wrong type) is rejected with a reason.
    pub fn set(&self, instance: &mut dyn Resource, value: Value) -> Result<(), String> {
        (self.setter)(instance, value)
    }
}

impl std::fmt::Debug for AttributeField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttributeField")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A named relationship and the resource type it points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipField {
    pub name: String,
    pub target_type: String,
    pub cardinality: Cardinality,
}

/// Binding metadata for one resource type.
pub struct ResourceSchema {
    type_name: String,
    rust_type: &'static str,
    constructor: Option<Constructor>,
    id_field: IdField,
    id_getter: IdGetter,
    attributes: HashMap<String, AttributeField>,
    relationships: HashMap<String, RelationshipField>,
}

impl ResourceSchema {
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Short name of the Rust type behind this schema, for diagnostics.
    pub fn rust_type(&self) -> &'static str {
        self.rust_type
    }

    pub fn id_field(&self) -> &IdField {
        &self.id_field
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeField> {
        self.attributes.get(name)
    }

    pub fn relationship(&self, name: &str) -> Option<&RelationshipField> {
        self.relationships.get(name)
    }

    pub fn relationships(&self) -> impl Iterator<Item = &RelationshipField> {
        self.relationships.values()
    }

    /// Creates a fresh instance, or explains why none can be made.
    pub fn instantiate(&self) -> Result<Box<dyn Resource>, String> {
        match &self.constructor {
            Some(construct) => construct(),
            None => Err(format!("{} has no constructor", self.rust_type)),
        }
    }

    /// Reads the identifier of `instance`, if it is of this schema's type and has one.
    pub fn id_of(&self, instance: &dyn Resource) -> Option<ResourceId> {
        (self.id_getter)(instance)
    }
}

impl std::fmt::Debug for ResourceSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut attributes: Vec<_> = self.attributes.keys().collect();
        attributes.sort();
        f.debug_struct("ResourceSchema")
            .field("type_name", &self.type_name)
            .field("rust_type", &self.rust_type)
            .field("id_field", &self.id_field)
            .field("attributes", &attributes)
            .field("relationships", &self.relationships)
            .finish_non_exhaustive()
    }
}

/// Typed builder for a [`ResourceSchema`].
pub struct SchemaBuilder<T: Resource> {
    type_name: String,
    constructor: Option<Constructor>,
    id: Option<(IdField, IdGetter)>,
    attributes: HashMap<String, AttributeField>,
    relationships: HashMap<String, RelationshipField>,
    duplicate: Option<String>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Resource> SchemaBuilder<T> {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            constructor: None,
            id: None,
            attributes: HashMap::new(),
            relationships: HashMap::new(),
            duplicate: None,
            _marker: PhantomData,
        }
    }

    /// Uses `construct` to create new instances. It may refuse, e.g. when an id pool is exhausted.
    pub fn constructor<F>(mut self, construct: F) -> Self
    where
        F: Fn() -> Result<T, String> + Send + Sync + 'static,
    {
        self.constructor = Some(Box::new(move || {
            construct().map(|instance| Box::new(instance) as Box<dyn Resource>)
        }));
        self
    }

    /// Declares the identifier field. Required.
    pub fn id<G>(mut self, name: impl Into<String>, kind: IdKind, getter: G) -> Self
    where
        G: Fn(&T) -> Option<ResourceId> + Send + Sync + 'static,
    {
        let field = IdField {
            name: name.into(),
            kind,
        };
        let getter: IdGetter =
            Box::new(move |instance: &dyn Resource| instance.downcast_ref::<T>().and_then(&getter));
        self.id = Some((field, getter));
        self
    }

    /// Declares an attribute whose value deserializes into `V`.
    pub fn attribute<V, S>(mut self, name: impl Into<String>, setter: S) -> Self
    where
        V: DeserializeOwned,
        S: Fn(&mut T, V) + Send + Sync + 'static,
    {
        let name = name.into();
        let setter: AttributeSetter = Box::new(move |instance: &mut dyn Resource, value: Value| {
            let target = instance
                .downcast_mut::<T>()
                .ok_or_else(|| format!("instance is not a {}", short_type_name::<T>()))?;
            let value = serde_json::from_value::<V>(value).map_err(|e| e.to_string())?;
            setter(target, value);
            Ok(())
        });
        self.note_duplicate(&name);
        self.attributes
            .insert(name.clone(), AttributeField { name, setter });
        self
    }

    /// Declares a relationship to a single resource of `target_type`.
    pub fn to_one(self, name: impl Into<String>, target_type: impl Into<String>) -> Self {
        self.relationship(name.into(), target_type.into(), Cardinality::ToOne)
    }

    /// Declares a relationship to a collection of resources of `target_type`.
    pub fn to_many(self, name: impl Into<String>, target_type: impl Into<String>) -> Self {
        self.relationship(name.into(), target_type.into(), Cardinality::ToMany)
    }

    fn relationship(mut self, name: String, target_type: String, cardinality: Cardinality) -> Self {
        self.note_duplicate(&name);
        self.relationships.insert(
            name.clone(),
            RelationshipField {
                name,
                target_type,
                cardinality,
            },
        );
        self
    }

    fn note_duplicate(&mut self, name: &str) {
        let taken = self.attributes.contains_key(name) || self.relationships.contains_key(name);
        if taken && self.duplicate.is_none() {
            self.duplicate = Some(name.to_string());
        }
    }

    pub fn build(self) -> Result<ResourceSchema, RegistryError> {
        if let Some(field) = self.duplicate {
            return Err(RegistryError::DuplicateField {
                type_name: self.type_name,
                field,
            });
        }
        let (id_field, id_getter) = self
            .id
            .ok_or_else(|| RegistryError::MissingIdentifier(self.type_name.clone()))?;
        Ok(ResourceSchema {
            type_name: self.type_name,
            rust_type: short_type_name::<T>(),
            constructor: self.constructor,
            id_field,
            id_getter,
            attributes: self.attributes,
            relationships: self.relationships,
        })
    }
}

impl<T: Resource + Default> SchemaBuilder<T> {
    /// Creates new instances with `T::default()`.
    pub fn default_constructor(self) -> Self {
        self.constructor(|| Ok(T::default()))
    }
}
