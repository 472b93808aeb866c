//! Generic binding engine for JSON:API-style resource documents.
//!
//! # Main Components
//!
//! - [`ResourceSchema`] / [`SchemaBuilder`] - Per-type binding metadata
//! - [`ResourceRegistry`] - Immutable lookup of schemas and relationship repositories by type name
//! - [`IdKind`] - Identifier coercion from wire strings
//! - [`RelationshipRepository`] - Contract for linking an owner to related resources
//! - [`ResourceUpsert`] - The engine that binds a [`RequestDocument`] onto a new instance
//! - [`UpsertError`] / [`RegistryError`] - Error taxonomy
//!
//! # Testing
//!
//! See [`mock`] for a repository double that records calls and replays queued responses.

pub mod document;
pub mod error;
pub mod identifier;
pub mod mock;
pub mod registry;
pub mod repository;
pub mod resource;
pub mod schema;
pub mod upsert;

pub use document::{Attributes, Linkage, RelationshipValue, Relationships, RequestBody, RequestDocument};
pub use error::{ErrorData, ErrorSource, RegistryError, RepositoryError, UpsertError};
pub use identifier::{IdKind, ResourceId};
pub use registry::{RegistryBuilder, RegistryEntry, ResourceRegistry};
pub use repository::RelationshipRepository;
pub use resource::Resource;
pub use schema::{AttributeField, Cardinality, IdField, RelationshipField, ResourceSchema, SchemaBuilder};
pub use upsert::ResourceUpsert;
