#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Resource Upsert
//!
//! > **Generic binding of JSON:API-style documents onto Rust domain objects.**
//!
//! A request names a resource type and carries attributes and relationship linkages. This crate
//! turns that document into a new instance of the registered type, sets each attribute through
//! a typed setter and hands each relationship to a repository, all driven by per-type metadata
//! registered once at startup.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Schemas instead of per-type code
//! Every type is described once by a [`ResourceSchema`](framework::ResourceSchema) built from typed
//! closures ([`SchemaBuilder<T>`](framework::SchemaBuilder)). After that the engine only sees
//! `dyn Resource` and field names, so adding a type never touches the engine.
//!
//! ### Immutable registry
//! [`ResourceRegistry`](framework::ResourceRegistry) is validated and frozen by
//! [`RegistryBuilder::build`](framework::RegistryBuilder::build). It is shared through an `Arc`
//! with no locks.
//!
//! ### Mocking: Testing without Pain
//! Relationship repositories are trait objects, so tests swap in
//! [`MockRelationshipRepository`](framework::mock::MockRelationshipRepository).
//! See the [`framework::mock`] module.
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. Type-Safe Error Handling
//! Request-time failures are [`UpsertError`](framework::UpsertError), startup failures are
//! [`RegistryError`](framework::RegistryError). Repository errors travel unchanged as the
//! `source` of `RelationshipPersistence`.
//!
//! ### 2. Ordering
//! All attributes are bound before any relationship, and relationships are linked one at a time.
//!
//! ### 3. Observability
//! `tracing` spans wrap every binding; see [`lifecycle::tracing`].
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! - **Key items**: [`ResourceUpsert`](framework::ResourceUpsert),
//!   [`ResourceRegistry`](framework::ResourceRegistry), [`IdKind`](framework::IdKind),
//!   [`RelationshipRepository`](framework::RelationshipRepository).
//!
//! ### 2. The Sample Domain ([`model`], [`repositories`], [`store`])
//! Projects, tasks and users, with repositories that record links in an actor-backed store.
//!
//! ### 3. The Orchestrator ([`lifecycle`])
//! - **Key items**: [`SampleSystem`](lifecycle::SampleSystem),
//!   [`shutdown`](lifecycle::SampleSystem::shutdown).
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run the demo with info logs
//! RUST_LOG=info cargo run
//!
//! cargo test
//! ```

pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod repositories;
pub mod store;
