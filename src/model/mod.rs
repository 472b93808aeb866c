//! Sample domain types and their binding schemas.
//!
//! Each type exposes `TYPE` (its resource type name) and a `schema()` function. Constructors hand
//! out identifiers from a per-type counter, so a freshly built instance already has its id.

pub mod project;
pub mod task;
pub mod user;

pub use project::*;
pub use task::*;
pub use user::*;
