//! Runtime wiring for the sample domain.
//!
//! - [`SampleSystem`] - Builds the registry, runs the link store and owns the engine
//! - [`SystemConfig`] - Channel sizing
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure

pub mod system;
pub mod tracing;

pub use system::*;
pub use tracing::*;
