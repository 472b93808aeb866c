//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter whose level comes from
//! `RUST_LOG`.
//!
//! ## Usage Examples
//!
//! ```bash
//! # Bound resources and shutdown only
//! RUST_LOG=info cargo run
//!
//! # Full request documents and every link-store request
//! RUST_LOG=debug cargo run
//!
//! # Only the engine
//! RUST_LOG=resource_upsert::framework=debug cargo run
//! ```
//!
//! ## What Gets Traced
//!
//! - **Binding**: one `build_and_bind` or `apply` span per call, carrying the type name
//! - **Payloads**: the request document, logged once at `debug` on entry
//! - **Outcome**: `Resource bound` with the new id and counts, or `Build failed` with `error`
//! - **Repositories**: `set_one` / `set_many` spans with the owner's `entity_type`
//! - **Link store**: startup, each request at `debug`, and the final link count on shutdown
//!
//! With `RUST_LOG=debug` a task linked to a project looks like:
//!
//! ```text
//! DEBUG build_and_bind{type_name="tasks"}: build_and_bind called document=RequestDocument { .. }
//! DEBUG Set key=tasks/1/project targets=[Long(1)]
//! DEBUG build_and_bind{type_name="tasks"}:set_one{..}: Task linked to project task_id=1 project_id=1
//! INFO build_and_bind{type_name="tasks"}: Resource bound type_name="tasks" id=Some(Long(1)) attributes=1 relationships=1
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
