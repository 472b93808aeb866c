//! Demo: bind a project, a task that belongs to it, and a user assigned to it.
//!
//! Documents arrive as JSON:API request bodies and go through [`ResourceUpsert`] with no
//! per-type binding code. Run with `RUST_LOG=info` (or `debug`) to follow each binding.

use resource_upsert::framework::{
    ErrorData, RequestBody, Resource, ResourceId, ResourceUpsert, UpsertError,
};
use resource_upsert::lifecycle::{setup_tracing, SampleSystem};
use resource_upsert::model::{Project, Task, User};
use resource_upsert::store::LinkKey;
use serde_json::json;
use tracing::{info, warn, Instrument};

async fn upsert_json(
    upsert: &ResourceUpsert,
    type_name: &str,
    body: serde_json::Value,
) -> Result<Box<dyn Resource>, UpsertError> {
    let document = RequestBody::parse(body)?;
    upsert.build(type_name, &document).await
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    info!("Starting sample system");
    let system = SampleSystem::new().map_err(|e| e.to_string())?;

    let span = tracing::info_span!("project_creation");
    let project = async {
        upsert_json(
            &system.upsert,
            Project::TYPE,
            json!({ "data": { "type": "projects", "attributes": { "name": "Apollo" } } }),
        )
        .await
        .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;
    let project_id = project
        .downcast_ref::<Project>()
        .and_then(|p| p.id)
        .ok_or("project has no id")?;
    info!(project_id, "Project created");

    let task = upsert_json(
        &system.upsert,
        Task::TYPE,
        json!({ "data": {
            "type": "tasks",
            "attributes": { "name": "Launch" },
            "relationships": { "project": { "type": "projects", "id": project_id.to_string() } }
        } }),
    )
    .instrument(tracing::info_span!("task_creation"))
    .await
    .map_err(|e| e.to_string())?;
    let task = task.downcast::<Task>().ok_or("not a task")?;
    info!(task_id = ?task.id, project = ?task.project, "Task created");

    let user = upsert_json(
        &system.upsert,
        User::TYPE,
        json!({ "data": {
            "type": "users",
            "attributes": { "name": "Alice", "email": "alice@example.com" },
            "relationships": {
                "assignedProjects": [ { "type": "projects", "id": project_id.to_string() } ]
            }
        } }),
    )
    .instrument(tracing::info_span!("user_creation"))
    .await
    .map_err(|e| e.to_string())?;
    let user = user.downcast::<User>().ok_or("not a user")?;
    info!(user_id = ?user.id, assigned = ?user.assigned_projects, "User created");

    if let Some(task_id) = task.id {
        let key = LinkKey::new(Task::TYPE, ResourceId::Long(task_id), Task::PROJECT);
        let linked = system.links.target(key).await.map_err(|e| e.to_string())?;
        info!(task_id, ?linked, "Recorded link");
    }

    // Rejected: the body names a different type than the path.
    let mismatch = upsert_json(
        &system.upsert,
        Task::TYPE,
        json!({ "data": { "type": "projects", "attributes": { "name": "Gemini" } } }),
    )
    .await;
    if let Err(e) = mismatch {
        let rendered = serde_json::to_string(&ErrorData::from(&e)).map_err(|e| e.to_string())?;
        warn!(error = %rendered, "Rejected document");
    }

    system.shutdown().await?;
    info!("Application completed successfully");
    Ok(())
}
