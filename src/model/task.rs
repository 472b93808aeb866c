use crate::framework::{IdKind, RegistryError, ResourceId, ResourceSchema, SchemaBuilder};
use crate::model::Project;
use serde::Serialize;
use std::sync::atomic::{AtomicI64, Ordering};

/// A unit of work, optionally belonging to a [`Project`].
///
/// `project` is written by [`TaskToProjectRepository`](crate::repositories::TaskToProjectRepository),
/// not by attribute binding.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Task {
    pub id: Option<i64>,
    pub name: String,
    pub project: Option<i64>,
}

impl Task {
    pub const TYPE: &'static str = "tasks";
    pub const PROJECT: &'static str = "project";
}

pub fn task_schema() -> Result<ResourceSchema, RegistryError> {
    let next_id = AtomicI64::new(1);
    SchemaBuilder::<Task>::new(Task::TYPE)
        .constructor(move || {
            Ok(Task {
                id: Some(next_id.fetch_add(1, Ordering::SeqCst)),
                ..Task::default()
            })
        })
        .id("id", IdKind::Long, |t: &Task| t.id.map(ResourceId::Long))
        .attribute("name", |t: &mut Task, name: String| t.name = name)
        .to_one(Task::PROJECT, Project::TYPE)
        .build()
}
