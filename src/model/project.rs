use crate::framework::{IdKind, RegistryError, ResourceId, ResourceSchema, SchemaBuilder};
use serde::Serialize;
use std::sync::atomic::{AtomicI64, Ordering};

/// A project that tasks belong to and users are assigned to.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Project {
    pub id: Option<i64>,
    pub name: String,
}

impl Project {
    pub const TYPE: &'static str = "projects";

    /// Creates a new Project instance.
    ///
    /// # Arguments
    /// * `id` - Unique identifier
    /// * `name` - Project name
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
        }
    }
}

pub fn project_schema() -> Result<ResourceSchema, RegistryError> {
    let next_id = AtomicI64::new(1);
    SchemaBuilder::<Project>::new(Project::TYPE)
        .constructor(move || {
            Ok(Project {
                id: Some(next_id.fetch_add(1, Ordering::SeqCst)),
                ..Project::default()
            })
        })
        .id("id", IdKind::Long, |p: &Project| p.id.map(ResourceId::Long))
        .attribute("name", |p: &mut Project, name: String| p.name = name)
        .build()
}
