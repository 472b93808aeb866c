use crate::framework::{IdKind, RegistryError, ResourceId, ResourceSchema, SchemaBuilder};
use crate::model::Project;
use serde::Serialize;
use std::sync::atomic::{AtomicI64, Ordering};

/// A user who can be assigned to any number of projects.
///
/// # Relationships
/// - `assignedProjects`: ordered project ids, written by
///   [`UserToProjectRepository`](crate::repositories::UserToProjectRepository)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct User {
    pub id: Option<i64>,
    pub name: String,
    pub email: Option<String>,
    pub assigned_projects: Vec<i64>,
}

impl User {
    pub const TYPE: &'static str = "users";
    pub const ASSIGNED_PROJECTS: &'static str = "assignedProjects";
}

pub fn user_schema() -> Result<ResourceSchema, RegistryError> {
    let next_id = AtomicI64::new(1);
    SchemaBuilder::<User>::new(User::TYPE)
        .constructor(move || {
            Ok(User {
                id: Some(next_id.fetch_add(1, Ordering::SeqCst)),
                ..User::default()
            })
        })
        .id("id", IdKind::Long, |u: &User| u.id.map(ResourceId::Long))
        .attribute("name", |u: &mut User, name: String| u.name = name)
        .attribute("email", |u: &mut User, email: Option<String>| u.email = email)
        .to_many(User::ASSIGNED_PROJECTS, Project::TYPE)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn constructor_hands_out_increasing_ids() {
        let schema = user_schema().unwrap();
        let first = schema.instantiate().unwrap();
        let second = schema.instantiate().unwrap();

        assert_eq!(schema.id_of(&*first), Some(ResourceId::Long(1)));
        assert_eq!(schema.id_of(&*second), Some(ResourceId::Long(2)));
    }

    #[test]
    fn email_accepts_null() {
        let schema = user_schema().unwrap();
        let mut user = schema.instantiate().unwrap();
        let email = schema.attribute("email").unwrap();

        email.set(&mut *user, json!("a@example.com")).unwrap();
        email.set(&mut *user, json!(null)).unwrap();

        assert_eq!(user.downcast_ref::<User>().unwrap().email, None);
    }
}
