use resource_upsert::framework::{
    Linkage, RelationshipValue, RequestBody, RequestDocument, ResourceId, UpsertError,
};
use resource_upsert::lifecycle::SampleSystem;
use resource_upsert::model::{Project, Task, User};
use resource_upsert::store::LinkKey;
use serde_json::json;

/// Full end-to-end test with the real repositories and link store.
#[tokio::test]
async fn test_project_task_user_flow() {
    let system = SampleSystem::new().expect("Failed to build system");

    // Project with only attributes
    let document = RequestDocument::new("projects").with_attribute("name", "sample project");
    let project = system
        .upsert
        .build("projects", &document)
        .await
        .expect("Failed to build project")
        .downcast::<Project>()
        .expect("Not a project");
    assert_eq!(project.name, "sample project");
    assert!(project.id.is_some());

    // Task linked to project 5
    let document = RequestDocument::new("tasks")
        .with_attribute("name", "sample task")
        .with_relationship(
            "project",
            RelationshipValue::Single(Linkage::new("projects", "5")),
        );
    let task = system
        .upsert
        .build("tasks", &document)
        .await
        .expect("Failed to build task")
        .downcast::<Task>()
        .expect("Not a task");
    assert_eq!(task.name, "sample task");
    assert_eq!(task.project, Some(5));

    let task_id = task.id.expect("Task has no id");
    let linked = system
        .links
        .target(LinkKey::new(Task::TYPE, ResourceId::Long(task_id), "project"))
        .await
        .expect("Failed to read link");
    assert_eq!(linked, Some(ResourceId::Long(5)));

    // User assigned to project 5
    let document = RequestDocument::new("users")
        .with_attribute("name", "some user")
        .with_relationship(
            "assignedProjects",
            RelationshipValue::Many(vec![Linkage::new("projects", "5")]),
        );
    let user = system
        .upsert
        .build("users", &document)
        .await
        .expect("Failed to build user")
        .downcast::<User>()
        .expect("Not a user");
    assert_eq!(user.name, "some user");
    assert_eq!(user.assigned_projects.len(), 1);
    assert_eq!(user.assigned_projects, vec![5]);

    system.shutdown().await.expect("Failed to shutdown");
}

#[tokio::test]
async fn test_unregistered_type_is_rejected() {
    let system = SampleSystem::new().unwrap();

    let document = RequestDocument::new("fridges").with_attribute("brand", "Acme");
    let result = system.upsert.build("fridges", &document).await;

    assert!(matches!(result, Err(UpsertError::TypeNotFound(ref t)) if t == "fridges"));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_empty_collection_clears_assignments() {
    let system = SampleSystem::new().unwrap();

    let document = RequestDocument::new("users")
        .with_attribute("name", "idle user")
        .with_relationship("assignedProjects", RelationshipValue::Many(Vec::new()));
    let user = system
        .upsert
        .build("users", &document)
        .await
        .unwrap()
        .downcast::<User>()
        .unwrap();

    assert!(user.assigned_projects.is_empty());
    let key = LinkKey::new(User::TYPE, ResourceId::Long(user.id.unwrap()), "assignedProjects");
    assert!(system.links.targets(key).await.unwrap().is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_json_body_binds_like_builder_document() {
    let system = SampleSystem::new().unwrap();

    let document = RequestBody::parse(json!({
        "data": {
            "type": "users",
            "attributes": { "name": "Alice", "email": "alice@example.com" },
            "relationships": {
                "assignedProjects": [
                    { "type": "projects", "id": "2" },
                    { "type": "projects", "id": "1" }
                ]
            }
        }
    }))
    .unwrap();

    let user = system
        .upsert
        .build("users", &document)
        .await
        .unwrap()
        .downcast::<User>()
        .unwrap();

    assert_eq!(user.email.as_deref(), Some("alice@example.com"));
    assert_eq!(user.assigned_projects, vec![2, 1]);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_bad_identifier_discards_task() {
    let system = SampleSystem::new().unwrap();

    let document = RequestDocument::new("tasks")
        .with_attribute("name", "orphan")
        .with_relationship(
            "project",
            RelationshipValue::Single(Linkage::new("projects", "five")),
        );
    let result = system.upsert.build("tasks", &document).await;

    match result {
        Err(UpsertError::IdentifierFormat { raw, .. }) => assert_eq!(raw, "five"),
        other => panic!("Expected IdentifierFormat, got {:?}", other),
    }

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_mismatched_linkage_types_fail() {
    let system = SampleSystem::new().unwrap();

    let document = RequestDocument::new("users").with_relationship(
        "assignedProjects",
        RelationshipValue::Many(vec![
            Linkage::new("projects", "1"),
            Linkage::new("tasks", "1"),
        ]),
    );
    let result = system.upsert.build("users", &document).await;

    assert!(matches!(result, Err(UpsertError::MixedLinkageType { .. })));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_repository_rejection_is_wrapped() {
    let system = SampleSystem::new().unwrap();

    // Users only link to projects through a collection
    let document = RequestDocument::new("users").with_relationship(
        "assignedProjects",
        RelationshipValue::Single(Linkage::new("projects", "1")),
    );
    let result = system.upsert.build("users", &document).await;

    match result {
        Err(UpsertError::RelationshipPersistence { field, .. }) => {
            assert_eq!(field, "assignedProjects")
        }
        other => panic!("Expected RelationshipPersistence, got {:?}", other),
    }

    system.shutdown().await.unwrap();
}
