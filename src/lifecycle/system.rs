use crate::framework::{RegistryError, ResourceRegistry, ResourceUpsert};
use crate::model::{project_schema, task_schema, user_schema, Project, Task, User};
use crate::repositories::{TaskToProjectRepository, UserToProjectRepository};
use crate::store::{LinkStore, LinkStoreClient};
use std::sync::Arc;
use tracing::{error, info};

/// Runtime knobs for [`SampleSystem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemConfig {
    /// Capacity of the link store's request channel.
    pub link_buffer: usize,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self { link_buffer: 32 }
    }
}

/// The sample runtime: projects, tasks and users bound by one [`ResourceUpsert`].
///
/// `SampleSystem` is responsible for:
/// - **Registration**: building the schemas and the [`ResourceRegistry`] once at startup
/// - **Wiring**: handing a [`LinkStoreClient`] to every relationship repository
/// - **Lifecycle**: running the [`LinkStore`] task and stopping it on [`shutdown`](Self::shutdown)
///
/// # Example
///
/// ```ignore
/// let system = SampleSystem::new()?;
///
/// let document = RequestDocument::new("projects").with_attribute("name", json!("Apollo"));
/// let project = system.upsert.build("projects", &document).await?;
///
/// system.shutdown().await?;
/// ```
pub struct SampleSystem {
    /// Engine bound to the sample registry.
    pub upsert: ResourceUpsert,

    /// Client for reading back the links recorded by the repositories.
    pub links: LinkStoreClient,

    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl SampleSystem {
    /// Creates the system with [`SystemConfig::default`]. Must run inside a Tokio runtime.
    pub fn new() -> Result<Self, RegistryError> {
        Self::with_config(SystemConfig::default())
    }

    pub fn with_config(config: SystemConfig) -> Result<Self, RegistryError> {
        let (store, links) = LinkStore::new(config.link_buffer);

        // Registry first, so a registration error leaves nothing running.
        let registry = ResourceRegistry::builder()
            .register(project_schema()?)
            .register(task_schema()?)
            .register(user_schema()?)
            .relationship_repository(
                Task::TYPE,
                Project::TYPE,
                Arc::new(TaskToProjectRepository::new(links.clone())),
            )
            .relationship_repository(
                User::TYPE,
                Project::TYPE,
                Arc::new(UserToProjectRepository::new(links.clone())),
            )
            .build()?;

        let store_handle = tokio::spawn(store.run());
        info!(link_buffer = config.link_buffer, "Sample system started");

        Ok(Self {
            upsert: ResourceUpsert::new(Arc::new(registry)),
            links,
            handles: vec![store_handle],
        })
    }

    /// Stops the link store once every outstanding client is gone.
    ///
    /// Repositories hold their own store clients, so the engine (and with it the registry) is
    /// dropped before the handles are awaited. Clones of [`upsert`](Self::upsert) or
    /// [`links`](Self::links) held elsewhere keep the store alive until they are dropped too.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.upsert);
        drop(self.links);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Link store task failed: {:?}", e);
                return Err(format!("Link store task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_channel_capacity() {
        assert_eq!(SystemConfig::default().link_buffer, 32);
    }

    #[tokio::test]
    async fn registers_sample_types() {
        let system = SampleSystem::with_config(SystemConfig { link_buffer: 4 }).unwrap();

        let registry = system.upsert.registry();
        assert_eq!(registry.len(), 3);
        assert!(registry.contains(Project::TYPE));
        assert!(registry.contains(Task::TYPE));
        assert!(registry.contains(User::TYPE));

        system.shutdown().await.unwrap();
    }
}
