use crate::framework::ResourceId;
use crate::store::{LinkKey, LinkRequest};
use tokio::sync::{mpsc, oneshot};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum StoreError {
    #[error("Link store closed")]
    Closed,
    #[error("Link store dropped response channel")]
    Dropped,
}

/// Cloneable handle to a running [`LinkStore`](crate::store::LinkStore).
#[derive(Debug, Clone)]
pub struct LinkStoreClient {
    sender: mpsc::Sender<LinkRequest>,
}

impl LinkStoreClient {
    pub fn new(sender: mpsc::Sender<LinkRequest>) -> Self {
        Self { sender }
    }

    pub async fn set(&self, key: LinkKey, targets: Vec<ResourceId>) -> Result<(), StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(LinkRequest::Set {
                key,
                targets,
                respond_to,
            })
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Dropped)?
    }

    /// All targets recorded under `key`, in the order they were set.
    pub async fn targets(&self, key: LinkKey) -> Result<Vec<ResourceId>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(LinkRequest::Get { key, respond_to })
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Dropped)?
    }

    /// The single target of a to-one slot, if any.
    pub async fn target(&self, key: LinkKey) -> Result<Option<ResourceId>, StoreError> {
        Ok(self.targets(key).await?.into_iter().next())
    }
}
