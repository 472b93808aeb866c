use crate::framework::ResourceId;
use crate::store::{LinkKey, LinkRequest, LinkStoreClient};
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Owns every recorded relationship link and serves [`LinkRequest`]s one at a time.
///
/// The map is only touched from inside [`run`](LinkStore::run), so it needs no lock.
pub struct LinkStore {
    receiver: mpsc::Receiver<LinkRequest>,
    links: HashMap<LinkKey, Vec<ResourceId>>,
}

impl LinkStore {
    pub fn new(buffer_size: usize) -> (Self, LinkStoreClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let store = Self {
            receiver,
            links: HashMap::new(),
        };
        (store, LinkStoreClient::new(sender))
    }

    /// Processes requests until every client is dropped.
    pub async fn run(mut self) {
        info!("Link store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                LinkRequest::Set {
                    key,
                    targets,
                    respond_to,
                } => {
                    debug!(%key, ?targets, "Set");
                    if targets.is_empty() {
                        self.links.remove(&key);
                    } else {
                        self.links.insert(key, targets);
                    }
                    let _ = respond_to.send(Ok(()));
                }
                LinkRequest::Get { key, respond_to } => {
                    let targets = self.links.get(&key).cloned().unwrap_or_default();
                    debug!(%key, found = targets.len(), "Get");
                    let _ = respond_to.send(Ok(targets));
                }
            }
        }

        info!(size = self.links.len(), "Link store shutdown");
    }
}
