//! In-memory link store for the sample relationship repositories.
//!
//! A [`LinkStore`] task owns a map from [`LinkKey`] to target ids and is driven through a
//! [`LinkStoreClient`] over a bounded channel, with one-shot replies per request.

pub mod actor;
pub mod client;
pub mod message;

pub use actor::LinkStore;
pub use client::{LinkStoreClient, StoreError};
pub use message::{LinkKey, LinkRequest};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::ResourceId;

    fn key(field: &str) -> LinkKey {
        LinkKey::new("users", ResourceId::Long(1), field)
    }

    #[tokio::test]
    async fn set_then_read_back_in_order() {
        let (store, client) = LinkStore::new(8);
        let handle = tokio::spawn(store.run());

        let targets = vec![ResourceId::Long(3), ResourceId::Long(1)];
        client.set(key("assignedProjects"), targets.clone()).await.unwrap();

        assert_eq!(client.targets(key("assignedProjects")).await.unwrap(), targets);
        assert_eq!(
            client.target(key("assignedProjects")).await.unwrap(),
            Some(ResourceId::Long(3))
        );

        drop(client);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn empty_set_clears_slot() {
        let (store, client) = LinkStore::new(8);
        let handle = tokio::spawn(store.run());

        client.set(key("project"), vec![ResourceId::Long(2)]).await.unwrap();
        client.set(key("project"), Vec::new()).await.unwrap();

        assert_eq!(client.target(key("project")).await.unwrap(), None);

        drop(client);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn unknown_key_is_empty() {
        let (store, client) = LinkStore::new(8);
        let handle = tokio::spawn(store.run());

        assert!(client.targets(key("nothing")).await.unwrap().is_empty());

        drop(client);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn closed_store_reports_closed() {
        let (store, client) = LinkStore::new(8);
        drop(store);

        let result = client.set(key("project"), vec![ResourceId::Long(1)]).await;
        assert_eq!(result, Err(StoreError::Closed));
    }
}
