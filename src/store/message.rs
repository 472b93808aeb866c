use crate::framework::ResourceId;
use crate::store::StoreError;
use std::fmt;
use tokio::sync::oneshot;

/// One relationship slot: the `field` of the resource `owner_type`/`owner_id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LinkKey {
    pub owner_type: String,
    pub owner_id: ResourceId,
    pub field: String,
}

impl LinkKey {
    pub fn new(owner_type: impl Into<String>, owner_id: ResourceId, field: impl Into<String>) -> Self {
        Self {
            owner_type: owner_type.into(),
            owner_id,
            field: field.into(),
        }
    }
}

impl fmt::Display for LinkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.owner_type, self.owner_id, self.field)
    }
}

pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Requests handled by the [`LinkStore`](crate::store::LinkStore) loop.
#[derive(Debug)]
pub enum LinkRequest {
    /// Replace the targets stored under `key`. An empty list clears the slot.
    Set {
        key: LinkKey,
        targets: Vec<ResourceId>,
        respond_to: Response<()>,
    },
    Get {
        key: LinkKey,
        respond_to: Response<Vec<ResourceId>>,
    },
}
