use crate::store::StoreError;

/// Failures of the sample relationship repositories.
///
/// These surface to callers wrapped in
/// [`UpsertError::RelationshipPersistence`](crate::framework::UpsertError::RelationshipPersistence).
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SampleError {
    #[error("Repository for {expected} was handed a different resource type")]
    WrongOwner { expected: &'static str },
    #[error("Owning {0} has no id yet")]
    MissingOwnerId(&'static str),
    #[error("{owner} has no relationship field '{field}' for this repository")]
    UnsupportedField { owner: &'static str, field: String },
    #[error("Expected a numeric id, got '{0}'")]
    NonNumericId(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}
