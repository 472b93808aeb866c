//! # Mock Relationship Repository
//!
//! [`MockRelationshipRepository`] stands in for a real repository in engine tests. Queue the
//! responses you want with the fluent expectation API, run the code under test, then inspect
//! what the engine sent with [`calls`](MockRelationshipRepository::calls) and check that every
//! expectation was consumed with [`verify`](MockRelationshipRepository::verify).
//!
//! ## When to use the mock vs a real repository
//!
//! | | Mock | Real repository |
//! |---|---|---|
//! | **State** | None, only recorded calls | Real links |
//! | **Error injection** | `return_err` | Requires a failing store |
//! | **Use case** | Engine behaviour (ordering, arguments, error propagation) | End-to-end flows |
//!
//! ```rust
//! use resource_upsert::framework::mock::MockRelationshipRepository;
//! use resource_upsert::framework::{RelationshipRepository, Resource, ResourceId};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockRelationshipRepository::new();
//!     mock.expect_set_one().return_ok();
//!
//!     let mut owner: Box<dyn Resource> = Box::new(String::from("task"));
//!     mock.set_one(&mut *owner, ResourceId::Long(5), "project").await.unwrap();
//!
//!     assert_eq!(mock.calls()[0].target_ids, vec![ResourceId::Long(5)]);
//!     mock.verify();
//! }
//! ```

use crate::framework::error::RepositoryError;
use crate::framework::identifier::ResourceId;
use crate::framework::repository::RelationshipRepository;
use crate::framework::resource::Resource;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Which repository operation a call or expectation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    SetOne,
    SetMany,
}

/// One call received by the mock.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationshipCall {
    pub kind: CallKind,
    pub field_name: String,
    pub target_ids: Vec<ResourceId>,
    /// `Debug` rendering of the owner at the time of the call.
    pub owner: String,
}

struct Expectation {
    kind: CallKind,
    response: Result<(), String>,
}

/// A relationship repository that answers from a queue of expectations.
#[derive(Default)]
pub struct MockRelationshipRepository {
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
    calls: Arc<Mutex<Vec<RelationshipCall>>>,
}

impl MockRelationshipRepository {
    /// Creates a new mock with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a `set_one` call.
    pub fn expect_set_one(&self) -> ExpectationBuilder {
        ExpectationBuilder {
            kind: CallKind::SetOne,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `set_many` call.
    pub fn expect_set_many(&self) -> ExpectationBuilder {
        ExpectationBuilder {
            kind: CallKind::SetMany,
            expectations: self.expectations.clone(),
        }
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<RelationshipCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }

    fn answer(
        &self,
        kind: CallKind,
        owner: &dyn Resource,
        target_ids: Vec<ResourceId>,
        field_name: &str,
    ) -> Result<(), RepositoryError> {
        self.calls.lock().unwrap().push(RelationshipCall {
            kind,
            field_name: field_name.to_string(),
            target_ids,
            owner: format!("{owner:?}"),
        });

        let expectation = self.expectations.lock().unwrap().pop_front();
        match expectation {
            Some(Expectation {
                kind: expected,
                response,
            }) if expected == kind => response.map_err(RepositoryError::from),
            Some(Expectation { kind: expected, .. }) => {
                panic!("Unexpected {kind:?} call on {field_name}, expected {expected:?}")
            }
            None => panic!("Unexpected {kind:?} call on {field_name}, no expectation left"),
        }
    }
}

#[async_trait]
impl RelationshipRepository for MockRelationshipRepository {
    async fn set_one(
        &self,
        owner: &mut dyn Resource,
        target_id: ResourceId,
        field_name: &str,
    ) -> Result<(), RepositoryError> {
        self.answer(CallKind::SetOne, owner, vec![target_id], field_name)
    }

    async fn set_many(
        &self,
        owner: &mut dyn Resource,
        target_ids: Vec<ResourceId>,
        field_name: &str,
    ) -> Result<(), RepositoryError> {
        self.answer(CallKind::SetMany, owner, target_ids, field_name)
    }
}

/// Builder for one queued expectation.
pub struct ExpectationBuilder {
    kind: CallKind,
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
}

impl ExpectationBuilder {
    /// Sets the expectation to succeed.
    pub fn return_ok(self) {
        self.push(Ok(()));
    }

    /// Sets the expectation to fail with `message`.
    pub fn return_err(self, message: impl Into<String>) {
        self.push(Err(message.into()));
    }

    fn push(self, response: Result<(), String>) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation {
            kind: self.kind,
            response,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_calls_in_order() {
        let mock = MockRelationshipRepository::new();
        mock.expect_set_one().return_ok();
        mock.expect_set_many().return_ok();

        let mut owner: Box<dyn Resource> = Box::new(7_u32);
        mock.set_one(&mut *owner, ResourceId::Long(1), "lead")
            .await
            .unwrap();
        mock.set_many(&mut *owner, Vec::new(), "members")
            .await
            .unwrap();

        let calls = mock.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].kind, CallKind::SetOne);
        assert_eq!(calls[0].owner, "7");
        assert_eq!(calls[1].field_name, "members");
        assert!(calls[1].target_ids.is_empty());
        mock.verify();
    }

    #[tokio::test]
    async fn queued_error_is_returned() {
        let mock = MockRelationshipRepository::new();
        mock.expect_set_many().return_err("store offline");

        let mut owner: Box<dyn Resource> = Box::new(());
        let err = mock
            .set_many(&mut *owner, vec![ResourceId::Integer(1)], "members")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "store offline");
    }

    #[tokio::test]
    #[should_panic(expected = "Not all expectations were met")]
    async fn verify_panics_on_leftover_expectation() {
        let mock = MockRelationshipRepository::new();
        mock.expect_set_one().return_ok();
        mock.verify();
    }
}
