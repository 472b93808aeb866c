//! # Upsert Errors
//!
//! Two error families live here:
//!
//! - [`UpsertError`] is returned by every request-time operation (lookup, coercion, binding).
//!   Any of its variants aborts the whole binding call; the partially bound instance is dropped.
//! - [`RegistryError`] is returned while the registry is being assembled at startup.
//!
//! [`ErrorData`] turns an [`UpsertError`] into a JSON:API error object for the surrounding layer.

use crate::framework::identifier::IdKind;
use serde::Serialize;

/// Error type produced by relationship repositories.
pub type RepositoryError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while binding a request document onto a resource.
#[derive(Debug, thiserror::Error)]
pub enum UpsertError {
    #[error("Resource type not found: {0}")]
    TypeNotFound(String),

    #[error("Inconsistent type definition between path and body: body type: {body}, request type: {path}")]
    InconsistentType { path: String, body: String },

    #[error("Cannot instantiate resource of type {type_name}: {reason}")]
    Instantiation { type_name: String, reason: String },

    #[error("Unknown attribute {name} on resource type {type_name}")]
    UnknownAttribute { type_name: String, name: String },

    #[error("Invalid value for attribute {name} on resource type {type_name}: {reason}")]
    InvalidAttributeValue {
        type_name: String,
        name: String,
        reason: String,
    },

    #[error("Unknown relationship {name} on resource type {type_name}")]
    UnknownRelationship { type_name: String, name: String },

    #[error("Not all types are the same for linkage: {name}")]
    MixedLinkageType { name: String },

    #[error("Relationship {name} links to {expected}, not {found}")]
    LinkageTypeMismatch {
        name: String,
        expected: String,
        found: String,
    },

    #[error("Identifier {raw:?} is not a valid {kind} identifier: {reason}")]
    IdentifierFormat {
        raw: String,
        kind: IdKind,
        reason: String,
    },

    #[error("No relationship repository on {owner} for related type {target}")]
    RepositoryNotFound { owner: String, target: String },

    #[error("Relationship {field} on {type_name} could not be saved: {source}")]
    RelationshipPersistence {
        type_name: String,
        field: String,
        #[source]
        source: RepositoryError,
    },

    #[error("No data field in the body")]
    MissingData,

    #[error("Malformed request body: {0}")]
    MalformedBody(#[from] serde_json::Error),
}

/// Errors raised while registering resource types.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RegistryError {
    #[error("Resource type registered twice: {0}")]
    DuplicateType(String),

    #[error("Field {field} declared twice on resource type {type_name}")]
    DuplicateField { type_name: String, field: String },

    #[error("Resource type {0} has no identifier field")]
    MissingIdentifier(String),

    #[error("Resource type {type_name} referenced by {referenced_by} is not registered")]
    UnknownType {
        referenced_by: String,
        type_name: String,
    },
}

/// A JSON:API error object describing a failed binding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorData {
    pub title: &'static str,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<ErrorSource>,
}

/// Points at the document member that caused an [`ErrorData`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorSource {
    pub pointer: String,
}

impl ErrorData {
    fn pointing_at(title: &'static str, detail: String, pointer: String) -> Self {
        Self {
            title,
            detail,
            source: Some(ErrorSource { pointer }),
        }
    }
}

impl From<&UpsertError> for ErrorData {
    fn from(err: &UpsertError) -> Self {
        let detail = err.to_string();
        match err {
            UpsertError::TypeNotFound(_) => Self {
                title: "Resource not found",
                detail,
                source: None,
            },
            UpsertError::InconsistentType { .. } => {
                Self::pointing_at("Inconsistent type", detail, "/data/type".into())
            }
            UpsertError::UnknownAttribute { name, .. }
            | UpsertError::InvalidAttributeValue { name, .. } => Self::pointing_at(
                "Invalid attribute",
                detail,
                format!("/data/attributes/{name}"),
            ),
            UpsertError::UnknownRelationship { name, .. }
            | UpsertError::MixedLinkageType { name }
            | UpsertError::LinkageTypeMismatch { name, .. } => Self::pointing_at(
                "Invalid relationship",
                detail,
                format!("/data/relationships/{name}"),
            ),
            UpsertError::IdentifierFormat { .. } => Self {
                title: "Invalid identifier",
                detail,
                source: None,
            },
            UpsertError::MissingData => {
                Self::pointing_at("Missing data", detail, "/data".into())
            }
            UpsertError::MalformedBody(_) => Self {
                title: "Malformed body",
                detail,
                source: None,
            },
            UpsertError::Instantiation { .. }
            | UpsertError::RepositoryNotFound { .. }
            | UpsertError::RelationshipPersistence { .. } => Self {
                title: "Resource error",
                detail,
                source: None,
            },
        }
    }
}
