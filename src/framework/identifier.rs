//! # Identifier Coercion
//!
//! Linkages carry identifiers as strings. Each resource schema declares the [`IdKind`] of its
//! identifier field, and [`IdKind::coerce`] turns the wire string into a typed [`ResourceId`].
//!
//! Callers never match on the kind themselves; they take it from the target schema and call
//! `coerce`, so a new kind only needs a variant here.

use crate::framework::error::UpsertError;
use std::fmt::{self, Display};
use uuid::Uuid;

/// The semantic type of a resource's identifier field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdKind {
    /// 32-bit signed integer.
    Integer,
    /// 64-bit signed integer.
    Long,
    /// Opaque string, passed through unchanged.
    String,
    /// RFC 4122 UUID in any textual form `uuid` accepts.
    Uuid,
}

impl Display for IdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IdKind::Integer => "integer",
            IdKind::Long => "long",
            IdKind::String => "string",
            IdKind::Uuid => "uuid",
        };
        f.write_str(name)
    }
}

impl IdKind {
    /// Parses a wire-format identifier into this kind.
    pub fn coerce(self, raw: &str) -> Result<ResourceId, UpsertError> {
        let invalid = |reason: String| UpsertError::IdentifierFormat {
            raw: raw.to_string(),
            kind: self,
            reason,
        };
        match self {
            IdKind::Integer => raw
                .parse()
                .map(ResourceId::Integer)
                .map_err(|e| invalid(e.to_string())),
            IdKind::Long => raw
                .parse()
                .map(ResourceId::Long)
                .map_err(|e| invalid(e.to_string())),
            IdKind::String => Ok(ResourceId::String(raw.to_string())),
            IdKind::Uuid => Uuid::parse_str(raw)
                .map(ResourceId::Uuid)
                .map_err(|e| invalid(e.to_string())),
        }
    }
}

/// A typed resource identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResourceId {
    Integer(i32),
    Long(i64),
    String(String),
    Uuid(Uuid),
}

impl ResourceId {
    pub fn kind(&self) -> IdKind {
        match self {
            ResourceId::Integer(_) => IdKind::Integer,
            ResourceId::Long(_) => IdKind::Long,
            ResourceId::String(_) => IdKind::String,
            ResourceId::Uuid(_) => IdKind::Uuid,
        }
    }

    /// Widens integer identifiers to `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ResourceId::Integer(id) => Some(i64::from(*id)),
            ResourceId::Long(id) => Some(*id),
            _ => None,
        }
    }

    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            ResourceId::Uuid(id) => Some(*id),
            _ => None,
        }
    }
}

impl Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceId::Integer(id) => write!(f, "{id}"),
            ResourceId::Long(id) => write!(f, "{id}"),
            ResourceId::String(id) => f.write_str(id),
            ResourceId::Uuid(id) => write!(f, "{id}"),
        }
    }
}

impl From<i32> for ResourceId {
    fn from(id: i32) -> Self {
        ResourceId::Integer(id)
    }
}

impl From<i64> for ResourceId {
    fn from(id: i64) -> Self {
        ResourceId::Long(id)
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        ResourceId::String(id)
    }
}

impl From<Uuid> for ResourceId {
    fn from(id: Uuid) -> Self {
        ResourceId::Uuid(id)
    }
}
