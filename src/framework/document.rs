//! # Request Documents
//!
//! The parsed form of a JSON:API resource object, as handed over by the deserializing layer.
//! Attribute values arrive already typed as JSON values; relationship values are resolved into
//! [`RelationshipValue`] once, at parse time.
//!
//! ```rust
//! use resource_upsert::framework::{RelationshipValue, RequestBody};
//!
//! let body: RequestBody = serde_json::from_str(r#"{
//!     "data": {
//!         "type": "tasks",
//!         "attributes": { "name": "sample task" },
//!         "relationships": { "project": { "type": "projects", "id": "5" } }
//!     }
//! }"#).unwrap();
//!
//! let document = body.into_document().unwrap();
//! assert_eq!(document.type_name, "tasks");
//! assert!(matches!(
//!     document.relationships.unwrap()["project"],
//!     RelationshipValue::Single(_)
//! ));
//! ```

use crate::framework::error::UpsertError;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Attribute bag: name to already-typed value. Iteration order carries no meaning.
pub type Attributes = HashMap<String, Value>;

/// Relationship bag: name to linkage(s).
pub type Relationships = HashMap<String, RelationshipValue>;

/// A top-level request body. `data` may be absent on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestBody {
    #[serde(default)]
    pub data: Option<RequestDocument>,
}

impl RequestBody {
    /// Parses a JSON request body and returns its `data` member.
    ///
    /// A body that does not match the document shape fails with
    /// [`MalformedBody`](UpsertError::MalformedBody); one without `data` fails with
    /// [`MissingData`](UpsertError::MissingData).
    pub fn parse(body: Value) -> Result<RequestDocument, UpsertError> {
        serde_json::from_value::<RequestBody>(body)?.into_document()
    }

    pub fn into_document(self) -> Result<RequestDocument, UpsertError> {
        self.data.ok_or(UpsertError::MissingData)
    }
}

/// One resource object: its declared type plus optional attributes and relationships.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RequestDocument {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub attributes: Option<Attributes>,
    #[serde(default)]
    pub relationships: Option<Relationships>,
}

impl RequestDocument {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            attributes: None,
            relationships: None,
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn with_relationship(mut self, name: impl Into<String>, value: RelationshipValue) -> Self {
        self.relationships
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value);
        self
    }
}

/// A reference to another resource by type name and wire-format identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct Linkage {
    #[serde(rename = "type")]
    pub type_name: String,
    pub id: String,
}

impl Linkage {
    pub fn new(type_name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            id: id.into(),
        }
    }
}

/// The value of one relationship entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RelationshipValue {
    Single(Linkage),
    Many(Vec<Linkage>),
}

impl RelationshipValue {
    /// The one target type shared by every linkage, `Ok(None)` for an empty collection.
    /// A collection mixing types yields the offending type names.
    pub fn linkage_type(&self) -> Result<Option<&str>, Vec<&str>> {
        match self {
            RelationshipValue::Single(linkage) => Ok(Some(linkage.type_name.as_str())),
            RelationshipValue::Many(linkages) => {
                let mut types: Vec<&str> = linkages.iter().map(|l| l.type_name.as_str()).collect();
                types.dedup();
                match types.len() {
                    0 => Ok(None),
                    1 => Ok(Some(types[0])),
                    _ => {
                        types.sort_unstable();
                        types.dedup();
                        Err(types)
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_data_is_rejected() {
        let body: RequestBody = serde_json::from_str("{}").unwrap();
        assert!(matches!(body.into_document(), Err(UpsertError::MissingData)));
    }

    #[test]
    fn null_relationship_is_malformed_not_missing() {
        let body = serde_json::json!({
            "data": {
                "type": "tasks",
                "attributes": { "name": "x" },
                "relationships": { "project": null }
            }
        });

        match RequestBody::parse(body) {
            Err(err @ UpsertError::MalformedBody(_)) => {
                assert!(err.to_string().starts_with("Malformed request body"));
            }
            other => panic!("expected MalformedBody, got {other:?}"),
        }
    }

    #[test]
    fn parse_without_data_is_missing_data() {
        let result = RequestBody::parse(serde_json::json!({ "meta": {} }));
        assert!(matches!(result, Err(UpsertError::MissingData)));
    }

    #[test]
    fn to_many_relationship_parses_as_collection() {
        let document: RequestDocument = serde_json::from_str(
            r#"{
                "type": "users",
                "relationships": {
                    "assignedProjects": [
                        { "type": "projects", "id": "5" },
                        { "type": "projects", "id": "6" }
                    ]
                }
            }"#,
        )
        .unwrap();

        let relationships = document.relationships.unwrap();
        let value = &relationships["assignedProjects"];
        assert_eq!(
            value,
            &RelationshipValue::Many(vec![
                Linkage::new("projects", "5"),
                Linkage::new("projects", "6"),
            ])
        );
        assert_eq!(value.linkage_type(), Ok(Some("projects")));
    }

    #[test]
    fn mixed_collection_reports_each_type_once() {
        let value = RelationshipValue::Many(vec![
            Linkage::new("projects", "1"),
            Linkage::new("tasks", "2"),
            Linkage::new("projects", "3"),
        ]);
        assert_eq!(value.linkage_type(), Err(vec!["projects", "tasks"]));
    }

    #[test]
    fn empty_collection_has_no_linkage_type() {
        assert_eq!(RelationshipValue::Many(Vec::new()).linkage_type(), Ok(None));
    }

    #[test]
    fn builder_collects_attributes() {
        let document = RequestDocument::new("projects").with_attribute("name", "sample project");
        assert_eq!(
            document.attributes.unwrap()["name"],
            Value::String("sample project".into())
        );
        assert!(document.relationships.is_none());
    }
}
