//! Action documents and the edit-operation tree.
//!
//! Every request to the server is a JSON array of actions. An action is a
//! session marker, a query, or an edit of one existing entity. Edits carry a
//! tree of operations that clear collections, add elements to collections,
//! and set properties on the element being configured.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Identity, TypedValue};

/// One top-level request unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "Action")]
pub enum Action {
    BeginSession,
    EndSession,
    Query(Query),
    Edit(Edit),
}

/// A single-query lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Query {
    pub query_type: String,
    pub domain_type: String,
    #[serde(default)]
    pub args: Vec<TypedValue>,
    /// Nested relationships to expand in the response.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub load: Vec<Load>,
}

/// A relationship expansion request, optionally nested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Load {
    pub relationship: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub load: Vec<Load>,
}

impl Load {
    pub fn new(relationship: impl Into<String>) -> Self {
        Self {
            relationship: relationship.into(),
            load: Vec::new(),
        }
    }

    #[must_use]
    pub fn with(mut self, nested: Load) -> Self {
        self.load.push(nested);
        self
    }
}

/// A mutation of one existing server entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Edit {
    #[serde(rename = "Type")]
    pub type_name: String,
    pub identity: Identity,
    pub operations: Vec<Operation>,
}

/// A node in an edit tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "__operation")]
pub enum Operation {
    /// Removes every element of a collection on the edited entity.
    CollectionClear {
        #[serde(rename = "Collection")]
        collection: String,
    },
    /// Appends a new element; child operations configure it.
    CollectionAdd {
        #[serde(rename = "Collection")]
        collection: String,
        #[serde(rename = "Operations", default)]
        operations: Vec<Operation>,
    },
    /// Assigns named properties on the element being configured.
    SetProperties {
        #[serde(flatten)]
        properties: BTreeMap<String, TypedValue>,
    },
    Submit,
}

impl Operation {
    pub fn clear(collection: impl Into<String>) -> Self {
        Self::CollectionClear {
            collection: collection.into(),
        }
    }

    pub fn add(collection: impl Into<String>, operations: Vec<Self>) -> Self {
        Self::CollectionAdd {
            collection: collection.into(),
            operations,
        }
    }

    pub fn set<K, I>(properties: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, TypedValue)>,
    {
        Self::SetProperties {
            properties: properties
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }

    /// Returns true for a `CollectionClear` of the named collection.
    pub fn is_clear_of(&self, name: &str) -> bool {
        matches!(self, Self::CollectionClear { collection } if collection == name)
    }

    /// Returns the children of a `CollectionAdd` into the named collection.
    pub fn added_to(&self, name: &str) -> Option<&[Self]> {
        match self {
            Self::CollectionAdd {
                collection,
                operations,
            } if collection == name => Some(operations),
            _ => None,
        }
    }

    /// Returns the assigned value of a property, if this sets it.
    pub fn property(&self, name: &str) -> Option<&TypedValue> {
        match self {
            Self::SetProperties { properties } => properties.get(name),
            _ => None,
        }
    }
}
