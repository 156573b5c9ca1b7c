//! Error types for the schema document

use thiserror::Error;

/// A stored or constructed document that breaks a structural invariant.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("Root node '{0}' is not present in the node map")]
    MissingRoot(String),

    #[error("Node stored under key '{key}' declares id '{id}'")]
    KeyMismatch { key: String, id: String },

    #[error("Leaf node '{0}' has children")]
    LeafHasChildren(String),

    #[error("Node '{parent}' references missing child '{child}'")]
    DanglingChild { parent: String, child: String },

    #[error("Node '{child}' is listed under both '{first}' and '{second}'")]
    SharedChild {
        child: String,
        first: String,
        second: String,
    },

    #[error("Root node '{0}' is listed as a child")]
    RootHasParent(String),

    #[error("Node '{0}' has no parent")]
    Orphan(String),

    #[error("Node '{0}' is not reachable from the root (cycle)")]
    Unreachable(String),

    #[error("Malformed document: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for SchemaError {
    fn from(e: serde_json::Error) -> Self {
        SchemaError::Malformed(e.to_string())
    }
}

/// Structural errors raised by tree operations. The input document is never
/// modified when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreeError {
    #[error("Parent not found: {0}")]
    ParentNotFound(String),

    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Node '{0}' is not a canvas and cannot hold children")]
    NotCanvas(String),

    #[error("Moving '{node_id}' under '{new_parent_id}' would create a cycle")]
    Cycle {
        node_id: String,
        new_parent_id: String,
    },

    #[error("Index {index} out of range (child count {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Operation not permitted on root node '{0}'")]
    RootNode(String),

    #[error("Node id already in use: {0}")]
    DuplicateId(String),

    #[error("Inserted node '{0}' must not reference children; use insert_fragment")]
    DanglingChildren(String),

    #[error("Invalid fragment: {0}")]
    InvalidFragment(#[from] SchemaError),
}
