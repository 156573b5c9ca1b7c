//! # Parchment Schema
//!
//! The page composition tree: a flat, serializable arena of nodes plus the pure
//! structural operations the editor performs on it.
//!
//! ```rust
//! use parchment_schema::{Document, Node};
//!
//! let doc = Document::empty("root", "Container");
//! let doc = doc.insert_child("root", Node::leaf("title", "Heading"), 0)?;
//! assert_eq!(doc.get("root").unwrap().children_ids, vec!["title"]);
//! # Ok::<(), parchment_schema::TreeError>(())
//! ```

mod document;
mod error;
mod tree;
pub mod visitor;

pub use document::{deserialize, from_value, new_node_id, serialize, Document, Node, Props};
pub use error::{SchemaError, TreeError};
pub use visitor::{walk_document, walk_node, Visitor};
