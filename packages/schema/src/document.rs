//! # Schema Document
//!
//! A page composition stored as a flat arena: every node is addressed by its
//! string id in a single map, and structure lives only in each node's ordered
//! `children_ids`. Documents are values. Tree operations (see `tree.rs`) return
//! a new document instead of editing one in place, so two documents can always
//! be compared structurally.
//!
//! ## Serialized shape
//!
//! ```json
//! {
//!   "rootId": "root",
//!   "nodes": {
//!     "root": { "id": "root", "typeName": "Container", "props": {}, "isCanvas": true, "childrenIds": ["hero"] },
//!     "hero": { "id": "hero", "typeName": "HeroSection", "props": { "title": "Welcome" }, "isCanvas": false, "childrenIds": [] }
//!   }
//! }
//! ```
//!
//! Keys the current schema does not know about (on the document or on a node)
//! are carried through `extra` and written back unchanged.

use crate::error::SchemaError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Open prop bag. Backed by a sorted map so serialization is stable.
pub type Props = Map<String, Value>;

/// Generate a fresh node id for newly created nodes.
pub fn new_node_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Single element of a page composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    pub type_name: String,
    #[serde(default)]
    pub props: Props,
    #[serde(default)]
    pub is_canvas: bool,
    #[serde(default)]
    pub children_ids: Vec<String>,
    /// Unrecognized stored fields, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Node {
    /// Create a leaf node
    pub fn leaf(id: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            type_name: type_name.into(),
            props: Props::new(),
            is_canvas: false,
            children_ids: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Create an empty canvas node
    pub fn canvas(id: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            is_canvas: true,
            ..Self::leaf(id, type_name)
        }
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    pub fn with_props(mut self, props: Props) -> Self {
        self.props = props;
        self
    }

    pub fn with_children<I, S>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.children_ids = children.into_iter().map(Into::into).collect();
        self
    }
}

/// The full serializable page composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub root_id: String,
    pub nodes: BTreeMap<String, Node>,
    /// Unrecognized stored fields, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Document {
    /// A document holding only an empty canvas root
    pub fn empty(root_id: impl Into<String>, root_type: impl Into<String>) -> Self {
        let root = Node::canvas(root_id, root_type);
        let root_id = root.id.clone();
        let mut nodes = BTreeMap::new();
        nodes.insert(root_id.clone(), root);
        Self {
            root_id,
            nodes,
            extra: Map::new(),
        }
    }

    /// Build a document from a list of nodes and check every invariant
    pub fn from_nodes(
        root_id: impl Into<String>,
        nodes: impl IntoIterator<Item = Node>,
    ) -> Result<Self, SchemaError> {
        let doc = Self {
            root_id: root_id.into(),
            nodes: nodes.into_iter().map(|n| (n.id.clone(), n)).collect(),
            extra: Map::new(),
        };
        doc.validate()?;
        Ok(doc)
    }

    pub fn root(&self) -> Option<&Node> {
        self.nodes.get(&self.root_id)
    }

    pub fn get(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Id of the node whose `children_ids` lists `id`
    pub fn parent_of(&self, id: &str) -> Option<&str> {
        self.nodes
            .values()
            .find(|n| n.children_ids.iter().any(|c| c == id))
            .map(|n| n.id.as_str())
    }

    /// Every id reachable from `id` through `children_ids`, pre-order, excluding `id`
    pub fn descendants(&self, id: &str) -> Vec<String> {
        let mut out = Vec::new();
        let mut seen = HashSet::new();
        seen.insert(id.to_string());
        let mut stack: Vec<&str> = match self.nodes.get(id) {
            Some(node) => node.children_ids.iter().rev().map(String::as_str).collect(),
            None => return out,
        };

        while let Some(current) = stack.pop() {
            if !seen.insert(current.to_string()) {
                continue;
            }
            out.push(current.to_string());
            if let Some(node) = self.nodes.get(current) {
                stack.extend(node.children_ids.iter().rev().map(String::as_str));
            }
        }

        out
    }

    /// Chain of parents from `id` up to the root (nearest first)
    pub fn ancestors(&self, id: &str) -> Vec<String> {
        let mut out = Vec::new();
        let mut current = id;
        while let Some(parent) = self.parent_of(current) {
            if out.iter().any(|a| a == parent) {
                break;
            }
            out.push(parent.to_string());
            current = parent;
        }
        out
    }

    /// Check every structural invariant of a document
    pub fn validate(&self) -> Result<(), SchemaError> {
        if !self.nodes.contains_key(&self.root_id) {
            return Err(SchemaError::MissingRoot(self.root_id.clone()));
        }

        let mut parents: HashMap<&str, &str> = HashMap::new();
        for (key, node) in &self.nodes {
            if key != &node.id {
                return Err(SchemaError::KeyMismatch {
                    key: key.clone(),
                    id: node.id.clone(),
                });
            }
            if !node.is_canvas && !node.children_ids.is_empty() {
                return Err(SchemaError::LeafHasChildren(node.id.clone()));
            }
            for child in &node.children_ids {
                if !self.nodes.contains_key(child) {
                    return Err(SchemaError::DanglingChild {
                        parent: node.id.clone(),
                        child: child.clone(),
                    });
                }
                if child == &self.root_id {
                    return Err(SchemaError::RootHasParent(child.clone()));
                }
                if let Some(first) = parents.insert(child.as_str(), node.id.as_str()) {
                    return Err(SchemaError::SharedChild {
                        child: child.clone(),
                        first: first.to_string(),
                        second: node.id.clone(),
                    });
                }
            }
        }

        for id in self.nodes.keys() {
            if id != &self.root_id && !parents.contains_key(id.as_str()) {
                return Err(SchemaError::Orphan(id.clone()));
            }
        }

        // Every node has exactly one parent at this point, so anything the
        // root cannot reach sits on a cycle.
        let reachable: HashSet<String> = self.descendants(&self.root_id).into_iter().collect();
        for id in self.nodes.keys() {
            if id != &self.root_id && !reachable.contains(id) {
                return Err(SchemaError::Unreachable(id.clone()));
            }
        }

        Ok(())
    }
}

/// Serialize a document to its stored JSON form
pub fn serialize(doc: &Document) -> Result<Vec<u8>, SchemaError> {
    Ok(serde_json::to_vec(doc)?)
}

/// Parse stored bytes into a document, rejecting structurally invalid data
pub fn deserialize(bytes: &[u8]) -> Result<Document, SchemaError> {
    let doc: Document = serde_json::from_slice(bytes)?;
    doc.validate()?;
    Ok(doc)
}

/// Parse a document from an already decoded JSON value
pub fn from_value(value: Value) -> Result<Document, SchemaError> {
    let doc: Document = serde_json::from_value(value)?;
    doc.validate()?;
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Document {
        Document::from_nodes(
            "root",
            vec![
                Node::canvas("root", "Container").with_children(["a", "b"]),
                Node::leaf("a", "Heading").with_prop("text", "Hello"),
                Node::canvas("b", "Section").with_children(["c"]),
                Node::leaf("c", "TextBlock"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_descendants_are_preorder() {
        let doc = sample();
        assert_eq!(doc.descendants("root"), vec!["a", "b", "c"]);
        assert_eq!(doc.descendants("b"), vec!["c"]);
        assert!(doc.descendants("a").is_empty());
    }

    #[test]
    fn test_ancestors() {
        let doc = sample();
        assert_eq!(doc.ancestors("c"), vec!["b", "root"]);
        assert!(doc.ancestors("root").is_empty());
    }

    #[test]
    fn test_validate_rejects_shared_child() {
        let result = Document::from_nodes(
            "root",
            vec![
                Node::canvas("root", "Container").with_children(["a", "b"]),
                Node::canvas("a", "Section").with_children(["c"]),
                Node::canvas("b", "Section").with_children(["c"]),
                Node::leaf("c", "TextBlock"),
            ],
        );
        assert!(matches!(result, Err(SchemaError::SharedChild { .. })));
    }

    #[test]
    fn test_validate_rejects_cycle() {
        let result = Document::from_nodes(
            "root",
            vec![
                Node::canvas("root", "Container"),
                Node::canvas("a", "Section").with_children(["b"]),
                Node::canvas("b", "Section").with_children(["a"]),
            ],
        );
        assert_eq!(result, Err(SchemaError::Unreachable("a".to_string())));
    }

    #[test]
    fn test_validate_rejects_orphan_and_dangling() {
        let orphan = Document::from_nodes(
            "root",
            vec![Node::canvas("root", "Container"), Node::leaf("x", "Spacer")],
        );
        assert_eq!(orphan, Err(SchemaError::Orphan("x".to_string())));

        let dangling = Document::from_nodes(
            "root",
            vec![Node::canvas("root", "Container").with_children(["ghost"])],
        );
        assert!(matches!(dangling, Err(SchemaError::DanglingChild { .. })));
    }

    #[test]
    fn test_validate_rejects_leaf_with_children() {
        let result = Document::from_nodes(
            "root",
            vec![
                Node::canvas("root", "Container").with_children(["a"]),
                Node::leaf("a", "Heading").with_children(["b"]),
                Node::leaf("b", "TextBlock"),
            ],
        );
        assert_eq!(result, Err(SchemaError::LeafHasChildren("a".to_string())));
    }

    #[test]
    fn test_unknown_fields_survive_round_trip() {
        let stored = json!({
            "rootId": "root",
            "schemaVersion": 3,
            "nodes": {
                "root": {
                    "id": "root",
                    "typeName": "Container",
                    "props": {},
                    "isCanvas": true,
                    "childrenIds": [],
                    "hidden": false,
                    "custom": { "displayName": "Page" }
                }
            }
        });

        let doc = from_value(stored.clone()).unwrap();
        assert_eq!(doc.extra.get("schemaVersion"), Some(&json!(3)));

        let written: Value = serde_json::from_slice(&serialize(&doc).unwrap()).unwrap();
        assert_eq!(written, stored);
    }

    #[test]
    fn test_deserialize_rejects_garbage() {
        assert!(matches!(
            deserialize(b"{\"nodes\": 4}"),
            Err(SchemaError::Malformed(_))
        ));
    }
}
