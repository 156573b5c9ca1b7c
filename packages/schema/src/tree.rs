//! # Tree Engine
//!
//! Structural operations on a [`Document`]. Every operation validates first and
//! then builds a new document; on error the input is returned untouched, so a
//! failed drag never leaves a half-applied tree behind.
//!
//! ## Semantics
//!
//! ### insert_child
//! - Parent must exist and be a canvas
//! - `index` may equal the child count (append) but not exceed it
//! - The inserted node must be new and childless; grafting a subtree goes
//!   through `insert_fragment`
//!
//! ### remove_node
//! - Removes the node and its whole subtree
//! - The root is never removed
//!
//! ### move_node
//! - Fails if the new parent is the node itself or one of its descendants
//! - `index` is measured against the new parent's children after the node has
//!   been detached from its old position

use crate::document::{Document, Node, Props};
use crate::error::TreeError;
use serde_json::Value;
use tracing::debug;

impl Document {
    /// Insert `node` as a child of `parent_id` at `index`
    pub fn insert_child(
        &self,
        parent_id: &str,
        node: Node,
        index: usize,
    ) -> Result<Document, TreeError> {
        let parent = self.canvas_parent(parent_id)?;
        if self.contains(&node.id) {
            return Err(TreeError::DuplicateId(node.id));
        }
        if !node.children_ids.is_empty() {
            return Err(TreeError::DanglingChildren(node.id));
        }
        check_insert_index(index, parent.children_ids.len())?;

        debug!(node_id = %node.id, parent_id, index, type_name = %node.type_name, "Inserting node");

        let mut next = self.clone();
        let node_id = node.id.clone();
        next.nodes.insert(node_id.clone(), node);
        if let Some(parent) = next.nodes.get_mut(parent_id) {
            parent.children_ids.insert(index, node_id);
        }
        Ok(next)
    }

    /// Graft every node of `fragment` under `parent_id`, with the fragment's
    /// root placed at `index`
    pub fn insert_fragment(
        &self,
        parent_id: &str,
        fragment: &Document,
        index: usize,
    ) -> Result<Document, TreeError> {
        fragment.validate()?;
        let parent = self.canvas_parent(parent_id)?;
        if let Some(taken) = fragment.nodes.keys().find(|id| self.contains(id)) {
            return Err(TreeError::DuplicateId(taken.clone()));
        }
        check_insert_index(index, parent.children_ids.len())?;

        debug!(
            fragment_root = %fragment.root_id,
            parent_id,
            index,
            nodes = fragment.len(),
            "Inserting fragment"
        );

        let mut next = self.clone();
        next.nodes
            .extend(fragment.nodes.iter().map(|(id, n)| (id.clone(), n.clone())));
        if let Some(parent) = next.nodes.get_mut(parent_id) {
            parent.children_ids.insert(index, fragment.root_id.clone());
        }
        Ok(next)
    }

    /// Remove a node together with its entire subtree
    pub fn remove_node(&self, id: &str) -> Result<Document, TreeError> {
        if !self.contains(id) {
            return Err(TreeError::NodeNotFound(id.to_string()));
        }
        if id == self.root_id {
            return Err(TreeError::RootNode(id.to_string()));
        }

        let subtree = self.descendants(id);
        debug!(node_id = id, removed = subtree.len() + 1, "Removing node");

        let mut next = self.clone();
        detach(&mut next, id);
        next.nodes.remove(id);
        for descendant in &subtree {
            next.nodes.remove(descendant);
        }
        Ok(next)
    }

    /// Re-parent `id` under `new_parent_id` at `index`
    pub fn move_node(
        &self,
        id: &str,
        new_parent_id: &str,
        index: usize,
    ) -> Result<Document, TreeError> {
        if !self.contains(id) {
            return Err(TreeError::NodeNotFound(id.to_string()));
        }
        if id == self.root_id {
            return Err(TreeError::RootNode(id.to_string()));
        }
        if !self.contains(new_parent_id) {
            return Err(TreeError::ParentNotFound(new_parent_id.to_string()));
        }
        if id == new_parent_id || self.descendants(id).iter().any(|d| d == new_parent_id) {
            return Err(TreeError::Cycle {
                node_id: id.to_string(),
                new_parent_id: new_parent_id.to_string(),
            });
        }
        self.canvas_parent(new_parent_id)?;

        let mut next = self.clone();
        detach(&mut next, id);
        let siblings = next
            .nodes
            .get_mut(new_parent_id)
            .map(|p| &mut p.children_ids)
            .ok_or_else(|| TreeError::ParentNotFound(new_parent_id.to_string()))?;
        check_insert_index(index, siblings.len())?;
        siblings.insert(index, id.to_string());

        debug!(node_id = id, new_parent_id, index, "Moved node");
        Ok(next)
    }

    /// Move the child at position `from` to position `to` within one parent
    pub fn reorder_child(
        &self,
        parent_id: &str,
        from: usize,
        to: usize,
    ) -> Result<Document, TreeError> {
        let parent = self
            .get(parent_id)
            .ok_or_else(|| TreeError::ParentNotFound(parent_id.to_string()))?;
        let len = parent.children_ids.len();
        for index in [from, to] {
            if index >= len {
                return Err(TreeError::IndexOutOfRange { index, len });
            }
        }

        let mut next = self.clone();
        if let Some(parent) = next.nodes.get_mut(parent_id) {
            let child = parent.children_ids.remove(from);
            parent.children_ids.insert(to, child);
        }
        debug!(parent_id, from, to, "Reordered child");
        Ok(next)
    }

    /// Set a single prop on a node
    pub fn set_prop(&self, id: &str, key: &str, value: Value) -> Result<Document, TreeError> {
        self.update_node(id, |node| {
            node.props.insert(key.to_string(), value);
        })
    }

    /// Drop a prop from a node; absent keys are not an error
    pub fn remove_prop(&self, id: &str, key: &str) -> Result<Document, TreeError> {
        self.update_node(id, |node| {
            node.props.remove(key);
        })
    }

    /// Replace a node's whole prop bag
    pub fn replace_props(&self, id: &str, props: Props) -> Result<Document, TreeError> {
        self.update_node(id, |node| node.props = props)
    }

    /// Node ids in depth-first pre-order starting at the root
    pub fn depth_first(&self) -> Vec<String> {
        let mut ids = Vec::with_capacity(self.len());
        if self.contains(&self.root_id) {
            ids.push(self.root_id.clone());
            ids.extend(self.descendants(&self.root_id));
        }
        ids
    }

    fn update_node(&self, id: &str, f: impl FnOnce(&mut Node)) -> Result<Document, TreeError> {
        if !self.contains(id) {
            return Err(TreeError::NodeNotFound(id.to_string()));
        }
        let mut next = self.clone();
        if let Some(node) = next.nodes.get_mut(id) {
            f(node);
        }
        Ok(next)
    }

    fn canvas_parent(&self, parent_id: &str) -> Result<&Node, TreeError> {
        let parent = self
            .get(parent_id)
            .ok_or_else(|| TreeError::ParentNotFound(parent_id.to_string()))?;
        if !parent.is_canvas {
            return Err(TreeError::NotCanvas(parent_id.to_string()));
        }
        Ok(parent)
    }
}

fn check_insert_index(index: usize, len: usize) -> Result<(), TreeError> {
    if index > len {
        return Err(TreeError::IndexOutOfRange { index, len });
    }
    Ok(())
}

/// Remove `id` from whichever parent lists it
fn detach(doc: &mut Document, id: &str) {
    for node in doc.nodes.values_mut() {
        if let Some(pos) = node.children_ids.iter().position(|c| c == id) {
            node.children_ids.remove(pos);
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page() -> Document {
        Document::from_nodes(
            "root",
            vec![
                Node::canvas("root", "Container").with_children(["hero", "section"]),
                Node::leaf("hero", "HeroSection"),
                Node::canvas("section", "Section").with_children(["text", "inner"]),
                Node::leaf("text", "TextBlock"),
                Node::canvas("inner", "Columns").with_children(["img"]),
                Node::leaf("img", "ImageBlock"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_insert_shifts_siblings() {
        let doc = page();
        let next = doc
            .insert_child("root", Node::leaf("spacer", "Spacer"), 1)
            .unwrap();
        assert_eq!(
            next.get("root").unwrap().children_ids,
            vec!["hero", "spacer", "section"]
        );
        assert!(next.validate().is_ok());
        // input untouched
        assert_eq!(doc.get("root").unwrap().children_ids, vec!["hero", "section"]);
    }

    #[test]
    fn test_insert_errors() {
        let doc = page();
        assert_eq!(
            doc.insert_child("nope", Node::leaf("x", "Spacer"), 0),
            Err(TreeError::ParentNotFound("nope".to_string()))
        );
        assert_eq!(
            doc.insert_child("hero", Node::leaf("x", "Spacer"), 0),
            Err(TreeError::NotCanvas("hero".to_string()))
        );
        assert_eq!(
            doc.insert_child("root", Node::leaf("x", "Spacer"), 3),
            Err(TreeError::IndexOutOfRange { index: 3, len: 2 })
        );
        assert_eq!(
            doc.insert_child("root", Node::leaf("hero", "Spacer"), 0),
            Err(TreeError::DuplicateId("hero".to_string()))
        );
    }

    #[test]
    fn test_insert_at_end_is_allowed() {
        let next = page()
            .insert_child("root", Node::leaf("x", "Spacer"), 2)
            .unwrap();
        assert_eq!(next.get("root").unwrap().children_ids.last().unwrap(), "x");
    }

    #[test]
    fn test_remove_cascades() {
        let next = page().remove_node("section").unwrap();
        for gone in ["section", "text", "inner", "img"] {
            assert!(!next.contains(gone), "{gone} should be removed");
        }
        assert_eq!(next.get("root").unwrap().children_ids, vec!["hero"]);
        assert!(next.validate().is_ok());
    }

    #[test]
    fn test_remove_root_is_rejected() {
        let doc = page();
        assert_eq!(
            doc.remove_node("root"),
            Err(TreeError::RootNode("root".to_string()))
        );
        assert_eq!(
            doc.remove_node("missing"),
            Err(TreeError::NodeNotFound("missing".to_string()))
        );
    }

    #[test]
    fn test_move_into_descendant_is_cycle() {
        let doc = page();
        assert!(matches!(
            doc.move_node("section", "inner", 0),
            Err(TreeError::Cycle { .. })
        ));
        assert!(matches!(
            doc.move_node("section", "section", 0),
            Err(TreeError::Cycle { .. })
        ));
    }

    #[test]
    fn test_move_between_parents() {
        let next = page().move_node("img", "root", 0).unwrap();
        assert_eq!(
            next.get("root").unwrap().children_ids,
            vec!["img", "hero", "section"]
        );
        assert!(next.get("inner").unwrap().children_ids.is_empty());
        assert!(next.validate().is_ok());
    }

    #[test]
    fn test_move_within_same_parent_uses_post_detach_index() {
        let next = page().move_node("hero", "root", 1).unwrap();
        assert_eq!(next.get("root").unwrap().children_ids, vec!["section", "hero"]);
        assert_eq!(
            page().move_node("hero", "root", 2),
            Err(TreeError::IndexOutOfRange { index: 2, len: 1 })
        );
    }

    #[test]
    fn test_reorder_child() {
        let next = page().reorder_child("root", 1, 0).unwrap();
        assert_eq!(next.get("root").unwrap().children_ids, vec!["section", "hero"]);
        assert!(matches!(
            page().reorder_child("root", 0, 5),
            Err(TreeError::IndexOutOfRange { index: 5, .. })
        ));
    }

    #[test]
    fn test_insert_fragment() {
        let fragment = Document::from_nodes(
            "cols",
            vec![
                Node::canvas("cols", "Columns").with_children(["left", "right"]),
                Node::canvas("left", "Section"),
                Node::canvas("right", "Section"),
            ],
        )
        .unwrap();

        let next = page().insert_fragment("section", &fragment, 2).unwrap();
        assert_eq!(
            next.get("section").unwrap().children_ids,
            vec!["text", "inner", "cols"]
        );
        assert_eq!(next.len(), 9);
        assert!(next.validate().is_ok());

        let clash = Document::empty("hero", "Columns");
        assert_eq!(
            page().insert_fragment("root", &clash, 0),
            Err(TreeError::DuplicateId("hero".to_string()))
        );
    }

    #[test]
    fn test_prop_edits() {
        let doc = page().set_prop("hero", "title", json!("Welcome")).unwrap();
        assert_eq!(doc.get("hero").unwrap().props["title"], json!("Welcome"));

        let doc = doc.remove_prop("hero", "title").unwrap();
        assert!(doc.get("hero").unwrap().props.is_empty());

        assert_eq!(
            doc.set_prop("ghost", "x", json!(1)),
            Err(TreeError::NodeNotFound("ghost".to_string()))
        );
    }

    #[test]
    fn test_depth_first_order() {
        assert_eq!(
            page().depth_first(),
            vec!["root", "hero", "section", "text", "inner", "img"]
        );
    }
}
