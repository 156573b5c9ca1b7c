use crate::document::{Document, Node};

/// Walks deeper than this are cut off, which keeps traversal of an
/// unvalidated (possibly cyclic) document finite.
pub const MAX_WALK_DEPTH: usize = 256;

/// Visitor pattern for traversing a document in pre-order
///
/// The default implementations walk the entire tree from the root.
/// Override specific visit_* methods to act on nodes.
pub trait Visitor: Sized {
    fn visit_document(&mut self, doc: &Document) {
        walk_document(self, doc);
    }

    fn visit_node(&mut self, doc: &Document, node: &Node, depth: usize) {
        walk_node(self, doc, node, depth);
    }

    /// Called for a child id that has no node in the map
    fn visit_missing_child(&mut self, _parent: &Node, _child_id: &str) {}
}

pub fn walk_document<V: Visitor>(visitor: &mut V, doc: &Document) {
    if let Some(root) = doc.root() {
        visitor.visit_node(doc, root, 0);
    }
}

pub fn walk_node<V: Visitor>(visitor: &mut V, doc: &Document, node: &Node, depth: usize) {
    if depth >= MAX_WALK_DEPTH {
        return;
    }
    for child_id in &node.children_ids {
        match doc.get(child_id) {
            Some(child) => visitor.visit_node(doc, child, depth + 1),
            None => visitor.visit_missing_child(node, child_id),
        }
    }
}
