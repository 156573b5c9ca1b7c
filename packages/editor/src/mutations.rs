//! # Document Mutations
//!
//! Every edit the editor UI can make, as a serializable command. Each mutation
//! maps onto one tree operation (or a preset overlay) and is all-or-nothing:
//! it either yields a new document or an error with the input untouched.
//!
//! ## Mutation Semantics
//!
//! ### RemoveNode
//! - Removes the node and all descendants
//! - The root cannot be removed
//!
//! ### MoveNode
//! - Fails if the target parent lies inside the moved subtree
//! - `index` counts positions after the node has been taken out
//!
//! ### ApplyPreset
//! - Preset props overwrite matching keys, other props stay
//! - Fails if the preset targets a different component type

use crate::errors::EditorError;
use parchment_presets::{apply_preset, Preset};
use parchment_schema::{Document, Node, Props, TreeError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Mutation {
    /// Insert a new childless node
    #[serde(rename_all = "camelCase")]
    InsertNode {
        parent_id: String,
        index: usize,
        node: Node,
    },

    /// Insert a prebuilt block with its own children
    #[serde(rename_all = "camelCase")]
    InsertFragment {
        parent_id: String,
        index: usize,
        fragment: Document,
    },

    #[serde(rename_all = "camelCase")]
    RemoveNode { node_id: String },

    #[serde(rename_all = "camelCase")]
    MoveNode {
        node_id: String,
        new_parent_id: String,
        index: usize,
    },

    #[serde(rename_all = "camelCase")]
    ReorderChild {
        parent_id: String,
        from: usize,
        to: usize,
    },

    #[serde(rename_all = "camelCase")]
    SetProp {
        node_id: String,
        key: String,
        value: Value,
    },

    #[serde(rename_all = "camelCase")]
    RemoveProp { node_id: String, key: String },

    #[serde(rename_all = "camelCase")]
    ReplaceProps { node_id: String, props: Props },

    #[serde(rename_all = "camelCase")]
    ApplyPreset { node_id: String, preset: Preset },
}

impl Mutation {
    /// Apply to `doc`, producing the edited document
    pub fn apply(&self, doc: &Document) -> Result<Document, EditorError> {
        let next = match self {
            Mutation::InsertNode {
                parent_id,
                index,
                node,
            } => doc.insert_child(parent_id, node.clone(), *index)?,

            Mutation::InsertFragment {
                parent_id,
                index,
                fragment,
            } => doc.insert_fragment(parent_id, fragment, *index)?,

            Mutation::RemoveNode { node_id } => doc.remove_node(node_id)?,

            Mutation::MoveNode {
                node_id,
                new_parent_id,
                index,
            } => doc.move_node(node_id, new_parent_id, *index)?,

            Mutation::ReorderChild {
                parent_id,
                from,
                to,
            } => doc.reorder_child(parent_id, *from, *to)?,

            Mutation::SetProp {
                node_id,
                key,
                value,
            } => doc.set_prop(node_id, key, value.clone())?,

            Mutation::RemoveProp { node_id, key } => doc.remove_prop(node_id, key)?,

            Mutation::ReplaceProps { node_id, props } => {
                doc.replace_props(node_id, props.clone())?
            }

            Mutation::ApplyPreset { node_id, preset } => {
                let node = doc
                    .get(node_id)
                    .ok_or_else(|| TreeError::NodeNotFound(node_id.clone()))?;
                let updated = apply_preset(node, preset)?;
                doc.replace_props(node_id, updated.props)?
            }
        };
        Ok(next)
    }

    /// Short name for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Mutation::InsertNode { .. } => "InsertNode",
            Mutation::InsertFragment { .. } => "InsertFragment",
            Mutation::RemoveNode { .. } => "RemoveNode",
            Mutation::MoveNode { .. } => "MoveNode",
            Mutation::ReorderChild { .. } => "ReorderChild",
            Mutation::SetProp { .. } => "SetProp",
            Mutation::RemoveProp { .. } => "RemoveProp",
            Mutation::ReplaceProps { .. } => "ReplaceProps",
            Mutation::ApplyPreset { .. } => "ApplyPreset",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_format() {
        let mutation = Mutation::MoveNode {
            node_id: "a".into(),
            new_parent_id: "b".into(),
            index: 0,
        };
        assert_eq!(
            serde_json::to_value(&mutation).unwrap(),
            json!({ "type": "MoveNode", "nodeId": "a", "newParentId": "b", "index": 0 })
        );
    }

    #[test]
    fn test_apply_preset_mutation() {
        let doc = Document::empty("r", "Container")
            .insert_child(
                "r",
                Node::leaf("h", "HeroSection")
                    .with_prop("title", "X")
                    .with_prop("color", "#000"),
                0,
            )
            .unwrap();
        let mut props = Props::new();
        props.insert("color".into(), json!("#FFF"));
        let preset = Preset::global("p", "Light", "HeroSection", props);

        let next = Mutation::ApplyPreset {
            node_id: "h".into(),
            preset,
        }
        .apply(&doc)
        .unwrap();

        let hero = next.get("h").unwrap();
        assert_eq!(hero.props["title"], json!("X"));
        assert_eq!(hero.props["color"], json!("#FFF"));
        assert_eq!(doc.get("h").unwrap().props["color"], json!("#000"));
    }

    #[test]
    fn test_apply_preset_to_missing_node() {
        let doc = Document::empty("r", "Container");
        let preset = Preset::global("p", "Light", "HeroSection", Props::new());
        let err = Mutation::ApplyPreset {
            node_id: "ghost".into(),
            preset,
        }
        .apply(&doc)
        .unwrap_err();
        assert!(matches!(err, EditorError::Tree(TreeError::NodeNotFound(_))));
    }
}
