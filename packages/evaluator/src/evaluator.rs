//! # Parchment Renderer
//!
//! Interprets a schema [`Document`] against a [`Registry`] and produces a
//! virtual DOM.
//!
//! ## Traversal
//!
//! Depth-first from `root_id`. For each node the type is resolved through the
//! registry; canvas nodes render their children first (in `children_ids` order)
//! and hand the results to the component's render function, leaves get an empty
//! child list.
//!
//! ## Determinism Contract
//!
//! **INVARIANT: Rendering is fully deterministic.**
//!
//! The same document and registry always produce the same VDOM:
//!
//! - Props and attributes live in sorted maps, so no hash order leaks out
//! - No time/random/environment dependence
//! - Render functions receive values only and cannot reach shared state
//!
//! This is what makes it safe to re-render the preview on every keystroke and
//! to snapshot-test rendered pages.
//!
//! ## Error Recovery
//!
//! Nothing in a document can abort a render. An unknown component type, a
//! dangling child id or a cycle in an unvalidated document each become a
//! `VNode::Error` placeholder at that spot plus a [`Diagnostic`]; siblings and
//! the rest of the page render normally. Documents nest arbitrarily deep in the
//! flat node map, so nodes below [`MAX_WALK_DEPTH`] are cut off the same way.

use crate::registry::{Registry, Resolution};
use crate::vdom::{Diagnostic, VNode, VirtualDomDocument};
use parchment_schema::visitor::MAX_WALK_DEPTH;
use parchment_schema::Document;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Attribute carrying the schema node id in editor previews
pub const NODE_ID_ATTR: &str = "data-node-id";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Live preview inside the editor; elements are tagged with node ids
    Editor,
    /// Published site
    #[default]
    Public,
}

#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub mode: RenderMode,
}

impl RenderOptions {
    pub fn editor() -> Self {
        Self {
            mode: RenderMode::Editor,
        }
    }

    pub fn public() -> Self {
        Self {
            mode: RenderMode::Public,
        }
    }
}

/// Render `doc` for the public site
pub fn render(doc: &Document, registry: &Registry) -> VirtualDomDocument {
    Evaluator::new(registry).evaluate(doc)
}

pub struct Evaluator<'r> {
    registry: &'r Registry,
    options: RenderOptions,
}

struct RenderState {
    /// Ids on the current root-to-node path
    path: Vec<String>,
    diagnostics: Vec<Diagnostic>,
}

impl<'r> Evaluator<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self::with_options(registry, RenderOptions::default())
    }

    pub fn with_options(registry: &'r Registry, options: RenderOptions) -> Self {
        Self { registry, options }
    }

    /// Render a document to virtual DOM
    #[instrument(skip(self, doc), fields(root = %doc.root_id, nodes = doc.len(), mode = ?self.options.mode))]
    pub fn evaluate(&self, doc: &Document) -> VirtualDomDocument {
        debug!("Starting document render");

        let mut state = RenderState {
            path: Vec::new(),
            diagnostics: Vec::new(),
        };
        let root = self.render_node(doc, &doc.root_id, 0, &mut state);

        if !state.diagnostics.is_empty() {
            warn!(
                diagnostics = state.diagnostics.len(),
                "Document rendered with placeholders"
            );
        }
        info!(nodes = doc.len(), "Document render complete");

        VirtualDomDocument {
            root,
            diagnostics: state.diagnostics,
        }
    }

    fn render_node(
        &self,
        doc: &Document,
        id: &str,
        depth: usize,
        state: &mut RenderState,
    ) -> VNode {
        if depth > MAX_WALK_DEPTH {
            warn!(node_id = id, limit = MAX_WALK_DEPTH, "Nesting too deep to render");
            state.diagnostics.push(Diagnostic::DepthExceeded {
                node_id: id.to_string(),
                limit: MAX_WALK_DEPTH,
            });
            return VNode::error(
                format!("Nesting deeper than {} levels", MAX_WALK_DEPTH),
                Some(id.to_string()),
            );
        }

        if state.path.iter().any(|p| p == id) {
            warn!(node_id = id, "Cycle detected while rendering");
            state.diagnostics.push(Diagnostic::Cycle {
                node_id: id.to_string(),
            });
            return VNode::error(format!("Cycle at node '{}'", id), Some(id.to_string()));
        }

        let Some(node) = doc.get(id) else {
            warn!(node_id = id, "Referenced node is missing");
            state.diagnostics.push(Diagnostic::MissingNode {
                node_id: id.to_string(),
            });
            return VNode::error(format!("Missing node '{}'", id), Some(id.to_string()));
        };

        let definition = match self.registry.resolve(&node.type_name) {
            Resolution::Found(definition) => definition,
            Resolution::NotFound => {
                warn!(node_id = id, type_name = %node.type_name, "Unknown component type");
                state.diagnostics.push(Diagnostic::UnknownComponentType {
                    node_id: id.to_string(),
                    type_name: node.type_name.clone(),
                });
                return VNode::error(
                    format!("Unknown component: {}", node.type_name),
                    Some(id.to_string()),
                );
            }
        };

        let children = if node.is_canvas {
            state.path.push(id.to_string());
            let children = node
                .children_ids
                .iter()
                .map(|child_id| self.render_node(doc, child_id, depth + 1, state))
                .collect();
            state.path.pop();
            children
        } else {
            Vec::new()
        };

        let props = definition.effective_props(&node.props);
        let rendered = definition.render(&props, children).with_source_id(id);

        match self.options.mode {
            RenderMode::Editor => rendered.with_attr(NODE_ID_ATTR, id),
            RenderMode::Public => rendered,
        }
    }
}
