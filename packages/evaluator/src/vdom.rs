use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Virtual DOM node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VNode {
    /// HTML element
    Element {
        tag: String,
        attributes: BTreeMap<String, String>,
        styles: BTreeMap<String, String>,
        children: Vec<VNode>,
        /// Id of the schema node this element was rendered from
        #[serde(skip_serializing_if = "Option::is_none")]
        source_id: Option<String>,
    },

    /// Text node
    Text { content: String },

    /// Comment node
    Comment { content: String },

    /// Error node (a visible placeholder instead of aborting the render)
    Error {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        source_id: Option<String>,
    },
}

impl VNode {
    pub fn element(tag: impl Into<String>) -> Self {
        VNode::Element {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            styles: BTreeMap::new(),
            children: Vec::new(),
            source_id: None,
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        VNode::Text {
            content: content.into(),
        }
    }

    pub fn comment(content: impl Into<String>) -> Self {
        VNode::Comment {
            content: content.into(),
        }
    }

    pub fn error(message: impl Into<String>, source_id: Option<String>) -> Self {
        VNode::Error {
            message: message.into(),
            source_id,
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element {
            ref mut attributes, ..
        } = self
        {
            attributes.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element { ref mut styles, .. } = self {
            styles.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_child(mut self, child: VNode) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.push(child);
        }
        self
    }

    pub fn with_children(mut self, new_children: Vec<VNode>) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.extend(new_children);
        }
        self
    }

    pub fn with_source_id(mut self, id: impl Into<String>) -> Self {
        match self {
            VNode::Element {
                ref mut source_id, ..
            }
            | VNode::Error {
                ref mut source_id, ..
            } => *source_id = Some(id.into()),
            VNode::Text { .. } | VNode::Comment { .. } => {}
        }
        self
    }

    pub fn source_id(&self) -> Option<&str> {
        match self {
            VNode::Element { source_id, .. } | VNode::Error { source_id, .. } => {
                source_id.as_deref()
            }
            VNode::Text { .. } | VNode::Comment { .. } => None,
        }
    }

    pub fn children(&self) -> &[VNode] {
        match self {
            VNode::Element { children, .. } => children,
            _ => &[],
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, VNode::Error { .. })
    }

    /// Find the first node (pre-order) rendered from a schema node
    pub fn find_by_source(&self, id: &str) -> Option<&VNode> {
        if self.source_id() == Some(id) {
            return Some(self);
        }
        self.children().iter().find_map(|c| c.find_by_source(id))
    }
}

/// Something the renderer had to paper over
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Diagnostic {
    UnknownComponentType { node_id: String, type_name: String },
    MissingNode { node_id: String },
    Cycle { node_id: String },
    /// Nesting deeper than the renderer follows; the subtree is cut off here
    DepthExceeded { node_id: String, limit: usize },
}

/// Rendered page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VirtualDomDocument {
    pub root: VNode,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl VirtualDomDocument {
    pub fn new(root: VNode) -> Self {
        Self {
            root,
            diagnostics: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}
