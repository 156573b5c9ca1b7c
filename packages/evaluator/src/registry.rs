//! # Component Registry
//!
//! Maps component type names to their definitions. A registry is assembled once
//! at startup, then shared read-only (typically behind an `Arc`) by every render
//! and edit session. Lookups go through [`Registry::resolve`], which returns a
//! closed [`Resolution`] so callers must handle the unknown-type case.

use crate::fields::FieldDescriptor;
use crate::vdom::VNode;
use parchment_schema::{Node, Props};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Render function of a component: effective props plus already rendered
/// children in, one VDOM node out. Must be pure.
pub type RenderFn = Arc<dyn Fn(&Props, Vec<VNode>) -> VNode + Send + Sync>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("Component type '{0}' is already registered")]
    AlreadyRegistered(String),

    #[error("Definition for '{definition}' registered under '{registered}'")]
    NameMismatch {
        registered: String,
        definition: String,
    },
}

/// A renderable component type
#[derive(Clone)]
pub struct ComponentDefinition {
    pub type_name: String,
    pub display_name: String,
    /// Whether instances accept child nodes
    pub is_canvas: bool,
    pub fields: Vec<FieldDescriptor>,
    pub default_props: Props,
    render: RenderFn,
}

impl ComponentDefinition {
    pub fn new<F>(type_name: impl Into<String>, render: F) -> Self
    where
        F: Fn(&Props, Vec<VNode>) -> VNode + Send + Sync + 'static,
    {
        let type_name = type_name.into();
        Self {
            display_name: type_name.clone(),
            type_name,
            is_canvas: false,
            fields: Vec::new(),
            default_props: Props::new(),
            render: Arc::new(render),
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    pub fn canvas(mut self) -> Self {
        self.is_canvas = true;
        self
    }

    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_default(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.default_props.insert(key.into(), value.into());
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Default props overlaid with the node's own props
    pub fn effective_props(&self, props: &Props) -> Props {
        let mut merged = self.default_props.clone();
        for (key, value) in props {
            merged.insert(key.clone(), value.clone());
        }
        merged
    }

    pub fn render(&self, props: &Props, children: Vec<VNode>) -> VNode {
        (self.render)(props, children)
    }

    /// A fresh node of this type carrying the default props
    pub fn instantiate(&self, id: impl Into<String>) -> Node {
        let node = if self.is_canvas {
            Node::canvas(id, self.type_name.clone())
        } else {
            Node::leaf(id, self.type_name.clone())
        };
        node.with_props(self.default_props.clone())
    }
}

impl fmt::Debug for ComponentDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentDefinition")
            .field("type_name", &self.type_name)
            .field("display_name", &self.display_name)
            .field("is_canvas", &self.is_canvas)
            .field("fields", &self.fields)
            .field("default_props", &self.default_props)
            .finish_non_exhaustive()
    }
}

/// Outcome of a registry lookup
#[derive(Debug, Clone, Copy)]
pub enum Resolution<'a> {
    Found(&'a ComponentDefinition),
    NotFound,
}

impl<'a> Resolution<'a> {
    pub fn found(self) -> Option<&'a ComponentDefinition> {
        match self {
            Resolution::Found(def) => Some(def),
            Resolution::NotFound => None,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct Registry {
    components: BTreeMap<String, ComponentDefinition>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component type. Fails if the name is taken.
    pub fn register(
        &mut self,
        type_name: impl Into<String>,
        definition: ComponentDefinition,
    ) -> Result<(), RegistryError> {
        let type_name = type_name.into();
        if definition.type_name != type_name {
            return Err(RegistryError::NameMismatch {
                registered: type_name,
                definition: definition.type_name,
            });
        }
        if self.components.contains_key(&type_name) {
            return Err(RegistryError::AlreadyRegistered(type_name));
        }
        self.components.insert(type_name, definition);
        Ok(())
    }

    pub fn resolve(&self, type_name: &str) -> Resolution<'_> {
        match self.components.get(type_name) {
            Some(def) => Resolution::Found(def),
            None => Resolution::NotFound,
        }
    }

    /// Registered type names, sorted
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(String::as_str)
    }

    pub fn definitions(&self) -> impl Iterator<Item = &ComponentDefinition> {
        self.components.values()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
