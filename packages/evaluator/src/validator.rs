//! Prop validation against the field descriptors each component publishes.
//!
//! Props stay an open map at the document layer; this pass is what lets the
//! editor flag keys a component never declared, values of the wrong kind and
//! select values outside their options. It reports, it never rejects: a
//! document with warnings still renders.

use crate::fields::{FieldDescriptor, FieldKind};
use crate::registry::{Registry, Resolution};
use parchment_schema::{walk_node, Document, Node, Props, Visitor};
use serde::Serialize;
use serde_json::Value;

/// Validation warning level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationLevel {
    /// Worth fixing, renders fine
    Warning,
    /// Renders as a placeholder or breaks structure
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationWarning {
    pub level: ValidationLevel,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
}

impl ValidationWarning {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: ValidationLevel::Warning,
            message: message.into(),
            node_id: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: ValidationLevel::Error,
            message: message.into(),
            node_id: None,
        }
    }

    pub fn with_node_id(mut self, node_id: impl Into<String>) -> Self {
        self.node_id = Some(node_id.into());
        self
    }
}

/// Validate document structure and every node's props
pub fn validate_document(doc: &Document, registry: &Registry) -> Vec<ValidationWarning> {
    let mut validator = Validator::new(registry);
    validator.validate(doc)
}

pub struct Validator<'r> {
    registry: &'r Registry,
    warnings: Vec<ValidationWarning>,
}

impl<'r> Validator<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            warnings: Vec::new(),
        }
    }

    pub fn validate(&mut self, doc: &Document) -> Vec<ValidationWarning> {
        self.warnings.clear();

        if let Err(e) = doc.validate() {
            self.warnings
                .push(ValidationWarning::error(format!("Invalid structure: {}", e)));
        }
        self.visit_document(doc);

        std::mem::take(&mut self.warnings)
    }

    fn validate_node(&mut self, node: &Node) {
        let definition = match self.registry.resolve(&node.type_name) {
            Resolution::Found(definition) => definition,
            Resolution::NotFound => {
                self.warnings.push(
                    ValidationWarning::error(format!(
                        "Unknown component type '{}'",
                        node.type_name
                    ))
                    .with_node_id(&node.id),
                );
                return;
            }
        };

        if node.is_canvas != definition.is_canvas {
            self.warnings.push(
                ValidationWarning::warning(format!(
                    "{} is {} but the node is marked {}",
                    definition.type_name,
                    if definition.is_canvas { "a canvas" } else { "a leaf" },
                    if node.is_canvas { "canvas" } else { "leaf" },
                ))
                .with_node_id(&node.id),
            );
        }

        let messages = check_props(&node.props, &definition.fields, "");
        self.warnings.extend(
            messages
                .into_iter()
                .map(|m| ValidationWarning::warning(m).with_node_id(&node.id)),
        );
    }
}

impl Visitor for Validator<'_> {
    fn visit_node(&mut self, doc: &Document, node: &Node, depth: usize) {
        self.validate_node(node);
        walk_node(self, doc, node, depth);
    }
}

/// Check a prop bag against declared fields; `path` prefixes nested keys
fn check_props(props: &Props, fields: &[FieldDescriptor], path: &str) -> Vec<String> {
    let mut messages = Vec::new();

    for (key, value) in props {
        let qualified = format!("{}{}", path, key);
        let Some(field) = fields.iter().find(|f| &f.name == key) else {
            messages.push(format!("Undeclared prop '{}'", qualified));
            continue;
        };

        if !field.kind.accepts(value) {
            messages.push(format!(
                "Prop '{}' expects {} but holds {}",
                qualified,
                field.kind.name(),
                value_kind(value)
            ));
            continue;
        }

        match (&field.kind, value) {
            (FieldKind::Select { options }, Value::String(selected)) => {
                if !options.iter().any(|o| &o.value == selected) {
                    messages.push(format!(
                        "Prop '{}' value '{}' is not one of the options",
                        qualified, selected
                    ));
                }
            }
            (FieldKind::Array { sub_fields }, Value::Array(items)) => {
                for (index, item) in items.iter().enumerate() {
                    let item_path = format!("{}[{}].", qualified, index);
                    match item.as_object() {
                        Some(item_props) => {
                            messages.extend(check_props(item_props, sub_fields, &item_path))
                        }
                        None => messages.push(format!(
                            "Prop '{}[{}]' should be an object",
                            qualified, index
                        )),
                    }
                }
            }
            _ => {}
        }
    }

    messages
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
