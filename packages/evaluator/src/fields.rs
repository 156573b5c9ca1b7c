//! Field descriptors: the configuration surface a component publishes to the
//! editing UI. The six kinds below are the whole contract.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Textarea,
    Number,
    Checkbox,
    Select {
        options: Vec<SelectOption>,
    },
    Array {
        #[serde(rename = "subFields")]
        sub_fields: Vec<FieldDescriptor>,
    },
}

impl FieldKind {
    /// Whether a stored prop value has the shape this kind edits
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) => true,
            (FieldKind::Text | FieldKind::Textarea, Value::String(_)) => true,
            (FieldKind::Number, Value::Number(_)) => true,
            (FieldKind::Checkbox, Value::Bool(_)) => true,
            (FieldKind::Select { .. }, Value::String(_)) => true,
            (FieldKind::Array { .. }, Value::Array(_)) => true,
            _ => false,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Textarea => "textarea",
            FieldKind::Number => "number",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Select { .. } => "select",
            FieldKind::Array { .. } => "array",
        }
    }
}

/// One editable prop of a component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Prop key the field edits
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
        }
    }

    pub fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub fn textarea(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Textarea)
    }

    pub fn number(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Number)
    }

    pub fn checkbox(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Checkbox)
    }

    /// Select with `(label, value)` options
    pub fn select(
        name: impl Into<String>,
        label: impl Into<String>,
        options: &[(&str, &str)],
    ) -> Self {
        let options = options
            .iter()
            .map(|(label, value)| SelectOption::new(*label, *value))
            .collect();
        Self::new(name, label, FieldKind::Select { options })
    }

    pub fn array(
        name: impl Into<String>,
        label: impl Into<String>,
        sub_fields: Vec<FieldDescriptor>,
    ) -> Self {
        Self::new(name, label, FieldKind::Array { sub_fields })
    }
}
