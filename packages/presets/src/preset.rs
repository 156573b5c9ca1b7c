use crate::error::PresetError;
use chrono::{DateTime, Utc};
use parchment_schema::{Node, Props};
use serde::{Deserialize, Serialize};

/// Who a preset belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PresetScope {
    /// Ships with the system, visible to every tenant, never edited
    Global,
    #[serde(rename_all = "camelCase")]
    Tenant { tenant_id: String },
}

impl PresetScope {
    pub fn tenant(tenant_id: impl Into<String>) -> Self {
        PresetScope::Tenant {
            tenant_id: tenant_id.into(),
        }
    }

    pub fn is_global(&self) -> bool {
        matches!(self, PresetScope::Global)
    }

    pub fn tenant_id(&self) -> Option<&str> {
        match self {
            PresetScope::Global => None,
            PresetScope::Tenant { tenant_id } => Some(tenant_id),
        }
    }
}

/// A named bundle of props for one component type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    pub id: String,
    pub name: String,
    pub component_type: String,
    pub props: Props,
    pub scope: PresetScope,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Preset {
    pub fn global(
        id: impl Into<String>,
        name: impl Into<String>,
        component_type: impl Into<String>,
        props: Props,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            component_type: component_type.into(),
            props,
            scope: PresetScope::Global,
            created_at: None,
        }
    }
}

/// Overlay the preset's props onto a node of the same type.
///
/// Keys in the preset replace the node's values; keys the preset does not
/// mention keep theirs. The input node is left as is.
pub fn apply_preset(node: &Node, preset: &Preset) -> Result<Node, PresetError> {
    if preset.component_type != node.type_name {
        return Err(PresetError::TypeMismatch {
            preset_type: preset.component_type.clone(),
            node_type: node.type_name.clone(),
        });
    }

    let mut updated = node.clone();
    for (key, value) in &preset.props {
        updated.props.insert(key.clone(), value.clone());
    }
    Ok(updated)
}
