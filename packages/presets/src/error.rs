use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PresetError {
    #[error("Preset is for '{preset_type}' but the node is a '{node_type}'")]
    TypeMismatch {
        preset_type: String,
        node_type: String,
    },

    #[error("Preset name must not be empty")]
    EmptyName,

    #[error("Preset not found: {0}")]
    PresetNotFound(String),

    #[error("Global preset '{0}' cannot be changed")]
    GlobalPresetImmutable(String),

    #[error("Preset '{preset_id}' belongs to another tenant")]
    NotOwner { preset_id: String },

    #[error("Invalid preset data: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for PresetError {
    fn from(e: serde_json::Error) -> Self {
        PresetError::Malformed(e.to_string())
    }
}
