//! Error types for the editor

use crate::storage::{DocumentKey, StoreError};
use parchment_navigation::NavigationError;
use parchment_presets::PresetError;
use parchment_schema::{SchemaError, TreeError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Preset error: {0}")]
    Preset(#[from] PresetError),

    #[error("Navigation error: {0}")]
    Navigation(#[from] NavigationError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("A save is already in progress")]
    SaveInProgress,

    #[error("Save failed: {0}")]
    SaveFailure(String),

    #[error("No save is in progress")]
    NotSaving,

    #[error("Save request for {key} at version {version} is not the save in progress")]
    SaveRequestMismatch { key: DocumentKey, version: u64 },

    #[error("Template not found: {0}")]
    TemplateNotFound(String),
}
