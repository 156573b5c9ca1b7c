use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NavigationError {
    #[error("Item '{parent_id}' is not a top-level item and cannot have children")]
    DepthExceeded { parent_id: String },

    #[error("Navigation item not found: {0}")]
    ItemNotFound(String),

    #[error("Navigation item id already in use: {0}")]
    DuplicateId(String),

    #[error("Item '{0}' links to both a page and a URL")]
    ConflictingLink(String),

    #[error("Invalid navigation data: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for NavigationError {
    fn from(e: serde_json::Error) -> Self {
        NavigationError::Malformed(e.to_string())
    }
}
