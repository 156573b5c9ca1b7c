//! # Parchment Editor
//!
//! Editing engine for parish pages.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ storage: load / save whole documents        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: session lifecycle + mutations       │
//! │  - Apply mutations through the tree engine  │
//! │  - Track dirtiness against the saved copy   │
//! │  - Run the save state machine               │
//! │  - Re-render the preview after each edit    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ evaluator: Document + Registry → VDOM       │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use parchment_editor::{DocumentKey, EditSession, MemoryStore, Mutation};
//! use parchment_schema::Node;
//!
//! # async fn run() -> Result<(), parchment_editor::EditorError> {
//! let store = MemoryStore::new();
//! let mut session = EditSession::load(&store, DocumentKey::new("st-anne", "home")).await?;
//!
//! session.apply(Mutation::InsertNode {
//!     parent_id: "root".to_string(),
//!     index: 0,
//!     node: Node::leaf("welcome", "Heading").with_prop("text", "Welcome"),
//! })?;
//! assert!(session.should_warn_before_leave());
//!
//! session.save(&store).await?;
//! assert!(!session.is_dirty());
//! # Ok(())
//! # }
//! ```

mod errors;
mod mutations;
mod pipeline;
mod session;
mod storage;
mod templates;

pub use errors::EditorError;
pub use mutations::Mutation;
pub use pipeline::{Pipeline, PipelineResult};
pub use session::{EditSession, SaveRequest, SessionState, SAVE_ABANDONED};
pub use storage::{DocumentKey, DocumentStore, FileStore, MemoryStore, NavigationStore, StoreError};
pub use templates::{Template, TemplateLibrary};

// Re-export common types for convenience
pub use parchment_evaluator::VirtualDomDocument;
pub use parchment_schema::Document;
