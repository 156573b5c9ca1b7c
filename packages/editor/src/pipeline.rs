//! # Preview Pipeline
//!
//! Couples an [`EditSession`] with the component registry: every applied
//! mutation is followed by a fresh editor-mode render, and the last render is
//! kept for the preview pane. Rendering is cheap and pure, so there is no
//! diffing; the whole page is rendered each time.

use crate::errors::EditorError;
use crate::mutations::Mutation;
use crate::session::EditSession;
use parchment_evaluator::{
    validate_document, Evaluator, Registry, RenderOptions, ValidationWarning, VirtualDomDocument,
};
use std::sync::Arc;
use tracing::debug;

pub struct Pipeline {
    session: EditSession,
    registry: Arc<Registry>,
    options: RenderOptions,
    last_vdom: Option<VirtualDomDocument>,
}

impl Pipeline {
    pub fn new(session: EditSession, registry: Arc<Registry>) -> Self {
        Self {
            session,
            registry,
            options: RenderOptions::editor(),
            last_vdom: None,
        }
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self.last_vdom = None;
        self
    }

    /// Apply a mutation and re-render.
    ///
    /// A rejected mutation leaves both the document and the cached render as
    /// they were.
    pub fn apply_mutation(&mut self, mutation: Mutation) -> Result<PipelineResult, EditorError> {
        let version = self.session.apply(mutation)?;
        let vdom = self.render();
        let warnings = validate_document(self.session.document(), &self.registry);

        debug!(
            version,
            diagnostics = vdom.diagnostics.len(),
            warnings = warnings.len(),
            "Preview refreshed"
        );
        self.last_vdom = Some(vdom.clone());

        Ok(PipelineResult {
            version,
            vdom,
            warnings,
        })
    }

    /// Full re-render, e.g. for the first paint
    pub fn full_evaluate(&mut self) -> VirtualDomDocument {
        let vdom = self.render();
        self.last_vdom = Some(vdom.clone());
        vdom
    }

    fn render(&self) -> VirtualDomDocument {
        Evaluator::with_options(&self.registry, self.options.clone())
            .evaluate(self.session.document())
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    /// Mutable access for saving and selection; edits should go through
    /// `apply_mutation` so the preview stays current
    pub fn session_mut(&mut self) -> &mut EditSession {
        &mut self.session
    }

    pub fn into_session(self) -> EditSession {
        self.session
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn last_vdom(&self) -> Option<&VirtualDomDocument> {
        self.last_vdom.as_ref()
    }

    pub fn clear_cache(&mut self) {
        self.last_vdom = None;
    }
}

/// Result of pipeline execution
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// Session version after the mutation
    pub version: u64,

    pub vdom: VirtualDomDocument,

    /// Prop and structure warnings for the editing UI
    pub warnings: Vec<ValidationWarning>,
}
