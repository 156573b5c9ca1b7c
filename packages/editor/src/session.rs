//! # Edit Session
//!
//! One editor's hold on one page. The session owns the working document, the
//! last saved snapshot and the save state machine:
//!
//! ```text
//!            mutation              begin_save             ok
//! Loaded ─────────────▶ Editing ─────────────▶ Saving ─────────▶ Saved
//!                          ▲                     │                 │
//!                          │ retry               │ err, abandoned  │ mutation
//!                          └──────── SaveFailed ◀┘                 ▼
//!                                                               Editing
//! ```
//!
//! A save that is never reported back (its future dropped by a timeout or a
//! `select!`) counts as failed, so the session cannot stay in `Saving`.
//!
//! Dirtiness is structural: the working document is compared with the saved
//! snapshot, so an edit that is undone by hand leaves the session clean.

use crate::errors::EditorError;
use crate::mutations::Mutation;
use crate::storage::{DocumentKey, DocumentStore, StoreError};
use parchment_schema::{Document, TreeError};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionState {
    /// Fresh from storage, untouched
    Loaded,
    Editing,
    /// A save has been handed to storage and not yet reported back
    Saving,
    Saved,
    SaveFailed,
}

/// Snapshot handed to storage by [`EditSession::begin_save`]
#[derive(Debug, Clone)]
pub struct SaveRequest {
    pub key: DocumentKey,
    pub document: Document,
    /// Session version the snapshot was taken at
    pub version: u64,
}

/// Reason recorded when a save is dropped before storage answered
pub const SAVE_ABANDONED: &str = "save abandoned before storage answered";

#[derive(Debug, Clone)]
pub struct EditSession {
    key: DocumentKey,
    document: Document,
    /// Last successfully saved document; `None` before the first save
    saved: Option<Document>,
    state: SessionState,
    version: u64,
    /// Version handed out by the pending `begin_save`
    in_flight: Option<u64>,
    selection: Option<String>,
    last_error: Option<String>,
}

impl EditSession {
    /// Start a session on a document that matches what storage holds
    pub fn new(key: DocumentKey, document: Document) -> Self {
        Self {
            key,
            saved: Some(document.clone()),
            document,
            state: SessionState::Loaded,
            version: 0,
            in_flight: None,
            selection: None,
            last_error: None,
        }
    }

    /// Start a session on a document storage has never seen (e.g. from a
    /// template); it is dirty until the first save.
    pub fn new_unsaved(key: DocumentKey, document: Document) -> Self {
        Self {
            state: SessionState::Editing,
            saved: None,
            ..Self::new(key, document)
        }
    }

    pub async fn load(store: &dyn DocumentStore, key: DocumentKey) -> Result<Self, EditorError> {
        let document = store.load(&key).await?;
        info!(key = %key, nodes = document.len(), "Loaded document");
        Ok(Self::new(key, document))
    }

    /// Apply a mutation to the working document and return the new version
    pub fn apply(&mut self, mutation: Mutation) -> Result<u64, EditorError> {
        let next = mutation.apply(&self.document)?;
        self.document = next;
        self.version += 1;

        if let Some(selected) = &self.selection {
            if !self.document.contains(selected) {
                debug!(node_id = %selected, "Selected node removed, clearing selection");
                self.selection = None;
            }
        }

        match self.state {
            SessionState::Loaded | SessionState::Saved | SessionState::SaveFailed => {
                self.state = SessionState::Editing;
            }
            // An edit made while saving is picked up when the save completes
            SessionState::Editing | SessionState::Saving => {}
        }

        debug!(
            kind = mutation.kind(),
            version = self.version,
            "Applied mutation"
        );
        Ok(self.version)
    }

    /// Enter `Saving` and hand out the snapshot to persist.
    ///
    /// Returns `None` when there is nothing to save.
    pub fn begin_save(&mut self) -> Result<Option<SaveRequest>, EditorError> {
        match self.state {
            SessionState::Saving => return Err(EditorError::SaveInProgress),
            SessionState::Loaded | SessionState::Saved => return Ok(None),
            SessionState::SaveFailed => {
                debug!(key = %self.key, "Retrying failed save");
                self.state = SessionState::Editing;
            }
            SessionState::Editing => {}
        }

        self.state = SessionState::Saving;
        self.in_flight = Some(self.version);
        Ok(Some(SaveRequest {
            key: self.key.clone(),
            document: self.document.clone(),
            version: self.version,
        }))
    }

    /// Record the outcome of the save started by `begin_save`
    pub fn complete_save(
        &mut self,
        request: SaveRequest,
        result: Result<(), StoreError>,
    ) -> Result<(), EditorError> {
        if self.state != SessionState::Saving {
            return Err(EditorError::NotSaving);
        }
        if request.key != self.key || self.in_flight != Some(request.version) {
            return Err(EditorError::SaveRequestMismatch {
                key: request.key,
                version: request.version,
            });
        }
        self.in_flight = None;

        match result {
            Ok(()) => {
                self.state = if self.document == request.document {
                    SessionState::Saved
                } else {
                    SessionState::Editing
                };
                self.saved = Some(request.document);
                self.last_error = None;
                info!(key = %self.key, version = request.version, "Saved document");
                Ok(())
            }
            Err(e) => {
                let reason = e.to_string();
                warn!(key = %self.key, error = %reason, "Save failed");
                self.last_error = Some(reason.clone());
                self.state = SessionState::SaveFailed;
                Err(EditorError::SaveFailure(reason))
            }
        }
    }

    /// Give up on the save started by `begin_save`; the session moves to
    /// `SaveFailed` and stays dirty. Does nothing when no save is in flight.
    pub fn abandon_save(&mut self) {
        if self.state != SessionState::Saving {
            return;
        }
        warn!(key = %self.key, version = ?self.in_flight, "Save abandoned");
        self.in_flight = None;
        self.last_error = Some(SAVE_ABANDONED.to_string());
        self.state = SessionState::SaveFailed;
    }

    /// Persist the working document through `store`
    #[instrument(skip_all, fields(key = %self.key, version = self.version))]
    pub async fn save(&mut self, store: &dyn DocumentStore) -> Result<(), EditorError> {
        let Some(request) = self.begin_save()? else {
            debug!("Nothing to save");
            return Ok(());
        };
        let pending = PendingSave {
            session: self,
            armed: true,
        };
        let result = store.save(&request.key, &request.document).await;
        pending.finish(request, result)
    }

    pub fn is_dirty(&self) -> bool {
        self.saved.as_ref() != Some(&self.document)
    }

    /// Whether leaving the editor now would lose work
    pub fn should_warn_before_leave(&self) -> bool {
        self.is_dirty()
    }

    pub fn select(&mut self, node_id: &str) -> Result<(), EditorError> {
        if !self.document.contains(node_id) {
            return Err(TreeError::NodeNotFound(node_id.to_string()).into());
        }
        self.selection = Some(node_id.to_string());
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn selected(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    pub fn key(&self) -> &DocumentKey {
        &self.key
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn saved_document(&self) -> Option<&Document> {
        self.saved.as_ref()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Reason of the most recent failed save
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

/// Holds the session while storage works on a save; dropping it before
/// `finish` abandons the save.
struct PendingSave<'a> {
    session: &'a mut EditSession,
    armed: bool,
}

impl PendingSave<'_> {
    fn finish(
        mut self,
        request: SaveRequest,
        result: Result<(), StoreError>,
    ) -> Result<(), EditorError> {
        self.armed = false;
        self.session.complete_save(request, result)
    }
}

impl Drop for PendingSave<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.session.abandon_save();
        }
    }
}
