//! The currently open document and its autosave bookkeeping
//!
//! A session binds one [`BlockEditor`] to the document identity on the remote
//! store. Mutations arm a debounce timer; once it expires the session hands
//! out a [`SaveRequest`] for the caller to execute. At most one save per
//! session is in flight, tracked by the sequence number of its ticket.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use super::block_editor::{BlockEditor, EditorEvent};
use super::debounce::Debouncer;
use super::document::{Document, DocumentDraft, DocumentId, UNTITLED};
use super::error::AppError;

static NEXT_SERIAL: AtomicU64 = AtomicU64::new(1);

/// Save state shown next to the title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveStatus {
    #[default]
    Saved,
    Dirty,
    Saving,
    Error,
}

impl SaveStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SaveStatus::Saved => "Saved",
            SaveStatus::Dirty => "Unsaved changes",
            SaveStatus::Saving => "Saving...",
            SaveStatus::Error => "Error",
        }
    }
}

/// Identifies one save request of one session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveTicket {
    pub session: u64,
    pub sequence: u64,
    pub manual: bool,
}

/// A save the caller must send to the remote store
#[derive(Debug, Clone, PartialEq)]
pub struct SaveRequest {
    pub ticket: SaveTicket,
    pub draft: DocumentDraft,
}

/// Result of asking the session to save
#[derive(Debug, Clone, PartialEq)]
pub enum SaveDecision {
    /// A request was issued and is now in flight
    Started(SaveRequest),
    /// Another save of this session is still outstanding
    AlreadyInFlight,
    /// Brand-new session with no title and no content
    NothingToSave,
    /// No autosave is due yet
    Idle,
}

/// In-memory binding of an open document to its editor state
#[derive(Debug)]
pub struct DocumentSession {
    serial: u64,
    document_id: Option<DocumentId>,
    title: String,
    editor: BlockEditor,
    status: SaveStatus,
    autosave: Debouncer,
    in_flight: Option<u64>,
    next_sequence: u64,
    /// Content changed after the in-flight save was taken
    changed_during_save: bool,
}

impl DocumentSession {
    /// Start a new, never-persisted document
    pub fn new(quiet: Duration) -> Self {
        Self {
            serial: NEXT_SERIAL.fetch_add(1, Ordering::Relaxed),
            document_id: None,
            title: String::new(),
            editor: BlockEditor::new(),
            status: SaveStatus::Saved,
            autosave: Debouncer::new(quiet),
            in_flight: None,
            next_sequence: 1,
            changed_during_save: false,
        }
    }

    /// Bind a document fetched from the store
    pub fn open(document: Document, quiet: Duration) -> Self {
        let mut session = Self::new(quiet);
        session.document_id = Some(document.id);
        session.title = document.title;
        session.editor.load(&document.content);
        session
    }

    /// New unsaved document pre-filled with `content` (file import)
    pub fn with_content(title: impl Into<String>, content: &str, quiet: Duration) -> Self {
        let mut session = Self::new(quiet);
        session.title = title.into();
        session.editor.load(content);
        session
    }

    pub fn serial(&self) -> u64 {
        self.serial
    }

    pub fn document_id(&self) -> Option<&DocumentId> {
        self.document_id.as_ref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn status(&self) -> SaveStatus {
        self.status
    }

    pub fn editor(&self) -> &BlockEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut BlockEditor {
        &mut self.editor
    }

    pub fn is_saving(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether a ticket refers to this session
    pub fn owns(&self, ticket: &SaveTicket) -> bool {
        ticket.session == self.serial
    }

    /// Change the title, scheduling an autosave when it differs
    pub fn set_title(&mut self, title: impl Into<String>, now: Instant) -> bool {
        let title = title.into();
        if title == self.title {
            return false;
        }
        self.title = title;
        self.schedule_save(now);
        true
    }

    /// Forward an editor event, scheduling an autosave on content changes
    pub fn apply(&mut self, event: EditorEvent, now: Instant) -> bool {
        let changed = self.editor.handle(event);
        if changed {
            self.schedule_save(now);
        }
        changed
    }

    /// (Re)arm the autosave timer. Rapid calls keep a single deadline.
    pub fn schedule_save(&mut self, now: Instant) {
        self.autosave.schedule(now);
        if self.in_flight.is_some() {
            self.changed_during_save = true;
        } else {
            self.status = SaveStatus::Dirty;
        }
    }

    /// Time until the pending autosave fires, for repaint scheduling
    pub fn autosave_due_in(&self, now: Instant) -> Option<Duration> {
        self.autosave.remaining(now)
    }

    /// Some edit is not covered by a successful save yet
    pub fn has_unsaved_changes(&self) -> bool {
        self.autosave.is_pending()
            || self.changed_during_save
            || matches!(self.status, SaveStatus::Dirty | SaveStatus::Error)
    }

    /// Fire the autosave if its quiet period elapsed
    pub fn poll_autosave(&mut self, now: Instant) -> SaveDecision {
        if !self.autosave.take_due(now) {
            return SaveDecision::Idle;
        }
        let decision = self.begin_save(false);
        if decision == SaveDecision::AlreadyInFlight {
            tracing::debug!("Autosave skipped, save already in flight");
        }
        decision
    }

    /// Manual save: skips the debounce but not the single in-flight rule
    pub fn request_save(&mut self) -> SaveDecision {
        let decision = self.begin_save(true);
        if matches!(decision, SaveDecision::Started(_)) {
            self.autosave.cancel();
        }
        decision
    }

    fn begin_save(&mut self, manual: bool) -> SaveDecision {
        if self.in_flight.is_some() {
            return SaveDecision::AlreadyInFlight;
        }
        if self.document_id.is_none() && self.title.is_empty() && !self.editor.has_content() {
            self.status = SaveStatus::Saved;
            return SaveDecision::NothingToSave;
        }

        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.in_flight = Some(sequence);
        self.changed_during_save = false;
        self.status = SaveStatus::Saving;

        let title = if self.title.trim().is_empty() {
            UNTITLED.to_string()
        } else {
            self.title.clone()
        };

        SaveDecision::Started(SaveRequest {
            ticket: SaveTicket {
                session: self.serial,
                sequence,
                manual,
            },
            draft: DocumentDraft {
                id: self.document_id.clone(),
                title,
                content: self.editor.serialize(),
            },
        })
    }

    /// Record the outcome of a save. Returns `false` when the ticket does not
    /// match the outstanding save of this session.
    pub fn complete_save(
        &mut self,
        ticket: &SaveTicket,
        result: &Result<DocumentId, AppError>,
    ) -> bool {
        if !self.owns(ticket) || self.in_flight != Some(ticket.sequence) {
            return false;
        }
        self.in_flight = None;

        match result {
            Ok(id) => {
                if self.document_id.is_none() {
                    self.document_id = Some(id.clone());
                }
                self.status = if self.changed_during_save || self.autosave.is_pending() {
                    SaveStatus::Dirty
                } else {
                    SaveStatus::Saved
                };
            }
            Err(e) => {
                tracing::warn!("Save of session {} failed: {}", self.serial, e);
                self.status = SaveStatus::Error;
            }
        }
        true
    }
}
