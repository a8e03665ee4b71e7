//! Application state and its reactions to user actions and backend events
//!
//! Nothing here touches the GUI or the network directly: every method returns
//! the [`Effect`]s the shell has to carry out, which keeps the login, list,
//! session and save-completion logic testable on its own.

use std::time::{Duration, Instant};

use crate::core::block_editor::EditorEvent;
use crate::core::config::AppConfig;
use crate::core::credentials::{Credentials, LocalStore};
use crate::core::document::DocumentId;
use crate::core::document_list::DocumentList;
use crate::core::error::AppError;
use crate::core::notifications::{Notifications, ToastLevel};
use crate::core::session::{DocumentSession, SaveDecision, SaveTicket};
use crate::remote::{BackendEvent, BackendRequest};

/// Side effect requested from the application shell
#[derive(Debug, Clone)]
pub enum Effect {
    /// Run a request on the backend
    Submit(BackendRequest),
    /// Rebuild the store client from the current credentials
    Reconnect,
}

/// Action waiting for a yes/no answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteDocument,
    Logout,
}

impl ConfirmAction {
    pub fn title(&self) -> &'static str {
        match self {
            ConfirmAction::DeleteDocument => "Delete document",
            ConfirmAction::Logout => "Log out",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ConfirmAction::DeleteDocument => {
                "Are you sure you want to delete this document? This cannot be undone."
            }
            ConfirmAction::Logout => "Are you sure you want to log out?",
        }
    }
}

/// Content of the login window
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub error: Option<String>,
    pub pending: bool,
}

pub struct AppState {
    pub config: AppConfig,
    storage: LocalStore,
    credentials: Credentials,
    pub documents: DocumentList,
    session: Option<DocumentSession>,
    pub notifications: Notifications,
    pub login: LoginForm,
    pub login_visible: bool,
    /// API URL being edited while the settings window is open
    pub settings: Option<String>,
    pub confirm: Option<ConfirmAction>,
    /// Serial of the most recent open request
    latest_open: u64,
    /// Closed sessions whose save is still running
    retiring: Vec<DocumentSession>,
}

impl AppState {
    pub fn new(config: AppConfig, storage: LocalStore) -> Self {
        let credentials = Credentials::from_store(&storage);
        Self {
            config,
            storage,
            credentials,
            documents: DocumentList::new(),
            session: None,
            notifications: Notifications::default(),
            login: LoginForm::default(),
            login_visible: false,
            settings: None,
            confirm: None,
            latest_open: 0,
            retiring: Vec::new(),
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn session(&self) -> Option<&DocumentSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut DocumentSession> {
        self.session.as_mut()
    }

    fn autosave_delay(&self) -> Duration {
        self.config.editor.autosave_delay()
    }

    /// Initial effects: list documents, or ask for a login first
    pub fn startup(&mut self) -> Vec<Effect> {
        if self.credentials.is_authenticated() {
            vec![self.refresh_documents()]
        } else {
            self.login_visible = true;
            Vec::new()
        }
    }

    pub fn refresh_documents(&mut self) -> Effect {
        self.documents.begin_loading();
        Effect::Submit(BackendRequest::ListDocuments)
    }

    // --- account ---------------------------------------------------------

    pub fn submit_login(&mut self) -> Vec<Effect> {
        let email = self.login.email.trim().to_string();
        if email.is_empty() || self.login.password.is_empty() {
            self.login.error =
                Some(AppError::Validation("Please fill in all fields".into()).user_message());
            return Vec::new();
        }

        self.login.error = None;
        self.login.pending = true;
        vec![Effect::Submit(BackendRequest::Login {
            email,
            password: self.login.password.clone(),
        })]
    }

    /// User-confirmed logout
    pub fn logout(&mut self, now: Instant) -> Vec<Effect> {
        let effects = self.reset_account();
        self.notifications.info("Logged out", now);
        effects
    }

    /// Logout forced by an expired credential
    fn force_logout(&mut self, now: Instant) -> Vec<Effect> {
        let effects = self.reset_account();
        self.notifications
            .error(AppError::Auth(String::new()).user_message(), now);
        effects
    }

    fn reset_account(&mut self) -> Vec<Effect> {
        self.credentials = match Credentials::clear_login(&mut self.storage) {
            Ok(credentials) => credentials,
            Err(e) => {
                tracing::error!("Failed to clear stored login: {:#}", e);
                Credentials {
                    api_key: String::new(),
                    user_email: String::new(),
                    user_type: String::new(),
                    ..self.credentials.clone()
                }
            }
        };
        self.session = None;
        self.retiring.clear();
        self.documents.clear();
        self.settings = None;
        self.confirm = None;
        self.login = LoginForm::default();
        self.login_visible = true;
        vec![Effect::Reconnect]
    }

    pub fn open_settings(&mut self) {
        self.settings = Some(self.credentials.api_url.clone());
    }

    /// Persist the API URL typed in the settings window
    pub fn save_settings(&mut self, now: Instant) -> Vec<Effect> {
        let Some(api_url) = self.settings.clone() else {
            return Vec::new();
        };
        if api_url.trim().is_empty() {
            let error = AppError::Validation("Please enter the API URL".into());
            self.notifications.error(error.user_message(), now);
            return Vec::new();
        }

        match Credentials::store_api_url(&mut self.storage, &api_url) {
            Ok(credentials) => self.credentials = credentials,
            Err(e) => {
                tracing::error!("Failed to store API URL: {:#}", e);
                self.credentials.api_url = api_url.trim().to_string();
            }
        }
        self.settings = None;
        self.notifications.success("Settings saved", now);
        vec![Effect::Reconnect]
    }

    // --- documents -------------------------------------------------------

    /// Close the current session, saving its unstored edits. A session with
    /// a save still running is kept until that save completes, then gets
    /// one more save for whatever changed meanwhile.
    fn retire_session(&mut self) -> Vec<Effect> {
        let Some(mut session) = self.session.take() else {
            return Vec::new();
        };
        let mut effects = Vec::new();
        if session.has_unsaved_changes() {
            match session.request_save() {
                SaveDecision::Started(request) => {
                    effects.push(Effect::Submit(BackendRequest::SaveDocument(request)));
                }
                SaveDecision::AlreadyInFlight => {
                    tracing::debug!(
                        "Closing session {} queued behind a running save",
                        session.serial()
                    );
                }
                SaveDecision::NothingToSave | SaveDecision::Idle => {}
            }
        }
        if session.is_saving() {
            self.retiring.push(session);
        }
        effects
    }

    pub fn new_document(&mut self) -> Vec<Effect> {
        let effects = self.retire_session();
        self.session = Some(DocumentSession::new(self.autosave_delay()));
        self.documents.set_active(None);
        effects
    }

    /// Request a document. The current session stays editable until the
    /// content arrives.
    pub fn open_document(&mut self, id: DocumentId) -> Vec<Effect> {
        self.latest_open += 1;
        vec![Effect::Submit(BackendRequest::OpenDocument {
            serial: self.latest_open,
            id,
        })]
    }

    /// Start an unsaved document from imported file content
    pub fn import_document(&mut self, title: String, content: &str, now: Instant) -> Vec<Effect> {
        let effects = self.retire_session();
        let mut session = DocumentSession::with_content(title, content, self.autosave_delay());
        session.schedule_save(now);
        self.session = Some(session);
        self.documents.set_active(None);
        effects
    }

    /// Ask for confirmation before deleting the open document
    pub fn ask_delete(&mut self) {
        if self
            .session
            .as_ref()
            .is_some_and(|s| s.document_id().is_some())
        {
            self.confirm = Some(ConfirmAction::DeleteDocument);
        }
    }

    pub fn ask_logout(&mut self) {
        self.confirm = Some(ConfirmAction::Logout);
    }

    pub fn resolve_confirm(&mut self, accepted: bool, now: Instant) -> Vec<Effect> {
        let Some(action) = self.confirm.take() else {
            return Vec::new();
        };
        if !accepted {
            return Vec::new();
        }
        match action {
            ConfirmAction::DeleteDocument => {
                match self.session.as_ref().and_then(|s| s.document_id()) {
                    Some(id) => vec![Effect::Submit(BackendRequest::DeleteDocument {
                        id: id.clone(),
                    })],
                    None => Vec::new(),
                }
            }
            ConfirmAction::Logout => self.logout(now),
        }
    }

    /// Finish a save of a closed session and send its final content if it
    /// changed while the save was running
    fn complete_retired_save(
        &mut self,
        ticket: &SaveTicket,
        result: &Result<DocumentId, AppError>,
    ) -> Vec<Effect> {
        tracing::info!(
            "Save {} of closed session {} completed",
            ticket.sequence,
            ticket.session
        );
        let Some(index) = self.retiring.iter().position(|s| s.owns(ticket)) else {
            return Vec::new();
        };
        let session = &mut self.retiring[index];
        if !session.complete_save(ticket, result) {
            return Vec::new();
        }
        let mut effects = Vec::new();
        if result.is_ok() && session.has_unsaved_changes() {
            if let SaveDecision::Started(request) = session.request_save() {
                effects.push(Effect::Submit(BackendRequest::SaveDocument(request)));
            }
        }
        if !session.is_saving() {
            self.retiring.swap_remove(index);
        }
        effects
    }

    // --- editing ---------------------------------------------------------

    pub fn edit(&mut self, event: EditorEvent, now: Instant) -> bool {
        self.session
            .as_mut()
            .is_some_and(|session| session.apply(event, now))
    }

    pub fn set_title(&mut self, title: String, now: Instant) -> bool {
        self.session
            .as_mut()
            .is_some_and(|session| session.set_title(title, now))
    }

    pub fn manual_save(&mut self) -> Vec<Effect> {
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };
        match session.request_save() {
            SaveDecision::Started(request) => {
                vec![Effect::Submit(BackendRequest::SaveDocument(request))]
            }
            SaveDecision::AlreadyInFlight => {
                tracing::debug!("Manual save ignored, a save is in flight");
                Vec::new()
            }
            SaveDecision::NothingToSave | SaveDecision::Idle => Vec::new(),
        }
    }

    /// Timer work: expire notices and fire a due autosave
    pub fn tick(&mut self, now: Instant) -> Vec<Effect> {
        self.notifications.expire(now);
        match self.session.as_mut().map(|s| s.poll_autosave(now)) {
            Some(SaveDecision::Started(request)) => {
                vec![Effect::Submit(BackendRequest::SaveDocument(request))]
            }
            _ => Vec::new(),
        }
    }

    /// When the shell should wake up again without input
    pub fn next_wakeup(&self, now: Instant) -> Option<Duration> {
        let autosave = self.session.as_ref().and_then(|s| s.autosave_due_in(now));
        let toast = self.notifications.next_expiry(now);
        match (autosave, toast) {
            (Some(a), Some(t)) => Some(a.min(t)),
            (a, t) => a.or(t),
        }
    }

    // --- backend completions ---------------------------------------------

    fn report(&mut self, error: &AppError, context: &str, now: Instant) -> Vec<Effect> {
        tracing::error!("{}: {}", context, error);
        if error.is_auth() {
            return self.force_logout(now);
        }
        let message = match error {
            AppError::Network(_) | AppError::NotFound(_) => error.user_message(),
            _ => format!("{context}: {}", error.user_message()),
        };
        self.notifications.push(ToastLevel::Error, message, now);
        Vec::new()
    }

    pub fn handle(&mut self, event: BackendEvent, now: Instant) -> Vec<Effect> {
        match event {
            BackendEvent::LoggedIn(result) => {
                self.login.pending = false;
                match result {
                    Ok(account) => {
                        let email = account
                            .email
                            .unwrap_or_else(|| self.login.email.trim().to_string());
                        let user_type = account.user_type.unwrap_or_else(|| "free".to_string());
                        self.credentials = match Credentials::store_login(
                            &mut self.storage,
                            &account.api_token,
                            &email,
                            &user_type,
                        ) {
                            Ok(credentials) => credentials,
                            Err(e) => {
                                tracing::error!("Failed to store login: {:#}", e);
                                Credentials {
                                    api_key: account.api_token,
                                    user_email: email,
                                    user_type,
                                    ..self.credentials.clone()
                                }
                            }
                        };
                        self.login = LoginForm::default();
                        self.login_visible = false;
                        self.notifications.success("Logged in", now);
                        vec![Effect::Reconnect, self.refresh_documents()]
                    }
                    Err(e) => {
                        tracing::warn!("Login failed: {}", e);
                        self.login.error = Some(match e {
                            AppError::Api(msg) => msg,
                            other => other.user_message(),
                        });
                        Vec::new()
                    }
                }
            }

            BackendEvent::DocumentsListed(result) => match result {
                Ok(items) => {
                    self.documents.set_items(items);
                    Vec::new()
                }
                Err(e) => {
                    self.documents.set_failed();
                    self.report(&e, "Could not load documents", now)
                }
            },

            BackendEvent::DocumentOpened { serial, result } => {
                if serial != self.latest_open {
                    tracing::debug!("Ignoring superseded open request {}", serial);
                    return Vec::new();
                }
                match result {
                    Ok(document) => {
                        let effects = self.retire_session();
                        let id = document.id.clone();
                        self.session = Some(DocumentSession::open(document, self.autosave_delay()));
                        self.documents.set_active(Some(id));
                        effects
                    }
                    Err(e) => self.report(&e, "Could not load the document", now),
                }
            }

            BackendEvent::DocumentSaved { ticket, result } => {
                let current = self.session.as_ref().is_some_and(|s| s.owns(&ticket));
                let mut effects = Vec::new();

                if current {
                    if let Some(session) = self.session.as_mut() {
                        session.complete_save(&ticket, &result);
                        let id = session.document_id().cloned();
                        if result.is_ok() {
                            self.documents.set_active(id);
                            if ticket.manual {
                                self.notifications.success("Document saved", now);
                            }
                        }
                    }
                    if let Err(e) = &result {
                        effects.extend(self.report(e, "Save failed", now));
                    }
                } else {
                    effects.extend(self.complete_retired_save(&ticket, &result));
                    if let Err(e) = &result {
                        if e.is_auth() {
                            effects.extend(self.force_logout(now));
                        } else {
                            tracing::error!("Background save failed: {}", e);
                        }
                    }
                }

                if result.is_ok() {
                    effects.push(self.refresh_documents());
                }
                effects
            }

            BackendEvent::DocumentDeleted { id, result } => match result {
                Ok(()) => {
                    self.notifications.success("Document deleted", now);
                    if self
                        .session
                        .as_ref()
                        .is_some_and(|s| s.document_id() == Some(&id))
                    {
                        self.session = None;
                        self.documents.set_active(None);
                    }
                    vec![self.refresh_documents()]
                }
                Err(e) => self.report(&e, "Could not delete the document", now),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::core::credentials::KEY_API_KEY;
    use crate::core::document::{Document, DocumentSummary};
    use crate::core::session::{SaveRequest, SaveStatus};
    use crate::remote::Account;

    fn state() -> (tempfile::TempDir, AppState) {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = LocalStore::open(dir.path().join("storage.json")).unwrap();
        Credentials::store_login(&mut storage, "tok", "me@example.test", "free").unwrap();
        (dir, AppState::new(AppConfig::default(), storage))
    }

    fn submitted(effects: &[Effect]) -> Vec<&BackendRequest> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Submit(request) => Some(request),
                Effect::Reconnect => None,
            })
            .collect()
    }

    fn open(state: &mut AppState, id: &str, title: &str, content: &str) -> Vec<Effect> {
        let effects = state.open_document(DocumentId::from(id));
        let serial = match submitted(&effects).last() {
            Some(BackendRequest::OpenDocument { serial, .. }) => *serial,
            other => panic!("expected open request, got {other:?}"),
        };
        state.handle(
            BackendEvent::DocumentOpened {
                serial,
                result: Ok(Document {
                    id: DocumentId::from(id),
                    title: title.into(),
                    content: content.into(),
                }),
            },
            Instant::now(),
        )
    }

    fn saves(effects: &[Effect]) -> Vec<SaveRequest> {
        submitted(effects)
            .into_iter()
            .filter_map(|r| match r {
                BackendRequest::SaveDocument(req) => Some(req.clone()),
                _ => None,
            })
            .collect()
    }

    fn type_into(state: &mut AppState, line: usize, text: &str, now: Instant) {
        state.edit(EditorEvent::ClickPreview(line), now);
        state.edit(
            EditorEvent::Input {
                line,
                text: text.into(),
            },
            now,
        );
    }

    #[test]
    fn test_startup_lists_documents_when_logged_in() {
        let (_dir, mut state) = state();
        let effects = state.startup();
        assert!(matches!(
            submitted(&effects)[..],
            [BackendRequest::ListDocuments]
        ));
        assert!(state.documents.is_loading());
        assert!(!state.login_visible);
    }

    #[test]
    fn test_open_document_scenario() {
        let (_dir, mut state) = state();
        open(&mut state, "1", "A", "Hello\nWorld");
        let session = state.session().unwrap();
        assert_eq!(session.editor().serialize(), "Hello\nWorld");
        assert!(state.documents.is_active(&DocumentId::from("1")));
    }

    #[test]
    fn test_superseded_open_is_ignored() {
        let (_dir, mut state) = state();
        let first = state.open_document(DocumentId::from("1"));
        let _second = state.open_document(DocumentId::from("2"));
        let stale_serial = match submitted(&first)[0] {
            BackendRequest::OpenDocument { serial, .. } => *serial,
            _ => unreachable!(),
        };

        state.handle(
            BackendEvent::DocumentOpened {
                serial: stale_serial,
                result: Ok(Document {
                    id: DocumentId::from("1"),
                    title: "old".into(),
                    content: String::new(),
                }),
            },
            Instant::now(),
        );
        assert!(state.session().is_none());
    }

    #[test]
    fn test_stale_save_completion_does_not_touch_new_session() {
        let (_dir, mut state) = state();
        let now = Instant::now();
        open(&mut state, "1", "A", "one");
        type_into(&mut state, 0, "one more", now);

        // switching flushes the pending edit of document 1
        let effects = open(&mut state, "2", "B", "two");
        let save = saves(&effects).pop().expect("flush save");
        assert_eq!(save.draft.content, "one more");

        let effects = state.handle(
            BackendEvent::DocumentSaved {
                ticket: save.ticket,
                result: Ok(DocumentId::from("1")),
            },
            now,
        );

        let session = state.session().unwrap();
        assert_eq!(session.title(), "B");
        assert_eq!(session.status(), SaveStatus::Saved);
        assert!(state.documents.is_active(&DocumentId::from("2")));
        assert!(state.notifications.toasts().is_empty());
        assert!(matches!(
            submitted(&effects)[..],
            [BackendRequest::ListDocuments]
        ));
    }

    #[test]
    fn test_switch_during_running_save_keeps_later_edits() {
        let (_dir, mut state) = state();
        let now = Instant::now();
        open(&mut state, "1", "A", "one");
        type_into(&mut state, 0, "one two", now);
        let first = saves(&state.manual_save()).pop().expect("manual save");
        assert_eq!(first.draft.content, "one two");

        type_into(&mut state, 0, "one two three", now);
        let effects = open(&mut state, "2", "B", "two");
        assert!(saves(&effects).is_empty());
        assert_eq!(state.session().unwrap().title(), "B");

        let effects = state.handle(
            BackendEvent::DocumentSaved {
                ticket: first.ticket,
                result: Ok(DocumentId::from("1")),
            },
            now,
        );
        let last = saves(&effects).pop().expect("final save of document 1");
        assert_eq!(last.draft.content, "one two three");
        assert_eq!(last.draft.id, Some(DocumentId::from("1")));
        assert_eq!(state.retiring.len(), 1);

        state.handle(
            BackendEvent::DocumentSaved {
                ticket: last.ticket,
                result: Ok(DocumentId::from("1")),
            },
            now,
        );
        assert!(state.retiring.is_empty());
        assert_eq!(state.session().unwrap().status(), SaveStatus::Saved);
    }

    #[test]
    fn test_edits_while_opening_are_saved() {
        let (_dir, mut state) = state();
        let now = Instant::now();
        open(&mut state, "1", "A", "one");

        let request = state.open_document(DocumentId::from("2"));
        let serial = match submitted(&request)[..] {
            [BackendRequest::OpenDocument { serial, .. }] => *serial,
            _ => panic!("expected only an open request"),
        };
        type_into(&mut state, 0, "one edited", now);
        assert_eq!(state.session().unwrap().title(), "A");

        let effects = state.handle(
            BackendEvent::DocumentOpened {
                serial,
                result: Ok(Document {
                    id: DocumentId::from("2"),
                    title: "B".into(),
                    content: "two".into(),
                }),
            },
            now,
        );
        let save = saves(&effects).pop().expect("save of document 1");
        assert_eq!(save.draft.content, "one edited");
        assert_eq!(save.draft.id, Some(DocumentId::from("1")));
        assert_eq!(state.session().unwrap().title(), "B");
    }

    #[test]
    fn test_manual_save_while_autosave_in_flight() {
        let (_dir, mut state) = state();
        let now = Instant::now();
        state.new_document();
        state.set_title("Draft".into(), now);

        let delay = state.config.editor.autosave_delay();
        let autosave = state.tick(now + delay);
        assert_eq!(submitted(&autosave).len(), 1);

        assert!(state.manual_save().is_empty());
    }

    #[test]
    fn test_new_document_gets_id_after_first_save() {
        let (_dir, mut state) = state();
        let now = Instant::now();
        state.new_document();
        type_into(&mut state, 0, "body", now);

        let effects = state.manual_save();
        let ticket = match submitted(&effects)[..] {
            [BackendRequest::SaveDocument(req)] => req.ticket,
            _ => panic!("expected one save"),
        };
        state.handle(
            BackendEvent::DocumentSaved {
                ticket,
                result: Ok(DocumentId::Number(8)),
            },
            now,
        );

        let session = state.session().unwrap();
        assert_eq!(session.document_id(), Some(&DocumentId::Number(8)));
        assert!(state.documents.is_active(&DocumentId::Number(8)));
        assert_eq!(state.notifications.toasts()[0].message, "Document saved");
    }

    #[test]
    fn test_expired_session_forces_logout() {
        let (dir, mut state) = state();
        open(&mut state, "1", "A", "x");
        let effects = state.handle(
            BackendEvent::DocumentsListed(Err(AppError::Auth("expired".into()))),
            Instant::now(),
        );

        assert!(effects.iter().any(|e| matches!(e, Effect::Reconnect)));
        assert!(state.login_visible);
        assert!(state.session().is_none());
        assert!(!state.credentials().is_authenticated());
        assert!(state.notifications.toasts()[0].message.contains("expired"));

        let storage = LocalStore::open(dir.path().join("storage.json")).unwrap();
        assert!(storage.get(KEY_API_KEY).is_none());
    }

    #[test]
    fn test_confirmed_logout_clears_account() {
        let (_dir, mut state) = state();
        open(&mut state, "1", "A", "x");
        state.ask_logout();
        state.resolve_confirm(true, Instant::now());

        assert!(state.session().is_none());
        assert!(!state.credentials().is_authenticated());
        let toast = &state.notifications.toasts()[0];
        assert_eq!(toast.level, ToastLevel::Info);
        assert_eq!(toast.message, "Logged out");
    }

    #[test]
    fn test_login_validation_and_success() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStore::open(dir.path().join("storage.json")).unwrap();
        let mut state = AppState::new(AppConfig::default(), storage);
        assert!(state.startup().is_empty());
        assert!(state.login_visible);

        state.login.email = "me@example.test".into();
        assert!(state.submit_login().is_empty());
        assert!(state.login.error.is_some());

        state.login.password = "pw".into();
        assert_eq!(submitted(&state.submit_login()).len(), 1);

        let effects = state.handle(
            BackendEvent::LoggedIn(Ok(Account {
                api_token: "new".into(),
                email: None,
                user_type: Some("premium".into()),
            })),
            Instant::now(),
        );
        assert!(matches!(effects[0], Effect::Reconnect));
        assert!(state.credentials().is_authenticated());
        assert_eq!(state.credentials().user_email, "me@example.test");
        assert!(!state.login_visible);
    }

    #[test]
    fn test_delete_open_document_closes_session() {
        let (_dir, mut state) = state();
        open(&mut state, "3", "C", "x");
        state.ask_delete();
        assert_eq!(state.confirm, Some(ConfirmAction::DeleteDocument));

        let effects = state.resolve_confirm(true, Instant::now());
        assert!(matches!(
            submitted(&effects)[..],
            [BackendRequest::DeleteDocument { .. }]
        ));

        state.handle(
            BackendEvent::DocumentDeleted {
                id: DocumentId::from("3"),
                result: Ok(()),
            },
            Instant::now(),
        );
        assert!(state.session().is_none());
    }

    #[test]
    fn test_settings_require_url() {
        let (_dir, mut state) = state();
        let now = Instant::now();
        state.open_settings();
        state.settings = Some("  ".into());
        assert!(state.save_settings(now).is_empty());
        assert!(state.settings.is_some());

        state.settings = Some("https://example.test/api".into());
        assert!(matches!(state.save_settings(now)[..], [Effect::Reconnect]));
        assert_eq!(state.credentials().api_url, "https://example.test/api");
    }

    #[test]
    fn test_documents_listed() {
        let (_dir, mut state) = state();
        state.handle(
            BackendEvent::DocumentsListed(Ok(vec![DocumentSummary {
                id: DocumentId::Number(1),
                title: "A".into(),
                updated_at: None,
                created_at: None,
            }])),
            Instant::now(),
        );
        assert_eq!(state.documents.items().len(), 1);
        assert!(!state.documents.is_loading());
    }
}
