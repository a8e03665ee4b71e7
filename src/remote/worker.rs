//! Background execution of store requests
//!
//! The GUI thread never blocks on the network. Requests are spawned on a
//! tokio runtime owned by [`Backend`]; their outcomes come back as
//! [`BackendEvent`]s over a channel that the GUI drains once per frame.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use anyhow::{Context, Result};

use super::{Account, RemoteStore};
use crate::core::document::{Document, DocumentId, DocumentSummary};
use crate::core::error;
use crate::core::session::{SaveRequest, SaveTicket};

/// Work handed to the backend
#[derive(Debug, Clone)]
pub enum BackendRequest {
    Login { email: String, password: String },
    ListDocuments,
    /// `serial` lets the caller discard answers to superseded open requests
    OpenDocument { serial: u64, id: DocumentId },
    SaveDocument(SaveRequest),
    DeleteDocument { id: DocumentId },
}

/// Completed work reported back to the GUI
#[derive(Debug)]
pub enum BackendEvent {
    LoggedIn(error::Result<Account>),
    DocumentsListed(error::Result<Vec<DocumentSummary>>),
    DocumentOpened {
        serial: u64,
        result: error::Result<Document>,
    },
    DocumentSaved {
        ticket: SaveTicket,
        result: error::Result<DocumentId>,
    },
    DocumentDeleted {
        id: DocumentId,
        result: error::Result<()>,
    },
}

type Waker = Arc<dyn Fn() + Send + Sync>;

/// Runs store requests off the GUI thread
pub struct Backend {
    runtime: tokio::runtime::Runtime,
    store: Arc<dyn RemoteStore>,
    events_tx: Sender<BackendEvent>,
    events_rx: Receiver<BackendEvent>,
    waker: Option<Waker>,
}

impl Backend {
    /// Create a backend talking to `store`
    pub fn new(store: Arc<dyn RemoteStore>) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("flashpad-net")
            .enable_all()
            .build()
            .context("Failed to start network runtime")?;
        let (events_tx, events_rx) = mpsc::channel();

        Ok(Self {
            runtime,
            store,
            events_tx,
            events_rx,
            waker: None,
        })
    }

    /// Swap the store, e.g. after login or an endpoint change.
    /// Requests already running keep the store they started with.
    pub fn set_store(&mut self, store: Arc<dyn RemoteStore>) {
        self.store = store;
    }

    /// Callback invoked after each event is queued (GUI repaint)
    pub fn set_waker(&mut self, waker: impl Fn() + Send + Sync + 'static) {
        self.waker = Some(Arc::new(waker));
    }

    /// Start a request in the background
    pub fn submit(&self, request: BackendRequest) {
        let store = Arc::clone(&self.store);
        let tx = self.events_tx.clone();
        let waker = self.waker.clone();

        self.runtime.spawn(async move {
            let event = execute(store.as_ref(), request).await;
            if tx.send(event).is_err() {
                tracing::debug!("Backend event dropped, receiver closed");
                return;
            }
            if let Some(waker) = waker {
                waker();
            }
        });
    }

    /// Drain the events that completed since the last call
    pub fn poll(&self) -> Vec<BackendEvent> {
        self.events_rx.try_iter().collect()
    }
}

async fn execute(store: &dyn RemoteStore, request: BackendRequest) -> BackendEvent {
    match request {
        BackendRequest::Login { email, password } => {
            BackendEvent::LoggedIn(store.login(&email, &password).await)
        }
        BackendRequest::ListDocuments => BackendEvent::DocumentsListed(store.list_documents().await),
        BackendRequest::OpenDocument { serial, id } => BackendEvent::DocumentOpened {
            serial,
            result: store.get_document(&id).await,
        },
        BackendRequest::SaveDocument(request) => BackendEvent::DocumentSaved {
            ticket: request.ticket,
            result: store.save_document(&request.draft).await,
        },
        BackendRequest::DeleteDocument { id } => {
            let result = store.delete_document(&id).await;
            BackendEvent::DocumentDeleted { id, result }
        }
    }
}
