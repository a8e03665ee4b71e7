//! Remote document store: API client and background request worker

pub mod client;
pub mod worker;

use async_trait::async_trait;
use serde::Deserialize;

use crate::core::document::{Document, DocumentDraft, DocumentId, DocumentSummary};
use crate::core::error::Result;

pub use client::HttpStore;
pub use worker::{Backend, BackendEvent, BackendRequest};

/// Account details returned by a successful login
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Account {
    pub api_token: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_type: Option<String>,
}

/// Operations the editor needs from the document store
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Exchange email and password for an API token
    async fn login(&self, email: &str, password: &str) -> Result<Account>;

    /// List the documents of the logged-in user
    async fn list_documents(&self) -> Result<Vec<DocumentSummary>>;

    /// Fetch one document with its content
    async fn get_document(&self, id: &DocumentId) -> Result<Document>;

    /// Create (`id: None`) or update a document, returning its id
    async fn save_document(&self, draft: &DocumentDraft) -> Result<DocumentId>;

    /// Delete a document
    async fn delete_document(&self, id: &DocumentId) -> Result<()>;
}
