//! HTTP client for the document API.
//!
//! The API is a single endpoint selecting the operation through an `action`
//! query parameter. Every response is a JSON envelope carrying a `success`
//! flag and, on failure, an `error` message.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{Account, RemoteStore};
use crate::core::document::{Document, DocumentDraft, DocumentId, DocumentSummary};
use crate::core::error::{AppError, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Deserialize)]
struct ListPayload {
    #[serde(default)]
    documents: Option<Vec<DocumentSummary>>,
}

#[derive(Deserialize)]
struct DocumentPayload {
    document: Document,
}

#[derive(Deserialize)]
struct SavePayload {
    document_id: DocumentId,
}

/// [`RemoteStore`] backed by the HTTP API
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: Client,
    api_url: String,
    token: Option<String>,
}

impl HttpStore {
    /// Create a client for `api_url`, authenticating with `token` if given
    pub fn new(api_url: &str, token: Option<String>) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self::with_client(client, api_url, token))
    }

    /// Create a client around a preconfigured [`reqwest::Client`]
    pub fn with_client(client: Client, api_url: &str, token: Option<String>) -> Self {
        Self {
            client,
            api_url: api_url.trim().to_string(),
            token: token.filter(|t| !t.is_empty()),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    async fn call(
        &self,
        method: Method,
        action: &str,
        id: Option<&DocumentId>,
        body: Option<Value>,
    ) -> Result<Value> {
        let mut request = self
            .client
            .request(method.clone(), &self.api_url)
            .query(&[("action", action)]);

        if let Some(id) = id {
            request = request.query(&[("id", id.to_string())]);
        }
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        tracing::debug!("{} {} action={}", method, self.api_url, action);
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        parse_envelope(status, &text)
    }

    async fn call_as<T: DeserializeOwned>(
        &self,
        method: Method,
        action: &str,
        id: Option<&DocumentId>,
        body: Option<Value>,
    ) -> Result<T> {
        let value = self.call(method, action, id, body).await?;
        serde_json::from_value(value)
            .map_err(|e| AppError::Network(format!("unexpected response for {action}: {e}")))
    }
}

/// Turn a raw response into the envelope value or a classified error
pub fn parse_envelope(status: StatusCode, body: &str) -> Result<Value> {
    let value: Option<Value> = serde_json::from_str(body).ok();
    let success = value
        .as_ref()
        .and_then(|v| v.get("success"))
        .and_then(Value::as_bool)
        .unwrap_or(false);

    if success {
        return value.ok_or_else(|| AppError::Network("empty response".into()));
    }

    let message = value
        .as_ref()
        .and_then(|v| v.get("error"))
        .and_then(Value::as_str)
        .map(str::to_string);

    match status {
        StatusCode::UNAUTHORIZED => Err(AppError::Auth(
            message.unwrap_or_else(|| "session expired".to_string()),
        )),
        StatusCode::NOT_FOUND => Err(AppError::NotFound(
            message.unwrap_or_else(|| "document not found".to_string()),
        )),
        _ => match (value, message) {
            (None, _) => Err(AppError::Network(format!(
                "invalid response (status {status})"
            ))),
            (Some(_), Some(message)) => Err(AppError::Api(message)),
            (Some(_), None) => Err(AppError::Api("API error".to_string())),
        },
    }
}

#[async_trait]
impl RemoteStore for HttpStore {
    async fn login(&self, email: &str, password: &str) -> Result<Account> {
        let body = json!({ "email": email, "password": password });
        // the login call is made without any previous token
        let anonymous = Self::with_client(self.client.clone(), &self.api_url, None);
        let account: Account = anonymous
            .call_as(Method::POST, "login", None, Some(body))
            .await
            .map_err(|e| match e {
                AppError::Auth(msg) => AppError::Api(msg),
                other => other,
            })?;
        tracing::info!("Logged in as {}", account.email.as_deref().unwrap_or(email));
        Ok(account)
    }

    async fn list_documents(&self) -> Result<Vec<DocumentSummary>> {
        let payload: ListPayload = self
            .call_as(Method::GET, "get_documents", None, None)
            .await?;
        Ok(payload.documents.unwrap_or_default())
    }

    async fn get_document(&self, id: &DocumentId) -> Result<Document> {
        let payload: DocumentPayload = self
            .call_as(Method::GET, "get_documents", Some(id), None)
            .await?;
        Ok(payload.document)
    }

    async fn save_document(&self, draft: &DocumentDraft) -> Result<DocumentId> {
        let body = serde_json::to_value(draft)?;
        let payload: SavePayload = self
            .call_as(Method::POST, "save_document", None, Some(body))
            .await?;
        tracing::info!("Saved document {}", payload.document_id);
        Ok(payload.document_id)
    }

    async fn delete_document(&self, id: &DocumentId) -> Result<()> {
        let body = json!({ "id": id });
        self.call(Method::POST, "delete_document", None, Some(body))
            .await?;
        tracing::info!("Deleted document {}", id);
        Ok(())
    }
}
