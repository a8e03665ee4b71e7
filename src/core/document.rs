//! Documents as exchanged with the remote store

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize};

/// Title used when a document has none
pub const UNTITLED: &str = "Untitled document";

/// Remote document identifier.
///
/// The store may send ids as JSON strings or numbers; the original form is
/// kept so it can be echoed back unchanged. Equality and hashing go through
/// the textual form, so `8` and `"8"` name the same document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentId {
    Number(i64),
    Text(String),
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl PartialEq for DocumentId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Number(n), Self::Text(s)) | (Self::Text(s), Self::Number(n)) => {
                *s == n.to_string()
            }
        }
    }
}

impl Eq for DocumentId {}

impl Hash for DocumentId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl From<&str> for DocumentId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for DocumentId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

/// Entry of the document list
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DocumentSummary {
    pub id: DocumentId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl DocumentSummary {
    /// Title for display, falling back to a placeholder
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            "Untitled"
        } else {
            &self.title
        }
    }

    /// Most relevant timestamp: last update, else creation
    pub fn timestamp(&self) -> Option<&str> {
        self.updated_at.as_deref().or(self.created_at.as_deref())
    }
}

/// A full document as returned by the store
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
}

/// What gets sent to the store on save. `id: None` creates a new document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentDraft {
    pub id: Option<DocumentId>,
    pub title: String,
    pub content: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
