//! Error types shared by the editor core and the remote store client.

use thiserror::Error;

/// All errors surfaced to the user by Flashpad.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required field was left empty.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The credential is missing, invalid or expired.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The request never produced a usable response.
    #[error("Network error: {0}")]
    Network(String),

    /// The document does not exist (anymore) on the remote store.
    #[error("Document not found: {0}")]
    NotFound(String),

    /// The remote store answered with an application-level failure.
    #[error("API error: {0}")]
    Api(String),

    /// A local file operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Local data could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias that pins the error type to [`AppError`].
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Whether this error must force the user to log in again.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }

    /// Returns a short, human-readable message suitable for a notification.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            Self::Auth(_) => "Session expired, please log in again".to_string(),
            Self::Network(_) => "Could not reach the document server".to_string(),
            Self::NotFound(_) => "Document no longer exists".to_string(),
            Self::Api(msg) => msg.clone(),
            Self::Io(e) => format!("File error: {e}"),
            Self::Json(e) => format!("Data format error: {e}"),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_has_session_expired_message() {
        let e = AppError::Auth("401".into());
        assert!(e.is_auth());
        assert!(e.user_message().contains("expired"));
    }

    #[test]
    fn test_validation_message_is_shown_verbatim() {
        let e = AppError::Validation("Please fill in all fields".into());
        assert!(!e.is_auth());
        assert_eq!(e.user_message(), "Please fill in all fields");
    }
}
