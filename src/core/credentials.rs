//! Durable key-value storage for the API endpoint and login credential

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;

pub const KEY_API_URL: &str = "api_url";
pub const KEY_API_KEY: &str = "api_key";
pub const KEY_USER_EMAIL: &str = "user_email";
pub const KEY_USER_TYPE: &str = "user_type";

/// Endpoint used until the user configures another one
pub const DEFAULT_API_URL: &str = "https://api.byflash.fr/index.php";

/// String map persisted as JSON, written through on every change
#[derive(Debug, Clone)]
pub struct LocalStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl LocalStore {
    /// Default location in the platform data directory
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "flashpad", "Flashpad")
            .map(|dirs| dirs.data_dir().join("storage.json"))
    }

    /// Open the store at `path`; a missing file is an empty store
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read storage {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Invalid storage {}", path.display()))?
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<()> {
        self.values.insert(key.to_string(), value.into());
        self.persist()
    }

    pub fn remove(&mut self, key: &str) -> Result<()> {
        if self.values.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write storage {}", self.path.display()))?;
        Ok(())
    }
}

/// Endpoint and login state read from a [`LocalStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_url: String,
    pub api_key: String,
    pub user_email: String,
    pub user_type: String,
}

impl Credentials {
    pub fn from_store(store: &LocalStore) -> Self {
        let value = |key: &str| store.get(key).unwrap_or_default().to_string();
        let api_url = store
            .get(KEY_API_URL)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(DEFAULT_API_URL)
            .to_string();
        Self {
            api_url,
            api_key: value(KEY_API_KEY),
            user_email: value(KEY_USER_EMAIL),
            user_type: value(KEY_USER_TYPE),
        }
    }

    /// A token and an email are both required to skip the login screen
    pub fn is_authenticated(&self) -> bool {
        !self.api_key.is_empty() && !self.user_email.is_empty()
    }

    /// Remember a successful login
    pub fn store_login(
        store: &mut LocalStore,
        api_key: &str,
        user_email: &str,
        user_type: &str,
    ) -> Result<Self> {
        store.set(KEY_API_KEY, api_key)?;
        store.set(KEY_USER_EMAIL, user_email)?;
        store.set(KEY_USER_TYPE, user_type)?;
        Ok(Self::from_store(store))
    }

    /// Forget the login; the endpoint is kept
    pub fn clear_login(store: &mut LocalStore) -> Result<Self> {
        store.remove(KEY_API_KEY)?;
        store.remove(KEY_USER_EMAIL)?;
        store.remove(KEY_USER_TYPE)?;
        Ok(Self::from_store(store))
    }

    /// Point the client at another endpoint
    pub fn store_api_url(store: &mut LocalStore, api_url: &str) -> Result<Self> {
        store.set(KEY_API_URL, api_url.trim())?;
        Ok(Self::from_store(store))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path().join("storage.json")).unwrap();
        let creds = Credentials::from_store(&store);
        assert_eq!(creds.api_url, DEFAULT_API_URL);
        assert!(!creds.is_authenticated());
    }

    #[test]
    fn test_login_survives_reopen_and_logout_clears_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let mut store = LocalStore::open(&path).unwrap();
        Credentials::store_api_url(&mut store, " https://example.test/api ").unwrap();
        Credentials::store_login(&mut store, "tok", "me@example.test", "premium").unwrap();

        let mut reopened = LocalStore::open(&path).unwrap();
        let creds = Credentials::from_store(&reopened);
        assert!(creds.is_authenticated());
        assert_eq!(creds.api_url, "https://example.test/api");
        assert_eq!(creds.user_type, "premium");

        let creds = Credentials::clear_login(&mut reopened).unwrap();
        assert!(!creds.is_authenticated());
        assert_eq!(creds.api_url, "https://example.test/api");
        assert!(LocalStore::open(&path).unwrap().get(KEY_API_KEY).is_none());
    }
}
