use std::io;
use std::path::{Path, PathBuf};
use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, RwLock};
use crate::errors::SessionStoreError;

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Tokens {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

/// Persistence for the session tokens.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self) -> Result<Tokens, SessionStoreError>;
    async fn save(&self, tokens: &Tokens) -> Result<(), SessionStoreError>;
    async fn clear(&self) -> Result<(), SessionStoreError>;
}

/// Tokens in a toml file readable by the owner only.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        FileSessionStore { path: path.as_ref().to_owned() }
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Tokens, SessionStoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(toml::from_str(&contents)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Tokens::default()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, tokens: &Tokens) -> Result<(), SessionStoreError> {
        let contents = toml::to_string(tokens)?;
        let mut file = tokio::fs::OpenOptions::new()
            .mode(0o600)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)
            .await?;
        file.write_all(contents.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionStoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

#[derive(Default)]
pub struct MemorySessionStore {
    tokens: Mutex<Tokens>,
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<Tokens, SessionStoreError> {
        Ok(self.tokens.lock().await.clone())
    }

    async fn save(&self, tokens: &Tokens) -> Result<(), SessionStoreError> {
        *self.tokens.lock().await = tokens.clone();
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionStoreError> {
        *self.tokens.lock().await = Tokens::default();
        Ok(())
    }
}

/// The tokens of the logged-in user, mirrored to a [`SessionStore`].
pub struct Session {
    store: Box<dyn SessionStore>,
    tokens: RwLock<Tokens>,
}

impl Session {
    pub fn new(store: impl SessionStore + 'static) -> Self {
        Session {
            store: Box::new(store),
            tokens: RwLock::new(Tokens::default()),
        }
    }

    /// Load the persisted tokens, if any.
    pub async fn init(&self) -> Result<(), SessionStoreError> {
        let tokens = self.store.load().await?;
        debug!("session loaded, logged in: {}", tokens.access_token.is_some());
        *self.tokens.write().await = tokens;
        Ok(())
    }

    pub async fn set_tokens(
        &self,
        access_token: String,
        refresh_token: String,
    ) -> Result<(), SessionStoreError> {
        let tokens = Tokens {
            access_token: Some(access_token),
            refresh_token: Some(refresh_token),
        };
        self.store.save(&tokens).await?;
        *self.tokens.write().await = tokens;
        Ok(())
    }

    /// Replace the access token after a successful refresh.
    pub async fn refresh(&self, access_token: String) -> Result<(), SessionStoreError> {
        let mut tokens = self.tokens.write().await;
        let updated = Tokens {
            access_token: Some(access_token),
            refresh_token: tokens.refresh_token.clone(),
        };
        self.store.save(&updated).await?;
        *tokens = updated;
        Ok(())
    }

    pub async fn clear(&self) -> Result<(), SessionStoreError> {
        *self.tokens.write().await = Tokens::default();
        self.store.clear().await
    }

    pub async fn access_token(&self) -> Option<String> {
        self.tokens.read().await.access_token.clone()
    }

    pub async fn refresh_token(&self) -> Option<String> {
        self.tokens.read().await.refresh_token.clone()
    }

    pub async fn is_logged_in(&self) -> bool {
        self.tokens.read().await.refresh_token.is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::os::unix::fs::PermissionsExt;
    use assert_fs::prelude::*;
    use assert_fs::TempDir;
    use super::*;

    #[tokio::test]
    async fn file_store_persists_tokens() {
        let dir = TempDir::new().unwrap();
        let file = dir.child("session.toml");

        let session = Session::new(FileSessionStore::new(file.path()));
        session.init().await.expect("init failed");
        assert!(!session.is_logged_in().await);
        session.set_tokens("access".into(), "refresh".into()).await
            .expect("saving tokens failed");
        session.refresh("access2".into()).await.expect("refresh failed");
        let mode = std::fs::metadata(file.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o077, 0);

        let reloaded = Session::new(FileSessionStore::new(file.path()));
        reloaded.init().await.expect("init failed");
        assert_eq!(reloaded.access_token().await.as_deref(), Some("access2"));
        assert_eq!(reloaded.refresh_token().await.as_deref(), Some("refresh"));

        reloaded.clear().await.expect("clear failed");
        assert!(!file.path().exists());
        assert_eq!(reloaded.access_token().await, None);
    }

    #[tokio::test]
    async fn malformed_session_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let file = dir.child("session.toml");
        file.write_str("access_token = [").unwrap();

        let session = Session::new(FileSessionStore::new(file.path()));
        let err = session.init().await.expect_err("should fail");
        assert!(matches!(err, SessionStoreError::Parse(_)), "wrong error type: {err:#?}");
    }

    #[tokio::test]
    async fn memory_store_round_trip() {
        let session = Session::new(MemorySessionStore::default());
        session.set_tokens("a".into(), "r".into()).await.unwrap();
        assert!(session.is_logged_in().await);
        session.clear().await.unwrap();
        assert!(!session.is_logged_in().await);
        assert_eq!(session.refresh_token().await, None);
    }
}
