//! File-based Session Store Adapter
//!
//! Stores one YAML file per chat under a base directory, so conversations
//! survive process restarts. The dispatcher serializes access per chat, so
//! a plain write per save is sufficient.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::foundation::ChatId;
use crate::domain::session::Session;
use crate::ports::{SessionStore, SessionStoreError};

/// File-based storage for chat sessions.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    base_path: PathBuf,
}

impl FileSessionStore {
    /// Create a new file store rooted at a base directory.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the session file path for a chat.
    fn session_file_path(&self, chat: ChatId) -> PathBuf {
        self.base_path.join(format!("{}.yaml", chat))
    }

    /// Ensure the base directory exists.
    async fn ensure_base_dir(&self) -> Result<(), SessionStoreError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| SessionStoreError::IoError(e.to_string()))
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self, chat: ChatId) -> Result<Session, SessionStoreError> {
        let file_path = self.session_file_path(chat);

        // First interaction for this chat: start a fresh session.
        if !file_path.exists() {
            return Ok(Session::default());
        }

        let yaml = fs::read_to_string(&file_path)
            .await
            .map_err(|e| SessionStoreError::IoError(e.to_string()))?;

        let session = serde_yaml::from_str(&yaml)
            .map_err(|e| SessionStoreError::DeserializationFailed(e.to_string()))?;

        Ok(session)
    }

    async fn save(&self, chat: ChatId, session: &Session) -> Result<(), SessionStoreError> {
        self.ensure_base_dir().await?;

        let yaml = serde_yaml::to_string(session)
            .map_err(|e| SessionStoreError::SerializationFailed(e.to_string()))?;

        fs::write(self.session_file_path(chat), yaml)
            .await
            .map_err(|e| SessionStoreError::IoError(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::ChatState;
    use tempfile::TempDir;

    fn browsing_session() -> Session {
        let mut session = Session::new();
        session.state = ChatState::SearchResult;
        session.search_query = Some("mountains".to_string());
        session.search_page = 4;
        session.search_total_pages = 12;
        session
    }

    #[tokio::test]
    async fn load_absent_session_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path());

        let session = store.load(ChatId::new(1)).await.unwrap();

        assert_eq!(session.state, ChatState::MainMenu);
        assert!(session.search_query.is_none());
    }

    #[tokio::test]
    async fn save_and_load_round_trips_session() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path());
        let chat = ChatId::new(42);
        let session = browsing_session();

        store.save(chat, &session).await.unwrap();
        let loaded = store.load(chat).await.unwrap();

        assert_eq!(loaded, session);
    }

    #[tokio::test]
    async fn save_overwrites_previous_session() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path());
        let chat = ChatId::new(42);

        store.save(chat, &browsing_session()).await.unwrap();
        let mut updated = browsing_session();
        updated.search_page = 5;
        store.save(chat, &updated).await.unwrap();

        let loaded = store.load(chat).await.unwrap();
        assert_eq!(loaded.search_page, 5);
    }

    #[tokio::test]
    async fn sessions_of_different_chats_are_independent() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path());

        store.save(ChatId::new(1), &browsing_session()).await.unwrap();

        let other = store.load(ChatId::new(2)).await.unwrap();
        assert_eq!(other.state, ChatState::MainMenu);
    }

    #[tokio::test]
    async fn save_creates_missing_base_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("data").join("sessions");
        let store = FileSessionStore::new(&nested);

        store.save(ChatId::new(1), &Session::new()).await.unwrap();

        assert!(nested.exists());
    }

    #[tokio::test]
    async fn corrupt_file_surfaces_deserialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path());
        let chat = ChatId::new(9);
        tokio::fs::write(store.session_file_path(chat), "state: [not a state")
            .await
            .unwrap();

        let result = store.load(chat).await;

        assert!(matches!(
            result,
            Err(SessionStoreError::DeserializationFailed(_))
        ));
    }
}
