//! Session Store Port - Interface for persisting chat sessions.
//!
//! The store must be durable across process restarts so a conversation
//! resumes mid-flow. Concurrent access for different chats is independent;
//! the dispatcher serializes access per chat, so implementations never see
//! two concurrent operations for the same key.

use async_trait::async_trait;

use crate::domain::foundation::ChatId;
use crate::domain::session::Session;

/// Errors that can occur during session store operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Failed to serialize session: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize session: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Port for loading and saving per-chat sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Loads the session for a chat, creating a default one if absent.
    async fn load(&self, chat: ChatId) -> Result<Session, SessionStoreError>;

    /// Persists the session for a chat.
    async fn save(&self, chat: ChatId, session: &Session) -> Result<(), SessionStoreError>;
}
