//! In-memory Session Store Adapter
//!
//! Non-durable store for tests and ephemeral runs.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::foundation::ChatId;
use crate::domain::session::Session;
use crate::ports::{SessionStore, SessionStoreError};

/// Keeps all sessions in a process-local map.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<ChatId, Session>>,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, chat: ChatId) -> Result<Session, SessionStoreError> {
        Ok(self
            .sessions
            .read()
            .await
            .get(&chat)
            .cloned()
            .unwrap_or_default())
    }

    async fn save(&self, chat: ChatId, session: &Session) -> Result<(), SessionStoreError> {
        self.sessions.write().await.insert(chat, session.clone());
        Ok(())
    }
}
