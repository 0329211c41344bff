//! Dispatcher: glues transport events to the engine and the session store.
//!
//! Each chat is logically single-threaded: a per-chat mutex guarantees that
//! events for one chat are processed strictly in arrival order, because a
//! turn reads-then-writes the whole session record. Different chats proceed
//! in parallel.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::{error, info, warn};

use super::engine::{ConversationEngine, InboundEvent};
use crate::domain::conversation::{present, DisplayPayload};
use crate::domain::foundation::ChatId;
use crate::ports::{ChatTransport, SessionStore};

/// Shown when the session store fails; the turn is aborted and the user is
/// asked to retry from the main menu.
const STORE_FAILURE_TEXT: &str = "Произошла ошибка. Выберите действие:";

/// Routes one inbound event through load -> handle -> save -> send.
pub struct Dispatcher {
    engine: ConversationEngine,
    store: Arc<dyn SessionStore>,
    transport: Arc<dyn ChatTransport>,
    locks: Mutex<HashMap<ChatId, Arc<tokio::sync::Mutex<()>>>>,
}

impl Dispatcher {
    /// Creates a dispatcher over the given collaborators.
    pub fn new(
        engine: ConversationEngine,
        store: Arc<dyn SessionStore>,
        transport: Arc<dyn ChatTransport>,
    ) -> Self {
        Self {
            engine,
            store,
            transport,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Processes one event for one chat.
    ///
    /// Persistence failures abort the turn before anything is sent, so the
    /// user always retries from the last persisted state. Send failures are
    /// logged only; the session has already been committed.
    pub async fn dispatch(&self, chat: ChatId, event: InboundEvent) {
        let lock = self.chat_lock(chat);
        let _guard = lock.lock().await;

        let mut session = match self.store.load(chat).await {
            Ok(session) => session,
            Err(e) => {
                error!(%chat, error = %e, "failed to load session");
                self.send_store_failure(chat).await;
                return;
            }
        };

        let outcome = self.engine.handle(&mut session, &event).await;
        session.touch();
        let payload = present(&outcome);

        if let Err(e) = self.store.save(chat, &session).await {
            error!(%chat, error = %e, "failed to persist session");
            self.send_store_failure(chat).await;
            return;
        }

        info!(%chat, state = ?session.state, "turn handled");

        if let Err(e) = self.transport.send(chat, &payload).await {
            error!(%chat, error = %e, "failed to deliver reply");
        }
    }

    fn chat_lock(&self, chat: ChatId) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        // A lock referenced only by the map belongs to a finished turn; drop
        // it so the map stays bounded by the number of in-flight chats.
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        locks
            .entry(chat)
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }

    async fn send_store_failure(&self, chat: ChatId) {
        let payload = DisplayPayload {
            text: STORE_FAILURE_TEXT.to_string(),
            photo_url: None,
            keyboard: None,
        };
        if let Err(e) = self.transport.send(chat, &payload).await {
            warn!(%chat, error = %e, "failed to deliver store-failure notice");
        }
    }
}
