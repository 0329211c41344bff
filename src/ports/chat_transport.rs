//! Chat Transport Port - outbound "send message / send photo" capability.
//!
//! The domain only knows about display payloads: text or a photo with a
//! caption, plus rows of selectable button labels. How those become wire
//! messages is the adapter's business.

use async_trait::async_trait;

use crate::domain::conversation::DisplayPayload;
use crate::domain::foundation::ChatId;

/// Errors sending to the chat platform.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),

    #[error("chat platform rejected the request: {0}")]
    Api(String),
}

/// Port for delivering a display payload to a chat.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Sends the payload (text or photo + caption, with optional keyboard).
    async fn send(&self, chat: ChatId, payload: &DisplayPayload) -> Result<(), TransportError>;
}
