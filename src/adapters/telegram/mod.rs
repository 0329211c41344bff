//! Telegram Bot API adapter: outgoing transport and long-polling updates.

mod api;
mod poller;
mod transport;

pub use poller::UpdatePoller;
pub use transport::{TelegramConfig, TelegramTransport};
