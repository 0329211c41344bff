//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.

mod chat_transport;
mod image_provider;
mod session_store;

pub use chat_transport::{ChatTransport, TransportError};
pub use image_provider::{ImageProvider, UpstreamError};
pub use session_store::{SessionStore, SessionStoreError};
