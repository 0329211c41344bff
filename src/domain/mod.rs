//! Domain layer: session state machine, catalog values and the conversation
//! vocabulary. No I/O lives here.

pub mod catalog;
pub mod conversation;
pub mod foundation;
pub mod session;
