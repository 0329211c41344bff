//! Application layer: the conversation engine and the dispatcher that wires
//! it to the session store and the chat transport.

mod dispatcher;
mod engine;

pub use dispatcher::Dispatcher;
pub use engine::{ConversationEngine, InboundEvent};
