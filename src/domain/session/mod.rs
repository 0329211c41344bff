//! Per-chat session: conversation state plus pagination context.

mod session;
mod state;

pub use session::{ActiveCollection, Session};
pub use state::ChatState;
