//! Conversation vocabulary: menu input parsing, turn outcomes and the
//! presenter that renders outcomes into display payloads.

mod input;
mod outcome;
mod presenter;

pub use input::{labels, MenuCommand};
pub use outcome::{FailureKeyboard, FailureKind, Outcome, PhotoContext, RePromptMenu};
pub use presenter::{present, DisplayPayload};
