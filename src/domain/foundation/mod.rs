//! Foundation types shared across the domain.

mod ids;
mod state_machine;

pub use ids::{ChatId, CollectionId};
pub use state_machine::{StateMachine, TransitionError};
