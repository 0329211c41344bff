//! State machine trait for status enums.
//!
//! Provides a consistent interface for validating and performing state
//! transitions on conversation states.

use thiserror::Error;

/// Error returned when an invalid state transition is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid state transition: {from} -> {to}")]
pub struct TransitionError {
    /// State the transition started from.
    pub from: String,
    /// Rejected target state.
    pub to: String,
}

/// Trait for status enums that represent state machines.
///
/// Implementors define valid state transitions and get validated
/// transition methods for free.
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, TransitionError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(TransitionError {
                from: format!("{:?}", self),
                to: format!("{:?}", target),
            })
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TestStatus {
        Draft,
        Active,
        Archived,
    }

    impl StateMachine for TestStatus {
        fn can_transition_to(&self, target: &Self) -> bool {
            use TestStatus::*;
            matches!((self, target), (Draft, Active) | (Active, Archived))
        }

        fn valid_transitions(&self) -> Vec<Self> {
            use TestStatus::*;
            match self {
                Draft => vec![Active],
                Active => vec![Archived],
                Archived => vec![],
            }
        }
    }

    #[test]
    fn transition_to_succeeds_for_valid_transition() {
        let result = TestStatus::Draft.transition_to(TestStatus::Active);
        assert_eq!(result, Ok(TestStatus::Active));
    }

    #[test]
    fn transition_to_fails_for_invalid_transition() {
        let result = TestStatus::Draft.transition_to(TestStatus::Archived);
        assert!(result.is_err());
    }

    #[test]
    fn is_terminal_for_archived() {
        assert!(TestStatus::Archived.is_terminal());
        assert!(!TestStatus::Draft.is_terminal());
    }
}
