//! Chat conversation state machine.
//!
//! Defines which menu a chat is currently in and the valid moves between
//! menus. Every handled event leaves the session in exactly one of these
//! states.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// The menu a chat session is currently in.
///
/// - `MainMenu`: top-level action selection
/// - `RandomPhoto`: a random photo was shown, "more"/"back" expected
/// - `SearchInput`: waiting for the user to type search keywords
/// - `SearchResult`: paging through keyword search results
/// - `CollectionsMenu`: paging through the curated collections listing
/// - `CollectionResult`: paging through photos of one collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChatState {
    /// Top-level menu, the initial state.
    #[default]
    MainMenu,

    /// A random photo is on screen.
    RandomPhoto,

    /// Awaiting free-text search keywords.
    SearchInput,

    /// Paging through search results.
    SearchResult,

    /// Paging through the collections listing.
    CollectionsMenu,

    /// Paging through photos inside a collection.
    CollectionResult,
}

impl StateMachine for ChatState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ChatState::*;
        // The reset command returns to the main menu from anywhere.
        if *target == MainMenu {
            return true;
        }
        matches!(
            (self, target),
            (MainMenu, RandomPhoto)
                | (MainMenu, SearchInput)
                | (MainMenu, CollectionsMenu)
                | (SearchInput, SearchResult)
                | (CollectionsMenu, CollectionResult)
                | (CollectionResult, CollectionsMenu)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ChatState::*;
        match self {
            MainMenu => vec![RandomPhoto, SearchInput, CollectionsMenu, MainMenu],
            RandomPhoto => vec![MainMenu],
            SearchInput => vec![SearchResult, MainMenu],
            SearchResult => vec![MainMenu],
            CollectionsMenu => vec![CollectionResult, MainMenu],
            CollectionResult => vec![CollectionsMenu, MainMenu],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STATES: [ChatState; 6] = [
        ChatState::MainMenu,
        ChatState::RandomPhoto,
        ChatState::SearchInput,
        ChatState::SearchResult,
        ChatState::CollectionsMenu,
        ChatState::CollectionResult,
    ];

    mod state_definition {
        use super::*;

        #[test]
        fn default_state_is_main_menu() {
            assert_eq!(ChatState::default(), ChatState::MainMenu);
        }

        #[test]
        fn serializes_to_snake_case() {
            let json = serde_json::to_string(&ChatState::CollectionResult).unwrap();
            assert_eq!(json, "\"collection_result\"");
        }

        #[test]
        fn deserializes_from_snake_case() {
            let state: ChatState = serde_json::from_str("\"search_input\"").unwrap();
            assert_eq!(state, ChatState::SearchInput);
        }
    }

    mod state_machine_trait {
        use super::*;

        #[test]
        fn main_menu_reaches_every_entry_point() {
            let state = ChatState::MainMenu;
            assert!(state.can_transition_to(&ChatState::RandomPhoto));
            assert!(state.can_transition_to(&ChatState::SearchInput));
            assert!(state.can_transition_to(&ChatState::CollectionsMenu));
        }

        #[test]
        fn main_menu_cannot_skip_into_results() {
            let state = ChatState::MainMenu;
            assert!(!state.can_transition_to(&ChatState::SearchResult));
            assert!(!state.can_transition_to(&ChatState::CollectionResult));
        }

        #[test]
        fn search_input_leads_to_search_result() {
            assert!(ChatState::SearchInput.can_transition_to(&ChatState::SearchResult));
        }

        #[test]
        fn collection_result_returns_to_collections_menu() {
            assert!(ChatState::CollectionResult.can_transition_to(&ChatState::CollectionsMenu));
        }

        #[test]
        fn search_result_cannot_jump_to_collections() {
            assert!(!ChatState::SearchResult.can_transition_to(&ChatState::CollectionsMenu));
        }

        #[test]
        fn every_state_can_reset_to_main_menu() {
            for state in ALL_STATES {
                assert!(
                    state.can_transition_to(&ChatState::MainMenu),
                    "{:?} should reset to MainMenu",
                    state
                );
            }
        }

        #[test]
        fn no_state_is_terminal() {
            for state in ALL_STATES {
                assert!(!state.is_terminal(), "{:?} should not be terminal", state);
            }
        }

        #[test]
        fn valid_transitions_matches_can_transition_to() {
            for state in ALL_STATES {
                for target in state.valid_transitions() {
                    assert!(
                        state.can_transition_to(&target),
                        "can_transition_to should allow {:?} -> {:?}",
                        state,
                        target
                    );
                }
            }
        }
    }
}
