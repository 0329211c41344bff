//! Domain outcome of one handled input.
//!
//! The engine reduces every event to an [`Outcome`]; the presenter turns the
//! outcome into caption text and a keyboard without further domain logic.

use crate::domain::catalog::Photo;

/// Result of handling one inbound event for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// First interaction: greeting plus the main menu.
    Welcome,
    /// Returned to the main menu.
    MainMenu,
    /// Explicit cancel: conversation reset to the main menu.
    DialogReset,
    /// Input matched nothing; re-prompt without changing state.
    RePrompt(RePromptMenu),
    /// Entered search input, waiting for keywords.
    SearchPrompt,
    /// A photo to display, with its menu context.
    Photo {
        /// The photo being shown.
        photo: Photo,
        /// Which flow produced it, for caption and keyboard.
        context: PhotoContext,
    },
    /// A search produced zero results.
    NoSearchResults,
    /// The active collection page holds no photos.
    NoCollectionPhotos,
    /// A page of collection titles to choose from.
    Collections {
        /// Titles in display order.
        titles: Vec<String>,
        /// Listing page shown.
        page: u32,
        /// Whether a previous listing page exists.
        has_previous: bool,
    },
    /// The collections listing page came back empty.
    NoCollections {
        /// Whether a previous listing page exists to step back to.
        has_previous: bool,
    },
    /// A provider call failed; session stayed in its prior state.
    Failure {
        /// Upstream error text, surfaced inline to the user.
        message: String,
        /// Which flavor of error message to render.
        kind: FailureKind,
        /// Keyboard matching the state the session reverted to.
        keyboard: FailureKeyboard,
    },
}

/// Flow context of a displayed photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoContext {
    /// Random photo from the main menu flow.
    Random,
    /// Search result page.
    Search {
        /// Current page, 1-based.
        page: u32,
        /// Total pages reported by the provider.
        total_pages: u32,
    },
    /// Photo inside a collection.
    Collection {
        /// Collection title for the caption.
        title: String,
        /// Current page, 1-based.
        page: u32,
        /// Total pages derived from the collection photo count.
        total_pages: u32,
    },
}

/// Which re-prompt hint to show for unmatched input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RePromptMenu {
    /// "Choose an action from the menu."
    Actions,
    /// "Choose a collection or an action from the menu."
    Collections,
    /// Repeat the search keyword prompt.
    SearchKeywords,
}

/// Error message flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Plain provider error.
    Generic,
    /// Error while loading the collections listing.
    CollectionsListing,
}

/// Keyboard presented alongside an error, matching the reverted state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKeyboard {
    /// Main menu rows.
    MainMenu,
    /// "More photo" / "back" rows of the random photo menu.
    RandomPhoto,
    /// Back button only.
    BackOnly,
}
