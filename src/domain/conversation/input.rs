//! Menu input parsing.
//!
//! Free-form text is matched against the labels of the menu the chat is
//! currently in and turned into an explicit command, so the engine can
//! dispatch on an enum instead of comparing strings in every branch.
//! Anything that matches no label comes out as [`MenuCommand::Other`]; what
//! that means (search query, collection title, or a re-prompt) depends on
//! the state.

use crate::domain::session::ChatState;

/// Button labels shown to the user. User-facing text is Russian.
pub mod labels {
    /// Main menu: request a random photo.
    pub const RANDOM_PHOTO: &str = "🖼️ Случайное фото";
    /// Main menu: start a keyword search.
    pub const SEARCH: &str = "🔍 Поиск фото";
    /// Main menu: browse curated collections.
    pub const COLLECTIONS: &str = "📁 Коллекции";
    /// Random photo menu: fetch another one.
    pub const MORE_PHOTOS: &str = "Еще фото";
    /// Photo pagination: previous page.
    pub const PREVIOUS_PHOTO: &str = "⬅️ Предыдущее";
    /// Photo pagination: next page.
    pub const NEXT_PHOTO: &str = "➡️ Следующее";
    /// Collections listing: previous page.
    pub const PREVIOUS_COLLECTIONS: &str = "⬅️ Предыдущая страница";
    /// Collections listing: next page.
    pub const NEXT_COLLECTIONS: &str = "➡️ Следующая страница";
    /// Leave the current menu.
    pub const BACK: &str = "Назад";
}

/// A text input interpreted against the current menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuCommand {
    /// Main menu: show a random photo.
    RandomPhoto,
    /// Main menu: enter search input.
    Search,
    /// Main menu: open the collections listing.
    Collections,
    /// Random photo menu: another random photo.
    MorePhotos,
    /// Photo pagination backwards.
    PreviousPhoto,
    /// Photo pagination forwards.
    NextPhoto,
    /// Collections listing pagination backwards.
    PreviousCollections,
    /// Collections listing pagination forwards.
    NextCollections,
    /// Leave the current menu.
    Back,
    /// Text matching no label of the current menu (trimmed).
    Other(String),
}

impl MenuCommand {
    /// Interprets `text` in the context of `state`.
    ///
    /// Labels belonging to other menus are not recognized: "Еще фото" sent
    /// from the main menu is just unmatched text.
    pub fn parse(state: ChatState, text: &str) -> Self {
        let text = text.trim();
        match state {
            ChatState::MainMenu => match text {
                labels::RANDOM_PHOTO => Self::RandomPhoto,
                labels::SEARCH => Self::Search,
                labels::COLLECTIONS => Self::Collections,
                other => Self::Other(other.to_string()),
            },
            ChatState::RandomPhoto => match text {
                labels::MORE_PHOTOS => Self::MorePhotos,
                labels::BACK => Self::Back,
                other => Self::Other(other.to_string()),
            },
            ChatState::SearchInput => match text {
                labels::BACK => Self::Back,
                other => Self::Other(other.to_string()),
            },
            ChatState::SearchResult | ChatState::CollectionResult => match text {
                labels::PREVIOUS_PHOTO => Self::PreviousPhoto,
                labels::NEXT_PHOTO => Self::NextPhoto,
                labels::BACK => Self::Back,
                other => Self::Other(other.to_string()),
            },
            ChatState::CollectionsMenu => match text {
                labels::PREVIOUS_COLLECTIONS => Self::PreviousCollections,
                labels::NEXT_COLLECTIONS => Self::NextCollections,
                labels::BACK => Self::Back,
                other => Self::Other(other.to_string()),
            },
        }
    }
}
