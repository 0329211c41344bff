//! Conversation engine: the per-chat state machine.
//!
//! Given the current session and one inbound event, decides the next state,
//! performs the necessary provider calls and produces an [`Outcome`] for the
//! presenter. Transitions commit atomically: state and page counters only
//! change after the corresponding fetch succeeded, so an upstream failure
//! leaves the session exactly as it was before the event.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::conversation::{
    FailureKeyboard, FailureKind, MenuCommand, Outcome, PhotoContext, RePromptMenu,
};
use crate::domain::foundation::{CollectionId, StateMachine};
use crate::domain::session::{ActiveCollection, ChatState, Session};
use crate::ports::{ImageProvider, UpstreamError};

/// One event arriving from the chat platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// Start/restart command: reset and greet.
    Start,
    /// Cancel command: reset from any state.
    Cancel,
    /// Free-form message text.
    Text(String),
}

/// The state machine driving every chat session.
pub struct ConversationEngine {
    provider: Arc<dyn ImageProvider>,
}

impl ConversationEngine {
    /// Creates an engine over an image provider.
    pub fn new(provider: Arc<dyn ImageProvider>) -> Self {
        Self { provider }
    }

    /// Handles one event for one session.
    ///
    /// The caller (dispatcher) guarantees events for the same chat arrive
    /// strictly one at a time; the engine is not reentrant per session.
    pub async fn handle(&self, session: &mut Session, event: &InboundEvent) -> Outcome {
        match event {
            InboundEvent::Start => {
                session.reset();
                Outcome::Welcome
            }
            InboundEvent::Cancel => {
                session.reset();
                Outcome::DialogReset
            }
            InboundEvent::Text(text) => {
                let command = MenuCommand::parse(session.state, text);
                debug!(state = ?session.state, command = ?command, "handling chat input");
                match session.state {
                    ChatState::MainMenu => self.handle_main_menu(session, command).await,
                    ChatState::RandomPhoto => self.handle_random_photo(session, command).await,
                    ChatState::SearchInput => self.handle_search_input(session, command).await,
                    ChatState::SearchResult => self.handle_search_result(session, command).await,
                    ChatState::CollectionsMenu => {
                        self.handle_collections_menu(session, command).await
                    }
                    ChatState::CollectionResult => {
                        self.handle_collection_result(session, command).await
                    }
                }
            }
        }
    }

    async fn handle_main_menu(&self, session: &mut Session, command: MenuCommand) -> Outcome {
        match command {
            MenuCommand::RandomPhoto => {
                self.show_random_photo(session, FailureKeyboard::MainMenu)
                    .await
            }
            MenuCommand::Search => {
                session.clear_search();
                advance(session, ChatState::SearchInput);
                Outcome::SearchPrompt
            }
            MenuCommand::Collections => {
                self.show_collections(session, 1, FailureKeyboard::MainMenu)
                    .await
            }
            _ => Outcome::RePrompt(RePromptMenu::Actions),
        }
    }

    async fn handle_random_photo(&self, session: &mut Session, command: MenuCommand) -> Outcome {
        match command {
            MenuCommand::MorePhotos => {
                self.show_random_photo(session, FailureKeyboard::RandomPhoto)
                    .await
            }
            MenuCommand::Back => {
                advance(session, ChatState::MainMenu);
                Outcome::MainMenu
            }
            _ => Outcome::RePrompt(RePromptMenu::Actions),
        }
    }

    async fn handle_search_input(&self, session: &mut Session, command: MenuCommand) -> Outcome {
        match command {
            MenuCommand::Back => {
                advance(session, ChatState::MainMenu);
                Outcome::MainMenu
            }
            MenuCommand::Other(query) if !query.is_empty() => {
                self.run_search(session, &query, 1).await
            }
            MenuCommand::Other(_) => Outcome::RePrompt(RePromptMenu::SearchKeywords),
            _ => Outcome::RePrompt(RePromptMenu::Actions),
        }
    }

    async fn handle_search_result(&self, session: &mut Session, command: MenuCommand) -> Outcome {
        match command {
            MenuCommand::PreviousPhoto if session.search_page > 1 => {
                match session.search_query.clone() {
                    Some(query) => self.run_search(session, &query, session.search_page - 1).await,
                    None => Outcome::RePrompt(RePromptMenu::Actions),
                }
            }
            MenuCommand::NextPhoto if session.search_page < session.search_total_pages => {
                match session.search_query.clone() {
                    Some(query) => self.run_search(session, &query, session.search_page + 1).await,
                    None => Outcome::RePrompt(RePromptMenu::Actions),
                }
            }
            MenuCommand::Back => {
                session.clear_search();
                advance(session, ChatState::MainMenu);
                Outcome::MainMenu
            }
            // Previous/next out of range are no-ops: no fetch, no page change.
            _ => Outcome::RePrompt(RePromptMenu::Actions),
        }
    }

    async fn handle_collections_menu(
        &self,
        session: &mut Session,
        command: MenuCommand,
    ) -> Outcome {
        match command {
            MenuCommand::Back => {
                session.collections_page = 1;
                session.collections_index.clear();
                advance(session, ChatState::MainMenu);
                Outcome::MainMenu
            }
            MenuCommand::PreviousCollections if session.collections_page > 1 => {
                let page = session.collections_page - 1;
                self.show_collections(session, page, FailureKeyboard::BackOnly)
                    .await
            }
            // "Next" carries no upper bound: the listing endpoint reports no
            // total, so an empty page is the terminal signal instead.
            MenuCommand::NextCollections => {
                let page = session.collections_page + 1;
                self.show_collections(session, page, FailureKeyboard::BackOnly)
                    .await
            }
            MenuCommand::Other(title) => {
                match session.collections_index.get(&title).cloned() {
                    Some(id) => self.open_collection(session, id, title).await,
                    None => Outcome::RePrompt(RePromptMenu::Collections),
                }
            }
            _ => Outcome::RePrompt(RePromptMenu::Collections),
        }
    }

    async fn handle_collection_result(
        &self,
        session: &mut Session,
        command: MenuCommand,
    ) -> Outcome {
        match command {
            MenuCommand::PreviousPhoto if session.collection_page > 1 => {
                self.turn_collection_page(session, session.collection_page - 1)
                    .await
            }
            MenuCommand::NextPhoto
                if session.collection_page < session.collection_total_pages =>
            {
                self.turn_collection_page(session, session.collection_page + 1)
                    .await
            }
            MenuCommand::Back => {
                // Re-list at the recorded page so the title index is rebuilt;
                // titles may have shifted upstream since it was displayed.
                let page = session.collections_page;
                self.show_collections(session, page, FailureKeyboard::BackOnly)
                    .await
            }
            _ => Outcome::RePrompt(RePromptMenu::Actions),
        }
    }

    async fn show_random_photo(
        &self,
        session: &mut Session,
        failure_keyboard: FailureKeyboard,
    ) -> Outcome {
        match self.provider.random_photo().await {
            Ok(photo) => {
                advance(session, ChatState::RandomPhoto);
                Outcome::Photo {
                    photo,
                    context: PhotoContext::Random,
                }
            }
            Err(error) => failure(error, FailureKind::Generic, failure_keyboard),
        }
    }

    async fn run_search(&self, session: &mut Session, query: &str, page: u32) -> Outcome {
        match self.provider.search_photos(query, page).await {
            Ok(result) => {
                advance(session, ChatState::SearchResult);
                session.search_query = Some(query.to_string());
                session.search_page = page;
                match result.first().cloned() {
                    Some(photo) => {
                        session.search_total_pages = result.total_pages;
                        Outcome::Photo {
                            photo,
                            context: PhotoContext::Search {
                                page,
                                total_pages: result.total_pages,
                            },
                        }
                    }
                    None => {
                        session.search_total_pages = 0;
                        Outcome::NoSearchResults
                    }
                }
            }
            Err(error) => failure(error, FailureKind::Generic, FailureKeyboard::BackOnly),
        }
    }

    async fn show_collections(
        &self,
        session: &mut Session,
        page: u32,
        failure_keyboard: FailureKeyboard,
    ) -> Outcome {
        match self.provider.list_collections(page).await {
            Ok(collections) => {
                advance(session, ChatState::CollectionsMenu);
                session.collections_page = page;
                session.index_collections(&collections);
                session.clear_active_collection();
                if collections.is_empty() {
                    Outcome::NoCollections {
                        has_previous: page > 1,
                    }
                } else {
                    Outcome::Collections {
                        titles: collections.into_iter().map(|c| c.title).collect(),
                        page,
                        has_previous: page > 1,
                    }
                }
            }
            Err(error) => failure(error, FailureKind::CollectionsListing, failure_keyboard),
        }
    }

    async fn open_collection(
        &self,
        session: &mut Session,
        id: CollectionId,
        title: String,
    ) -> Outcome {
        match self.provider.collection_photos(&id, 1).await {
            Ok(result) => {
                advance(session, ChatState::CollectionResult);
                session.collection_page = 1;
                session.collection_total_pages = result.total_pages;
                session.active_collection = Some(ActiveCollection {
                    id,
                    title: title.clone(),
                });
                match result.first().cloned() {
                    Some(photo) => Outcome::Photo {
                        photo,
                        context: PhotoContext::Collection {
                            title,
                            page: 1,
                            total_pages: session.collection_total_pages,
                        },
                    },
                    None => {
                        session.collection_total_pages = 0;
                        Outcome::NoCollectionPhotos
                    }
                }
            }
            Err(error) => failure(error, FailureKind::Generic, FailureKeyboard::BackOnly),
        }
    }

    async fn turn_collection_page(&self, session: &mut Session, page: u32) -> Outcome {
        let Some(active) = session.active_collection.clone() else {
            return Outcome::RePrompt(RePromptMenu::Actions);
        };
        match self.provider.collection_photos(&active.id, page).await {
            Ok(result) => {
                session.collection_page = page;
                match result.first().cloned() {
                    Some(photo) => {
                        session.collection_total_pages = result.total_pages;
                        Outcome::Photo {
                            photo,
                            context: PhotoContext::Collection {
                                title: active.title,
                                page,
                                total_pages: result.total_pages,
                            },
                        }
                    }
                    None => Outcome::NoCollectionPhotos,
                }
            }
            Err(error) => failure(error, FailureKind::Generic, FailureKeyboard::BackOnly),
        }
    }
}

/// Moves the session to `target`. Same-state refreshes (another random photo,
/// the next page) skip validation; everything else must be a valid move of
/// the state graph. Handlers only request valid moves, so a rejected
/// transition is logged and forced rather than surfaced.
fn advance(session: &mut Session, target: ChatState) {
    if session.state == target {
        return;
    }
    match session.state.transition_to(target) {
        Ok(next) => session.state = next,
        Err(e) => {
            warn!(error = %e, "forcing transition outside the state graph");
            session.state = target;
        }
    }
}

fn failure(error: UpstreamError, kind: FailureKind, keyboard: FailureKeyboard) -> Outcome {
    Outcome::Failure {
        message: error.to_string(),
        kind,
        keyboard,
    }
}
