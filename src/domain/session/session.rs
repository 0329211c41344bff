//! Per-chat conversation session.
//!
//! One `Session` exists per chat identity. It records which menu the chat is
//! in plus the pagination and selection context that menu needs. The record
//! is persisted after every mutation so a process restart resumes
//! mid-conversation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::ChatState;
use crate::domain::foundation::CollectionId;

/// Persistent conversation context for a single chat.
///
/// Mutated exclusively by the conversation engine; page counters only move
/// together with a successful fetch, so a failed provider call never leaves
/// them pointing at content that was never shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Current menu state.
    pub state: ChatState,

    /// Active search query; set on entering SearchResult, cleared when the
    /// search flow is left.
    pub search_query: Option<String>,

    /// Current search result page, 1-based.
    pub search_page: u32,

    /// Total search result pages reported by the provider
    /// (0 while empty / no results).
    pub search_total_pages: u32,

    /// Page cursor over the collections listing.
    pub collections_page: u32,

    /// Title -> id index for the collections page currently on screen.
    /// Rebuilt every time that page is (re)displayed; stale entries from a
    /// previous page are never kept.
    pub collections_index: BTreeMap<String, CollectionId>,

    /// Collection currently being browsed (id + display title).
    pub active_collection: Option<ActiveCollection>,

    /// Current page inside the active collection, 1-based.
    pub collection_page: u32,

    /// Total pages of the active collection, derived from its photo count.
    pub collection_total_pages: u32,

    /// Last mutation time, for operational inspection of stored sessions.
    pub updated_at: DateTime<Utc>,
}

/// The collection a chat drilled into from the collections menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveCollection {
    /// Upstream collection id.
    pub id: CollectionId,
    /// Title as it was displayed when selected.
    pub title: String,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            state: ChatState::MainMenu,
            search_query: None,
            search_page: 1,
            search_total_pages: 0,
            collections_page: 1,
            collections_index: BTreeMap::new(),
            active_collection: None,
            collection_page: 1,
            collection_total_pages: 0,
            updated_at: Utc::now(),
        }
    }
}

impl Session {
    /// Creates a fresh session in the main menu.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets the session to the main menu, clearing all transient context.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Clears the search flow context when leaving it.
    pub fn clear_search(&mut self) {
        self.search_query = None;
        self.search_page = 1;
        self.search_total_pages = 0;
    }

    /// Clears the collection drill-down context when leaving it.
    pub fn clear_active_collection(&mut self) {
        self.active_collection = None;
        self.collection_page = 1;
        self.collection_total_pages = 0;
    }

    /// Rebuilds the title index for the collections page on screen.
    pub fn index_collections<'a>(
        &mut self,
        collections: impl IntoIterator<Item = &'a crate::domain::catalog::Collection>,
    ) {
        self.collections_index = collections
            .into_iter()
            .map(|c| (c.title.clone(), c.id.clone()))
            .collect();
    }

    /// Refreshes the mutation timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
