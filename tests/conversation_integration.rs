//! Integration tests for the full conversation flow.
//!
//! These tests drive the dispatcher end to end:
//! 1. Poll-style inbound events enter through `Dispatcher::dispatch`
//! 2. The engine transitions the session and calls the image provider
//! 3. The session is persisted and the rendered payload is delivered
//!
//! Uses in-memory implementations to test the flow without external services.

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::Mutex;

use splashbot::adapters::storage::InMemorySessionStore;
use splashbot::application::{ConversationEngine, Dispatcher, InboundEvent};
use splashbot::domain::catalog::{Collection, Photo, ResultPage};
use splashbot::domain::conversation::DisplayPayload;
use splashbot::domain::foundation::{ChatId, CollectionId};
use splashbot::domain::session::ChatState;
use splashbot::ports::{ChatTransport, ImageProvider, SessionStore, TransportError, UpstreamError};

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Image provider backed by a fixed, deterministic catalog.
struct CatalogProvider {
    search_total_pages: u32,
    collection_total_pages: u32,
}

impl CatalogProvider {
    fn photo(id: String) -> Photo {
        Photo {
            id: id.clone(),
            display_url: format!("https://images.example/{id}"),
            download_url: format!("https://api.example/photos/{id}/download"),
            author_name: "Jane Doe".to_string(),
            author_profile_url: "https://unsplash.com/@janedoe".to_string(),
        }
    }
}

#[async_trait]
impl ImageProvider for CatalogProvider {
    async fn random_photo(&self) -> Result<Photo, UpstreamError> {
        Ok(Self::photo("random-1".to_string()))
    }

    async fn search_photos(
        &self,
        query: &str,
        page: u32,
    ) -> Result<ResultPage<Photo>, UpstreamError> {
        if query == "ничего" {
            return Ok(ResultPage::empty(page));
        }
        Ok(ResultPage::new(
            vec![Self::photo(format!("{query}-{page}"))],
            page,
            self.search_total_pages,
        ))
    }

    async fn list_collections(&self, page: u32) -> Result<Vec<Collection>, UpstreamError> {
        match page {
            1 => Ok(vec![
                Collection::new("col-nature", "Nature"),
                Collection::new("col-urban", "Urban"),
            ]),
            2 => Ok(vec![Collection::new("col-minimal", "Minimal")]),
            _ => Ok(vec![]),
        }
    }

    async fn collection_photos(
        &self,
        id: &CollectionId,
        page: u32,
    ) -> Result<ResultPage<Photo>, UpstreamError> {
        Ok(ResultPage::new(
            vec![Self::photo(format!("{id}-{page}"))],
            page,
            self.collection_total_pages,
        ))
    }
}

#[derive(Default)]
struct RecordingTransport {
    sent: Mutex<Vec<DisplayPayload>>,
}

impl RecordingTransport {
    fn sent(&self) -> Vec<DisplayPayload> {
        self.sent.lock().unwrap().clone()
    }

    fn last(&self) -> DisplayPayload {
        self.sent.lock().unwrap().last().cloned().expect("nothing sent")
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    async fn send(&self, _chat: ChatId, payload: &DisplayPayload) -> Result<(), TransportError> {
        self.sent.lock().unwrap().push(payload.clone());
        Ok(())
    }
}

struct Harness {
    dispatcher: Dispatcher,
    store: Arc<InMemorySessionStore>,
    transport: Arc<RecordingTransport>,
    chat: ChatId,
}

impl Harness {
    fn new() -> Self {
        Self::with_provider(CatalogProvider {
            search_total_pages: 5,
            collection_total_pages: 3,
        })
    }

    fn with_provider(provider: CatalogProvider) -> Self {
        let store = Arc::new(InMemorySessionStore::new());
        let transport = Arc::new(RecordingTransport::default());
        let engine = ConversationEngine::new(Arc::new(provider));
        let dispatcher = Dispatcher::new(engine, store.clone(), transport.clone());
        Self {
            dispatcher,
            store,
            transport,
            chat: ChatId::new(100),
        }
    }

    async fn send_text(&self, text: &str) -> DisplayPayload {
        self.dispatcher
            .dispatch(self.chat, InboundEvent::Text(text.to_string()))
            .await;
        self.transport.last()
    }

    async fn state(&self) -> ChatState {
        self.store.load(self.chat).await.unwrap().state
    }
}

// =============================================================================
// Flows
// =============================================================================

#[tokio::test]
async fn start_greets_and_offers_main_menu() {
    let harness = Harness::new();

    harness.dispatcher.dispatch(harness.chat, InboundEvent::Start).await;

    let payload = harness.transport.last();
    assert_eq!(payload.text, "Добро пожаловать! Выберите действие:");
    let keyboard = payload.keyboard.unwrap();
    assert_eq!(keyboard.len(), 3);
    assert_eq!(harness.state().await, ChatState::MainMenu);
}

#[tokio::test]
async fn search_flow_from_prompt_to_pagination_and_back() {
    let harness = Harness::new();

    let prompt = harness.send_text("🔍 Поиск фото").await;
    assert_eq!(prompt.text, "Введите ключевые слова для поиска:");
    assert_eq!(harness.state().await, ChatState::SearchInput);

    let first = harness.send_text("котики").await;
    assert_eq!(first.photo_url.as_deref(), Some("https://images.example/котики-1"));
    assert!(first.text.contains("Страница 1 из 5"));
    assert_eq!(harness.state().await, ChatState::SearchResult);

    let second = harness.send_text("➡️ Следующее").await;
    assert_eq!(second.photo_url.as_deref(), Some("https://images.example/котики-2"));
    assert!(second.text.contains("Страница 2 из 5"));

    let back_on_first = harness.send_text("⬅️ Предыдущее").await;
    assert!(back_on_first.text.contains("Страница 1 из 5"));
    // At page 1 the keyboard offers only "next" and "back".
    assert_eq!(
        back_on_first.keyboard.unwrap(),
        vec![
            vec!["➡️ Следующее".to_string()],
            vec!["Назад".to_string()],
        ]
    );

    let menu = harness.send_text("Назад").await;
    assert_eq!(menu.text, "Выберите действие:");
    assert_eq!(harness.state().await, ChatState::MainMenu);

    let session = harness.store.load(harness.chat).await.unwrap();
    assert!(session.search_query.is_none());
}

#[tokio::test]
async fn fruitless_search_reports_not_found() {
    let harness = Harness::new();

    harness.send_text("🔍 Поиск фото").await;
    let payload = harness.send_text("ничего").await;

    assert_eq!(payload.text, "Фото не найдены.");
    assert!(payload.photo_url.is_none());
    assert_eq!(payload.keyboard.unwrap(), vec![vec!["Назад".to_string()]]);
    assert_eq!(harness.state().await, ChatState::SearchResult);
}

#[tokio::test]
async fn collections_flow_drills_into_collection_and_back() {
    let harness = Harness::new();

    let listing = harness.send_text("📁 Коллекции").await;
    assert_eq!(listing.text, "Выберите коллекцию (страница 1):");
    let keyboard = listing.keyboard.unwrap();
    assert_eq!(keyboard[0], vec!["Nature".to_string()]);
    assert_eq!(keyboard[1], vec!["Urban".to_string()]);

    let photo = harness.send_text("Nature").await;
    assert!(photo.text.starts_with("Коллекция: Nature\n"));
    assert!(photo.text.contains("Страница 1 из 3"));
    assert_eq!(harness.state().await, ChatState::CollectionResult);

    harness.send_text("➡️ Следующее").await;
    let session = harness.store.load(harness.chat).await.unwrap();
    assert_eq!(session.collection_page, 2);

    let relisted = harness.send_text("Назад").await;
    assert_eq!(relisted.text, "Выберите коллекцию (страница 1):");
    assert_eq!(harness.state().await, ChatState::CollectionsMenu);
}

#[tokio::test]
async fn collections_paging_past_the_end_is_recoverable() {
    let harness = Harness::new();

    harness.send_text("📁 Коллекции").await;
    harness.send_text("➡️ Следующая страница").await;
    let empty = harness.send_text("➡️ Следующая страница").await;

    assert_eq!(empty.text, "Коллекции не найдены.");
    let session = harness.store.load(harness.chat).await.unwrap();
    assert_eq!(session.collections_page, 3);

    let recovered = harness.send_text("⬅️ Предыдущая страница").await;
    assert_eq!(recovered.text, "Выберите коллекцию (страница 2):");
    assert_eq!(
        recovered.keyboard.unwrap()[0],
        vec!["Minimal".to_string()]
    );
}

#[tokio::test]
async fn unmatched_text_reprompts_and_keeps_keyboard() {
    let harness = Harness::new();

    let payload = harness.send_text("просто текст").await;

    assert_eq!(payload.text, "Пожалуйста, выберите действие из меню.");
    assert!(payload.keyboard.is_none());
    assert_eq!(harness.state().await, ChatState::MainMenu);
}

#[tokio::test]
async fn cancel_resets_mid_flow() {
    let harness = Harness::new();

    harness.send_text("🔍 Поиск фото").await;
    harness.send_text("котики").await;
    harness
        .dispatcher
        .dispatch(harness.chat, InboundEvent::Cancel)
        .await;

    assert_eq!(
        harness.transport.last().text,
        "Диалог завершен. Выберите действие:"
    );
    let session = harness.store.load(harness.chat).await.unwrap();
    assert_eq!(session.state, ChatState::MainMenu);
    assert!(session.search_query.is_none());
    assert_eq!(session.search_page, 1);
}

#[tokio::test]
async fn independent_chats_do_not_share_state() {
    let harness = Harness::new();
    let other = ChatId::new(200);

    harness.send_text("🔍 Поиск фото").await;
    harness
        .dispatcher
        .dispatch(other, InboundEvent::Text("📁 Коллекции".to_string()))
        .await;

    assert_eq!(harness.state().await, ChatState::SearchInput);
    let other_session = harness.store.load(other).await.unwrap();
    assert_eq!(other_session.state, ChatState::CollectionsMenu);
}

#[tokio::test]
async fn every_reply_carries_text() {
    let harness = Harness::new();

    harness.dispatcher.dispatch(harness.chat, InboundEvent::Start).await;
    harness.send_text("🖼️ Случайное фото").await;
    harness.send_text("Еще фото").await;
    harness.send_text("Назад").await;

    for payload in harness.transport.sent() {
        assert!(!payload.text.is_empty());
    }
}
