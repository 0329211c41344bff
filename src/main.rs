//! SplashBot entry point: wires configuration, adapters, and the dispatcher,
//! then long-polls for updates.

use std::process;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use splashbot::adapters::storage::FileSessionStore;
use splashbot::adapters::telegram::{TelegramConfig, TelegramTransport, UpdatePoller};
use splashbot::adapters::unsplash::{UnsplashConfig, UnsplashProvider};
use splashbot::application::{ConversationEngine, Dispatcher};
use splashbot::config::AppConfig;

/// Pause before retrying after a failed poll.
const POLL_RETRY_DELAY: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log.filter.clone())),
        )
        .init();

    if let Err(e) = config.validate() {
        error!(error = %e, "Invalid configuration");
        process::exit(1);
    }

    let provider = Arc::new(UnsplashProvider::new(
        UnsplashConfig::new(config.unsplash.access_key.clone())
            .with_base_url(config.unsplash.base_url.clone())
            .with_timeout(config.unsplash.timeout())
            .with_collections_page_size(config.unsplash.collections_page_size)
            .with_rate_limit_low_water(config.unsplash.rate_limit_low_water as i64),
    ));

    let store = Arc::new(FileSessionStore::new(config.storage.session_dir.clone()));

    let telegram_config = TelegramConfig::new(config.telegram.token.clone())
        .with_base_url(config.telegram.base_url.clone())
        .with_timeout(config.telegram.timeout())
        .with_poll_timeout_secs(config.telegram.poll_timeout_secs);

    let transport = Arc::new(TelegramTransport::new(telegram_config.clone()));
    let mut poller = UpdatePoller::new(telegram_config);

    let engine = ConversationEngine::new(provider);
    let dispatcher = Arc::new(Dispatcher::new(engine, store, transport));

    info!("SplashBot started, polling for updates");

    loop {
        let events = match poller.next_batch().await {
            Ok(events) => events,
            Err(e) => {
                warn!(error = %e, "Polling failed, retrying");
                tokio::time::sleep(POLL_RETRY_DELAY).await;
                continue;
            }
        };

        for (chat, event) in events {
            let dispatcher = Arc::clone(&dispatcher);
            tokio::spawn(async move {
                dispatcher.dispatch(chat, event).await;
            });
        }
    }
}
