//! Unsplash API adapter.

mod provider;

pub use provider::{UnsplashConfig, UnsplashProvider};
