//! SplashBot - Conversational Unsplash Browser
//!
//! This crate implements a menu-driven Telegram bot for browsing Unsplash:
//! random photos, keyword search and curated collections, with per-chat
//! conversation state persisted across restarts.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
