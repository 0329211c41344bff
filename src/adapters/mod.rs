//! Outbound adapters implementing the application ports.

pub mod storage;
pub mod telegram;
pub mod unsplash;
