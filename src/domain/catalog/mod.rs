//! Catalog types sourced from the image provider.
//!
//! These are transient values: a [`Photo`] lives only for the response cycle
//! it is presented in, it is never persisted with the session.

mod page;
mod photo;

pub use page::ResultPage;
pub use photo::{Collection, Photo};
