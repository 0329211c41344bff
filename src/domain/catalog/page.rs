//! Server-paginated result slice.

use serde::{Deserialize, Serialize};

/// One page of a paginated result set.
///
/// Invariant: `1 <= page <= total_pages`, or `total_pages == 0` for an empty
/// result. Photos paginate one item per page, so `items` holds at most one
/// element for photo pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultPage<T> {
    /// Items on the current page.
    pub items: Vec<T>,
    /// Current page number, 1-based.
    pub page: u32,
    /// Total number of pages reported or derived upstream.
    pub total_pages: u32,
}

impl<T> ResultPage<T> {
    /// Creates a page slice.
    pub fn new(items: Vec<T>, page: u32, total_pages: u32) -> Self {
        Self {
            items,
            page,
            total_pages,
        }
    }

    /// Creates an empty result (`total_pages == 0`).
    pub fn empty(page: u32) -> Self {
        Self {
            items: Vec::new(),
            page,
            total_pages: 0,
        }
    }

    /// Returns the first item on the page, if any.
    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }
}
