//! Photo and collection values.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::CollectionId;

/// A single photo as served by the image provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    /// Provider-assigned photo id.
    pub id: String,
    /// URL of the displayable rendition.
    pub display_url: String,
    /// Download-trigger URL that must be hit when the photo is shown.
    pub download_url: String,
    /// Name of the photographer, for the attribution line.
    pub author_name: String,
    /// Photographer's profile page.
    pub author_profile_url: String,
}

/// A curated collection: title shown to the user, id used for lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// Upstream collection identifier.
    pub id: CollectionId,
    /// Display title; also the text the user sends to open the collection.
    pub title: String,
}

impl Collection {
    /// Creates a new collection reference.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: CollectionId::new(id),
            title: title.into(),
        }
    }
}
