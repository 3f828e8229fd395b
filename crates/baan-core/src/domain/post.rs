use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity. `owner_id` is set exactly once, at creation, from the
/// session claim and never changes afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    /// Free-form category label; a comma-joined list for multi-tag posts.
    pub tag: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post owned by `owner_id`.
    pub fn new(
        owner_id: Uuid,
        title: String,
        content: String,
        tag: Option<String>,
        image: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            title,
            content,
            image,
            tag,
            created_at: now,
            updated_at: now,
        }
    }

    /// Split the comma-joined tag field into individual tags.
    pub fn tags(&self) -> Vec<&str> {
        self.tag
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether the comma-split tag list contains `tag` exactly.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags().iter().any(|t| *t == tag)
    }
}

/// Partial post update; the owner and creation timestamp are not updatable.
#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tag: Option<String>,
    pub image: Option<String>,
}

/// Listing filter.
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    /// Case-insensitive substring match on the title.
    pub search: Option<String>,
    /// Exact match against the comma-split tag list.
    pub tag: Option<String>,
    pub order: PostOrder,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PostOrder {
    #[default]
    OldestFirst,
    NewestFirst,
}
