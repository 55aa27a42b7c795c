use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sentinel stored in `source_link` when a post was generated from a raw
/// transcript with no originating URL.
pub const NO_LINK: &str = "N/A";

/// BlogPost entity - a generated article owned by exactly one user.
///
/// Posts are immutable after creation: there is no update or delete path,
/// which is why the entity carries only a creation timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub source_link: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl BlogPost {
    /// Create a new post. `source_link` falls back to the [`NO_LINK`]
    /// sentinel when the caller supplied no URL.
    pub fn new(user_id: Uuid, title: String, source_link: Option<String>, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            title,
            source_link: source_link.unwrap_or_else(|| NO_LINK.to_string()),
            content,
            created_at: Utc::now(),
        }
    }
}
