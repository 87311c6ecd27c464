//! Idea model matching the frontend Idea interface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user-authored note with pin state and category tags.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(default)]
    pub category_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Idea {
    /// Whether this idea is tagged with the given category.
    pub fn has_category(&self, category_id: &str) -> bool {
        self.category_ids.iter().any(|id| id == category_id)
    }
}

/// Fields supplied when creating an idea. Id and timestamps are assigned by the store.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(default)]
    pub category_ids: Vec<String>,
}

/// Request body for replacing the editable fields of an idea.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIdeaRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(default)]
    pub category_ids: Vec<String>,
}
