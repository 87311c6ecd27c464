//! Snapshot model matching the frontend store shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Category, Idea};

/// One immutable generation of the idea store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub revision_id: i64,
    pub generated_at: DateTime<Utc>,
    pub ideas: Vec<Idea>,
    pub categories: Vec<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_category_id: Option<String>,
    #[serde(default)]
    pub search_term: String,
}

/// Revision information for change detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionInfo {
    pub revision_id: i64,
    pub generated_at: DateTime<Utc>,
}
