//! Capture draft model: an idea being composed before it is committed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An uncommitted idea held on behalf of a capture form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category_ids: Vec<String>,
    /// Bumped on every edit or assist request; deferred results carry the
    /// generation they were scheduled against.
    pub generation: u64,
    pub dictating: bool,
    /// Last time the draft was touched; idle drafts are swept.
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating a draft.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDraftRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub category_ids: Vec<String>,
}

/// Request body for a partial draft edit.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDraftRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub category_ids: Option<Vec<String>>,
}

/// One increment of dictated text.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptRequest {
    pub transcript: String,
}
