//! Immediate classifier endpoints.
//!
//! These return suggestions without touching any draft or the store.

use axum::extract::State;
use serde::{Deserialize, Serialize};

use super::{success, ApiJson, ApiResult};
use crate::classifier;
use crate::AppState;

/// Input text to classify.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSuggestion {
    pub content: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySuggestion {
    pub category_ids: Vec<String>,
}

/// POST /api/classify/content - Canned paragraph for a title.
pub async fn classify_content(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ClassifyRequest>,
) -> ApiResult<ContentSuggestion> {
    let revision_id = state.store.revision_id().await;

    success(
        ContentSuggestion {
            content: classifier::suggest_content(&request.title),
        },
        revision_id,
    )
}

/// POST /api/classify/categories - Category ids matching title and content.
pub async fn classify_categories(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ClassifyRequest>,
) -> ApiResult<CategorySuggestion> {
    let snapshot = state.store.snapshot().await;

    let category_ids =
        classifier::suggest_categories(&request.title, &request.content, &snapshot.categories);
    success(CategorySuggestion { category_ids }, snapshot.revision_id)
}
