//! Idea API endpoints.

use axum::extract::{Path, Query, State};
use serde::Deserialize;

use super::{error, success, ApiJson, ApiResult, ViewQuery};
use crate::errors::AppError;
use crate::models::{Idea, IdeaDraft, UpdateIdeaRequest};
use crate::store::FilteredIdeas;
use crate::AppState;

/// Query parameters for the recent ideas list.
#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    #[serde(default = "default_recent_limit")]
    pub limit: usize,
}

fn default_recent_limit() -> usize {
    5
}

/// Maximum number of recent ideas returned.
const MAX_RECENT_LIMIT: usize = 50;

/// Request body for updating the view filter.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterRequest {
    /// Empty string clears the category filter.
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub search_term: Option<String>,
}

fn idea_not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Idea {} not found", id))
}

fn require_title(title: &str) -> Result<(), AppError> {
    if title.trim().is_empty() {
        return Err(AppError::Validation(
            "Please enter a title for your idea.".to_string(),
        ));
    }
    Ok(())
}

/// GET /api/ideas - Filtered ideas split into pinned and unpinned.
pub async fn list_ideas(
    State(state): State<AppState>,
    Query(query): Query<ViewQuery>,
) -> ApiResult<FilteredIdeas> {
    let snapshot = state.store.snapshot().await;
    let filter = query.resolve(&snapshot);

    success(FilteredIdeas::build(&snapshot, &filter), snapshot.revision_id)
}

/// GET /api/ideas/recent - Most recently captured ideas.
pub async fn recent_ideas(
    State(state): State<AppState>,
    Query(query): Query<RecentQuery>,
) -> ApiResult<Vec<Idea>> {
    let snapshot = state.store.snapshot().await;
    let limit = query.limit.min(MAX_RECENT_LIMIT);

    success(snapshot.recent_ideas(limit).to_vec(), snapshot.revision_id)
}

/// GET /api/ideas/:id - Get a single idea.
pub async fn get_idea(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Idea> {
    let snapshot = state.store.snapshot().await;

    match snapshot.get_idea(&id) {
        Some(idea) => success(idea.clone(), snapshot.revision_id),
        None => error(idea_not_found(&id), snapshot.revision_id),
    }
}

/// POST /api/ideas - Create a new idea.
pub async fn create_idea(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<IdeaDraft>,
) -> ApiResult<Idea> {
    let revision_id = state.store.revision_id().await;

    if let Err(e) = require_title(&request.title) {
        return error(e, revision_id);
    }

    let (new_revision, idea) = state.store.add_idea(request).await;
    success(idea, new_revision)
}

/// PUT /api/ideas/:id - Replace the editable fields of an idea.
pub async fn update_idea(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<UpdateIdeaRequest>,
) -> ApiResult<Idea> {
    let revision_id = state.store.revision_id().await;

    if let Err(e) = require_title(&request.title) {
        return error(e, revision_id);
    }

    match state.store.update_idea(&id, request).await {
        (new_revision, Some(idea)) => success(idea, new_revision),
        (new_revision, None) => error(idea_not_found(&id), new_revision),
    }
}

/// DELETE /api/ideas/:id - Delete an idea.
pub async fn delete_idea(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    match state.store.delete_idea(&id).await {
        (new_revision, Some(_)) => success((), new_revision),
        (new_revision, None) => error(idea_not_found(&id), new_revision),
    }
}

/// POST /api/ideas/:id/pin - Toggle the pin flag.
pub async fn toggle_pin_idea(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Idea> {
    match state.store.toggle_pin_idea(&id).await {
        (new_revision, Some(idea)) => success(idea, new_revision),
        (new_revision, None) => error(idea_not_found(&id), new_revision),
    }
}

/// PUT /api/filter - Set the selected category and/or search term.
pub async fn update_filter(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<FilterRequest>,
) -> ApiResult<FilteredIdeas> {
    let snapshot = state
        .store
        .set_filter(request.category_id, request.search_term)
        .await;
    let filter = crate::store::IdeaFilter::from_snapshot(&snapshot);

    success(FilteredIdeas::build(&snapshot, &filter), snapshot.revision_id)
}
