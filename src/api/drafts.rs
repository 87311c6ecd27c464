//! Draft API endpoints: capture form state, assist, dictation and commit.

use axum::extract::{Path, State};

use super::{error, success, ApiJson, ApiResult};
use crate::drafts::{draft_not_found, AssistTicket, CommittedDraft};
use crate::models::{CreateDraftRequest, Draft, TranscriptRequest, UpdateDraftRequest};
use crate::AppState;

/// POST /api/drafts - Start a new draft.
pub async fn create_draft(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateDraftRequest>,
) -> ApiResult<Draft> {
    let revision_id = state.store.revision_id().await;

    success(state.drafts.create(request).await, revision_id)
}

/// GET /api/drafts/:id - Get a draft.
pub async fn get_draft(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Draft> {
    let revision_id = state.store.revision_id().await;

    match state.drafts.get(&id).await {
        Some(draft) => success(draft, revision_id),
        None => error(draft_not_found(&id), revision_id),
    }
}

/// PATCH /api/drafts/:id - Edit draft fields.
pub async fn update_draft(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<UpdateDraftRequest>,
) -> ApiResult<Draft> {
    let revision_id = state.store.revision_id().await;

    match state.drafts.update(&id, request).await {
        Ok(draft) => success(draft, revision_id),
        Err(e) => error(e, revision_id),
    }
}

/// DELETE /api/drafts/:id - Discard a draft.
pub async fn discard_draft(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    let revision_id = state.store.revision_id().await;

    match state.drafts.discard(&id).await {
        Some(_) => success((), revision_id),
        None => error(draft_not_found(&id), revision_id),
    }
}

/// POST /api/drafts/:id/categories/:category_id - Toggle a category on the draft.
pub async fn toggle_draft_category(
    State(state): State<AppState>,
    Path((id, category_id)): Path<(String, String)>,
) -> ApiResult<Draft> {
    let revision_id = state.store.revision_id().await;

    match state.drafts.toggle_category(&id, &category_id).await {
        Ok(draft) => success(draft, revision_id),
        Err(e) => error(e, revision_id),
    }
}

/// POST /api/drafts/:id/assist - Schedule the content assist.
pub async fn request_assist(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<AssistTicket> {
    let snapshot = state.store.snapshot().await;

    match state
        .drafts
        .request_assist(&id, snapshot.categories.clone())
        .await
    {
        Ok(scheduled) => {
            // The job runs on its own; the client polls the draft.
            drop(scheduled.task);
            success(scheduled.ticket, snapshot.revision_id)
        }
        Err(e) => error(e, snapshot.revision_id),
    }
}

/// POST /api/drafts/:id/autotag - Schedule auto-tagging.
pub async fn request_auto_tag(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<AssistTicket> {
    let snapshot = state.store.snapshot().await;

    match state
        .drafts
        .request_auto_tag(&id, snapshot.categories.clone())
        .await
    {
        Ok(scheduled) => {
            // The job runs on its own; the client polls the draft.
            drop(scheduled.task);
            success(scheduled.ticket, snapshot.revision_id)
        }
        Err(e) => error(e, snapshot.revision_id),
    }
}

/// POST /api/drafts/:id/dictation - Start or stop dictation.
pub async fn toggle_dictation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Draft> {
    let revision_id = state.store.revision_id().await;

    match state.drafts.toggle_dictation(&id).await {
        Ok(draft) => success(draft, revision_id),
        Err(e) => error(e, revision_id),
    }
}

/// POST /api/drafts/:id/transcript - Append dictated text.
pub async fn push_transcript(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<TranscriptRequest>,
) -> ApiResult<Draft> {
    let revision_id = state.store.revision_id().await;

    match state.drafts.push_transcript(&id, &request.transcript).await {
        Ok(draft) => success(draft, revision_id),
        Err(e) => error(e, revision_id),
    }
}

/// POST /api/drafts/:id/commit - Save the draft as an idea.
pub async fn commit_draft(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<CommittedDraft> {
    let revision_id = state.store.revision_id().await;

    match state.drafts.commit(&id, &state.store).await {
        Ok((new_revision, committed)) => success(committed, new_revision),
        Err(e) => error(e, revision_id),
    }
}
