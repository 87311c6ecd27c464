//! Export API endpoints.
//!
//! These answer with the document itself rather than the JSON envelope.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use chrono::Utc;

use super::ViewQuery;
use crate::errors::{AppError, AppErrorWithRevision};
use crate::export::{ExportDocument, CONTENT_TYPE};
use crate::models::Idea;
use crate::AppState;

fn download(document: ExportDocument) -> Response {
    tracing::info!(filename = %document.filename, "Export generated");
    (
        [
            (header::CONTENT_TYPE, CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, document.content_disposition()),
        ],
        document.body,
    )
        .into_response()
}

/// GET /api/export - Export the filtered view in store order.
pub async fn export_ideas(
    State(state): State<AppState>,
    Query(query): Query<ViewQuery>,
) -> Response {
    let snapshot = state.store.snapshot().await;
    let filter = query.resolve(&snapshot);
    let ideas: Vec<Idea> = filter.apply(&snapshot.ideas).into_iter().cloned().collect();
    let label = filter.label(&snapshot.categories);

    download(ExportDocument::build(
        &ideas,
        &snapshot.categories,
        Some(&label),
        Utc::now(),
    ))
}

/// GET /api/ideas/:id/export - Export a single idea.
pub async fn export_idea(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppErrorWithRevision> {
    let snapshot = state.store.snapshot().await;

    let idea = snapshot.get_idea(&id).ok_or_else(|| AppErrorWithRevision {
        error: AppError::NotFound(format!("Idea {} not found", id)),
        revision_id: snapshot.revision_id,
    })?;

    let label = format!("Single Idea: {}", idea.title);
    Ok(download(ExportDocument::build(
        std::slice::from_ref(idea),
        &snapshot.categories,
        Some(&label),
        Utc::now(),
    )))
}
