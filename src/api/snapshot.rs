//! Snapshot API endpoints.

use axum::extract::State;

use super::{success, ApiResult};
use crate::models::{RevisionInfo, Snapshot};
use crate::AppState;

/// GET /api/snapshot - Get the full store snapshot.
pub async fn get_snapshot(State(state): State<AppState>) -> ApiResult<Snapshot> {
    let snapshot = state.store.snapshot().await;
    let revision_id = snapshot.revision_id;

    success((*snapshot).clone(), revision_id)
}

/// GET /api/snapshot/revision - Get the current revision info.
pub async fn get_revision(State(state): State<AppState>) -> ApiResult<RevisionInfo> {
    let revision_info = state.store.revision_info().await;

    success(revision_info.clone(), revision_info.revision_id)
}
