//! Category API endpoints.

use axum::extract::State;

use super::{error, success, ApiJson, ApiResult};
use crate::errors::AppError;
use crate::models::{Category, CreateCategoryRequest};
use crate::AppState;

/// GET /api/categories - List all categories.
pub async fn list_categories(State(state): State<AppState>) -> ApiResult<Vec<Category>> {
    let snapshot = state.store.snapshot().await;

    success(snapshot.categories.clone(), snapshot.revision_id)
}

/// POST /api/categories - Append a new category.
pub async fn create_category(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateCategoryRequest>,
) -> ApiResult<Category> {
    let revision_id = state.store.revision_id().await;

    if request.name.trim().is_empty() {
        return error(
            AppError::Validation("Category name is required".to_string()),
            revision_id,
        );
    }

    let (new_revision, category) = state.store.add_category(request).await;
    tracing::info!(category_id = %category.id, name = %category.name, "Category added");
    success(category, new_revision)
}
