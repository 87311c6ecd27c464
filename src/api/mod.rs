//! REST API module.
//!
//! Contains all API routes and handlers following the frontend contract.

mod categories;
mod classify;
mod drafts;
mod export;
mod ideas;
mod snapshot;

pub use categories::*;
pub use classify::*;
pub use drafts::*;
pub use export::*;
pub use ideas::*;
pub use snapshot::*;

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::errors::{AppError, AppErrorWithRevision};
use crate::store::IdeaFilter;
use crate::AppState;

/// Success response envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    pub revision_id: i64,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T, revision_id: i64) -> Self {
        Self {
            success: true,
            data,
            revision_id,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, crate::errors::AppErrorWithRevision>;

/// Create a successful API response.
pub fn success<T: Serialize>(data: T, revision_id: i64) -> ApiResult<T> {
    Ok(ApiResponse::new(data, revision_id))
}

/// Create an error API response.
pub fn error<T: Serialize>(err: crate::errors::AppError, revision_id: i64) -> ApiResult<T> {
    Err(crate::errors::AppErrorWithRevision {
        error: err,
        revision_id,
    })
}

/// JSON body extractor that rejects with the error envelope.
pub struct ApiJson<T>(pub T);

impl<T> FromRequest<AppState> for ApiJson<T>
where
    T: DeserializeOwned + Send,
{
    type Rejection = AppErrorWithRevision;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                let error = rejection_error(rejection);
                Err(AppErrorWithRevision {
                    error,
                    revision_id: state.store.revision_id().await,
                })
            }
        }
    }
}

/// Well-formed JSON of the wrong shape is a validation failure; anything
/// else about the body is a bad request.
fn rejection_error(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::JsonDataError(e) => AppError::Validation(e.body_text()),
        other => AppError::BadRequest(other.body_text()),
    }
}

/// View query parameters shared by listing and export.
///
/// A parameter that is present overrides the filter held in the store.
#[derive(Debug, Default, Deserialize)]
pub struct ViewQuery {
    /// Category id to filter by.
    #[serde(default)]
    pub category: Option<String>,
    /// Search term.
    #[serde(default)]
    pub q: Option<String>,
}

impl ViewQuery {
    pub fn resolve(self, snapshot: &crate::models::Snapshot) -> IdeaFilter {
        let stored = IdeaFilter::from_snapshot(snapshot);
        IdeaFilter::new(
            self.category.or(stored.category_id),
            self.q.or(stored.search_term),
        )
    }
}
