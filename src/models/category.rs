//! Category model matching the frontend Category interface.

use serde::{Deserialize, Serialize};

/// Display colour token for a category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CategoryColor {
    Purple,
    Blue,
    Green,
    Yellow,
    Pink,
    Orange,
    Red,
    Gray,
}

/// A named, colour-tagged label assignable to ideas.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub color: CategoryColor,
}

/// Request body for creating a new category.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    #[serde(default)]
    pub name: String,
    pub color: CategoryColor,
}
