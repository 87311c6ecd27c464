//! In-memory idea and category store.
//!
//! [`IdeaStore`] holds the current [`Snapshot`] behind an async lock and swaps
//! it wholesale on every mutation. Readers get a cheap `Arc` clone of the
//! snapshot they observed.

pub mod filter;
pub mod seed;
mod snapshot;

pub use filter::{FilteredIdeas, IdeaFilter};
pub use snapshot::{dedup_ids, generate_id};

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::models::{
    Category, CreateCategoryRequest, Idea, IdeaDraft, RevisionInfo, Snapshot, UpdateIdeaRequest,
};

/// Shared state holder for ideas, categories and the view filter.
pub struct IdeaStore {
    current: RwLock<Arc<Snapshot>>,
}

impl IdeaStore {
    pub fn new(initial: Snapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(initial)),
        }
    }

    /// A store holding the sample categories and ideas.
    pub fn seeded() -> Self {
        Self::new(seed::seeded_snapshot(Utc::now()))
    }

    /// A store with no ideas or categories.
    pub fn empty() -> Self {
        Self::new(Snapshot::empty(Utc::now()))
    }

    /// The current snapshot.
    pub async fn snapshot(&self) -> Arc<Snapshot> {
        self.current.read().await.clone()
    }

    pub async fn revision_info(&self) -> RevisionInfo {
        let snapshot = self.snapshot().await;
        RevisionInfo {
            revision_id: snapshot.revision_id,
            generated_at: snapshot.generated_at,
        }
    }

    pub async fn revision_id(&self) -> i64 {
        self.current.read().await.revision_id
    }

    /// Apply `op` to the current snapshot under the write lock.
    ///
    /// When `op` yields a new snapshot it replaces the current one.
    async fn apply<T>(&self, op: impl FnOnce(&Snapshot) -> (Option<Snapshot>, T)) -> (i64, T) {
        let mut current = self.current.write().await;
        let (next, output) = op(&**current);
        if let Some(next) = next {
            *current = Arc::new(next);
        }
        (current.revision_id, output)
    }

    pub async fn add_idea(&self, draft: IdeaDraft) -> (i64, Idea) {
        let (revision_id, idea) = self
            .apply(|s| {
                let (next, idea) = s.add_idea(draft, Utc::now());
                (Some(next), idea)
            })
            .await;
        tracing::debug!(idea_id = %idea.id, revision_id, "Idea added");
        (revision_id, idea)
    }

    /// Returns `None` when no idea has this id.
    pub async fn update_idea(&self, id: &str, changes: UpdateIdeaRequest) -> (i64, Option<Idea>) {
        self.apply(|s| split(s.update_idea(id, changes, Utc::now()))).await
    }

    pub async fn delete_idea(&self, id: &str) -> (i64, Option<Idea>) {
        let (revision_id, removed) = self.apply(|s| split(s.delete_idea(id, Utc::now()))).await;
        if removed.is_some() {
            tracing::debug!(idea_id = %id, revision_id, "Idea deleted");
        }
        (revision_id, removed)
    }

    pub async fn toggle_pin_idea(&self, id: &str) -> (i64, Option<Idea>) {
        self.apply(|s| split(s.toggle_pin_idea(id, Utc::now()))).await
    }

    pub async fn add_category(&self, request: CreateCategoryRequest) -> (i64, Category) {
        self.apply(|s| {
            let (next, category) = s.add_category(request, Utc::now());
            (Some(next), category)
        })
        .await
    }

    /// Update the selected category and/or search term. `None` leaves a half unchanged.
    pub async fn set_filter(
        &self,
        category_id: Option<String>,
        search_term: Option<String>,
    ) -> Arc<Snapshot> {
        let mut current = self.current.write().await;
        let next = Arc::new(current.with_filter(category_id, search_term, Utc::now()));
        *current = next.clone();
        next
    }
}

fn split<T>(result: Option<(Snapshot, T)>) -> (Option<Snapshot>, Option<T>) {
    match result {
        Some((snapshot, value)) => (Some(snapshot), Some(value)),
        None => (None, None),
    }
}
