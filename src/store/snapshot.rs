//! Pure snapshot operations.
//!
//! Every mutation returns a new [`Snapshot`] with an incremented revision and
//! leaves the receiver untouched. Missing ids are no-ops: the returned
//! snapshot is `None` so callers can tell nothing changed.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{Category, CreateCategoryRequest, Idea, IdeaDraft, Snapshot, UpdateIdeaRequest};

/// Generate a fresh opaque identifier.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

impl Snapshot {
    /// An empty store at revision 0.
    pub fn empty(now: DateTime<Utc>) -> Self {
        Self {
            revision_id: 0,
            generated_at: now,
            ideas: Vec::new(),
            categories: Vec::new(),
            selected_category_id: None,
            search_term: String::new(),
        }
    }

    pub fn get_idea(&self, id: &str) -> Option<&Idea> {
        self.ideas.iter().find(|idea| idea.id == id)
    }

    /// The first `limit` ideas in store order (most recent first).
    pub fn recent_ideas(&self, limit: usize) -> &[Idea] {
        &self.ideas[..limit.min(self.ideas.len())]
    }

    fn next(&self, now: DateTime<Utc>) -> Self {
        Self {
            revision_id: self.revision_id + 1,
            generated_at: now,
            ..self.clone()
        }
    }

    /// Prepend a new idea built from `draft`.
    pub fn add_idea(&self, draft: IdeaDraft, now: DateTime<Utc>) -> (Self, Idea) {
        let idea = Idea {
            id: generate_id(),
            title: draft.title,
            content: draft.content,
            is_pinned: draft.is_pinned,
            category_ids: dedup_ids(draft.category_ids),
            created_at: now,
            updated_at: now,
        };

        let mut next = self.next(now);
        next.ideas.insert(0, idea.clone());
        (next, idea)
    }

    /// Replace the editable fields of the idea with `id`.
    ///
    /// `created_at` is kept from the stored idea so `updated_at >= created_at` holds.
    pub fn update_idea(
        &self,
        id: &str,
        changes: UpdateIdeaRequest,
        now: DateTime<Utc>,
    ) -> Option<(Self, Idea)> {
        let position = self.ideas.iter().position(|idea| idea.id == id)?;

        let mut next = self.next(now);
        let stored = &mut next.ideas[position];
        stored.title = changes.title;
        stored.content = changes.content;
        stored.is_pinned = changes.is_pinned;
        stored.category_ids = dedup_ids(changes.category_ids);
        stored.updated_at = bump(stored.updated_at, now);

        let updated = stored.clone();
        Some((next, updated))
    }

    /// Remove the idea with `id`, keeping the order of the rest.
    pub fn delete_idea(&self, id: &str, now: DateTime<Utc>) -> Option<(Self, Idea)> {
        let position = self.ideas.iter().position(|idea| idea.id == id)?;

        let mut next = self.next(now);
        let removed = next.ideas.remove(position);
        Some((next, removed))
    }

    /// Flip the pin flag of the idea with `id`.
    pub fn toggle_pin_idea(&self, id: &str, now: DateTime<Utc>) -> Option<(Self, Idea)> {
        let position = self.ideas.iter().position(|idea| idea.id == id)?;

        let mut next = self.next(now);
        let stored = &mut next.ideas[position];
        stored.is_pinned = !stored.is_pinned;
        stored.updated_at = bump(stored.updated_at, now);

        let toggled = stored.clone();
        Some((next, toggled))
    }

    /// Append a category. Names and colours are not deduplicated.
    pub fn add_category(&self, request: CreateCategoryRequest, now: DateTime<Utc>) -> (Self, Category) {
        let category = Category {
            id: generate_id(),
            name: request.name,
            color: request.color,
        };

        let mut next = self.next(now);
        next.categories.push(category.clone());
        (next, category)
    }

    /// Set both filter halves in one revision. `None` keeps the current value.
    pub fn with_filter(
        &self,
        category_id: Option<String>,
        search_term: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let mut next = self.next(now);
        if let Some(category_id) = category_id {
            next.selected_category_id = Some(category_id).filter(|id| !id.is_empty());
        }
        if let Some(term) = search_term {
            next.search_term = term;
        }
        next
    }
}

/// Wall clocks can step backwards; timestamps never do.
fn bump(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    previous.max(now)
}

/// Drop repeated ids, keeping first occurrences in order.
pub fn dedup_ids(ids: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(ids.len());
    for id in ids {
        if !unique.contains(&id) {
            unique.push(id);
        }
    }
    unique
}
