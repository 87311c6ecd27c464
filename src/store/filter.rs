//! Category and free-text filtering over the idea list.

use serde::Serialize;

use crate::models::{Category, Idea, Snapshot};

/// Combined view filter. Both halves are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdeaFilter {
    pub category_id: Option<String>,
    pub search_term: Option<String>,
}

impl IdeaFilter {
    /// Filter currently selected in the store.
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self::new(
            snapshot.selected_category_id.clone(),
            Some(snapshot.search_term.clone()),
        )
    }

    /// Empty strings mean "no filter".
    pub fn new(category_id: Option<String>, search_term: Option<String>) -> Self {
        Self {
            category_id: category_id.filter(|id| !id.is_empty()),
            search_term: search_term.filter(|term| !term.is_empty()),
        }
    }

    pub fn matches_category(&self, idea: &Idea) -> bool {
        match &self.category_id {
            Some(id) => idea.has_category(id),
            None => true,
        }
    }

    pub fn matches_search(&self, idea: &Idea) -> bool {
        let Some(term) = &self.search_term else {
            return true;
        };
        let needle = term.to_lowercase();
        idea.title.to_lowercase().contains(&needle) || idea.content.to_lowercase().contains(&needle)
    }

    pub fn matches(&self, idea: &Idea) -> bool {
        self.matches_category(idea) && self.matches_search(idea)
    }

    /// Ideas passing the filter, in store order.
    pub fn apply<'a>(&self, ideas: &'a [Idea]) -> Vec<&'a Idea> {
        ideas.iter().filter(|idea| self.matches(idea)).collect()
    }

    /// Export/heading label for this filter.
    pub fn label(&self, categories: &[Category]) -> String {
        let category = self
            .category_id
            .as_ref()
            .and_then(|id| categories.iter().find(|c| &c.id == id));

        match (category, &self.search_term) {
            (Some(category), _) => format!("Category: {}", category.name),
            (None, Some(term)) => format!("Search: {}", term),
            (None, None) => "All Ideas".to_string(),
        }
    }
}

/// Filtered ideas split into pinned and unpinned sections.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteredIdeas {
    pub pinned: Vec<Idea>,
    pub unpinned: Vec<Idea>,
    pub total: usize,
    pub filter_label: String,
}

impl FilteredIdeas {
    pub fn build(snapshot: &Snapshot, filter: &IdeaFilter) -> Self {
        let (pinned, unpinned): (Vec<Idea>, Vec<Idea>) = filter
            .apply(&snapshot.ideas)
            .into_iter()
            .cloned()
            .partition(|idea| idea.is_pinned);

        Self {
            total: pinned.len() + unpinned.len(),
            pinned,
            unpinned,
            filter_label: filter.label(&snapshot.categories),
        }
    }
}
