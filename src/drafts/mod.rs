//! Capture drafts with deferred assist results and dictation.
//!
//! Assist and auto-tag land after an artificial delay. Each draft carries a
//! generation counter that is bumped on every edit and every assist request;
//! a deferred job only writes if the generation it captured is still current.

mod dictation;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local, NaiveDateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::classifier;
use crate::errors::AppError;
use crate::models::{Category, CreateDraftRequest, Draft, Idea, IdeaDraft, UpdateDraftRequest};
use crate::store::{dedup_ids, generate_id, IdeaStore};

/// Which deferred action was requested.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum AssistKind {
    /// Canned paragraph plus title-based category suggestion.
    Assist,
    /// Category suggestion from title and content.
    AutoTag,
}

/// What happened when a deferred job fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssistOutcome {
    Applied,
    /// The draft changed after the request; the result was dropped.
    Stale,
    /// The draft was committed or discarded before the job fired.
    Gone,
}

/// Handed back to the caller when a deferred job is scheduled.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistTicket {
    pub draft_id: String,
    pub kind: AssistKind,
    pub generation: u64,
    pub delay_ms: u64,
}

/// A scheduled job. Dropping `task` detaches it.
pub struct ScheduledAssist {
    pub ticket: AssistTicket,
    pub task: JoinHandle<AssistOutcome>,
}

/// Result of committing a draft to the store.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommittedDraft {
    pub idea: Idea,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_reminder: Option<NaiveDateTime>,
}

/// Result a deferred job writes into a draft.
enum Suggestion {
    Assist {
        content: &'static str,
        category_ids: Vec<String>,
    },
    AutoTag {
        category_ids: Vec<String>,
    },
}

/// Interval between idle-draft sweeps (in seconds).
const SWEEP_INTERVAL_SECS: u64 = 60;

/// Drafts currently being composed, keyed by id.
pub struct DraftBoard {
    drafts: RwLock<HashMap<String, Draft>>,
    assist_delay: Duration,
    idle_ttl: Duration,
}

impl DraftBoard {
    pub fn new(assist_delay: Duration, idle_ttl: Duration) -> Self {
        Self {
            drafts: RwLock::new(HashMap::new()),
            assist_delay,
            idle_ttl,
        }
    }

    pub async fn create(&self, request: CreateDraftRequest) -> Draft {
        let draft = Draft {
            id: generate_id(),
            title: request.title,
            content: request.content,
            category_ids: dedup_ids(request.category_ids),
            generation: 0,
            dictating: false,
            updated_at: Utc::now(),
        };

        self.drafts
            .write()
            .await
            .insert(draft.id.clone(), draft.clone());
        tracing::debug!(draft_id = %draft.id, "Draft created");
        draft
    }

    pub async fn get(&self, id: &str) -> Option<Draft> {
        self.drafts.read().await.get(id).cloned()
    }

    pub async fn discard(&self, id: &str) -> Option<Draft> {
        self.drafts.write().await.remove(id)
    }

    /// Run `edit` on the draft and bump its generation.
    async fn edit<T>(
        &self,
        id: &str,
        edit: impl FnOnce(&mut Draft) -> Result<T, AppError>,
    ) -> Result<(Draft, T), AppError> {
        let mut drafts = self.drafts.write().await;
        let draft = drafts.get_mut(id).ok_or_else(|| draft_not_found(id))?;

        let output = edit(draft)?;
        draft.generation += 1;
        draft.updated_at = Utc::now();
        Ok((draft.clone(), output))
    }

    /// Apply a partial edit. Absent fields are left as they are.
    pub async fn update(&self, id: &str, request: UpdateDraftRequest) -> Result<Draft, AppError> {
        let (draft, ()) = self
            .edit(id, |draft| {
                if let Some(title) = request.title {
                    draft.title = title;
                }
                if let Some(content) = request.content {
                    draft.content = content;
                }
                if let Some(category_ids) = request.category_ids {
                    draft.category_ids = dedup_ids(category_ids);
                }
                Ok(())
            })
            .await?;
        Ok(draft)
    }

    /// Select the category if it is not selected, otherwise deselect it.
    pub async fn toggle_category(&self, id: &str, category_id: &str) -> Result<Draft, AppError> {
        let (draft, ()) = self
            .edit(id, |draft| {
                if let Some(pos) = draft.category_ids.iter().position(|c| c == category_id) {
                    draft.category_ids.remove(pos);
                } else {
                    draft.category_ids.push(category_id.to_string());
                }
                Ok(())
            })
            .await?;
        Ok(draft)
    }

    /// Start or stop dictation for the draft.
    pub async fn toggle_dictation(&self, id: &str) -> Result<Draft, AppError> {
        let mut drafts = self.drafts.write().await;
        let draft = drafts.get_mut(id).ok_or_else(|| draft_not_found(id))?;
        draft.dictating = !draft.dictating;
        draft.updated_at = Utc::now();
        tracing::debug!(draft_id = %id, dictating = draft.dictating, "Dictation toggled");
        Ok(draft.clone())
    }

    /// Append a dictated increment to the draft content.
    pub async fn push_transcript(&self, id: &str, transcript: &str) -> Result<Draft, AppError> {
        let (draft, ()) = self
            .edit(id, |draft| {
                if !draft.dictating {
                    return Err(AppError::Validation(
                        "Dictation is not active for this draft".to_string(),
                    ));
                }
                dictation::append_transcript(&mut draft.content, transcript);
                Ok(())
            })
            .await?;
        Ok(draft)
    }

    /// Schedule the canned-paragraph assist. The title must not be blank.
    pub async fn request_assist(
        self: &Arc<Self>,
        id: &str,
        categories: Vec<Category>,
    ) -> Result<ScheduledAssist, AppError> {
        let (draft, ()) = self
            .edit(id, |draft| {
                if draft.title.trim().is_empty() {
                    return Err(AppError::Validation("Please enter a title first".to_string()));
                }
                Ok(())
            })
            .await?;

        let suggestion = Suggestion::Assist {
            content: classifier::suggest_content(&draft.title),
            category_ids: classifier::suggest_title_categories(&draft.title, &categories),
        };
        Ok(self.schedule(&draft, AssistKind::Assist, suggestion))
    }

    /// Schedule auto-tagging. Title and content must both be filled in.
    pub async fn request_auto_tag(
        self: &Arc<Self>,
        id: &str,
        categories: Vec<Category>,
    ) -> Result<ScheduledAssist, AppError> {
        let (draft, ()) = self
            .edit(id, |draft| {
                if draft.title.trim().is_empty() || draft.content.trim().is_empty() {
                    return Err(AppError::Validation(
                        "Please enter both title and description".to_string(),
                    ));
                }
                Ok(())
            })
            .await?;

        let suggestion = Suggestion::AutoTag {
            category_ids: classifier::suggest_categories(&draft.title, &draft.content, &categories),
        };
        Ok(self.schedule(&draft, AssistKind::AutoTag, suggestion))
    }

    fn schedule(
        self: &Arc<Self>,
        draft: &Draft,
        kind: AssistKind,
        suggestion: Suggestion,
    ) -> ScheduledAssist {
        let ticket = AssistTicket {
            draft_id: draft.id.clone(),
            kind,
            generation: draft.generation,
            delay_ms: u64::try_from(self.assist_delay.as_millis()).unwrap_or(u64::MAX),
        };

        let board = Arc::clone(self);
        let draft_id = draft.id.clone();
        let generation = draft.generation;
        let delay = self.assist_delay;

        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            board.land(&draft_id, generation, suggestion).await
        });

        tracing::debug!(draft_id = %ticket.draft_id, ?kind, generation, "Assist scheduled");
        ScheduledAssist { ticket, task }
    }

    /// Write a deferred result if the draft is still at `generation`.
    async fn land(&self, id: &str, generation: u64, suggestion: Suggestion) -> AssistOutcome {
        let mut drafts = self.drafts.write().await;
        let Some(draft) = drafts.get_mut(id) else {
            tracing::debug!(draft_id = %id, "Assist result dropped, draft is gone");
            return AssistOutcome::Gone;
        };
        if draft.generation != generation {
            tracing::debug!(
                draft_id = %id,
                scheduled = generation,
                current = draft.generation,
                "Assist result dropped, draft changed"
            );
            return AssistOutcome::Stale;
        }

        match suggestion {
            Suggestion::Assist { content, category_ids } => {
                draft.content = content.to_string();
                if !category_ids.is_empty() {
                    draft.category_ids = category_ids;
                }
            }
            Suggestion::AutoTag { category_ids } => {
                if category_ids.is_empty() {
                    tracing::info!(draft_id = %id, "No matching categories");
                } else {
                    tracing::info!(draft_id = %id, count = category_ids.len(), "Auto-tagging complete");
                    draft.category_ids = category_ids;
                }
            }
        }
        draft.generation += 1;
        draft.updated_at = Utc::now();
        AssistOutcome::Applied
    }

    /// Drop drafts untouched since `now - idle_ttl`. Returns how many went.
    pub async fn prune_idle(&self, now: DateTime<Utc>) -> usize {
        let Ok(ttl) = chrono::Duration::from_std(self.idle_ttl) else {
            return 0;
        };
        let Some(cutoff) = now.checked_sub_signed(ttl) else {
            return 0;
        };

        let mut drafts = self.drafts.write().await;
        let before = drafts.len();
        drafts.retain(|_, draft| draft.updated_at >= cutoff);
        let pruned = before - drafts.len();

        if pruned > 0 {
            tracing::info!(pruned, remaining = drafts.len(), "Idle drafts discarded");
        }
        pruned
    }

    /// Move the draft into the store. The title must not be blank.
    pub async fn commit(
        &self,
        id: &str,
        store: &IdeaStore,
    ) -> Result<(i64, CommittedDraft), AppError> {
        let draft = {
            let mut drafts = self.drafts.write().await;
            let draft = drafts.get(id).ok_or_else(|| draft_not_found(id))?;
            if draft.title.trim().is_empty() {
                return Err(AppError::Validation(
                    "Please enter a title for your idea.".to_string(),
                ));
            }
            drafts.remove(id).ok_or_else(|| draft_not_found(id))?
        };

        let suggested_reminder = classifier::suggest_reminder(&draft.content, &Local::now());
        let (revision_id, idea) = store
            .add_idea(IdeaDraft {
                title: draft.title,
                content: draft.content,
                is_pinned: false,
                category_ids: draft.category_ids,
            })
            .await;

        tracing::info!(idea_id = %idea.id, "Idea captured");
        Ok((
            revision_id,
            CommittedDraft {
                idea,
                suggested_reminder,
            },
        ))
    }
}

/// Spawn a background task that periodically discards idle drafts.
pub fn start_sweeper(board: Arc<DraftBoard>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(SWEEP_INTERVAL_SECS));

        loop {
            interval.tick().await;
            board.prune_idle(Utc::now()).await;
        }
    })
}

pub fn draft_not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Draft {} not found", id))
}
