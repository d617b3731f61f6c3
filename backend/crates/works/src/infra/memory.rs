//! In-Memory Work Repository
//!
//! Creator existence is checked only when the repository is given the set
//! of known users with [`MemoryWorkRepository::with_creators`].

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use kernel::id::{UserId, WorkId};
use kernel::pagination::PageRequest;
use kernel::validation::ValidationErrors;
use tokio::sync::RwLock;

use crate::domain::entity::{Work, WorkDraft};
use crate::domain::repository::WorkRepository;
use crate::error::{WorkError, WorkResult};

#[derive(Debug, Default)]
struct MemoryState {
    // BTreeMap keeps id order for listing
    works: BTreeMap<WorkId, Work>,
    last_id: i64,
}

/// In-memory work repository
#[derive(Clone, Default)]
pub struct MemoryWorkRepository {
    state: Arc<RwLock<MemoryState>>,
    /// `None` accepts any creator
    known_creators: Option<Arc<BTreeSet<UserId>>>,
}

impl MemoryWorkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject drafts whose creator is not in `creators`, the way the
    /// database foreign key does
    pub fn with_creators(creators: impl IntoIterator<Item = UserId>) -> Self {
        Self {
            known_creators: Some(Arc::new(creators.into_iter().collect())),
            ..Self::default()
        }
    }
}

fn name_contains(name: &str, needle: &str) -> bool {
    name.to_lowercase().contains(&needle.to_lowercase())
}

impl WorkRepository for MemoryWorkRepository {
    async fn create(&self, draft: &WorkDraft) -> WorkResult<Work> {
        draft.validate()?;

        if self
            .known_creators
            .as_ref()
            .is_some_and(|known| !known.contains(&draft.creator))
        {
            return Err(WorkError::Validation(ValidationErrors::single(
                "creator",
                "does not exist",
            )));
        }

        let mut state = self.state.write().await;
        state.last_id += 1;

        let work = draft.clone().into_work(WorkId::new(state.last_id));
        state.works.insert(work.id, work.clone());

        Ok(work)
    }

    async fn find_by_id(&self, work_id: WorkId) -> WorkResult<Work> {
        self.state
            .read()
            .await
            .works
            .get(&work_id)
            .cloned()
            .ok_or(WorkError::NotFound)
    }

    async fn find_by_name(&self, name: &str) -> WorkResult<Work> {
        self.state
            .read()
            .await
            .works
            .values()
            .find(|w| w.name == name)
            .cloned()
            .ok_or(WorkError::NotFound)
    }

    async fn find_all(&self, page: PageRequest) -> WorkResult<Vec<Work>> {
        let state = self.state.read().await;
        Ok(page.window(state.works.values()).cloned().collect())
    }

    async fn find_all_by_name(&self, needle: &str, page: PageRequest) -> WorkResult<Vec<Work>> {
        let state = self.state.read().await;
        let matching = state.works.values().filter(|w| name_contains(&w.name, needle));
        Ok(page.window(matching).cloned().collect())
    }

    async fn delete(&self, work_id: WorkId, requested_by: UserId) -> WorkResult<()> {
        let mut state = self.state.write().await;

        match state.works.get(&work_id) {
            Some(work) if work.creator_id == requested_by => {
                state.works.remove(&work_id);
                Ok(())
            }
            _ => Err(WorkError::NotFound),
        }
    }
}
