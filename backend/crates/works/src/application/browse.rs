//! Browse Works Use Case
//!
//! Public read paths: single lookups and paginated listings.

use std::sync::Arc;

use kernel::id::WorkId;
use kernel::pagination::PageRequest;
use kernel::validation::ValidationErrors;

use crate::domain::entity::{Work, contains_nul};
use crate::domain::repository::WorkRepository;
use crate::error::{WorkError, WorkResult};

pub struct BrowseWorksUseCase<R>
where
    R: WorkRepository,
{
    repo: Arc<R>,
}

impl<R> BrowseWorksUseCase<R>
where
    R: WorkRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn get(&self, work_id: WorkId) -> WorkResult<Work> {
        self.repo.find_by_id(work_id).await
    }

    pub async fn get_by_name(&self, name: &str) -> WorkResult<Work> {
        // No stored name can hold NUL
        if contains_nul(name) {
            return Err(WorkError::NotFound);
        }
        self.repo.find_by_name(name).await
    }

    /// An invalid window fails before the store is queried
    pub async fn list(&self, page_size: i64, page_index: i64) -> WorkResult<Vec<Work>> {
        let page = PageRequest::new(page_size, page_index)?;
        self.repo.find_all(page).await
    }

    pub async fn search(
        &self,
        needle: &str,
        page_size: i64,
        page_index: i64,
    ) -> WorkResult<Vec<Work>> {
        if contains_nul(needle) {
            return Err(ValidationErrors::single("name", "must not contain NUL characters").into());
        }
        let page = PageRequest::new(page_size, page_index)?;
        self.repo.find_all_by_name(needle, page).await
    }
}
