//! Create Work Use Case

use std::sync::Arc;

use kernel::id::UserId;
use kernel::validation::ValidationErrors;

use crate::domain::entity::{Work, WorkDraft};
use crate::domain::repository::WorkRepository;
use crate::error::WorkResult;

pub struct CreateWorkUseCase<R>
where
    R: WorkRepository,
{
    repo: Arc<R>,
}

impl<R> CreateWorkUseCase<R>
where
    R: WorkRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Create a work owned by `requested_by`
    ///
    /// The draft's creator must name the requesting user.
    pub async fn execute(&self, requested_by: UserId, draft: WorkDraft) -> WorkResult<Work> {
        draft.validate()?;

        if draft.creator != requested_by {
            return Err(ValidationErrors::single("creator", "must be the authenticated user").into());
        }

        let work = self.repo.create(&draft).await?;

        tracing::info!(work_id = %work.id, creator_id = %work.creator_id, "Work created");

        Ok(work)
    }
}
