//! Delete Work Use Case

use std::sync::Arc;

use kernel::id::{UserId, WorkId};

use crate::domain::repository::WorkRepository;
use crate::error::{WorkError, WorkResult};

pub struct DeleteWorkUseCase<R>
where
    R: WorkRepository,
{
    repo: Arc<R>,
}

impl<R> DeleteWorkUseCase<R>
where
    R: WorkRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Delete `work_id` on behalf of `requested_by`
    ///
    /// `claimed_creator` comes from the request body. A claim for anyone but
    /// the requesting user fails exactly like a missing work.
    pub async fn execute(
        &self,
        requested_by: UserId,
        claimed_creator: UserId,
        work_id: WorkId,
    ) -> WorkResult<()> {
        if claimed_creator != requested_by {
            return Err(WorkError::NotFound);
        }

        self.repo.delete(work_id, requested_by).await?;

        tracing::info!(work_id = %work_id, creator_id = %requested_by, "Work deleted");

        Ok(())
    }
}
