//! Repository Traits

use kernel::id::{UserId, WorkId};
use kernel::pagination::PageRequest;

use crate::domain::entity::{Work, WorkDraft};
use crate::error::WorkResult;

/// Work repository trait
///
/// Listing operations order by id ascending and apply the page window after
/// filtering.
#[trait_variant::make(WorkRepository: Send)]
pub trait LocalWorkRepository {
    /// Validate and persist a new work
    ///
    /// Fails with `Validation` for an invalid draft or an unknown creator;
    /// nothing is written in either case. The in-memory repository knows
    /// about creators only when built with `with_creators`.
    async fn create(&self, draft: &WorkDraft) -> WorkResult<Work>;

    /// `NotFound` if absent
    async fn find_by_id(&self, work_id: WorkId) -> WorkResult<Work>;

    /// Exact name match; the lowest id wins when names repeat
    async fn find_by_name(&self, name: &str) -> WorkResult<Work>;

    async fn find_all(&self, page: PageRequest) -> WorkResult<Vec<Work>>;

    /// Works whose name contains `needle`, compared case-insensitively and
    /// literally (no wildcard characters)
    async fn find_all_by_name(&self, needle: &str, page: PageRequest) -> WorkResult<Vec<Work>>;

    /// Remove a work owned by `requested_by`
    ///
    /// A missing work and a work owned by someone else both fail with
    /// `NotFound`.
    async fn delete(&self, work_id: WorkId, requested_by: UserId) -> WorkResult<()>;
}
