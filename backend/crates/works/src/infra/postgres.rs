//! PostgreSQL Work Repository

use std::time::Duration;

use kernel::id::{UserId, WorkId};
use kernel::pagination::PageRequest;
use platform::deadline::{DEFAULT_STORE_TIMEOUT, bounded};
use sqlx::PgPool;

use crate::domain::entity::{Work, WorkDraft};
use crate::domain::repository::WorkRepository;
use crate::error::{WorkError, WorkResult};

/// PostgreSQL-backed work repository
#[derive(Clone)]
pub struct PgWorkRepository {
    pool: PgPool,
    query_timeout: Duration,
}

impl PgWorkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            query_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    /// Override the per-query deadline
    pub fn with_query_timeout(mut self, query_timeout: Duration) -> Self {
        self.query_timeout = query_timeout;
        self
    }
}

impl WorkRepository for PgWorkRepository {
    async fn create(&self, draft: &WorkDraft) -> WorkResult<Work> {
        draft.validate()?;

        let id = bounded(
            self.query_timeout,
            sqlx::query_scalar::<_, i64>(
                r#"
                INSERT INTO works (creator_id, name, description, document_links)
                VALUES ($1, $2, $3, $4)
                RETURNING id
                "#,
            )
            .bind(draft.creator.get())
            .bind(&draft.name)
            .bind(draft.description.as_deref())
            .bind(&draft.document_links)
            .fetch_one(&self.pool),
        )
        .await?;

        Ok(draft.clone().into_work(WorkId::new(id)))
    }

    async fn find_by_id(&self, work_id: WorkId) -> WorkResult<Work> {
        let row = bounded(
            self.query_timeout,
            sqlx::query_as::<_, WorkRow>(
                r#"
                SELECT id, creator_id, name, description, document_links
                FROM works
                WHERE id = $1
                "#,
            )
            .bind(work_id.get())
            .fetch_optional(&self.pool),
        )
        .await?;

        row.map(WorkRow::into_work).ok_or(WorkError::NotFound)
    }

    async fn find_by_name(&self, name: &str) -> WorkResult<Work> {
        let row = bounded(
            self.query_timeout,
            sqlx::query_as::<_, WorkRow>(
                r#"
                SELECT id, creator_id, name, description, document_links
                FROM works
                WHERE name = $1
                ORDER BY id ASC
                LIMIT 1
                "#,
            )
            .bind(name)
            .fetch_optional(&self.pool),
        )
        .await?;

        row.map(WorkRow::into_work).ok_or(WorkError::NotFound)
    }

    async fn find_all(&self, page: PageRequest) -> WorkResult<Vec<Work>> {
        let rows = bounded(
            self.query_timeout,
            sqlx::query_as::<_, WorkRow>(
                r#"
                SELECT id, creator_id, name, description, document_links
                FROM works
                ORDER BY id ASC
                LIMIT $1 OFFSET $2
                "#,
            )
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool),
        )
        .await?;

        Ok(rows.into_iter().map(WorkRow::into_work).collect())
    }

    async fn find_all_by_name(&self, needle: &str, page: PageRequest) -> WorkResult<Vec<Work>> {
        // strpos instead of LIKE: '%' and '_' in the needle match literally
        let rows = bounded(
            self.query_timeout,
            sqlx::query_as::<_, WorkRow>(
                r#"
                SELECT id, creator_id, name, description, document_links
                FROM works
                WHERE strpos(lower(name), lower($1)) > 0
                ORDER BY id ASC
                LIMIT $2 OFFSET $3
                "#,
            )
            .bind(needle)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool),
        )
        .await?;

        Ok(rows.into_iter().map(WorkRow::into_work).collect())
    }

    async fn delete(&self, work_id: WorkId, requested_by: UserId) -> WorkResult<()> {
        let deleted = bounded(
            self.query_timeout,
            sqlx::query("DELETE FROM works WHERE id = $1 AND creator_id = $2")
                .bind(work_id.get())
                .bind(requested_by.get())
                .execute(&self.pool),
        )
        .await?
        .rows_affected();

        if deleted == 0 {
            return Err(WorkError::NotFound);
        }

        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct WorkRow {
    id: i64,
    creator_id: i64,
    name: String,
    description: Option<String>,
    document_links: Vec<String>,
}

impl WorkRow {
    fn into_work(self) -> Work {
        Work {
            id: WorkId::new(self.id),
            creator_id: UserId::new(self.creator_id),
            name: self.name,
            description: self.description,
            document_links: self.document_links,
        }
    }
}
