//! PostgreSQL Repository Implementations

use std::time::Duration;

use chrono::{DateTime, Utc};
use kernel::error::store::StoreFailure;
use kernel::id::UserId;
use platform::deadline::{DEFAULT_STORE_TIMEOUT, bounded};
use platform::password::HashedPassword;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{
    session::SessionRecord,
    user::{User, UserDraft},
};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
    query_timeout: Duration,
}

impl PgAuthRepository {
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

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn create(&self, draft: &UserDraft) -> AuthResult<User> {
        let new_user = draft.prepare()?;

        let inserted = bounded(
            self.query_timeout,
            sqlx::query_scalar::<_, i64>(
                r#"
                INSERT INTO users (email, password_hash)
                VALUES ($1, $2)
                RETURNING id
                "#,
            )
            .bind(new_user.email.as_str())
            .bind(new_user.password_hash.as_phc_string())
            .fetch_one(&self.pool),
        )
        .await;

        let id = match inserted {
            Ok(id) => id,
            Err(StoreFailure::UniqueViolation(_)) => return Err(AuthError::EmailTaken),
            Err(e) => return Err(e.into()),
        };

        Ok(User {
            id: UserId::new(id),
            email: new_user.email,
            password_hash: new_user.password_hash,
        })
    }

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<User> {
        let row = bounded(
            self.query_timeout,
            sqlx::query_as::<_, UserRow>(
                r#"
                SELECT id, email, password_hash
                FROM users
                WHERE id = $1
                "#,
            )
            .bind(user_id.get())
            .fetch_optional(&self.pool),
        )
        .await?;

        row.ok_or(AuthError::UserNotFound)?.into_user()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<User> {
        let row = bounded(
            self.query_timeout,
            sqlx::query_as::<_, UserRow>(
                r#"
                SELECT id, email, password_hash
                FROM users
                WHERE email = $1
                "#,
            )
            .bind(email.as_str())
            .fetch_optional(&self.pool),
        )
        .await?;

        row.ok_or(AuthError::UserNotFound)?.into_user()
    }
}

// ============================================================================
// Session Repository Implementation
// ============================================================================

impl SessionRepository for PgAuthRepository {
    async fn create_session(&self, session: &SessionRecord) -> AuthResult<()> {
        bounded(
            self.query_timeout,
            sqlx::query(
                r#"
                INSERT INTO auth_sessions (session_id, user_id, expires_at)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(session.session_id)
            .bind(session.user_id.get())
            .bind(session.expires_at)
            .execute(&self.pool),
        )
        .await?;

        Ok(())
    }

    async fn find_session(&self, session_id: Uuid) -> AuthResult<Option<SessionRecord>> {
        let row = bounded(
            self.query_timeout,
            sqlx::query_as::<_, SessionRow>(
                r#"
                SELECT session_id, user_id, expires_at
                FROM auth_sessions
                WHERE session_id = $1
                "#,
            )
            .bind(session_id)
            .fetch_optional(&self.pool),
        )
        .await?;

        Ok(row.map(SessionRow::into_session))
    }

    async fn delete_session(&self, session_id: Uuid) -> AuthResult<()> {
        bounded(
            self.query_timeout,
            sqlx::query("DELETE FROM auth_sessions WHERE session_id = $1")
                .bind(session_id)
                .execute(&self.pool),
        )
        .await?;

        Ok(())
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let deleted = bounded(
            self.query_timeout,
            sqlx::query("DELETE FROM auth_sessions WHERE expires_at <= $1")
                .bind(Utc::now())
                .execute(&self.pool),
        )
        .await?
        .rows_affected();

        tracing::info!(sessions_deleted = deleted, "Cleaned up expired auth sessions");

        Ok(deleted)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    password_hash: String,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let password_hash = HashedPassword::from_phc_string(self.password_hash)
            .map_err(|e| AuthError::Internal(format!("Invalid password_hash for user {}: {e}", self.id)))?;

        Ok(User {
            id: UserId::new(self.id),
            email: Email::from_db(self.email),
            password_hash,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    session_id: Uuid,
    user_id: i64,
    expires_at: DateTime<Utc>,
}

impl SessionRow {
    fn into_session(self) -> SessionRecord {
        SessionRecord {
            session_id: self.session_id,
            user_id: UserId::new(self.user_id),
            expires_at: self.expires_at,
        }
    }
}
