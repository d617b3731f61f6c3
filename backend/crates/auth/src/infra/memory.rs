//! In-Memory Repository Implementations
//!
//! Same contracts as the PostgreSQL repository, backed by process memory.
//! Used by tests and local runs without a database.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::Utc;
use kernel::id::UserId;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entity::{
    session::SessionRecord,
    user::{User, UserDraft},
};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Default)]
struct MemoryState {
    users: BTreeMap<UserId, User>,
    last_user_id: i64,
    sessions: HashMap<Uuid, SessionRecord>,
}

/// In-memory auth repository
#[derive(Clone, Default)]
pub struct MemoryAuthRepository {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for MemoryAuthRepository {
    async fn create(&self, draft: &UserDraft) -> AuthResult<User> {
        // Validate and hash before taking the lock
        let new_user = draft.prepare()?;

        let mut state = self.state.write().await;

        if state.users.values().any(|u| u.email == new_user.email) {
            return Err(AuthError::EmailTaken);
        }

        state.last_user_id += 1;
        let user = User {
            id: UserId::new(state.last_user_id),
            email: new_user.email,
            password_hash: new_user.password_hash,
        };
        state.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<User> {
        self.state
            .read()
            .await
            .users
            .get(&user_id)
            .cloned()
            .ok_or(AuthError::UserNotFound)
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<User> {
        self.state
            .read()
            .await
            .users
            .values()
            .find(|u| &u.email == email)
            .cloned()
            .ok_or(AuthError::UserNotFound)
    }
}

impl SessionRepository for MemoryAuthRepository {
    async fn create_session(&self, session: &SessionRecord) -> AuthResult<()> {
        self.state
            .write()
            .await
            .sessions
            .insert(session.session_id, session.clone());
        Ok(())
    }

    async fn find_session(&self, session_id: Uuid) -> AuthResult<Option<SessionRecord>> {
        Ok(self.state.read().await.sessions.get(&session_id).cloned())
    }

    async fn delete_session(&self, session_id: Uuid) -> AuthResult<()> {
        self.state.write().await.sessions.remove(&session_id);
        Ok(())
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let now = Utc::now();
        let mut state = self.state.write().await;

        let before = state.sessions.len();
        state.sessions.retain(|_, session| !session.is_expired_at(now));

        Ok((before - state.sessions.len()) as u64)
    }
}
