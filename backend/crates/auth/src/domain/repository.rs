//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the
//! infrastructure layer (PostgreSQL and in-memory).

use kernel::id::UserId;
use uuid::Uuid;

use crate::domain::entity::{
    session::SessionRecord,
    user::{User, UserDraft},
};
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Validate, hash and persist a new user
    ///
    /// Fails with `Validation` for an invalid draft (nothing is written) and
    /// `EmailTaken` if the email already exists.
    async fn create(&self, draft: &UserDraft) -> AuthResult<User>;

    /// Find user by ID, `UserNotFound` if absent
    async fn find_by_id(&self, user_id: UserId) -> AuthResult<User>;

    /// Find user by email, `UserNotFound` if absent
    async fn find_by_email(&self, email: &Email) -> AuthResult<User>;
}

/// Session repository trait
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Create a new session
    async fn create_session(&self, session: &SessionRecord) -> AuthResult<()>;

    /// Find session by ID
    async fn find_session(&self, session_id: Uuid) -> AuthResult<Option<SessionRecord>>;

    /// Delete a session; deleting a missing session is not an error
    async fn delete_session(&self, session_id: Uuid) -> AuthResult<()>;

    /// Clean up expired sessions
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}
