//! Sign In Use Case
//!
//! Verifies credentials and issues a session.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::application::session::SessionManager;
use crate::domain::entity::user::User;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in output
#[derive(Debug)]
pub struct SignInOutput {
    pub user: User,
    /// Session token for cookie
    pub session_token: String,
}

/// Sign in use case
pub struct SignInUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    user_repo: Arc<U>,
    sessions: SessionManager<S>,
}

impl<U, S> SignInUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            sessions: SessionManager::new(session_repo, config),
        }
    }

    /// Unknown email and wrong password fail identically with
    /// `InvalidCredentials`; store failures are not masked.
    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let email = Email::new(&input.email).map_err(|_| AuthError::InvalidCredentials)?;

        let user = match self.user_repo.find_by_email(&email).await {
            Ok(user) => user,
            Err(AuthError::UserNotFound) => return Err(AuthError::InvalidCredentials),
            Err(e) => return Err(e),
        };

        let password =
            ClearTextPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        if !user.password_hash.verify(&password) {
            return Err(AuthError::InvalidCredentials);
        }

        let session_token = self.sessions.issue(user.id).await?;

        tracing::info!(user_id = %user.id, "User signed in");

        Ok(SignInOutput {
            user,
            session_token,
        })
    }
}
