//! Session Manager
//!
//! Issues, resolves and invalidates session tokens. Credentials are checked
//! elsewhere; possession of a token that resolves is the capability
//! "authenticated as this user".
//!
//! Token format: `{session_id}.{base64url(HMAC-SHA256(session_id))}`. The
//! signature lets malformed or forged tokens be rejected without a store
//! round trip.

use std::sync::Arc;

use chrono::{TimeDelta, Utc};
use kernel::id::UserId;
use platform::crypto::{sign_token, verify_token};
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::entity::session::SessionRecord;
use crate::domain::repository::SessionRepository;
use crate::error::{AuthError, AuthResult};

/// Session manager
pub struct SessionManager<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> SessionManager<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    /// Create a session for `user_id` and return its token
    pub async fn issue(&self, user_id: UserId) -> AuthResult<String> {
        let ttl = TimeDelta::from_std(self.config.session_ttl)
            .map_err(|e| AuthError::Internal(format!("Invalid session TTL: {e}")))?;
        let expires_at = Utc::now()
            .checked_add_signed(ttl)
            .ok_or_else(|| AuthError::Internal("Session expiry out of range".to_string()))?;

        let session = SessionRecord::new(user_id, expires_at);
        self.session_repo.create_session(&session).await?;

        tracing::info!(
            user_id = %user_id,
            session_id = %session.session_id,
            "Session issued"
        );

        Ok(sign_token(
            &self.config.session_secret,
            &session.session_id.to_string(),
        ))
    }

    /// Resolve a token to the user it is bound to
    ///
    /// Absent, malformed, forged, unknown and expired tokens all fail with
    /// `NotAuthenticated`. Store failures propagate unchanged.
    pub async fn resolve(&self, token: Option<&str>) -> AuthResult<UserId> {
        let token = token.ok_or(AuthError::NotAuthenticated)?;
        let session_id = self
            .parse_session_token(token)
            .ok_or(AuthError::NotAuthenticated)?;

        let session = self
            .session_repo
            .find_session(session_id)
            .await?
            .ok_or(AuthError::NotAuthenticated)?;

        if session.is_expired() {
            self.session_repo.delete_session(session_id).await?;
            tracing::debug!(session_id = %session_id, "Expired session removed");
            return Err(AuthError::NotAuthenticated);
        }

        Ok(session.user_id)
    }

    /// Remove the binding for `token`
    ///
    /// Idempotent: a malformed, unknown or already removed token is not an
    /// error.
    pub async fn invalidate(&self, token: &str) -> AuthResult<()> {
        let Some(session_id) = self.parse_session_token(token) else {
            return Ok(());
        };

        self.session_repo.delete_session(session_id).await?;

        tracing::info!(session_id = %session_id, "Session invalidated");

        Ok(())
    }

    /// Verify the signature and extract the session id
    fn parse_session_token(&self, token: &str) -> Option<Uuid> {
        verify_token(&self.config.session_secret, token)?
            .parse()
            .ok()
    }
}
