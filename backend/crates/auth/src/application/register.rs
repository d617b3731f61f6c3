//! Register Use Case
//!
//! Creates a new user account.

use std::sync::Arc;

use crate::domain::entity::user::{User, UserDraft};
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;

/// Register use case
pub struct RegisterUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> RegisterUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, draft: UserDraft) -> AuthResult<User> {
        let user = self.user_repo.create(&draft).await?;

        tracing::info!(user_id = %user.id, email = %user.email, "User registered");

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AuthError;
    use crate::infra::memory::MemoryAuthRepository;

    #[tokio::test]
    async fn test_register_assigns_sequential_ids() {
        let use_case = RegisterUseCase::new(Arc::new(MemoryAuthRepository::new()));

        let first = use_case.execute(UserDraft::new("a@b.com", "secret")).await.unwrap();
        let second = use_case.execute(UserDraft::new("c@d.com", "secret")).await.unwrap();

        assert_eq!(first.id.get(), 1);
        assert_eq!(second.id.get(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let use_case = RegisterUseCase::new(Arc::new(MemoryAuthRepository::new()));
        use_case.execute(UserDraft::new("a@b.com", "secret")).await.unwrap();

        let err = use_case
            .execute(UserDraft::new("A@B.com", "other"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken));
    }

    #[tokio::test]
    async fn test_invalid_draft_persists_nothing() {
        let repo = Arc::new(MemoryAuthRepository::new());
        let use_case = RegisterUseCase::new(repo.clone());

        let err = use_case.execute(UserDraft::new("nope", "")).await.unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));

        // The next successful insert still gets the first id
        let user = use_case.execute(UserDraft::new("a@b.com", "secret")).await.unwrap();
        assert_eq!(user.id.get(), 1);
    }
}
