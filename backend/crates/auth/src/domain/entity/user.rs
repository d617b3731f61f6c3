//! User Entity
//!
//! A registered identity. The password only ever exists here as an Argon2id
//! hash; the clear text lives in [`UserDraft`] until the user is created.

use std::fmt;

use kernel::id::UserId;
use kernel::validation::ValidationErrors;
use platform::password::{ClearTextPassword, HashedPassword};

use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// User entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Store-assigned identity
    pub id: UserId,
    /// Unique, lowercased
    pub email: Email,
    pub password_hash: HashedPassword,
}

/// Registration input, before validation and hashing
pub struct UserDraft {
    pub email: String,
    pub password: String,
}

/// Validated, hashed user ready to persist
#[derive(Debug)]
pub struct NewUser {
    pub email: Email,
    pub password_hash: HashedPassword,
}

impl UserDraft {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Validate without hashing
    ///
    /// Email must be present and well-formed; password must be non-empty.
    /// Every violated field is reported.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        self.parse().map(drop)
    }

    /// Validate, then hash the password
    pub fn prepare(&self) -> AuthResult<NewUser> {
        let (email, password) = self.parse()?;

        let password_hash = password
            .hash()
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        Ok(NewUser {
            email,
            password_hash,
        })
    }

    fn parse(&self) -> Result<(Email, ClearTextPassword), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let email = Email::new(&self.email)
            .map_err(|e| errors.add("email", e.to_string()))
            .ok();
        let password = ClearTextPassword::new(self.password.clone())
            .map_err(|e| errors.add("password", e.to_string()))
            .ok();

        match (email, password) {
            (Some(email), Some(password)) => Ok((email, password)),
            _ => Err(errors),
        }
    }
}

impl fmt::Debug for UserDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserDraft")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
