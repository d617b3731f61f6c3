//! API DTOs (Data Transfer Objects)

use kernel::id::UserId;
use serde::{Deserialize, Serialize};

use crate::domain::entity::user::User;
use crate::domain::value_object::email::Email;

/// Credentials body shared by `POST /create-user` and `POST /session`
#[derive(Clone, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// User as returned to clients; never carries the password hash
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub email: Email,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}
