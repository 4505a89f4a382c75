use serde::{Deserialize, Serialize};
use validator::Validate;

pub type UserId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
}

impl User {
    pub fn new(id: UserId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
        }
    }
}

// Login / signup requests
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
}

#[derive(Debug, Validate, Deserialize)]
pub struct SignupRequest {
    #[validate(length(min = 3, max = 30, message = "Username must be 3 to 30 characters"))]
    pub username: String,
}
