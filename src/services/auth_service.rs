use validator::Validate;

use crate::{
    error::{AppError, Result},
    models::{LoginRequest, SignupRequest, User, UserId},
};

/// Mock user directory standing in for an account backend.
#[derive(Debug, Default)]
pub struct UserDirectory {
    users: Vec<User>,
    last_id: UserId,
}

impl UserDirectory {
    pub fn new(users: Vec<User>) -> Self {
        let last_id = users.iter().map(|u| u.id).max().unwrap_or(0);
        Self { users, last_id }
    }

    pub fn find_by_username(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|u| u.username == username)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Resolves a login to a known user. No credentials are checked.
    pub fn authenticate(&self, payload: &LoginRequest) -> Result<User> {
        let username = payload.username.trim();
        self.find_by_username(username)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("No user named {}", username)))
    }

    /// Registers a new username with the next free id.
    pub fn register(&mut self, payload: &SignupRequest) -> Result<User> {
        let trimmed = SignupRequest {
            username: payload.username.trim().to_string(),
        };
        trimmed.validate()?;

        if self.find_by_username(&trimmed.username).is_some() {
            return Err(AppError::Conflict(format!(
                "Username {} is already taken",
                trimmed.username
            )));
        }

        self.last_id += 1;
        let user = User::new(self.last_id, trimmed.username);
        tracing::info!("Registered user {} with id {}", user.username, user.id);
        self.users.push(user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> UserDirectory {
        UserDirectory::new(vec![User::new(1, "john_doe"), User::new(6, "sql_expert")])
    }

    #[test]
    fn test_authenticate_known_user() {
        let users = directory();
        let user = users
            .authenticate(&LoginRequest {
                username: " sql_expert ".to_string(),
            })
            .unwrap();
        assert_eq!(user, User::new(6, "sql_expert"));
    }

    #[test]
    fn test_authenticate_unknown_user() {
        let users = directory();
        let err = users
            .authenticate(&LoginRequest {
                username: "ghost".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_register_allocates_next_id() {
        let mut users = directory();
        let user = users
            .register(&SignupRequest {
                username: "newbie".to_string(),
            })
            .unwrap();

        assert_eq!(user.id, 7);
        assert_eq!(users.find_by_username("newbie"), Some(&user));
        assert_eq!(users.len(), 3);
    }

    #[test]
    fn test_register_rejects_taken_and_short_names() {
        let mut users = directory();

        let err = users
            .register(&SignupRequest {
                username: "john_doe".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let err = users
            .register(&SignupRequest {
                username: "  x ".to_string(),
            })
            .unwrap_err();
        let AppError::Validation(fields) = err else {
            panic!("expected validation error");
        };
        assert_eq!(
            fields.get("username"),
            Some("Username must be 3 to 30 characters")
        );
    }
}
