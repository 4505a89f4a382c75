use crate::models::User;

/// The signed-in user for this run, if any. Placeholder authentication only:
/// whoever logs in is trusted.
#[derive(Debug, Default)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// Replaces whoever was signed in and returns them.
    pub fn login(&mut self, user: User) -> Option<User> {
        tracing::info!("User {} ({}) signed in", user.username, user.id);
        self.user.replace(user)
    }

    pub fn logout(&mut self) -> Option<User> {
        let previous = self.user.take();
        if let Some(user) = &previous {
            tracing::info!("User {} signed out", user.username);
        }
        previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_logout() {
        let mut session = Session::new();
        assert!(session.current_user().is_none());

        assert_eq!(session.login(User::new(1, "john_doe")), None);
        assert_eq!(session.current_user().map(|u| u.id), Some(1));

        let previous = session.login(User::new(2, "react_dev"));
        assert_eq!(previous.map(|u| u.username), Some("john_doe".to_string()));

        assert_eq!(session.logout().map(|u| u.id), Some(2));
        assert!(!session.is_signed_in());
        assert_eq!(session.logout(), None);
    }
}
