//! Auth slice - signed-in user and token

use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub image: String,
}

impl User {
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
}

impl AuthState {
    pub fn set_credentials(&mut self, user: User, token: String) {
        info!("Signed in as {}", user.username);
        self.user = Some(user);
        self.token = Some(token);
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            info!("Signed out {}", user.username);
        }
        self.token = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }
}

#[cfg(test)]
pub(crate) fn sample_user(username: &str) -> User {
    User {
        id: 1,
        username: username.to_string(),
        email: format!("{}@example.com", username),
        first_name: "Emily".to_string(),
        last_name: "Johnson".to_string(),
        gender: "female".to_string(),
        image: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_signed_out() {
        assert!(!AuthState::default().is_authenticated());
    }

    #[test]
    fn test_set_credentials_and_logout() {
        let mut auth = AuthState::default();
        auth.set_credentials(sample_user("emilys"), "token-123".into());
        assert!(auth.is_authenticated());
        assert_eq!(auth.user.as_ref().unwrap().username, "emilys");

        auth.logout();
        assert_eq!(auth, AuthState::default());
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        let mut user = sample_user("emilys");
        assert_eq!(user.display_name(), "Emily Johnson");
        user.first_name.clear();
        user.last_name.clear();
        assert_eq!(user.display_name(), "emilys");
    }
}
