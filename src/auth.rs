use tracing::debug;

use crate::core::db::DataStore;
use crate::core::errors::{Result, SocialError};

/// Who is using the network right now.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated(String),
}

impl Session {
    pub fn current_user(&self) -> Option<&str> {
        match self {
            Session::Anonymous => None,
            Session::Authenticated(username) => Some(username.as_str()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }

    /// Gate for every operation that needs a logged-in user.
    pub fn require_user(&self) -> Result<&str> {
        self.current_user().ok_or(SocialError::NotAuthenticated)
    }

    /// Exact, case-sensitive match on both username and password. A failed
    /// attempt leaves the session as it was; a successful one replaces any
    /// user already logged in.
    pub fn login(&mut self, store: &DataStore, username: &str, password: &str) -> Result<()> {
        match store.find_user(username) {
            Some(user) if user.password == password => {
                debug!(%username, "logged in");
                *self = Session::Authenticated(username.to_string());
                Ok(())
            }
            _ => {
                debug!(%username, "login rejected");
                Err(SocialError::InvalidCredentials)
            }
        }
    }

    pub fn logout(&mut self) {
        if let Session::Authenticated(username) = self {
            debug!(%username, "logged out");
        }
        *self = Session::Anonymous;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;
    use crate::models::models::User;

    fn store_with_alice() -> DataStore {
        let mut store = DataStore::new(StoreConfig::new("unused"));
        store
            .insert_user(User {
                username: "alice".to_string(),
                password: "pw1".to_string(),
                bio: "hi".to_string(),
            })
            .unwrap();
        store
    }

    #[test]
    fn starts_anonymous() {
        let session = Session::default();
        assert_eq!(session.current_user(), None);
        assert!(matches!(session.require_user(), Err(SocialError::NotAuthenticated)));
    }

    #[test]
    fn login_requires_exact_password() {
        let store = store_with_alice();
        let mut session = Session::default();

        assert!(matches!(
            session.login(&store, "alice", "PW1"),
            Err(SocialError::InvalidCredentials)
        ));
        assert!(!session.is_authenticated());

        session.login(&store, "alice", "pw1").unwrap();
        assert_eq!(session.current_user(), Some("alice"));
        assert_eq!(session.require_user().unwrap(), "alice");
    }

    #[test]
    fn unknown_user_cannot_log_in() {
        let store = store_with_alice();
        let mut session = Session::default();
        assert!(matches!(
            session.login(&store, "mallory", "pw1"),
            Err(SocialError::InvalidCredentials)
        ));
    }

    #[test]
    fn login_while_logged_in_switches_user() {
        let mut store = store_with_alice();
        store
            .insert_user(User {
                username: "bob".to_string(),
                password: "pw2".to_string(),
                bio: String::new(),
            })
            .unwrap();
        let mut session = Session::default();
        session.login(&store, "alice", "pw1").unwrap();

        assert!(session.login(&store, "bob", "nope").is_err());
        assert_eq!(session.current_user(), Some("alice"));

        session.login(&store, "bob", "pw2").unwrap();
        assert_eq!(session.current_user(), Some("bob"));
    }

    #[test]
    fn logout_is_unconditional() {
        let store = store_with_alice();
        let mut session = Session::default();
        session.logout();
        assert_eq!(session, Session::Anonymous);

        session.login(&store, "alice", "pw1").unwrap();
        session.logout();
        assert_eq!(session, Session::Anonymous);
    }
}
