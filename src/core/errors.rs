use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SocialError {
    #[error("Username already taken: {0}")]
    DuplicateUsername(String),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Not logged in")]
    NotAuthenticated,

    #[error("You cannot add yourself as a friend")]
    SelfFriendship,

    #[error("User {0} does not exist")]
    UnknownUser(String),

    #[error("Already friends with {0}")]
    AlreadyFriends(String),

    #[error("Not friends with {0}")]
    NotFriends(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Could not access {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SocialError {
    pub fn persistence(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SocialError::Persistence {
            path: path.into(),
            source,
        }
    }

    /// Exit code the binary uses when an operation aborts it.
    pub fn exit_code(&self) -> i32 {
        match self {
            SocialError::Persistence { .. } => 2,
            SocialError::InvalidCredentials | SocialError::NotAuthenticated => 3,
            SocialError::DuplicateUsername(_)
            | SocialError::SelfFriendship
            | SocialError::UnknownUser(_)
            | SocialError::AlreadyFriends(_)
            | SocialError::NotFriends(_)
            | SocialError::InvalidInput(_) => 1,
        }
    }

    pub fn is_persistence(&self) -> bool {
        matches!(self, SocialError::Persistence { .. })
    }
}

pub type Result<T> = std::result::Result<T, SocialError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persistence_message_names_the_file() {
        let err = SocialError::persistence(
            "/data/users.txt",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "Could not access /data/users.txt: denied");
        assert_eq!(err.exit_code(), 2);
        assert!(err.is_persistence());
    }

    #[test]
    fn caller_errors_are_recoverable_codes() {
        assert_eq!(SocialError::SelfFriendship.exit_code(), 1);
        assert_eq!(SocialError::NotAuthenticated.exit_code(), 3);
        assert!(!SocialError::InvalidCredentials.is_persistence());
    }
}
