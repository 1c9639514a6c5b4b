use tracing::debug;

use crate::core::db::DataStore;
use crate::core::errors::{Result, SocialError};
use crate::core::helpers::{is_valid_password, is_valid_username};
use crate::models::models::{Profile, User};
use crate::posts::posts_by;

/// Adds a new account and persists. Registration does not log anyone in.
pub fn register_user(
    store: &mut DataStore,
    username: &str,
    password: &str,
    bio: &str,
) -> Result<User> {
    if !is_valid_username(username) {
        return Err(SocialError::InvalidInput(
            "Username must be a single word without '|'".to_string(),
        ));
    }
    if !is_valid_password(password) {
        return Err(SocialError::InvalidInput(
            "Password must be non-empty and contain no '|' or line breaks".to_string(),
        ));
    }
    if store.user_exists(username) {
        return Err(SocialError::DuplicateUsername(username.to_string()));
    }

    let user = User {
        username: username.to_string(),
        password: password.to_string(),
        bio: bio.to_string(),
    };
    store.insert_user(user.clone())?;
    debug!(%username, "user registered");

    store.save()?;
    Ok(user)
}

pub fn get_profile(store: &DataStore, username: &str) -> Result<Profile> {
    let user = store
        .find_user(username)
        .ok_or_else(|| SocialError::UnknownUser(username.to_string()))?;

    Ok(Profile {
        username: user.username.clone(),
        bio: user.bio.clone(),
        posts: posts_by(store, username),
    })
}
