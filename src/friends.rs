use tracing::{debug, warn};

use crate::core::db::DataStore;
use crate::core::errors::{Result, SocialError};

pub fn add_friend(store: &mut DataStore, username: &str, friend: &str) -> Result<()> {
    if friend == username {
        return Err(SocialError::SelfFriendship);
    }
    if !store.user_exists(friend) {
        return Err(SocialError::UnknownUser(friend.to_string()));
    }
    if !store.add_friendship(username, friend) {
        return Err(SocialError::AlreadyFriends(friend.to_string()));
    }
    debug!(user = %username, %friend, "friendship added");

    store.save()
}

/// Removal from the other side is best effort: a missing reverse edge is
/// logged, not treated as an error.
pub fn remove_friend(store: &mut DataStore, username: &str, friend: &str) -> Result<()> {
    let reverse_found = store
        .remove_friendship(username, friend)
        .ok_or_else(|| SocialError::NotFriends(friend.to_string()))?;

    if !reverse_found {
        warn!(user = %username, %friend, "friendship was one-sided");
    }
    debug!(user = %username, %friend, "friendship removed");

    store.save()
}

/// Never fails, even for unknown usernames.
pub fn get_friends(store: &DataStore, username: &str) -> Vec<String> {
    store.friends_of(username).to_vec()
}
