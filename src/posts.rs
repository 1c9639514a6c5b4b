use std::collections::HashSet;

use tracing::{debug, info};

use crate::auth::Session;
use crate::config::MAX_POST_LENGTH;
use crate::core::db::DataStore;
use crate::core::errors::Result;
use crate::core::helpers::{truncate_chars, Clock};
use crate::models::models::Post;

/// Posts as the session's user. Content over [`MAX_POST_LENGTH`] characters
/// is cut, not rejected.
pub fn create_post(
    store: &mut DataStore,
    session: &Session,
    clock: &dyn Clock,
    content: &str,
) -> Result<Post> {
    let username = session.require_user()?;

    let (content, truncated) = truncate_chars(content, MAX_POST_LENGTH);
    if truncated {
        info!(%username, max = MAX_POST_LENGTH, "post content truncated");
    }

    let post = Post {
        id: store.next_post_id(),
        username: username.to_string(),
        content,
        timestamp: clock.now(),
    };
    store.insert_post(post.clone());
    debug!(id = %post.id, %username, "post created");

    store.save()?;
    Ok(post)
}

/// A user's posts in the order they were written.
pub fn posts_by(store: &DataStore, username: &str) -> Vec<Post> {
    store
        .posts()
        .iter()
        .filter(|p| p.username == username)
        .cloned()
        .collect()
}

/// Own posts plus friends' posts, newest first. Same-second posts keep
/// insertion order.
pub fn get_feed(store: &DataStore, session: &Session) -> Result<Vec<Post>> {
    let username = session.require_user()?;

    let mut authors: HashSet<&str> = store.friends_of(username).iter().map(String::as_str).collect();
    authors.insert(username);

    let mut posts: Vec<Post> = store
        .posts()
        .iter()
        .filter(|p| authors.contains(p.username.as_str()))
        .cloned()
        .collect();

    // Sort by timestamp in descending order (newest first)
    posts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    Ok(posts)
}
