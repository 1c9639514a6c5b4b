use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, error, info, warn};

use crate::config::{StoreConfig, POST_ID_PREFIX};
use crate::core::codec;
use crate::core::errors::{Result, SocialError};
use crate::core::helpers::Clock;
use crate::models::models::{Friendships, Post, User};

/// In-memory working set backed by three flat files.
///
/// Users are unique by username and friendships are kept symmetric. Nothing
/// here writes to disk on its own; callers mutate, then call [`DataStore::save`].
#[derive(Debug)]
pub struct DataStore {
    config: StoreConfig,
    users: Vec<User>,
    friendships: Friendships,
    posts: Vec<Post>,
}

/// Reads a whole file as lines. `None` means the file does not exist yet.
fn read_lines(path: &Path) -> Result<Option<Vec<String>>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(
            content
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(str::to_string)
                .collect(),
        )),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(SocialError::persistence(path, e)),
    }
}

fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
    let mut content = String::new();
    for line in lines {
        content.push_str(line);
        content.push('\n');
    }
    fs::write(path, content).map_err(|e| SocialError::persistence(path, e))
}

impl DataStore {
    /// Empty store that has not touched the disk.
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            users: Vec::new(),
            friendships: Friendships::new(),
            posts: Vec::new(),
        }
    }

    /// Creates a store and loads whatever files already exist.
    pub fn open(config: StoreConfig) -> Result<Self> {
        let mut store = Self::new(config);
        store.load()?;
        Ok(store)
    }

    /// Replaces in-memory state with the file contents. Absent files are
    /// the first-run state and load as empty collections.
    pub fn load(&mut self) -> Result<()> {
        self.users.clear();
        self.friendships.clear();
        self.posts.clear();

        let users_path = self.config.users_path();
        match read_lines(&users_path)? {
            Some(lines) => {
                for line in lines {
                    let user = codec::decode_user(&line);
                    if self.user_exists(&user.username) {
                        warn!(username = %user.username, "duplicate user record skipped");
                        continue;
                    }
                    self.users.push(user);
                }
                info!(path = %users_path.display(), count = self.users.len(), "users loaded");
            }
            None => info!(path = %users_path.display(), "no users file, starting empty"),
        }

        let friendships_path = self.config.friendships_path();
        match read_lines(&friendships_path)? {
            Some(lines) => {
                let mut edges = 0;
                for line in lines {
                    let (a, b) = codec::decode_friendship(&line);
                    if a.is_empty() || b.is_empty() {
                        warn!(line = %line, "friendship record with missing username skipped");
                        continue;
                    }
                    if a == b {
                        warn!(username = %a, "self friendship record skipped");
                        continue;
                    }
                    if self.add_friendship(&a, &b) {
                        edges += 1;
                    } else {
                        warn!(user = %a, friend = %b, "duplicate friendship record skipped");
                    }
                }
                info!(path = %friendships_path.display(), count = edges, "friendships loaded");
            }
            None => info!(path = %friendships_path.display(), "no friendships file, starting empty"),
        }

        let posts_path = self.config.posts_path();
        match read_lines(&posts_path)? {
            Some(lines) => {
                self.posts = lines.iter().map(|line| codec::decode_post(line)).collect();
                info!(path = %posts_path.display(), count = self.posts.len(), "posts loaded");
            }
            None => info!(path = %posts_path.display(), "no posts file, starting empty"),
        }

        Ok(())
    }

    /// Rewrites all three files from memory.
    ///
    /// Every file is attempted even if an earlier one fails; the first
    /// failure is returned. In-memory state is never rolled back.
    pub fn save(&self) -> Result<()> {
        let dir = self.config.data_dir();
        if let Err(e) = fs::create_dir_all(dir) {
            error!(path = %dir.display(), error = %e, "data directory unavailable, changes kept in memory only");
            return Err(SocialError::persistence(dir, e));
        }

        let user_lines: Vec<String> = self.users.iter().map(codec::encode_user).collect();
        let friendship_lines = codec::encode_friendships(&self.friendships);
        let post_lines: Vec<String> = self.posts.iter().map(codec::encode_post).collect();

        let targets = [
            (self.config.users_path(), user_lines),
            (self.config.friendships_path(), friendship_lines),
            (self.config.posts_path(), post_lines),
        ];

        let mut first_failure = None;
        for (path, lines) in &targets {
            match write_lines(path, lines) {
                Ok(()) => debug!(path = %path.display(), count = lines.len(), "saved"),
                Err(e) => {
                    error!(error = %e, "save failed, changes kept in memory only");
                    first_failure.get_or_insert(e);
                }
            }
        }

        match first_failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn friendships(&self) -> &Friendships {
        &self.friendships
    }

    #[cfg(test)]
    pub(crate) fn friendships_mut(&mut self) -> &mut Friendships {
        &mut self.friendships
    }

    pub fn find_user(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|u| u.username == username)
    }

    pub fn user_exists(&self, username: &str) -> bool {
        self.find_user(username).is_some()
    }

    pub fn next_post_id(&self) -> String {
        format!("{}{}", POST_ID_PREFIX, self.posts.len() + 1)
    }

    pub fn insert_user(&mut self, user: User) -> Result<()> {
        if self.user_exists(&user.username) {
            return Err(SocialError::DuplicateUsername(user.username));
        }
        self.users.push(user);
        Ok(())
    }

    pub fn insert_post(&mut self, post: Post) {
        self.posts.push(post);
    }

    /// Friend list for `username`, empty when there is no entry.
    pub fn friends_of(&self, username: &str) -> &[String] {
        self.friendships
            .get(username)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn are_friends(&self, a: &str, b: &str) -> bool {
        self.friends_of(a).iter().any(|f| f == b)
    }

    /// Records the edge on both sides. Returns `false` if `b` was already
    /// in `a`'s list, in which case nothing changes.
    pub fn add_friendship(&mut self, a: &str, b: &str) -> bool {
        if self.are_friends(a, b) {
            return false;
        }
        self.friendships
            .entry(a.to_string())
            .or_default()
            .push(b.to_string());
        let reverse = self.friendships.entry(b.to_string()).or_default();
        if !reverse.iter().any(|f| f == a) {
            reverse.push(a.to_string());
        }
        true
    }

    /// Drops `b` from `a`'s list and, where present, `a` from `b`'s list.
    ///
    /// Returns `None` when `b` was not in `a`'s list. Otherwise returns
    /// whether the reverse edge existed.
    pub fn remove_friendship(&mut self, a: &str, b: &str) -> Option<bool> {
        let forward = self.friendships.get_mut(a)?;
        let before = forward.len();
        forward.retain(|f| f != b);
        if forward.len() == before {
            return None;
        }

        let reverse_found = match self.friendships.get_mut(b) {
            Some(reverse) => {
                let before = reverse.len();
                reverse.retain(|f| f != a);
                reverse.len() != before
            }
            None => false,
        };
        Some(reverse_found)
    }
}

/// Registers `test`, `alice` and `bob` with a starter post each and makes
/// `test` and `bob` friends. Existing accounts are left alone.
pub fn seed_demo_data(store: &mut DataStore, clock: &dyn Clock) -> Result<()> {
    let demo = [
        ("test", "test", "Test user bio", "This is my first post!"),
        ("alice", "alice", "Hello, I'm Alice!", "Welcome to my board! Excited to share thoughts here."),
        ("bob", "bob", "Bob's corner of the internet", "Hey everyone! Looking forward to connecting with you all."),
    ];

    let mut changed = false;
    for (username, password, bio, first_post) in demo {
        if store.user_exists(username) {
            continue;
        }
        store.insert_user(User {
            username: username.to_string(),
            password: password.to_string(),
            bio: bio.to_string(),
        })?;
        let post = Post {
            id: store.next_post_id(),
            username: username.to_string(),
            content: first_post.to_string(),
            timestamp: clock.now(),
        };
        store.insert_post(post);
        changed = true;
    }

    if store.add_friendship("test", "bob") {
        changed = true;
    }

    if changed {
        info!("demo data seeded");
        store.save()?;
    }
    Ok(())
}
