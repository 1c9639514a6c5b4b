use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    pub bio: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Post {
    pub id: String,
    pub username: String,
    pub content: String,
    /// `YYYY-MM-DD HH:MM:SS`, so lexicographic order is chronological order.
    pub timestamp: String,
}

/// A user's bio together with everything they have posted.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Profile {
    pub username: String,
    pub bio: String,
    pub posts: Vec<Post>,
}

/// Username -> ordered friend usernames. Kept symmetric by the store.
pub type Friendships = std::collections::BTreeMap<String, Vec<String>>;
