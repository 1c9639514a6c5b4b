use std::path::{Path, PathBuf};

pub const USERS_FILE: &str = "users.txt";
pub const FRIENDSHIPS_FILE: &str = "friendships.txt";
pub const POSTS_FILE: &str = "posts.txt";

pub const FIELD_DELIMITER: char = '|';
pub const DELIMITER_SUBSTITUTE: char = '_';

/// Measured in characters, not bytes.
pub const MAX_POST_LENGTH: usize = 255;
pub const POST_ID_PREFIX: &str = "post_";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const DATA_DIR_ENV: &str = "FLATSOCIAL_DATA_DIR";

pub fn data_dir() -> PathBuf {
    std::env::var(DATA_DIR_ENV)
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Where the three record files live.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: data_dir.into() }
    }

    pub fn from_env() -> Self {
        Self::new(data_dir())
    }

    pub fn users_path(&self) -> PathBuf {
        self.data_dir.join(USERS_FILE)
    }

    pub fn friendships_path(&self) -> PathBuf {
        self.data_dir.join(FRIENDSHIPS_FILE)
    }

    pub fn posts_path(&self) -> PathBuf {
        self.data_dir.join(POSTS_FILE)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
