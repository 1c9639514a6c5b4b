use crate::auth::Session;
use crate::config::StoreConfig;
use crate::core::db::{seed_demo_data, DataStore};
use crate::core::errors::Result;
use crate::core::helpers::{Clock, LocalClock};
use crate::models::models::{Post, Profile, User};
use crate::{friends, posts, users};

/// Everything the menu loop talks to: one store, one session, one clock.
///
/// Operations that change data rewrite the files before returning. If that
/// write fails the change stays in memory and the error is returned.
pub struct SocialNetwork {
    store: DataStore,
    session: Session,
    clock: Box<dyn Clock>,
}

impl SocialNetwork {
    /// Loads the store from `config` and starts anonymous.
    pub fn open(config: StoreConfig) -> Result<Self> {
        Ok(Self::with_store(DataStore::open(config)?))
    }

    pub fn with_store(store: DataStore) -> Self {
        Self {
            store,
            session: Session::Anonymous,
            clock: Box::new(LocalClock),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn store(&self) -> &DataStore {
        &self.store
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn seed_demo_data(&mut self) -> Result<()> {
        seed_demo_data(&mut self.store, self.clock.as_ref())
    }

    pub fn register(&mut self, username: &str, password: &str, bio: &str) -> Result<User> {
        users::register_user(&mut self.store, username, password, bio)
    }

    pub fn login(&mut self, username: &str, password: &str) -> Result<()> {
        self.session.login(&self.store, username, password)
    }

    pub fn logout(&mut self) {
        self.session.logout();
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn current_user(&self) -> Option<&str> {
        self.session.current_user()
    }

    pub fn add_friend(&mut self, friend: &str) -> Result<()> {
        let username = self.session.require_user()?;
        friends::add_friend(&mut self.store, username, friend)
    }

    pub fn remove_friend(&mut self, friend: &str) -> Result<()> {
        let username = self.session.require_user()?;
        friends::remove_friend(&mut self.store, username, friend)
    }

    pub fn friends_of(&self, username: &str) -> Vec<String> {
        friends::get_friends(&self.store, username)
    }

    pub fn post(&mut self, content: &str) -> Result<Post> {
        posts::create_post(&mut self.store, &self.session, self.clock.as_ref(), content)
    }

    pub fn profile_of(&self, username: &str) -> Result<Profile> {
        users::get_profile(&self.store, username)
    }

    pub fn build_feed(&self) -> Result<Vec<Post>> {
        posts::get_feed(&self.store, &self.session)
    }
}
