//! Flat-file social network: users, mutual friendships, posts and a
//! chronological feed, persisted as three `|`-delimited text files.

pub mod auth;
pub mod config;
pub mod core;
pub mod friends;
pub mod models;
pub mod network;
pub mod posts;
pub mod users;

pub use crate::auth::Session;
pub use crate::config::StoreConfig;
pub use crate::core::db::DataStore;
pub use crate::core::errors::{Result, SocialError};
pub use crate::core::helpers::{Clock, LocalClock};
pub use crate::models::models::{Post, Profile, User};
pub use crate::network::SocialNetwork;
