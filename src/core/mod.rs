pub mod codec;
pub mod db;
pub mod errors;
pub mod helpers;
