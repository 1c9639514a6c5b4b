use std::sync::OnceLock;

use regex::Regex;

use crate::config::{DELIMITER_SUBSTITUTE, FIELD_DELIMITER, TIMESTAMP_FORMAT};

/// Source of post timestamps in `YYYY-MM-DD HH:MM:SS` form.
pub trait Clock {
    fn now(&self) -> String;
}

/// Wall clock in the local timezone.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> String {
        now_timestamp()
    }
}

pub fn now_timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Makes free text safe for a single delimited line.
pub fn sanitize_field(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            FIELD_DELIMITER => DELIMITER_SUBSTITUTE,
            '\n' | '\r' => ' ',
            other => other,
        })
        .collect()
}

/// Keeps at most `max` characters. Returns whether anything was cut.
pub fn truncate_chars(text: &str, max: usize) -> (String, bool) {
    match text.char_indices().nth(max) {
        Some((byte_idx, _)) => (text[..byte_idx].to_string(), true),
        None => (text.to_string(), false),
    }
}

fn username_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^[^\s|]+$").expect("Regex should compile"))
}

pub fn is_valid_username(username: &str) -> bool {
    username_regex().is_match(username)
}

pub fn is_valid_password(password: &str) -> bool {
    !password.is_empty() && !password.contains([FIELD_DELIMITER, '\n', '\r'])
}
