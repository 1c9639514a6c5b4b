//! Line codec for the three record files.
//!
//! Every record is one line of `|`-separated fields. The last field of each
//! record takes the rest of the line. Missing trailing fields decode as empty
//! strings rather than errors.

use std::collections::HashSet;

use crate::config::FIELD_DELIMITER;
use crate::core::helpers::sanitize_field;
use crate::models::models::{Friendships, Post, User};

/// Splits `line` into exactly `n` fields, padding with empty strings.
fn split_fields(line: &str, n: usize) -> Vec<String> {
    let mut fields: Vec<String> = line.splitn(n, FIELD_DELIMITER).map(str::to_string).collect();
    fields.resize(n, String::new());
    fields
}

/// Strips a trailing carriage return left by files edited on Windows.
fn trim_line(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

pub fn encode_user(user: &User) -> String {
    format!(
        "{}{d}{}{d}{}",
        user.username,
        user.password,
        sanitize_field(&user.bio),
        d = FIELD_DELIMITER
    )
}

pub fn decode_user(line: &str) -> User {
    let mut fields = split_fields(trim_line(line), 3).into_iter();
    User {
        username: fields.next().unwrap_or_default(),
        password: fields.next().unwrap_or_default(),
        bio: fields.next().unwrap_or_default(),
    }
}

pub fn encode_post(post: &Post) -> String {
    format!(
        "{}{d}{}{d}{}{d}{}",
        post.id,
        post.username,
        post.timestamp,
        sanitize_field(&post.content),
        d = FIELD_DELIMITER
    )
}

pub fn decode_post(line: &str) -> Post {
    let mut fields = split_fields(trim_line(line), 4).into_iter();
    Post {
        id: fields.next().unwrap_or_default(),
        username: fields.next().unwrap_or_default(),
        timestamp: fields.next().unwrap_or_default(),
        content: fields.next().unwrap_or_default(),
    }
}

pub fn encode_friendship(a: &str, b: &str) -> String {
    format!("{}{}{}", a, FIELD_DELIMITER, b)
}

pub fn decode_friendship(line: &str) -> (String, String) {
    let mut fields = split_fields(trim_line(line), 2).into_iter();
    (
        fields.next().unwrap_or_default(),
        fields.next().unwrap_or_default(),
    )
}

/// One line per undirected edge. A pair already written from the other
/// side is skipped, so `A|B` never appears alongside `B|A`.
pub fn encode_friendships(friendships: &Friendships) -> Vec<String> {
    let mut written: HashSet<(&str, &str)> = HashSet::new();
    let mut lines = Vec::new();

    for (user, friends) in friendships {
        for friend in friends {
            if written.contains(&(friend.as_str(), user.as_str())) {
                continue;
            }
            written.insert((user.as_str(), friend.as_str()));
            lines.push(encode_friendship(user, friend));
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(username: &str, password: &str, bio: &str) -> User {
        User {
            username: username.to_string(),
            password: password.to_string(),
            bio: bio.to_string(),
        }
    }

    #[test]
    fn user_bio_takes_rest_of_line() {
        let line = encode_user(&user("alice", "pw1", "loves rust and tea"));
        assert_eq!(line, "alice|pw1|loves rust and tea");
        assert_eq!(decode_user(&line), user("alice", "pw1", "loves rust and tea"));
    }

    #[test]
    fn bio_delimiters_are_substituted_on_write() {
        let line = encode_user(&user("alice", "pw1", "a|b\nc"));
        assert_eq!(line, "alice|pw1|a_b c");
        assert_eq!(decode_user(&line).bio, "a_b c");
    }

    #[test]
    fn short_lines_pad_missing_fields() {
        assert_eq!(decode_user("carol"), user("carol", "", ""));

        let post = decode_post("post_1|bob");
        assert_eq!(post.id, "post_1");
        assert_eq!(post.username, "bob");
        assert_eq!(post.timestamp, "");
        assert_eq!(post.content, "");

        assert_eq!(decode_friendship("alice"), ("alice".to_string(), String::new()));
    }

    #[test]
    fn post_content_is_sanitized_and_keeps_spaces() {
        let post = Post {
            id: "post_3".to_string(),
            username: "bob".to_string(),
            content: "x | y\nz".to_string(),
            timestamp: "2024-05-01 10:00:00".to_string(),
        };
        let line = encode_post(&post);
        assert_eq!(line, "post_3|bob|2024-05-01 10:00:00|x _ y z");

        let decoded = decode_post(&line);
        assert_eq!(decoded.content, "x _ y z");
        assert_eq!(decoded.timestamp, "2024-05-01 10:00:00");
    }

    #[test]
    fn decode_tolerates_crlf() {
        assert_eq!(decode_user("dave|pw|hi\r"), user("dave", "pw", "hi"));
    }

    #[test]
    fn mutual_pairs_are_written_once() {
        let mut friendships = Friendships::new();
        friendships.insert("alice".into(), vec!["bob".into(), "carol".into()]);
        friendships.insert("bob".into(), vec!["alice".into()]);
        friendships.insert("carol".into(), vec!["alice".into()]);

        let lines = encode_friendships(&friendships);
        assert_eq!(lines, vec!["alice|bob", "alice|carol"]);
    }

    #[test]
    fn one_sided_edges_are_still_written() {
        let mut friendships = Friendships::new();
        friendships.insert("alice".into(), vec!["bob".into()]);
        friendships.insert("bob".into(), vec![]);

        assert_eq!(encode_friendships(&friendships), vec!["alice|bob"]);
    }
}
