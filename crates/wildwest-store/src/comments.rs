use std::sync::{Mutex, PoisonError};

use chrono::Utc;
use uuid::Uuid;

use wildwest_types::models::{Comment, Identity};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PostError {
    #[error("authentication required")]
    Unauthorized,
    #[error("comment text is required")]
    EmptyText,
}

/// Append-only comment log. Comments are immutable and never deleted;
/// `list` returns a full snapshot in insertion order.
#[derive(Default)]
pub struct CommentBoard {
    comments: Mutex<Vec<Comment>>,
}

impl CommentBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a comment authored by `identity`. Posting is gated on an
    /// authenticated identity; reads are not.
    pub fn post(&self, identity: &Identity, text: &str) -> Result<Comment, PostError> {
        let author = identity.username().ok_or(PostError::Unauthorized)?;
        if text.is_empty() {
            return Err(PostError::EmptyText);
        }

        let comment = Comment {
            id: Uuid::new_v4(),
            author: author.to_string(),
            text: text.to_string(),
            created_at: Utc::now(),
        };

        self.comments
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(comment.clone());

        Ok(comment)
    }

    pub fn list(&self) -> Vec<Comment> {
        self.comments
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authed(username: &str) -> Identity {
        Identity::Authenticated {
            username: username.to_string(),
        }
    }

    #[test]
    fn post_and_list() {
        let board = CommentBoard::new();
        let comment = board.post(&authed("alice"), "howdy").unwrap();

        assert_eq!(comment.author, "alice");
        assert_eq!(comment.text, "howdy");

        let all = board.list();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, comment.id);
    }

    #[test]
    fn anonymous_post_rejected() {
        let board = CommentBoard::new();
        let err = board.post(&Identity::Anonymous, "howdy").unwrap_err();

        assert_eq!(err, PostError::Unauthorized);
        assert!(board.list().is_empty());
    }

    #[test]
    fn empty_text_rejected() {
        let board = CommentBoard::new();
        let err = board.post(&authed("alice"), "").unwrap_err();

        assert_eq!(err, PostError::EmptyText);
        assert!(board.list().is_empty());
    }

    #[test]
    fn list_preserves_insertion_order() {
        let board = CommentBoard::new();
        board.post(&authed("alice"), "first").unwrap();
        board.post(&authed("bob"), "second").unwrap();
        board.post(&authed("alice"), "third").unwrap();

        let all = board.list();
        let texts: Vec<&str> = all.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, ["first", "second", "third"]);
    }
}
