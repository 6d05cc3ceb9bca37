//! Review comments appended by committee members.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::user::UserId;

/// Maximum comment length in characters.
pub const COMMENT_MAX: usize = 500;

/// Validation errors for review comments.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommentValidationError {
    /// The comment was blank once trimmed.
    #[error("comment must not be empty")]
    EmptyComment,
    /// The comment exceeded [`COMMENT_MAX`] characters.
    #[error("comment must be at most {COMMENT_MAX} characters")]
    CommentTooLong,
}

/// Free-text comment body, trimmed, non-empty, at most [`COMMENT_MAX`] chars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentText(String);

impl CommentText {
    /// Validate and construct from raw input.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, CommentValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(CommentValidationError::EmptyComment);
        }
        if trimmed.chars().count() > COMMENT_MAX {
            return Err(CommentValidationError::CommentTooLong);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for CommentText {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CommentText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<CommentText> for String {
    fn from(value: CommentText) -> Self {
        value.0
    }
}

/// An append-only committee comment on a nomination.
///
/// The author's handle is cached at write time so the comment remains
/// displayable without a user join.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewComment {
    /// Stable identifier.
    pub id: Uuid,
    /// Owning nomination; must exist at creation time.
    pub nomination_id: Uuid,
    /// Authoring committee member.
    pub author_id: UserId,
    /// Author's Roblox handle at write time.
    pub author_username: String,
    /// Comment body.
    pub comment: CommentText,
    /// Append time; comments list oldest-first.
    pub created_at: DateTime<Utc>,
}
