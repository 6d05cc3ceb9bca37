//! Driving port for appending review comments.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::error::Error;
use crate::domain::review::{CommentText, ReviewComment};
use crate::domain::user::UserId;

/// Domain use-case port for the append-only review log.
#[async_trait]
pub trait ReviewCommand: Send + Sync {
    /// Append a comment to a nomination. Requires a `HonoursCommittee`
    /// (or higher) actor; the nomination must exist.
    async fn add_comment(
        &self,
        actor: &UserId,
        nomination_id: Uuid,
        comment: CommentText,
    ) -> Result<ReviewComment, Error>;
}
