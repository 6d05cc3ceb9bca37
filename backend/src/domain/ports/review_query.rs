//! Driving port for reading review comments.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::error::Error;
use crate::domain::review::ReviewComment;

/// Domain use-case port for listing a nomination's comments.
#[async_trait]
pub trait ReviewQuery: Send + Sync {
    /// Comments attached to a nomination, oldest first. An unknown
    /// nomination yields an empty list.
    async fn comments_for(&self, nomination_id: Uuid) -> Result<Vec<ReviewComment>, Error>;
}
