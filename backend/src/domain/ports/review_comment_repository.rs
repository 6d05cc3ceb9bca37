//! Driven port for review-comment persistence adapters.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::review::ReviewComment;

/// Persistence errors raised by review-comment repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReviewCommentPersistenceError {
    /// Repository connection could not be established.
    #[error("review comment repository connection failed: {message}")]
    Connection {
        /// Adapter-supplied diagnostic.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("review comment repository query failed: {message}")]
    Query {
        /// Adapter-supplied diagnostic.
        message: String,
    },
}

impl ReviewCommentPersistenceError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Storage operations over the append-only review log.
#[async_trait]
pub trait ReviewCommentRepository: Send + Sync {
    /// Append a comment record.
    async fn insert(&self, comment: &ReviewComment) -> Result<(), ReviewCommentPersistenceError>;

    /// List the comments attached to a nomination, oldest first.
    async fn list_for_nomination(
        &self,
        nomination_id: Uuid,
    ) -> Result<Vec<ReviewComment>, ReviewCommentPersistenceError>;
}
