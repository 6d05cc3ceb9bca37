//! PostgreSQL-backed `ReviewCommentRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{ReviewCommentPersistenceError, ReviewCommentRepository};
use crate::domain::review::ReviewComment;

use super::models::{CorruptRowError, NewReviewCommentRow, ReviewCommentRow};
use super::pool::{DbPool, PoolError};
use super::schema::review_comments;

/// Diesel-backed implementation of the `ReviewCommentRepository` port.
#[derive(Clone)]
pub struct DieselReviewCommentRepository {
    pool: DbPool,
}

impl DieselReviewCommentRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ReviewCommentPersistenceError {
    ReviewCommentPersistenceError::connection(error.to_string())
}

fn map_diesel_error(error: diesel::result::Error) -> ReviewCommentPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    if let DieselError::DatabaseError(kind, info) = &error {
        debug!(?kind, message = info.message(), "diesel operation failed");
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ReviewCommentPersistenceError::connection("database connection error")
        }
        _ => ReviewCommentPersistenceError::query("database error"),
    }
}

fn map_corrupt_row(error: CorruptRowError) -> ReviewCommentPersistenceError {
    ReviewCommentPersistenceError::query(error.to_string())
}

#[async_trait]
impl ReviewCommentRepository for DieselReviewCommentRepository {
    async fn insert(&self, comment: &ReviewComment) -> Result<(), ReviewCommentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(review_comments::table)
            .values(NewReviewCommentRow::from(comment))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn list_for_nomination(
        &self,
        nomination_id: Uuid,
    ) -> Result<Vec<ReviewComment>, ReviewCommentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ReviewCommentRow> = review_comments::table
            .filter(review_comments::nomination_id.eq(nomination_id))
            .order(review_comments::created_at.asc())
            .select(ReviewCommentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter()
            .map(ReviewComment::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(map_corrupt_row)
    }
}
