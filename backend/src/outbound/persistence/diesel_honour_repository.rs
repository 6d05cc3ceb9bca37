//! PostgreSQL-backed `HonourRepository` implementation using Diesel.
//!
//! Search uses `ILIKE` against both recipient handles so the archive matches
//! regardless of how a handle was capitalised at award time.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::honour::{Honour, HonourFilter};
use crate::domain::ports::{HonourPersistenceError, HonourRepository};

use super::models::{CorruptRowError, HonourRow, NewHonourRow};
use super::pool::{DbPool, PoolError};
use super::schema::honours;

/// Diesel-backed implementation of the `HonourRepository` port.
#[derive(Clone)]
pub struct DieselHonourRepository {
    pool: DbPool,
}

impl DieselHonourRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> HonourPersistenceError {
    HonourPersistenceError::connection(error.to_string())
}

fn map_diesel_error(error: diesel::result::Error) -> HonourPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    if let DieselError::DatabaseError(kind, info) = &error {
        debug!(?kind, message = info.message(), "diesel operation failed");
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            HonourPersistenceError::connection("database connection error")
        }
        _ => HonourPersistenceError::query("database error"),
    }
}

fn map_corrupt_row(error: CorruptRowError) -> HonourPersistenceError {
    HonourPersistenceError::query(error.to_string())
}

/// Escape LIKE metacharacters so search terms match literally.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[async_trait]
impl HonourRepository for DieselHonourRepository {
    async fn insert(&self, honour: &Honour) -> Result<(), HonourPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(honours::table)
            .values(NewHonourRow::from(honour))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn search(&self, filter: &HonourFilter) -> Result<Vec<Honour>, HonourPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = honours::table
            .select(HonourRow::as_select())
            .order(honours::awarded_at.desc())
            .into_boxed();
        if let Some(term) = filter.search.as_deref() {
            let pattern = like_pattern(term);
            query = query.filter(
                honours::roblox_username
                    .ilike(pattern.clone())
                    .or(honours::discord_username.ilike(pattern)),
            );
        }
        if let Some(field) = filter.field {
            query = query.filter(honours::field.eq(field.as_str()));
        }
        let rows: Vec<HonourRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        rows.into_iter()
            .map(Honour::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(map_corrupt_row)
    }
}
