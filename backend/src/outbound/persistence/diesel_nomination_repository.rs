//! PostgreSQL-backed `NominationRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::nomination::{Nomination, NominationFilter};
use crate::domain::ports::{NominationPersistenceError, NominationRepository};
use crate::domain::status::NominationStatus;

use super::models::{CorruptRowError, NewNominationRow, NominationRow};
use super::pool::{DbPool, PoolError};
use super::schema::nominations;

/// Diesel-backed implementation of the `NominationRepository` port.
#[derive(Clone)]
pub struct DieselNominationRepository {
    pool: DbPool,
}

impl DieselNominationRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> NominationPersistenceError {
    NominationPersistenceError::connection(error.to_string())
}

fn map_diesel_error(error: diesel::result::Error) -> NominationPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    if let DieselError::DatabaseError(kind, info) = &error {
        debug!(?kind, message = info.message(), "diesel operation failed");
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            NominationPersistenceError::connection("database connection error")
        }
        _ => NominationPersistenceError::query("database error"),
    }
}

fn map_corrupt_row(error: CorruptRowError) -> NominationPersistenceError {
    NominationPersistenceError::query(error.to_string())
}

#[async_trait]
impl NominationRepository for DieselNominationRepository {
    async fn insert(&self, nomination: &Nomination) -> Result<(), NominationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(nominations::table)
            .values(NewNominationRow::from(nomination))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<Nomination>, NominationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<NominationRow> = nominations::table
            .find(id)
            .select(NominationRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(Nomination::try_from)
            .transpose()
            .map_err(map_corrupt_row)
    }

    async fn list(
        &self,
        filter: NominationFilter,
    ) -> Result<Vec<Nomination>, NominationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = nominations::table
            .select(NominationRow::as_select())
            .order(nominations::created_at.desc())
            .into_boxed();
        if let Some(status) = filter.status {
            query = query.filter(nominations::status.eq(status.as_str()));
        }
        if let Some(field) = filter.field {
            // Array containment: the stored field set must include the value.
            query = query.filter(nominations::fields.contains(vec![field.as_str().to_owned()]));
        }
        let rows: Vec<NominationRow> =
            query.load(&mut conn).await.map_err(map_diesel_error)?;
        rows.into_iter()
            .map(Nomination::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(map_corrupt_row)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: NominationStatus,
    ) -> Result<Option<Nomination>, NominationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<NominationRow> = diesel::update(nominations::table.find(id))
            .set(nominations::status.eq(status.as_str()))
            .returning(NominationRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(Nomination::try_from)
            .transpose()
            .map_err(map_corrupt_row)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, NominationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(nominations::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }
}
