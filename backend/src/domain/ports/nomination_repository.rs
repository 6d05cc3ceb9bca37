//! Driven port for nomination persistence adapters.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::nomination::{Nomination, NominationFilter};
use crate::domain::status::NominationStatus;

/// Persistence errors raised by nomination repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NominationPersistenceError {
    /// Repository connection could not be established.
    #[error("nomination repository connection failed: {message}")]
    Connection {
        /// Adapter-supplied diagnostic.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("nomination repository query failed: {message}")]
    Query {
        /// Adapter-supplied diagnostic.
        message: String,
    },
}

impl NominationPersistenceError {
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

/// Storage operations over nominations.
#[async_trait]
pub trait NominationRepository: Send + Sync {
    /// Insert a new nomination record.
    async fn insert(&self, nomination: &Nomination) -> Result<(), NominationPersistenceError>;

    /// Fetch a nomination by identifier.
    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<Nomination>, NominationPersistenceError>;

    /// List nominations matching the filter, newest first.
    async fn list(
        &self,
        filter: NominationFilter,
    ) -> Result<Vec<Nomination>, NominationPersistenceError>;

    /// Set a nomination's status, returning the updated record or `None`
    /// when the nomination does not exist.
    async fn update_status(
        &self,
        id: Uuid,
        status: NominationStatus,
    ) -> Result<Option<Nomination>, NominationPersistenceError>;

    /// Delete a nomination, returning whether a record was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, NominationPersistenceError>;
}
