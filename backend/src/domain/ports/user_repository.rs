//! Driven port for user persistence adapters.

use async_trait::async_trait;

use crate::domain::tier::PermissionTier;
use crate::domain::user::{User, UserId};

/// Persistence errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserPersistenceError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection {
        /// Adapter-supplied diagnostic.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query {
        /// Adapter-supplied diagnostic.
        message: String,
    },
    /// Insert violated the unique Roblox-handle constraint.
    ///
    /// Registration relies on this, not on a read-before-write check, so
    /// concurrent registrations of the same handle cannot both succeed.
    #[error("roblox username is already registered")]
    DuplicateHandle,
}

impl UserPersistenceError {
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

/// Storage operations over registered users.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user record.
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by their unique Roblox handle.
    async fn find_by_roblox_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// List every user, newest first.
    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Update a user's permission tier, returning the updated record or
    /// `None` when the user does not exist.
    async fn update_permission(
        &self,
        id: &UserId,
        permission: PermissionTier,
    ) -> Result<Option<User>, UserPersistenceError>;
}
