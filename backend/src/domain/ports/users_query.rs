//! Driving port for user-facing account queries.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::user::{User, UserId};

/// Domain use-case port for reading accounts.
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// List every registered user, newest first. Requires an `Admin` actor.
    async fn list_users(&self, actor: &UserId) -> Result<Vec<User>, Error>;

    /// Resolve a session subject back to their account, if it still exists.
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, Error>;
}
