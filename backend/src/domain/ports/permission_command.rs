//! Driving port for permission administration.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::tier::PermissionTier;
use crate::domain::user::{User, UserId};

/// Domain use-case port for changing a user's tier.
#[async_trait]
pub trait PermissionCommand: Send + Sync {
    /// Set `target`'s permission tier. Requires an `Admin` actor; an unknown
    /// target yields `not_found`.
    async fn set_permission(
        &self,
        actor: &UserId,
        target: &UserId,
        permission: PermissionTier,
    ) -> Result<User, Error>;
}
