//! Driving port for account registration.

use async_trait::async_trait;

use crate::domain::auth::RegistrationRequest;
use crate::domain::error::Error;
use crate::domain::user::User;

/// Domain use-case port for creating accounts.
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Create a new account at the `User` tier.
    ///
    /// A duplicate Roblox handle yields a `conflict` error; uniqueness is
    /// enforced by the store, not by a racy read-before-write check.
    async fn register(&self, request: RegistrationRequest) -> Result<User, Error>;
}
