//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call this port to authenticate credentials without
//! knowing the backing infrastructure, which keeps handler tests
//! deterministic: they substitute a test double instead of wiring
//! persistence and a real hasher.

use async_trait::async_trait;

use crate::domain::auth::LoginCredentials;
use crate::domain::error::Error;
use crate::domain::user::User;

/// Domain use-case port for authentication.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user.
    ///
    /// Unknown handle and wrong password both map to the same generic
    /// `unauthorized` error so callers cannot enumerate accounts.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error>;
}
