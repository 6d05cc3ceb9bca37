//! Account use-cases: login, registration, user listing, and permission
//! administration over the driven persistence and hashing ports.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use super::auth::{LoginCredentials, RegistrationRequest};
use super::error::Error;
use super::ports::{
    LoginService, PasswordHasher, PasswordHasherError, PermissionCommand, RegistrationService,
    UserPersistenceError, UserRepository, UsersQuery,
};
use super::tier::PermissionTier;
use super::user::{User, UserId};

/// Implements the account-facing driving ports on top of a user repository
/// and a password hasher.
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl AccountService {
    /// Build the service from its driven ports.
    #[must_use]
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    /// Load the acting user and confirm they hold at least `required`.
    ///
    /// A session subject that no longer resolves to an account is treated as
    /// unauthenticated rather than forbidden.
    async fn require_tier(&self, actor: &UserId, required: PermissionTier) -> Result<User, Error> {
        let actor = self
            .users
            .find_by_id(actor)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| Error::unauthorized("session does not match a registered user"))?;
        if actor.permission().authorises(required) {
            Ok(actor)
        } else {
            Err(Error::forbidden("insufficient permission"))
        }
    }
}

#[async_trait]
impl LoginService for AccountService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let found = self
            .users
            .find_by_roblox_username(credentials.username())
            .await
            .map_err(storage_error)?;
        // Unknown handle and bad password share one error so responses do
        // not reveal which handles are registered.
        let Some(user) = found else {
            warn!(username = credentials.username(), "login for unknown handle");
            return Err(invalid_credentials());
        };
        let matches = self
            .hasher
            .verify(credentials.password(), user.password_hash())
            .map_err(hasher_error)?;
        if !matches {
            warn!(user_id = %user.id(), "login with wrong password");
            return Err(invalid_credentials());
        }
        info!(user_id = %user.id(), "user authenticated");
        Ok(user)
    }
}

#[async_trait]
impl RegistrationService for AccountService {
    async fn register(&self, request: RegistrationRequest) -> Result<User, Error> {
        let hash = self.hasher.hash(request.password()).map_err(hasher_error)?;
        let user = User::new(
            UserId::random(),
            request.roblox_username().clone(),
            request.discord_username().clone(),
            hash,
            PermissionTier::User,
            chrono::Utc::now(),
        );
        match self.users.insert(&user).await {
            Ok(()) => {
                info!(user_id = %user.id(), "user registered");
                Ok(user)
            }
            Err(UserPersistenceError::DuplicateHandle) => Err(Error::conflict(
                "roblox username is already registered",
            )),
            Err(err) => Err(storage_error(err)),
        }
    }
}

#[async_trait]
impl UsersQuery for AccountService {
    async fn list_users(&self, actor: &UserId) -> Result<Vec<User>, Error> {
        self.require_tier(actor, PermissionTier::Admin).await?;
        self.users.list_all().await.map_err(storage_error)
    }

    async fn find_user(&self, id: &UserId) -> Result<Option<User>, Error> {
        self.users.find_by_id(id).await.map_err(storage_error)
    }
}

#[async_trait]
impl PermissionCommand for AccountService {
    async fn set_permission(
        &self,
        actor: &UserId,
        target: &UserId,
        permission: PermissionTier,
    ) -> Result<User, Error> {
        self.require_tier(actor, PermissionTier::Admin).await?;
        let updated = self
            .users
            .update_permission(target, permission)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| Error::not_found("user not found"))?;
        info!(user_id = %updated.id(), permission = %permission, "permission updated");
        Ok(updated)
    }
}

fn invalid_credentials() -> Error {
    Error::unauthorized("invalid credentials")
}

fn storage_error(err: UserPersistenceError) -> Error {
    match err {
        UserPersistenceError::Connection { .. } => {
            warn!(error = %err, "user storage unavailable");
            Error::service_unavailable("storage is unavailable")
        }
        _ => {
            warn!(error = %err, "user storage failure");
            Error::internal("storage failure")
        }
    }
}

fn hasher_error(err: PasswordHasherError) -> Error {
    warn!(error = %err, "password hashing failure");
    Error::internal("credential processing failed")
}
