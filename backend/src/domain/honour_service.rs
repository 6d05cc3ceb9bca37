//! Honour ledger use-cases: awarding and the public archive search.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use super::error::Error;
use super::honour::{AwardDraft, Honour, HonourFilter};
use super::ports::{
    HonourCommand, HonourPersistenceError, HonourQuery, HonourRepository, UserPersistenceError,
    UserRepository,
};
use super::tier::PermissionTier;
use super::user::UserId;

/// Implements the honour driving ports on top of the honours ledger.
pub struct HonourService {
    honours: Arc<dyn HonourRepository>,
    users: Arc<dyn UserRepository>,
}

impl HonourService {
    /// Build the service from its driven ports.
    #[must_use]
    pub fn new(honours: Arc<dyn HonourRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { honours, users }
    }
}

#[async_trait]
impl HonourCommand for HonourService {
    async fn award(&self, actor: &UserId, draft: AwardDraft) -> Result<Honour, Error> {
        let actor = self
            .users
            .find_by_id(actor)
            .await
            .map_err(user_storage_error)?
            .ok_or_else(|| Error::unauthorized("session does not match a registered user"))?;
        if !actor.permission().authorises(PermissionTier::Admin) {
            return Err(Error::forbidden("insufficient permission"));
        }
        let honour = Honour::from_draft(draft);
        self.honours
            .insert(&honour)
            .await
            .map_err(honour_storage_error)?;
        info!(honour_id = %honour.id, actor = %actor.id(), "honour awarded");
        Ok(honour)
    }
}

#[async_trait]
impl HonourQuery for HonourService {
    async fn search(&self, filter: HonourFilter) -> Result<Vec<Honour>, Error> {
        self.honours
            .search(&filter)
            .await
            .map_err(honour_storage_error)
    }
}

fn user_storage_error(err: UserPersistenceError) -> Error {
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

fn honour_storage_error(err: HonourPersistenceError) -> Error {
    match err {
        HonourPersistenceError::Connection { .. } => {
            warn!(error = %err, "honour storage unavailable");
            Error::service_unavailable("storage is unavailable")
        }
        HonourPersistenceError::Query { .. } => {
            warn!(error = %err, "honour storage failure");
            Error::internal("storage failure")
        }
    }
}
