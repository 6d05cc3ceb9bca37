//! Driving port for nomination lifecycle mutations.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::error::Error;
use crate::domain::nomination::{Nomination, NominationDraft};
use crate::domain::status::NominationStatus;
use crate::domain::user::UserId;

/// Domain use-case port for submitting and disposing of nominations.
#[async_trait]
pub trait NominationCommand: Send + Sync {
    /// Submit a new nomination. The initial status is always `pending`.
    async fn submit(
        &self,
        nominator: &UserId,
        draft: NominationDraft,
    ) -> Result<Nomination, Error>;

    /// Request a status transition.
    ///
    /// Permission failures never mutate state; re-requesting a transition
    /// the nomination has already taken is an idempotent no-op.
    async fn transition(
        &self,
        actor: &UserId,
        nomination_id: Uuid,
        target: NominationStatus,
    ) -> Result<Nomination, Error>;

    /// Delete a nomination. Requires an `Admin` actor.
    async fn delete(&self, actor: &UserId, nomination_id: Uuid) -> Result<(), Error>;
}
