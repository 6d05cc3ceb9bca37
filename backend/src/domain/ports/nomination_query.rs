//! Driving port for nomination reads.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::nomination::{Nomination, NominationFilter, NominationWithComments};
use crate::domain::user::UserId;

/// Domain use-case port for listing nominations.
#[async_trait]
pub trait NominationQuery: Send + Sync {
    /// Public listing, newest first, optionally filtered by status/field.
    async fn list(&self, filter: NominationFilter) -> Result<Vec<Nomination>, Error>;

    /// Nominations currently under review, with their comments attached.
    /// Requires a `HonoursCommittee` (or higher) actor.
    async fn under_review(&self, actor: &UserId) -> Result<Vec<NominationWithComments>, Error>;
}
