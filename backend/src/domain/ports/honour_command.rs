//! Driving port for awarding honours.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::honour::{AwardDraft, Honour};
use crate::domain::user::UserId;

/// Domain use-case port for appending to the honours ledger.
#[async_trait]
pub trait HonourCommand: Send + Sync {
    /// Record an awarded honour. Requires an `Admin` actor. Deliberately
    /// not linked to any nomination; awards are a separate manual action.
    async fn award(&self, actor: &UserId, draft: AwardDraft) -> Result<Honour, Error>;
}
