//! Nomination lifecycle use-cases: submission, status transitions, deletion,
//! and the committee review log.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};
use uuid::Uuid;

use super::error::Error;
use super::nomination::{Nomination, NominationDraft, NominationFilter, NominationWithComments};
use super::ports::{
    NominationCommand, NominationPersistenceError, NominationQuery, NominationRepository,
    ReviewCommand, ReviewCommentPersistenceError, ReviewCommentRepository, ReviewQuery,
    UserPersistenceError, UserRepository,
};
use super::review::{CommentText, ReviewComment};
use super::status::NominationStatus;
use super::tier::PermissionTier;
use super::user::{User, UserId};

/// Which tier may finalise a nomination (move `under_review` to `approved`
/// or `rejected`). Taking a `pending` nomination into review, or rejecting
/// it outright, is always an admin action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FinalisePolicy {
    /// Committee members (and admins) may finalise.
    #[default]
    Committee,
    /// Only admins may finalise.
    AdminOnly,
}

impl FinalisePolicy {
    const fn required_tier(self) -> PermissionTier {
        match self {
            Self::Committee => PermissionTier::HonoursCommittee,
            Self::AdminOnly => PermissionTier::Admin,
        }
    }
}

/// Implements the nomination and review driving ports.
pub struct NominationService {
    nominations: Arc<dyn NominationRepository>,
    reviews: Arc<dyn ReviewCommentRepository>,
    users: Arc<dyn UserRepository>,
    policy: FinalisePolicy,
}

impl NominationService {
    /// Build the service from its driven ports and the finalisation policy.
    #[must_use]
    pub fn new(
        nominations: Arc<dyn NominationRepository>,
        reviews: Arc<dyn ReviewCommentRepository>,
        users: Arc<dyn UserRepository>,
        policy: FinalisePolicy,
    ) -> Self {
        Self {
            nominations,
            reviews,
            users,
            policy,
        }
    }

    async fn load_actor(&self, actor: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(actor)
            .await
            .map_err(user_storage_error)?
            .ok_or_else(|| Error::unauthorized("session does not match a registered user"))
    }

    /// Tier required to take the `from -> to` edge, or `None` for an edge
    /// the workflow does not allow.
    fn edge_tier(&self, from: NominationStatus, to: NominationStatus) -> Option<PermissionTier> {
        use NominationStatus::{Pending, Rejected, UnderReview};
        match (from, to) {
            (Pending, UnderReview) | (Pending, Rejected) => Some(PermissionTier::Admin),
            (UnderReview, NominationStatus::Approved) | (UnderReview, Rejected) => {
                Some(self.policy.required_tier())
            }
            _ => None,
        }
    }

    /// Tier that would have been required to reach `status` from its
    /// predecessor; used for idempotent re-requests of the current status.
    fn arrival_tier(&self, status: NominationStatus) -> Option<PermissionTier> {
        match status {
            // Nothing transitions back to pending.
            NominationStatus::Pending => None,
            NominationStatus::UnderReview => Some(PermissionTier::Admin),
            NominationStatus::Approved | NominationStatus::Rejected => {
                Some(self.policy.required_tier())
            }
        }
    }
}

#[async_trait]
impl NominationCommand for NominationService {
    async fn submit(
        &self,
        nominator: &UserId,
        draft: NominationDraft,
    ) -> Result<Nomination, Error> {
        let actor = self.load_actor(nominator).await?;
        let nomination = Nomination::from_draft(*actor.id(), draft);
        self.nominations
            .insert(&nomination)
            .await
            .map_err(nomination_storage_error)?;
        info!(nomination_id = %nomination.id, nominator = %actor.id(), "nomination submitted");
        Ok(nomination)
    }

    async fn transition(
        &self,
        actor: &UserId,
        nomination_id: Uuid,
        target: NominationStatus,
    ) -> Result<Nomination, Error> {
        let actor = self.load_actor(actor).await?;
        // Existence first, then the coarse gate: a nomination that is
        // missing reads as 404 even to unprivileged callers, while an
        // existing one reads as 403 before any edge detail leaks.
        let nomination = self
            .nominations
            .find_by_id(nomination_id)
            .await
            .map_err(nomination_storage_error)?
            .ok_or_else(|| Error::not_found("nomination not found"))?;
        if !actor.permission().authorises(PermissionTier::HonoursCommittee) {
            return Err(Error::forbidden("insufficient permission"));
        }
        if target == nomination.status {
            // Repeating an already-applied transition is a no-op, but only
            // for callers who could have applied it in the first place.
            let Some(required) = self.arrival_tier(target) else {
                return Err(invalid_transition(nomination.status, target));
            };
            if !actor.permission().authorises(required) {
                return Err(Error::forbidden("insufficient permission"));
            }
            return Ok(nomination);
        }
        let Some(required) = self.edge_tier(nomination.status, target) else {
            return Err(invalid_transition(nomination.status, target));
        };
        if !actor.permission().authorises(required) {
            return Err(Error::forbidden("insufficient permission"));
        }
        let updated = self
            .nominations
            .update_status(nomination_id, target)
            .await
            .map_err(nomination_storage_error)?
            .ok_or_else(|| Error::not_found("nomination not found"))?;
        info!(
            nomination_id = %nomination_id,
            from = %nomination.status,
            to = %target,
            actor = %actor.id(),
            "nomination status changed"
        );
        Ok(updated)
    }

    async fn delete(&self, actor: &UserId, nomination_id: Uuid) -> Result<(), Error> {
        let actor = self.load_actor(actor).await?;
        if !actor.permission().authorises(PermissionTier::Admin) {
            return Err(Error::forbidden("insufficient permission"));
        }
        let removed = self
            .nominations
            .delete(nomination_id)
            .await
            .map_err(nomination_storage_error)?;
        if !removed {
            return Err(Error::not_found("nomination not found"));
        }
        info!(nomination_id = %nomination_id, actor = %actor.id(), "nomination deleted");
        Ok(())
    }
}

#[async_trait]
impl NominationQuery for NominationService {
    async fn list(&self, filter: NominationFilter) -> Result<Vec<Nomination>, Error> {
        self.nominations
            .list(filter)
            .await
            .map_err(nomination_storage_error)
    }

    async fn under_review(&self, actor: &UserId) -> Result<Vec<NominationWithComments>, Error> {
        let actor = self.load_actor(actor).await?;
        if !actor.permission().authorises(PermissionTier::HonoursCommittee) {
            return Err(Error::forbidden("insufficient permission"));
        }
        let filter = NominationFilter {
            status: Some(NominationStatus::UnderReview),
            field: None,
        };
        let nominations = self
            .nominations
            .list(filter)
            .await
            .map_err(nomination_storage_error)?;
        let mut bundled = Vec::with_capacity(nominations.len());
        for nomination in nominations {
            let comments = self
                .reviews
                .list_for_nomination(nomination.id)
                .await
                .map_err(review_storage_error)?;
            bundled.push(NominationWithComments {
                nomination,
                comments,
            });
        }
        Ok(bundled)
    }
}

#[async_trait]
impl ReviewCommand for NominationService {
    async fn add_comment(
        &self,
        actor: &UserId,
        nomination_id: Uuid,
        comment: CommentText,
    ) -> Result<ReviewComment, Error> {
        let actor = self.load_actor(actor).await?;
        if !actor.permission().authorises(PermissionTier::HonoursCommittee) {
            return Err(Error::forbidden("insufficient permission"));
        }
        self.nominations
            .find_by_id(nomination_id)
            .await
            .map_err(nomination_storage_error)?
            .ok_or_else(|| Error::not_found("nomination not found"))?;
        let record = ReviewComment {
            id: Uuid::new_v4(),
            nomination_id,
            author_id: *actor.id(),
            author_username: actor.roblox_username().as_ref().to_owned(),
            comment,
            created_at: chrono::Utc::now(),
        };
        self.reviews
            .insert(&record)
            .await
            .map_err(review_storage_error)?;
        info!(nomination_id = %nomination_id, author = %actor.id(), "review comment added");
        Ok(record)
    }
}

#[async_trait]
impl ReviewQuery for NominationService {
    async fn comments_for(&self, nomination_id: Uuid) -> Result<Vec<ReviewComment>, Error> {
        self.reviews
            .list_for_nomination(nomination_id)
            .await
            .map_err(review_storage_error)
    }
}

fn invalid_transition(from: NominationStatus, to: NominationStatus) -> Error {
    Error::invalid_request(format!("cannot transition from {from} to {to}"))
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

fn nomination_storage_error(err: NominationPersistenceError) -> Error {
    match err {
        NominationPersistenceError::Connection { .. } => {
            warn!(error = %err, "nomination storage unavailable");
            Error::service_unavailable("storage is unavailable")
        }
        NominationPersistenceError::Query { .. } => {
            warn!(error = %err, "nomination storage failure");
            Error::internal("storage failure")
        }
    }
}

fn review_storage_error(err: ReviewCommentPersistenceError) -> Error {
    match err {
        ReviewCommentPersistenceError::Connection { .. } => {
            warn!(error = %err, "review storage unavailable");
            Error::service_unavailable("storage is unavailable")
        }
        ReviewCommentPersistenceError::Query { .. } => {
            warn!(error = %err, "review storage failure");
            Error::internal("storage failure")
        }
    }
}
