//! Response DTOs shared across HTTP handler modules.
//!
//! These are the wire shapes; domain entities never serialise directly.
//! Notably [`UserResponse`] omits the password hash and carries the derived
//! `isAdmin` flag clients expect.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::field::RecognitionField;
use crate::domain::honour::Honour;
use crate::domain::nomination::{Nomination, NominationWithComments};
use crate::domain::review::ReviewComment;
use crate::domain::status::NominationStatus;
use crate::domain::tier::PermissionTier;
use crate::domain::user::User;

/// Public view of a registered account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// Stable identifier.
    pub id: Uuid,
    /// Unique Roblox handle.
    pub roblox_username: String,
    /// Discord handle.
    pub discord_username: String,
    /// Permission tier wire string.
    #[schema(value_type = String, example = "Honours Committee")]
    pub permission: PermissionTier,
    /// Derived from the tier; kept on the wire for client compatibility.
    pub is_admin: bool,
    /// Account creation time.
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: *user.id().as_uuid(),
            roblox_username: user.roblox_username().as_ref().to_owned(),
            discord_username: user.discord_username().as_ref().to_owned(),
            permission: user.permission(),
            is_admin: user.is_admin(),
            created_at: user.created_at(),
        }
    }
}

/// Public view of a nomination.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NominationResponse {
    /// Stable identifier.
    pub id: Uuid,
    /// Submitting user's identifier.
    pub nominator_id: Uuid,
    /// Nominee's Roblox handle.
    pub nominee_roblox_username: String,
    /// Fields of recognition, order preserved from submission.
    #[schema(value_type = Vec<String>, example = json!(["Military"]))]
    pub fields: Vec<RecognitionField>,
    /// Why the nominee deserves recognition.
    pub description: String,
    /// Lifecycle state wire string.
    #[schema(value_type = String, example = "under_review")]
    pub status: NominationStatus,
    /// Submission time.
    pub created_at: DateTime<Utc>,
}

impl From<Nomination> for NominationResponse {
    fn from(nomination: Nomination) -> Self {
        Self {
            id: nomination.id,
            nominator_id: *nomination.nominator_id.as_uuid(),
            nominee_roblox_username: nomination.nominee_roblox_username.as_ref().to_owned(),
            fields: nomination.fields,
            description: nomination.description.into(),
            status: nomination.status,
            created_at: nomination.created_at,
        }
    }
}

/// Public view of a review comment.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    /// Stable identifier.
    pub id: Uuid,
    /// Owning nomination.
    pub nomination_id: Uuid,
    /// Authoring committee member's identifier.
    pub author_id: Uuid,
    /// Author's Roblox handle at write time.
    pub author_username: String,
    /// Comment body.
    pub comment: String,
    /// Append time.
    pub created_at: DateTime<Utc>,
}

impl From<ReviewComment> for CommentResponse {
    fn from(comment: ReviewComment) -> Self {
        Self {
            id: comment.id,
            nomination_id: comment.nomination_id,
            author_id: *comment.author_id.as_uuid(),
            author_username: comment.author_username,
            comment: comment.comment.into(),
            created_at: comment.created_at,
        }
    }
}

/// A nomination with its comments, as served to the review queue.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NominationWithCommentsResponse {
    /// The nomination itself.
    #[serde(flatten)]
    pub nomination: NominationResponse,
    /// Attached comments, oldest first.
    pub comments: Vec<CommentResponse>,
}

impl From<NominationWithComments> for NominationWithCommentsResponse {
    fn from(bundle: NominationWithComments) -> Self {
        Self {
            nomination: bundle.nomination.into(),
            comments: bundle.comments.into_iter().map(Into::into).collect(),
        }
    }
}

/// Public view of an awarded honour.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HonourResponse {
    /// Stable identifier.
    pub id: Uuid,
    /// Recipient Roblox handle.
    pub roblox_username: String,
    /// Recipient Discord handle.
    pub discord_username: String,
    /// Display title.
    pub title: String,
    /// Recognition field wire string.
    #[schema(value_type = String, example = "Diplomatic")]
    pub field: RecognitionField,
    /// Optional citation text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Award time.
    pub awarded_at: DateTime<Utc>,
}

impl From<Honour> for HonourResponse {
    fn from(honour: Honour) -> Self {
        Self {
            id: honour.id,
            roblox_username: honour.roblox_username.into(),
            discord_username: honour.discord_username.into(),
            title: honour.title,
            field: honour.field,
            description: honour.description,
            awarded_at: honour.awarded_at,
        }
    }
}
