//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::honour::Honour;
use crate::domain::nomination::{Description, Nomination};
use crate::domain::review::{CommentText, ReviewComment};
use crate::domain::status::NominationStatus;
use crate::domain::tier::PermissionTier;
use crate::domain::user::{DiscordUsername, RobloxUsername, User, UserId};

use super::schema::{honours, nominations, review_comments, users};

/// Raised when a stored value no longer parses as its domain type.
///
/// Rows only become corrupt through out-of-band writes; surfacing the column
/// keeps the diagnostic actionable without leaking row contents.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("corrupt {column} in stored record: {message}")]
pub(crate) struct CorruptRowError {
    pub column: &'static str,
    pub message: String,
}

impl CorruptRowError {
    fn new(column: &'static str, message: impl Into<String>) -> Self {
        Self {
            column,
            message: message.into(),
        }
    }
}

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub roblox_username: String,
    pub discord_username: String,
    pub password_hash: String,
    pub permission: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = CorruptRowError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let roblox_username = RobloxUsername::new(&row.roblox_username)
            .map_err(|err| CorruptRowError::new("roblox_username", err.to_string()))?;
        let discord_username = DiscordUsername::new(&row.discord_username)
            .map_err(|err| CorruptRowError::new("discord_username", err.to_string()))?;
        let permission = row
            .permission
            .parse::<PermissionTier>()
            .map_err(|err| CorruptRowError::new("permission", err.to_string()))?;
        Ok(Self::new(
            UserId::from_uuid(row.id),
            roblox_username,
            discord_username,
            row.password_hash,
            permission,
            row.created_at,
        ))
    }
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub roblox_username: &'a str,
    pub discord_username: &'a str,
    pub password_hash: &'a str,
    pub permission: &'a str,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a User> for NewUserRow<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            id: *user.id().as_uuid(),
            roblox_username: user.roblox_username().as_ref(),
            discord_username: user.discord_username().as_ref(),
            password_hash: user.password_hash(),
            permission: user.permission().as_str(),
            created_at: user.created_at(),
        }
    }
}

/// Row struct for reading from the nominations table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = nominations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct NominationRow {
    pub id: Uuid,
    pub nominator_id: Uuid,
    pub nominee_roblox_username: String,
    pub fields: Vec<String>,
    pub description: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<NominationRow> for Nomination {
    type Error = CorruptRowError;

    fn try_from(row: NominationRow) -> Result<Self, Self::Error> {
        let nominee_roblox_username = RobloxUsername::new(&row.nominee_roblox_username)
            .map_err(|err| CorruptRowError::new("nominee_roblox_username", err.to_string()))?;
        let fields = row
            .fields
            .iter()
            .map(|raw| raw.parse())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err: crate::domain::field::FieldParseError| {
                CorruptRowError::new("fields", err.to_string())
            })?;
        let description = Description::new(&row.description)
            .map_err(|err| CorruptRowError::new("description", err.to_string()))?;
        let status = row
            .status
            .parse::<NominationStatus>()
            .map_err(|err| CorruptRowError::new("status", err.to_string()))?;
        Ok(Self {
            id: row.id,
            nominator_id: UserId::from_uuid(row.nominator_id),
            nominee_roblox_username,
            fields,
            description,
            status,
            created_at: row.created_at,
        })
    }
}

/// Insertable struct for creating new nomination records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = nominations)]
pub(crate) struct NewNominationRow<'a> {
    pub id: Uuid,
    pub nominator_id: Uuid,
    pub nominee_roblox_username: &'a str,
    pub fields: Vec<String>,
    pub description: &'a str,
    pub status: &'a str,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a Nomination> for NewNominationRow<'a> {
    fn from(nomination: &'a Nomination) -> Self {
        Self {
            id: nomination.id,
            nominator_id: *nomination.nominator_id.as_uuid(),
            nominee_roblox_username: nomination.nominee_roblox_username.as_ref(),
            fields: nomination
                .fields
                .iter()
                .map(|field| field.as_str().to_owned())
                .collect(),
            description: nomination.description.as_ref(),
            status: nomination.status.as_str(),
            created_at: nomination.created_at,
        }
    }
}

/// Row struct for reading from the review_comments table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = review_comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ReviewCommentRow {
    pub id: Uuid,
    pub nomination_id: Uuid,
    pub author_id: Uuid,
    pub author_username: String,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ReviewCommentRow> for ReviewComment {
    type Error = CorruptRowError;

    fn try_from(row: ReviewCommentRow) -> Result<Self, Self::Error> {
        let comment = CommentText::new(&row.comment)
            .map_err(|err| CorruptRowError::new("comment", err.to_string()))?;
        Ok(Self {
            id: row.id,
            nomination_id: row.nomination_id,
            author_id: UserId::from_uuid(row.author_id),
            author_username: row.author_username,
            comment,
            created_at: row.created_at,
        })
    }
}

/// Insertable struct for creating new review comment records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = review_comments)]
pub(crate) struct NewReviewCommentRow<'a> {
    pub id: Uuid,
    pub nomination_id: Uuid,
    pub author_id: Uuid,
    pub author_username: &'a str,
    pub comment: &'a str,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a ReviewComment> for NewReviewCommentRow<'a> {
    fn from(comment: &'a ReviewComment) -> Self {
        Self {
            id: comment.id,
            nomination_id: comment.nomination_id,
            author_id: *comment.author_id.as_uuid(),
            author_username: comment.author_username.as_str(),
            comment: comment.comment.as_ref(),
            created_at: comment.created_at,
        }
    }
}

/// Row struct for reading from the honours table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = honours)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct HonourRow {
    pub id: Uuid,
    pub roblox_username: String,
    pub discord_username: String,
    pub title: String,
    pub field: String,
    pub description: Option<String>,
    pub awarded_at: DateTime<Utc>,
}

impl TryFrom<HonourRow> for Honour {
    type Error = CorruptRowError;

    fn try_from(row: HonourRow) -> Result<Self, Self::Error> {
        let roblox_username = RobloxUsername::new(&row.roblox_username)
            .map_err(|err| CorruptRowError::new("roblox_username", err.to_string()))?;
        let discord_username = DiscordUsername::new(&row.discord_username)
            .map_err(|err| CorruptRowError::new("discord_username", err.to_string()))?;
        let field = row
            .field
            .parse()
            .map_err(|err: crate::domain::field::FieldParseError| {
                CorruptRowError::new("field", err.to_string())
            })?;
        Ok(Self {
            id: row.id,
            roblox_username,
            discord_username,
            title: row.title,
            field,
            description: row.description,
            awarded_at: row.awarded_at,
        })
    }
}

/// Insertable struct for creating new honour records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = honours)]
pub(crate) struct NewHonourRow<'a> {
    pub id: Uuid,
    pub roblox_username: &'a str,
    pub discord_username: &'a str,
    pub title: &'a str,
    pub field: &'a str,
    pub description: Option<&'a str>,
    pub awarded_at: DateTime<Utc>,
}

impl<'a> From<&'a Honour> for NewHonourRow<'a> {
    fn from(honour: &'a Honour) -> Self {
        Self {
            id: honour.id,
            roblox_username: honour.roblox_username.as_ref(),
            discord_username: honour.discord_username.as_ref(),
            title: honour.title.as_str(),
            field: honour.field.as_str(),
            description: honour.description.as_deref(),
            awarded_at: honour.awarded_at,
        }
    }
}
