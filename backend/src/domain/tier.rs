//! Permission tiers and the ordinal authorisation rule.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown permission string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown permission tier: {value}")]
pub struct TierParseError {
    /// The rejected input.
    pub value: String,
}

/// Ordinal permission level.
///
/// Ordering is significant: `User < HonoursCommittee < Admin`. An actor is
/// authorised for an operation iff their tier is at least the required tier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum PermissionTier {
    /// Regular member: may submit nominations.
    User,
    /// Committee member: may review and comment.
    HonoursCommittee,
    /// Administrator: full control.
    Admin,
}

impl PermissionTier {
    /// Wire representation, as stored and exchanged with clients.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::HonoursCommittee => "Honours Committee",
            Self::Admin => "Admin",
        }
    }

    /// Ordinal authorisation check: does this tier satisfy `required`?
    #[must_use]
    pub fn authorises(self, required: Self) -> bool {
        self >= required
    }
}

impl fmt::Display for PermissionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PermissionTier {
    type Err = TierParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "User" => Ok(Self::User),
            "Honours Committee" => Ok(Self::HonoursCommittee),
            "Admin" => Ok(Self::Admin),
            other => Err(TierParseError {
                value: other.to_owned(),
            }),
        }
    }
}

impl From<PermissionTier> for String {
    fn from(value: PermissionTier) -> Self {
        value.as_str().to_owned()
    }
}

impl TryFrom<String> for PermissionTier {
    type Error = TierParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
