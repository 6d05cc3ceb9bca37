//! Nomination lifecycle statuses.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown status string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown nomination status: {value}")]
pub struct StatusParseError {
    /// The rejected input.
    pub value: String,
}

/// Lifecycle state of a nomination.
///
/// The committee workflow is one-directional: `pending` moves to
/// `under_review` or `rejected`, and `under_review` moves to `approved` or
/// `rejected`. Transition legality lives in the nomination service; this type
/// only closes the value set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum NominationStatus {
    /// Awaiting admin triage.
    Pending,
    /// Picked up for committee review.
    UnderReview,
    /// Finalised favourably.
    Approved,
    /// Finalised unfavourably.
    Rejected,
}

impl NominationStatus {
    /// Wire representation, as stored and exchanged with clients.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::UnderReview => "under_review",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for NominationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NominationStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "under_review" => Ok(Self::UnderReview),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(StatusParseError {
                value: other.to_owned(),
            }),
        }
    }
}

impl From<NominationStatus> for String {
    fn from(value: NominationStatus) -> Self {
        value.as_str().to_owned()
    }
}

impl TryFrom<String> for NominationStatus {
    type Error = StatusParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("pending", NominationStatus::Pending)]
    #[case("under_review", NominationStatus::UnderReview)]
    #[case("approved", NominationStatus::Approved)]
    #[case("rejected", NominationStatus::Rejected)]
    fn parses_wire_strings(#[case] input: &str, #[case] expected: NominationStatus) {
        assert_eq!(input.parse::<NominationStatus>(), Ok(expected));
        assert_eq!(expected.as_str(), input);
    }

    #[test]
    fn rejects_unknown_status() {
        assert!("archived".parse::<NominationStatus>().is_err());
    }
}
