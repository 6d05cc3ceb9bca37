//! Nomination aggregate: drafts, entities, and list filters.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::field::RecognitionField;
use super::review::ReviewComment;
use super::status::NominationStatus;
use super::user::{HandleValidationError, RobloxUsername, UserId};

/// Maximum description length in characters.
pub const DESCRIPTION_MAX: usize = 500;

/// Validation errors for nomination submissions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NominationValidationError {
    /// The nominee handle failed format validation.
    #[error(transparent)]
    Nominee(#[from] HandleValidationError),
    /// The fields-of-recognition set was empty.
    #[error("at least one field of recognition is required")]
    EmptyFields,
    /// The description was blank once trimmed.
    #[error("description must not be empty")]
    EmptyDescription,
    /// The description exceeded [`DESCRIPTION_MAX`] characters.
    #[error("description must be at most {DESCRIPTION_MAX} characters")]
    DescriptionTooLong,
}

/// Free-text description, trimmed, non-empty, at most [`DESCRIPTION_MAX`] chars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description(String);

impl Description {
    /// Validate and construct from raw input.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, NominationValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(NominationValidationError::EmptyDescription);
        }
        if trimmed.chars().count() > DESCRIPTION_MAX {
            return Err(NominationValidationError::DescriptionTooLong);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Description {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Description> for String {
    fn from(value: Description) -> Self {
        value.0
    }
}

/// A validated submission, before identity and timestamps are assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct NominationDraft {
    nominee_roblox_username: RobloxUsername,
    fields: Vec<RecognitionField>,
    description: Description,
}

impl NominationDraft {
    /// Validate raw submission parts.
    ///
    /// The nominee handle is format-checked but not required to resolve to a
    /// registered user. Duplicate fields are collapsed, preserving order.
    pub fn try_from_parts(
        nominee_roblox_username: &str,
        fields: Vec<RecognitionField>,
        description: &str,
    ) -> Result<Self, NominationValidationError> {
        let nominee_roblox_username = RobloxUsername::new(nominee_roblox_username)?;
        let mut deduped: Vec<RecognitionField> = Vec::with_capacity(fields.len());
        for field in fields {
            if !deduped.contains(&field) {
                deduped.push(field);
            }
        }
        if deduped.is_empty() {
            return Err(NominationValidationError::EmptyFields);
        }
        let description = Description::new(description)?;
        Ok(Self {
            nominee_roblox_username,
            fields: deduped,
            description,
        })
    }

    /// Nominee handle.
    #[must_use]
    pub const fn nominee_roblox_username(&self) -> &RobloxUsername {
        &self.nominee_roblox_username
    }

    /// Non-empty, de-duplicated field set.
    #[must_use]
    pub fn fields(&self) -> &[RecognitionField] {
        &self.fields
    }

    /// Validated description.
    #[must_use]
    pub const fn description(&self) -> &Description {
        &self.description
    }
}

/// A stored nomination.
#[derive(Debug, Clone, PartialEq)]
pub struct Nomination {
    /// Stable identifier.
    pub id: Uuid,
    /// The submitting user.
    pub nominator_id: UserId,
    /// Who the honour is proposed for; not necessarily a registered user.
    pub nominee_roblox_username: RobloxUsername,
    /// Non-empty set of recognition fields.
    pub fields: Vec<RecognitionField>,
    /// Why the nominee deserves recognition.
    pub description: Description,
    /// Current lifecycle state.
    pub status: NominationStatus,
    /// Submission time.
    pub created_at: DateTime<Utc>,
}

impl Nomination {
    /// Materialise a draft as a fresh `pending` nomination.
    #[must_use]
    pub fn from_draft(nominator_id: UserId, draft: NominationDraft) -> Self {
        let NominationDraft {
            nominee_roblox_username,
            fields,
            description,
        } = draft;
        Self {
            id: Uuid::new_v4(),
            nominator_id,
            nominee_roblox_username,
            fields,
            description,
            status: NominationStatus::Pending,
            created_at: Utc::now(),
        }
    }
}

/// A nomination bundled with its review comments, oldest comment first.
#[derive(Debug, Clone, PartialEq)]
pub struct NominationWithComments {
    /// The nomination itself.
    pub nomination: Nomination,
    /// Attached committee comments.
    pub comments: Vec<ReviewComment>,
}

/// Optional filters for the public nomination listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NominationFilter {
    /// Restrict to a single status.
    pub status: Option<NominationStatus>,
    /// Restrict to nominations whose field set contains this field.
    pub field: Option<RecognitionField>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn draft(
        fields: Vec<RecognitionField>,
        description: &str,
    ) -> Result<NominationDraft, NominationValidationError> {
        NominationDraft::try_from_parts("nominee_nick", fields, description)
    }

    #[test]
    fn empty_fields_are_rejected() {
        assert_eq!(
            draft(vec![], "did well").expect_err("must fail"),
            NominationValidationError::EmptyFields
        );
    }

    #[rstest]
    #[case("", NominationValidationError::EmptyDescription)]
    #[case("   ", NominationValidationError::EmptyDescription)]
    fn blank_descriptions_are_rejected(
        #[case] description: &str,
        #[case] expected: NominationValidationError,
    ) {
        assert_eq!(
            draft(vec![RecognitionField::Military], description).expect_err("must fail"),
            expected
        );
    }

    #[test]
    fn overlong_description_is_rejected() {
        let long = "x".repeat(DESCRIPTION_MAX + 1);
        assert_eq!(
            draft(vec![RecognitionField::Military], &long).expect_err("must fail"),
            NominationValidationError::DescriptionTooLong
        );
        let exact = "x".repeat(DESCRIPTION_MAX);
        assert!(draft(vec![RecognitionField::Military], &exact).is_ok());
    }

    #[test]
    fn duplicate_fields_collapse_preserving_order() {
        let d = draft(
            vec![
                RecognitionField::Military,
                RecognitionField::Diplomatic,
                RecognitionField::Military,
            ],
            "did well",
        )
        .expect("valid draft");
        assert_eq!(
            d.fields(),
            &[RecognitionField::Military, RecognitionField::Diplomatic]
        );
    }

    #[test]
    fn fresh_nominations_start_pending() {
        let d = draft(vec![RecognitionField::Military], "did well").expect("valid draft");
        let nomination = Nomination::from_draft(UserId::random(), d);
        assert_eq!(nomination.status, NominationStatus::Pending);
        assert_eq!(nomination.description.as_ref(), "did well");
    }
}
