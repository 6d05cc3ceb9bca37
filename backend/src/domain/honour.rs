//! Awarded honours: the public, append-only archive.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::field::RecognitionField;
use super::user::{DiscordUsername, HandleValidationError, RobloxUsername};

/// Maximum title length in characters.
pub const TITLE_MAX: usize = 128;

/// Validation errors for honour awards.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HonourValidationError {
    /// A recipient handle failed format validation.
    #[error(transparent)]
    Handle(#[from] HandleValidationError),
    /// The title was blank once trimmed.
    #[error("title must not be empty")]
    EmptyTitle,
    /// The title exceeded [`TITLE_MAX`] characters.
    #[error("title must be at most {TITLE_MAX} characters")]
    TitleTooLong,
}

/// A validated award, before identity and timestamp are assigned.
///
/// Recipient handles are denormalised strings; they are format-checked but
/// deliberately not required to reference a registered user.
#[derive(Debug, Clone, PartialEq)]
pub struct AwardDraft {
    roblox_username: RobloxUsername,
    discord_username: DiscordUsername,
    title: String,
    field: RecognitionField,
    description: Option<String>,
}

impl AwardDraft {
    /// Validate raw award parts.
    pub fn try_from_parts(
        roblox_username: &str,
        discord_username: &str,
        title: &str,
        field: RecognitionField,
        description: Option<&str>,
    ) -> Result<Self, HonourValidationError> {
        let roblox_username = RobloxUsername::new(roblox_username)?;
        let discord_username = DiscordUsername::new(discord_username)?;
        let title = title.trim();
        if title.is_empty() {
            return Err(HonourValidationError::EmptyTitle);
        }
        if title.chars().count() > TITLE_MAX {
            return Err(HonourValidationError::TitleTooLong);
        }
        let description = description
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(ToOwned::to_owned);
        Ok(Self {
            roblox_username,
            discord_username,
            title: title.to_owned(),
            field,
            description,
        })
    }
}

/// A finalised award record. Never mutated or deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct Honour {
    /// Stable identifier.
    pub id: Uuid,
    /// Recipient Roblox handle (weak reference, matched by string).
    pub roblox_username: RobloxUsername,
    /// Recipient Discord handle.
    pub discord_username: DiscordUsername,
    /// Display title, e.g. "Military Cross".
    pub title: String,
    /// The single recognition field this honour belongs to.
    pub field: RecognitionField,
    /// Optional citation text.
    pub description: Option<String>,
    /// Award time.
    pub awarded_at: DateTime<Utc>,
}

impl Honour {
    /// Materialise a draft as an awarded honour stamped with the current time.
    #[must_use]
    pub fn from_draft(draft: AwardDraft) -> Self {
        let AwardDraft {
            roblox_username,
            discord_username,
            title,
            field,
            description,
        } = draft;
        Self {
            id: Uuid::new_v4(),
            roblox_username,
            discord_username,
            title,
            field,
            description,
            awarded_at: Utc::now(),
        }
    }

    /// Conventional title for a recognition field, used by clients as a
    /// default when drafting awards.
    #[must_use]
    pub const fn default_title_for(field: RecognitionField) -> &'static str {
        match field {
            RecognitionField::ParliamentaryAndPublicService => "Order of Project Britannia",
            RecognitionField::Military => "Military Cross",
            RecognitionField::Diplomatic => "Diplomatic Service Order",
            RecognitionField::PrivateSector => "Order of Merit",
        }
    }
}

/// Optional filters for the public honours archive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HonourFilter {
    /// Case-insensitive substring matched against either recipient handle.
    pub search: Option<String>,
    /// Restrict to a single recognition field.
    pub field: Option<RecognitionField>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parts(title: &str, description: Option<&str>) -> Result<AwardDraft, HonourValidationError> {
        AwardDraft::try_from_parts(
            "decorated_dan",
            "@decorated.dan",
            title,
            RecognitionField::Military,
            description,
        )
    }

    #[rstest]
    #[case("", HonourValidationError::EmptyTitle)]
    #[case("   ", HonourValidationError::EmptyTitle)]
    fn blank_titles_are_rejected(#[case] title: &str, #[case] expected: HonourValidationError) {
        assert_eq!(parts(title, None).expect_err("must fail"), expected);
    }

    #[test]
    fn blank_description_collapses_to_none() {
        let honour = Honour::from_draft(parts("Military Cross", Some("  ")).expect("valid draft"));
        assert_eq!(honour.description, None);
    }

    #[test]
    fn default_titles_cover_every_field() {
        for field in RecognitionField::ALL {
            assert!(!Honour::default_title_for(field).is_empty());
        }
    }
}
