//! User identity and handle newtypes.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::tier::PermissionTier;

/// Validation errors for user handles.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HandleValidationError {
    /// Roblox username was empty, too short/long, or contained invalid characters.
    #[error("Roblox username must be 3-20 characters of letters, digits, or underscores")]
    InvalidRobloxUsername,
    /// Discord username matched neither the `@name` nor the `name#1234` format.
    #[error("Discord username must be @name or name#1234")]
    InvalidDiscordUsername,
}

/// Stable user identifier backed by a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Roblox username: 3-20 characters, letters/digits/underscore only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RobloxUsername(String);

impl RobloxUsername {
    /// Validate and construct from raw input. Surrounding whitespace is trimmed.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, HandleValidationError> {
        let trimmed = raw.as_ref().trim();
        let len = trimmed.chars().count();
        let valid_chars = trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if (3..=20).contains(&len) && valid_chars {
            Ok(Self(trimmed.to_owned()))
        } else {
            Err(HandleValidationError::InvalidRobloxUsername)
        }
    }
}

impl AsRef<str> for RobloxUsername {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for RobloxUsername {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<RobloxUsername> for String {
    fn from(value: RobloxUsername) -> Self {
        value.0
    }
}

/// Discord username: either the current `@name` format (1-32 of
/// `a-z 0-9 . _`, case-insensitive) or the legacy `name#1234` format.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DiscordUsername(String);

impl DiscordUsername {
    /// Validate and construct from raw input. Surrounding whitespace is trimmed.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, HandleValidationError> {
        let trimmed = raw.as_ref().trim();
        if Self::is_new_format(trimmed) || Self::is_legacy_format(trimmed) {
            Ok(Self(trimmed.to_owned()))
        } else {
            Err(HandleValidationError::InvalidDiscordUsername)
        }
    }

    fn is_new_format(s: &str) -> bool {
        let Some(name) = s.strip_prefix('@') else {
            return false;
        };
        let len = name.chars().count();
        (1..=32).contains(&len)
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_')
    }

    fn is_legacy_format(s: &str) -> bool {
        let Some((name, discriminator)) = s.rsplit_once('#') else {
            return false;
        };
        let name_len = name.chars().count();
        (1..=32).contains(&name_len)
            && discriminator.len() == 4
            && discriminator.chars().all(|c| c.is_ascii_digit())
    }
}

impl AsRef<str> for DiscordUsername {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DiscordUsername {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<DiscordUsername> for String {
    fn from(value: DiscordUsername) -> Self {
        value.0
    }
}

/// A registered account.
///
/// The password hash is an opaque PHC string produced by the hasher port and
/// is never serialised; inbound adapters build response DTOs that omit it.
/// There is no stored admin flag: [`User::is_admin`] derives from the tier.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: UserId,
    roblox_username: RobloxUsername,
    discord_username: DiscordUsername,
    password_hash: String,
    permission: PermissionTier,
    created_at: DateTime<Utc>,
}

impl User {
    /// Assemble a user from validated components.
    #[must_use]
    pub const fn new(
        id: UserId,
        roblox_username: RobloxUsername,
        discord_username: DiscordUsername,
        password_hash: String,
        permission: PermissionTier,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            roblox_username,
            discord_username,
            password_hash,
            permission,
            created_at,
        }
    }

    /// Stable identifier.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Unique Roblox handle used for login.
    #[must_use]
    pub const fn roblox_username(&self) -> &RobloxUsername {
        &self.roblox_username
    }

    /// Secondary Discord handle.
    #[must_use]
    pub const fn discord_username(&self) -> &DiscordUsername {
        &self.discord_username
    }

    /// Opaque credential hash; only the hasher port interprets it.
    #[must_use]
    pub fn password_hash(&self) -> &str {
        self.password_hash.as_str()
    }

    /// Current permission tier.
    #[must_use]
    pub const fn permission(&self) -> PermissionTier {
        self.permission
    }

    /// Derived admin flag; kept on the wire for client compatibility.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.permission == PermissionTier::Admin
    }

    /// Account creation time.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Copy of this user with a different tier.
    #[must_use]
    pub fn with_permission(mut self, permission: PermissionTier) -> Self {
        self.permission = permission;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("builder_ben", true)]
    #[case("Ab1", true)]
    #[case("twenty_characters_xx", true)]
    #[case("ab", false)]
    #[case("name with spaces", false)]
    #[case("far_too_long_for_roblox_rules", false)]
    #[case("bad-dash", false)]
    #[case("", false)]
    fn roblox_username_validation(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(RobloxUsername::new(input).is_ok(), ok, "input: {input:?}");
    }

    #[rstest]
    #[case("@builder.ben", true)]
    #[case("@b", true)]
    #[case("legacy#1234", true)]
    #[case("builderben", false)]
    #[case("@", false)]
    #[case("legacy#12", false)]
    #[case("legacy#12a4", false)]
    fn discord_username_validation(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(DiscordUsername::new(input).is_ok(), ok, "input: {input:?}");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let handle = RobloxUsername::new("  builder_ben  ").expect("valid handle");
        assert_eq!(handle.as_ref(), "builder_ben");
    }

    #[test]
    fn admin_flag_derives_from_tier() {
        let user = User::new(
            UserId::random(),
            RobloxUsername::new("builder_ben").expect("handle"),
            DiscordUsername::new("@builder.ben").expect("handle"),
            "$argon2id$stub".to_owned(),
            PermissionTier::User,
            Utc::now(),
        );
        assert!(!user.is_admin());
        assert!(user.clone().with_permission(PermissionTier::Admin).is_admin());
    }
}
