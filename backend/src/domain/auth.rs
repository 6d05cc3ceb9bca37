//! Authentication primitives: login credentials and registration requests.
//!
//! Inbound payloads are validated here, before a handler talks to a port or
//! service. Password material is held in [`Zeroizing`] buffers so it is wiped
//! when the request goes out of scope.

use std::fmt;

use zeroize::Zeroizing;

use super::user::{DiscordUsername, HandleValidationError, RobloxUsername};

/// Validation errors for authentication payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthValidationError {
    /// Username was missing or blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
    /// Handle failed format validation during registration.
    #[error(transparent)]
    Handle(#[from] HandleValidationError),
}

/// Validated login credentials.
///
/// ## Invariants
/// - `username` is trimmed and non-empty. Login deliberately accepts any
///   non-empty string rather than enforcing the Roblox format, so stale
///   accounts with historic handles can still sign in.
/// - `password` is non-empty and retains caller-provided whitespace.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, AuthValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(AuthValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(AuthValidationError::EmptyPassword);
        }
        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username string suitable for account lookup.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Validated registration request.
#[derive(Clone)]
pub struct RegistrationRequest {
    roblox_username: RobloxUsername,
    discord_username: DiscordUsername,
    password: Zeroizing<String>,
}

impl RegistrationRequest {
    /// Construct a request from raw inputs, validating both handle formats.
    pub fn try_from_parts(
        roblox_username: &str,
        discord_username: &str,
        password: &str,
    ) -> Result<Self, AuthValidationError> {
        let roblox_username = RobloxUsername::new(roblox_username)?;
        let discord_username = DiscordUsername::new(discord_username)?;
        if password.is_empty() {
            return Err(AuthValidationError::EmptyPassword);
        }
        Ok(Self {
            roblox_username,
            discord_username,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Validated Roblox handle.
    #[must_use]
    pub const fn roblox_username(&self) -> &RobloxUsername {
        &self.roblox_username
    }

    /// Validated Discord handle.
    #[must_use]
    pub const fn discord_username(&self) -> &DiscordUsername {
        &self.discord_username
    }

    /// The plaintext password to be hashed by the hasher port.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for RegistrationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationRequest")
            .field("roblox_username", &self.roblox_username)
            .field("discord_username", &self.discord_username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", AuthValidationError::EmptyUsername)]
    #[case("   ", "pw", AuthValidationError::EmptyUsername)]
    #[case("builder_ben", "", AuthValidationError::EmptyPassword)]
    fn login_rejects_blank_inputs(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: AuthValidationError,
    ) {
        let err =
            LoginCredentials::try_from_parts(username, password).expect_err("must be rejected");
        assert_eq!(err, expected);
    }

    #[test]
    fn login_trims_username_but_not_password() {
        let creds = LoginCredentials::try_from_parts("  builder_ben ", " hunter2 ")
            .expect("valid credentials");
        assert_eq!(creds.username(), "builder_ben");
        assert_eq!(creds.password(), " hunter2 ");
    }

    #[rstest]
    #[case("xx", "@ok.handle", "pw")]
    #[case("builder_ben", "not-discord", "pw")]
    #[case("builder_ben", "@ok.handle", "")]
    fn registration_rejects_invalid_parts(
        #[case] roblox: &str,
        #[case] discord: &str,
        #[case] password: &str,
    ) {
        assert!(RegistrationRequest::try_from_parts(roblox, discord, password).is_err());
    }

    #[test]
    fn registration_accepts_both_discord_formats() {
        for discord in ["@builder.ben", "builderben#0042"] {
            let req = RegistrationRequest::try_from_parts("builder_ben", discord, "hunter2")
                .expect("valid request");
            assert_eq!(req.discord_username().as_ref(), discord);
        }
    }

    #[test]
    fn debug_output_redacts_passwords() {
        let creds =
            LoginCredentials::try_from_parts("builder_ben", "hunter2").expect("credentials");
        let rendered = format!("{creds:?}");
        assert!(!rendered.contains("hunter2"));
    }
}
