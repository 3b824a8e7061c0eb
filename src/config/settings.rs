//! Application settings record.
//!
//! A [`Settings`] value is built once by the
//! [`SettingsLoader`](super::SettingsLoader) and never changes afterwards.
//! Components receive it by reference (or behind an `Arc`) instead of
//! reaching for a global.

use std::borrow::Cow;
use std::str::FromStr;

use chrono::Duration;
use jsonwebtoken::Algorithm;
use serde::{Serialize, Serializer};
use validator::{Validate, ValidationError};

use super::constants::{
    DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES, DEFAULT_DATABASE_URL, DEFAULT_JWT_ALGORITHM,
    DEFAULT_PROJECT_NAME, INSECURE_JWT_SECRET_KEY, MAX_ACCESS_TOKEN_EXPIRE_MINUTES, REDACTED,
    SECONDS_PER_MINUTE,
};
use crate::errors::{ConfigError, ConfigResult};

/// Resolved, read-only application configuration
#[derive(Clone, PartialEq, Eq, Serialize, Validate)]
pub struct Settings {
    #[validate(length(min = 1, message = "Project name is required"))]
    project_name: String,

    #[validate(url(message = "Database URL must be a valid URI"))]
    database_url: String,

    #[serde(serialize_with = "serialize_redacted")]
    #[validate(length(min = 1, message = "JWT secret key is required"))]
    jwt_secret_key: String,

    #[validate(custom(function = "validate_jwt_algorithm"))]
    jwt_algorithm: String,

    #[validate(range(
        min = 1,
        max = MAX_ACCESS_TOKEN_EXPIRE_MINUTES,
        message = "Token expiry must be between 1 and 525600 minutes"
    ))]
    access_token_expire_minutes: i64,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("project_name", &self.project_name)
            .field("database_url", &self.database_url)
            .field("jwt_secret_key", &REDACTED)
            .field("jwt_algorithm", &self.jwt_algorithm)
            .field(
                "access_token_expire_minutes",
                &self.access_token_expire_minutes,
            )
            .finish()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            project_name: DEFAULT_PROJECT_NAME.to_string(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            jwt_secret_key: INSECURE_JWT_SECRET_KEY.to_string(),
            jwt_algorithm: DEFAULT_JWT_ALGORITHM.to_string(),
            access_token_expire_minutes: DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES,
        }
    }
}

impl Settings {
    pub(super) fn from_parts(
        project_name: String,
        database_url: String,
        jwt_secret_key: String,
        jwt_algorithm: String,
        access_token_expire_minutes: i64,
    ) -> Self {
        Self {
            project_name,
            database_url,
            jwt_secret_key,
            jwt_algorithm,
            access_token_expire_minutes,
        }
    }

    /// Load settings from the process environment and the `.env` file.
    ///
    /// # Errors
    /// Returns [`ConfigError::Validation`] if a resolved value cannot be
    /// coerced to its field type.
    pub fn from_env() -> ConfigResult<Self> {
        super::SettingsLoader::new().load()
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// The raw signing secret. Never log this.
    pub fn jwt_secret_key(&self) -> &str {
        &self.jwt_secret_key
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret_key.as_bytes()
    }

    pub fn jwt_algorithm(&self) -> &str {
        &self.jwt_algorithm
    }

    pub fn access_token_expire_minutes(&self) -> i64 {
        self.access_token_expire_minutes
    }

    /// Parse the configured algorithm name into a signing algorithm.
    pub fn signing_algorithm(&self) -> ConfigResult<Algorithm> {
        Algorithm::from_str(&self.jwt_algorithm)
            .map_err(|_| ConfigError::unsupported_algorithm(&self.jwt_algorithm))
    }

    /// Access token lifetime as a duration.
    ///
    /// # Errors
    /// Returns [`ConfigError::ExpiryOutOfRange`] if the minutes do not fit a
    /// `Duration`.
    pub fn access_token_ttl(&self) -> ConfigResult<Duration> {
        Duration::try_minutes(self.access_token_expire_minutes)
            .ok_or(ConfigError::ExpiryOutOfRange(self.access_token_expire_minutes))
    }

    /// Access token lifetime in seconds (the `expires_in` of a token response).
    pub fn access_token_expire_seconds(&self) -> ConfigResult<i64> {
        self.access_token_expire_minutes
            .checked_mul(SECONDS_PER_MINUTE)
            .ok_or(ConfigError::ExpiryOutOfRange(self.access_token_expire_minutes))
    }

    /// True while the signing secret is still the shipped placeholder.
    pub fn uses_insecure_secret(&self) -> bool {
        self.jwt_secret_key == INSECURE_JWT_SECRET_KEY
    }

    /// Check every field against its declared constraint.
    ///
    /// Construction only fails on type coercion; this is the stricter
    /// check run by `phyrisk-settings check` and by applications that want
    /// to refuse a half-configured deployment.
    pub fn check(&self) -> ConfigResult<()> {
        Validate::validate(self)?;
        Ok(())
    }
}

fn validate_jwt_algorithm(name: &str) -> Result<(), ValidationError> {
    match Algorithm::from_str(name) {
        Ok(_) => Ok(()),
        Err(_) => {
            let mut err = ValidationError::new("unsupported_algorithm");
            err.message = Some(Cow::from(format!(
                "'{}' is not a supported JWT signing algorithm",
                name
            )));
            Err(err)
        }
    }
}

fn serialize_redacted<S: Serializer>(_: &str, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(REDACTED)
}
