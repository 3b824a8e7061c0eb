//! Configuration constants
//!
//! Environment variable names and the literal defaults applied when a
//! value is not supplied anywhere else.

// =============================================================================
// Environment File
// =============================================================================

/// Conventional environment file, resolved relative to the working directory
pub const DEFAULT_ENV_FILE: &str = ".env";

// =============================================================================
// Variable Names
// =============================================================================

pub const PROJECT_NAME_ENV: &str = "PROJECT_NAME";
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";
pub const JWT_SECRET_KEY_ENV: &str = "JWT_SECRET_KEY";
pub const JWT_ALGORITHM_ENV: &str = "JWT_ALGORITHM";
pub const ACCESS_TOKEN_EXPIRE_MINUTES_ENV: &str = "ACCESS_TOKEN_EXPIRE_MINUTES";

/// Every variable the loader resolves
pub const SETTINGS_KEYS: &[&str] = &[
    PROJECT_NAME_ENV,
    DATABASE_URL_ENV,
    JWT_SECRET_KEY_ENV,
    JWT_ALGORITHM_ENV,
    ACCESS_TOKEN_EXPIRE_MINUTES_ENV,
];

// =============================================================================
// Defaults
// =============================================================================

/// Default project display name
pub const DEFAULT_PROJECT_NAME: &str = "PhyRISK – AI-Driven Mental Health Risk Intelligence";

/// Default database connection URL (local development SQLite file)
pub const DEFAULT_DATABASE_URL: &str = "sqlite:///./dev.db";

/// Placeholder secret. Any deployment still using it is insecure.
pub const INSECURE_JWT_SECRET_KEY: &str = "CHANGE_ME";

/// Default JWT signing algorithm
pub const DEFAULT_JWT_ALGORITHM: &str = "HS256";

/// Default access token lifetime in minutes
pub const DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES: i64 = 60;

/// Longest accepted access token lifetime in minutes (365 days)
pub const MAX_ACCESS_TOKEN_EXPIRE_MINUTES: i64 = 525_600;

// =============================================================================
// Time
// =============================================================================

/// Seconds per minute (for token expiration calculation)
pub const SECONDS_PER_MINUTE: i64 = 60;

// =============================================================================
// Output
// =============================================================================

/// Replacement text for secrets in debug and serialized output
pub const REDACTED: &str = "[REDACTED]";
