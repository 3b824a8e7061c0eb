//! Settings loader integration tests.
//!
//! These tests never modify the process environment; each one hands the
//! loader its own environment pairs and a temporary env file.

use std::fs;
use std::sync::Arc;
use std::thread;

use tempfile::TempDir;

use phyrisk_settings::config::{DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES, DEFAULT_PROJECT_NAME};
use phyrisk_settings::{ConfigError, Settings, SettingsLoader, SettingsOverrides};

// =============================================================================
// Helpers
// =============================================================================

fn env_file(contents: &str) -> (TempDir, std::path::PathBuf) {
    let tmp = TempDir::new().expect("tmp");
    let path = tmp.path().join(".env");
    fs::write(&path, contents).expect("write env file");
    (tmp, path)
}

fn empty_env() -> Vec<(String, String)> {
    Vec::new()
}

// =============================================================================
// Precedence
// =============================================================================

#[test]
fn test_each_layer_supplies_a_different_field() {
    let (_tmp, path) = env_file(
        "PROJECT_NAME=from file\nDATABASE_URL=sqlite:///file.db\nJWT_ALGORITHM=HS384\n",
    );

    let settings = SettingsLoader::new()
        .env_file(&path)
        .environment([
            ("DATABASE_URL", "postgres://env/phyrisk"),
            ("JWT_ALGORITHM", "HS512"),
        ])
        .overrides(SettingsOverrides {
            jwt_algorithm: Some("RS256".to_string()),
            ..Default::default()
        })
        .load()
        .unwrap();

    assert_eq!(settings.project_name(), "from file");
    assert_eq!(settings.database_url(), "postgres://env/phyrisk");
    assert_eq!(settings.jwt_algorithm(), "RS256");
    assert_eq!(
        settings.access_token_expire_minutes(),
        DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES
    );
}

#[test]
fn test_env_var_wins_over_env_file_for_expiry() {
    let (_tmp, path) = env_file("ACCESS_TOKEN_EXPIRE_MINUTES=30\n");

    let settings = SettingsLoader::new()
        .env_file(&path)
        .environment([("ACCESS_TOKEN_EXPIRE_MINUTES", "45")])
        .load()
        .unwrap();

    assert_eq!(settings.access_token_expire_minutes(), 45);
    assert_eq!(settings.access_token_expire_seconds().unwrap(), 45 * 60);
}

#[test]
fn test_nothing_configured_yields_defaults() {
    let settings = SettingsLoader::new()
        .without_env_file()
        .environment(empty_env())
        .load()
        .unwrap();

    assert_eq!(settings, Settings::default());
    assert_eq!(settings.project_name(), DEFAULT_PROJECT_NAME);
    assert!(settings.uses_insecure_secret());
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn test_non_numeric_expiry_is_a_validation_error() {
    let err = SettingsLoader::new()
        .without_env_file()
        .environment([("ACCESS_TOKEN_EXPIRE_MINUTES", "notanumber")])
        .load()
        .unwrap_err();

    assert!(matches!(err, ConfigError::Validation { .. }));
    assert_eq!(err.code(), "VALIDATION_ERROR");
}

#[test]
fn test_unreadable_env_file_is_not_an_error() {
    // A directory cannot be read as an env file
    let tmp = TempDir::new().expect("tmp");

    let settings = SettingsLoader::new()
        .env_file(tmp.path())
        .environment(empty_env())
        .load()
        .unwrap();

    assert_eq!(settings, Settings::default());
}

#[test]
fn test_oversized_expiry_loads_but_is_reported() {
    let settings = SettingsLoader::new()
        .without_env_file()
        .environment([("ACCESS_TOKEN_EXPIRE_MINUTES", "9223372036854775807")])
        .load()
        .unwrap();

    assert_eq!(settings.access_token_expire_minutes(), i64::MAX);
    assert!(settings.access_token_ttl().is_err());
    assert!(settings.access_token_expire_seconds().is_err());
    assert!(settings.check().is_err());
}

// =============================================================================
// Lifecycle
// =============================================================================

#[test]
fn test_process_environment_load_is_idempotent() {
    let first = Settings::from_env();
    let second = Settings::from_env();

    match (first, second) {
        (Ok(a), Ok(b)) => assert_eq!(a, b),
        (Err(a), Err(b)) => assert_eq!(a.to_string(), b.to_string()),
        _ => panic!("two loads of the same environment disagreed"),
    }
}

#[test]
fn test_settings_are_read_concurrently() {
    let settings = Arc::new(
        SettingsLoader::new()
            .without_env_file()
            .environment([("JWT_SECRET_KEY", "shared-secret")])
            .load()
            .unwrap(),
    );

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let settings = Arc::clone(&settings);
            thread::spawn(move || settings.jwt_secret_bytes().to_vec())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), b"shared-secret".to_vec());
    }
}

#[test]
fn test_signing_algorithm_feeds_jsonwebtoken() {
    let settings = SettingsLoader::new()
        .without_env_file()
        .environment([("JWT_SECRET_KEY", "integration-secret")])
        .load()
        .unwrap();

    let algorithm = settings.signing_algorithm().unwrap();
    let header = jsonwebtoken::Header::new(algorithm);
    let claims = serde_json::json!({ "sub": "user-1", "exp": 4_102_444_800i64 });

    let token = jsonwebtoken::encode(
        &header,
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(settings.jwt_secret_bytes()),
    )
    .unwrap();

    let decoded = jsonwebtoken::decode::<serde_json::Value>(
        &token,
        &jsonwebtoken::DecodingKey::from_secret(settings.jwt_secret_bytes()),
        &jsonwebtoken::Validation::new(algorithm),
    )
    .unwrap();

    assert_eq!(decoded.claims["sub"], "user-1");
}
