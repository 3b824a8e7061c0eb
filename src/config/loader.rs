//! Settings resolution.
//!
//! Each field is taken from the first layer that has it:
//! explicit override, process environment, environment file, default.
//! Keys match case-insensitively; an exact upper-case key beats any other
//! spelling of the same name within one layer.

use std::collections::HashMap;
use std::ffi::OsString;
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::constants::{
    ACCESS_TOKEN_EXPIRE_MINUTES_ENV, DATABASE_URL_ENV, DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES,
    DEFAULT_DATABASE_URL, DEFAULT_ENV_FILE, DEFAULT_JWT_ALGORITHM, DEFAULT_PROJECT_NAME,
    INSECURE_JWT_SECRET_KEY, JWT_ALGORITHM_ENV, JWT_SECRET_KEY_ENV, PROJECT_NAME_ENV,
    REDACTED, SETTINGS_KEYS,
};
use super::settings::Settings;
use crate::errors::{ConfigError, ConfigResult};

/// Values supplied directly by the caller. These win over every other layer.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    pub project_name: Option<String>,
    pub database_url: Option<String>,
    pub jwt_secret_key: Option<String>,
    pub jwt_algorithm: Option<String>,
    pub access_token_expire_minutes: Option<i64>,
}

impl fmt::Debug for SettingsOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsOverrides")
            .field("project_name", &self.project_name)
            .field("database_url", &self.database_url)
            .field("jwt_secret_key", &self.jwt_secret_key.as_ref().map(|_| REDACTED))
            .field("jwt_algorithm", &self.jwt_algorithm)
            .field(
                "access_token_expire_minutes",
                &self.access_token_expire_minutes,
            )
            .finish()
    }
}

/// Where a resolved value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    Explicit,
    Environment,
    EnvFile,
    Default,
}

impl fmt::Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueSource::Explicit => "explicit",
            ValueSource::Environment => "environment",
            ValueSource::EnvFile => "env file",
            ValueSource::Default => "default",
        };
        f.write_str(name)
    }
}

/// Builds a [`Settings`] record from its layered sources.
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    env_file: Option<PathBuf>,
    environment: Option<Vec<(String, String)>>,
    overrides: SettingsOverrides,
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsLoader {
    /// Loader reading the process environment and `.env` in the working directory.
    pub fn new() -> Self {
        Self {
            env_file: Some(PathBuf::from(DEFAULT_ENV_FILE)),
            environment: None,
            overrides: SettingsOverrides::default(),
        }
    }

    /// Read the environment file from `path` instead of `.env`.
    pub fn env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_file = Some(path.into());
        self
    }

    /// Skip the environment file layer entirely.
    pub fn without_env_file(mut self) -> Self {
        self.env_file = None;
        self
    }

    /// Use these pairs in place of the process environment.
    pub fn environment<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.environment = Some(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Explicit values. These win over every other layer.
    pub fn overrides(mut self, overrides: SettingsOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Resolve every field and build the record.
    ///
    /// # Errors
    /// Returns [`ConfigError::Validation`] if the token expiry does not
    /// parse as an integer. Environment file problems are logged and
    /// skipped, never returned.
    pub fn load(&self) -> ConfigResult<Settings> {
        let environment = match &self.environment {
            Some(vars) => KeyLayer::from_pairs(vars.iter().cloned()),
            None => KeyLayer::from_pairs(process_environment()),
        };
        let env_file = match &self.env_file {
            Some(path) => read_env_file(path),
            None => KeyLayer::default(),
        };

        let resolver = Resolver {
            environment: &environment,
            env_file: &env_file,
        };

        let project_name = resolver.string(
            PROJECT_NAME_ENV,
            self.overrides.project_name.as_deref(),
            DEFAULT_PROJECT_NAME,
        );
        let database_url = resolver.string(
            DATABASE_URL_ENV,
            self.overrides.database_url.as_deref(),
            DEFAULT_DATABASE_URL,
        );
        let jwt_secret_key = resolver.string(
            JWT_SECRET_KEY_ENV,
            self.overrides.jwt_secret_key.as_deref(),
            INSECURE_JWT_SECRET_KEY,
        );
        let jwt_algorithm = resolver.string(
            JWT_ALGORITHM_ENV,
            self.overrides.jwt_algorithm.as_deref(),
            DEFAULT_JWT_ALGORITHM,
        );
        let access_token_expire_minutes = resolver.integer(
            ACCESS_TOKEN_EXPIRE_MINUTES_ENV,
            self.overrides.access_token_expire_minutes,
            DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES,
        )?;

        let settings = Settings::from_parts(
            project_name,
            database_url,
            jwt_secret_key,
            jwt_algorithm,
            access_token_expire_minutes,
        );

        if settings.uses_insecure_secret() {
            tracing::warn!(
                "{} is the placeholder value, tokens signed with it are not secure",
                JWT_SECRET_KEY_ENV
            );
        }

        Ok(settings)
    }
}

/// Settings-relevant keys of one source, normalized to their canonical name
#[derive(Debug, Default)]
struct KeyLayer {
    values: HashMap<&'static str, (bool, String)>,
}

impl KeyLayer {
    fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut values: HashMap<&'static str, (bool, String)> = HashMap::new();

        for (key, value) in pairs {
            let Some(name) = SETTINGS_KEYS.iter().find(|k| k.eq_ignore_ascii_case(&key)) else {
                continue;
            };
            let exact = key == *name;
            let keep_existing = matches!(values.get(name), Some((true, _))) && !exact;
            if !keep_existing {
                values.insert(*name, (exact, value));
            }
        }

        Self { values }
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(|(_, v)| v.as_str())
    }

    fn len(&self) -> usize {
        self.values.len()
    }
}

struct Resolver<'a> {
    environment: &'a KeyLayer,
    env_file: &'a KeyLayer,
}

impl Resolver<'_> {
    fn raw(&self, name: &str) -> Option<(ValueSource, &str)> {
        self.environment
            .get(name)
            .map(|v| (ValueSource::Environment, v))
            .or_else(|| self.env_file.get(name).map(|v| (ValueSource::EnvFile, v)))
    }

    fn string(&self, name: &'static str, explicit: Option<&str>, default: &str) -> String {
        let (source, value) = match explicit {
            Some(v) => (ValueSource::Explicit, v),
            None => self.raw(name).unwrap_or((ValueSource::Default, default)),
        };
        tracing::debug!(setting = name, %source, "Resolved setting");
        value.to_string()
    }

    fn integer(&self, name: &'static str, explicit: Option<i64>, default: i64) -> ConfigResult<i64> {
        if let Some(v) = explicit {
            tracing::debug!(setting = name, source = %ValueSource::Explicit, "Resolved setting");
            return Ok(v);
        }

        match self.raw(name) {
            Some((source, raw)) => {
                let parsed = raw
                    .trim()
                    .parse::<i64>()
                    .map_err(|e| ConfigError::validation(name, raw, e.to_string()))?;
                tracing::debug!(setting = name, %source, "Resolved setting");
                Ok(parsed)
            }
            None => {
                tracing::debug!(setting = name, source = %ValueSource::Default, "Resolved setting");
                Ok(default)
            }
        }
    }
}

/// Process environment as UTF-8 pairs. Non-Unicode entries cannot hold a
/// setting and are dropped.
fn process_environment() -> impl Iterator<Item = (String, String)> {
    std::env::vars_os().filter_map(|(k, v)| utf8_pair(k, v))
}

fn utf8_pair(key: OsString, value: OsString) -> Option<(String, String)> {
    match (key.into_string(), value.into_string()) {
        (Ok(key), Ok(value)) => Some((key, value)),
        (Ok(key), Err(_)) => {
            if SETTINGS_KEYS.iter().any(|k| k.eq_ignore_ascii_case(&key)) {
                tracing::warn!("Ignoring {}: value is not valid UTF-8", key);
            }
            None
        }
        (Err(key), _) => {
            let lossy = key.to_string_lossy();
            if SETTINGS_KEYS.iter().any(|k| k.eq_ignore_ascii_case(&lossy)) {
                tracing::warn!("Ignoring {}: name is not valid UTF-8", lossy);
            }
            None
        }
    }
}

/// Parse an environment file without touching the process environment.
fn read_env_file(path: &Path) -> KeyLayer {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(dotenvy::Error::Io(e)) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("No environment file at {}", path.display());
            return KeyLayer::default();
        }
        Err(e) => {
            tracing::warn!("Ignoring environment file {}: {}", path.display(), e);
            return KeyLayer::default();
        }
    };

    let mut pairs = Vec::new();
    for item in iter {
        match item {
            Ok(pair) => pairs.push(pair),
            Err(dotenvy::Error::Io(e)) => {
                tracing::warn!("Stopped reading {}: {}", path.display(), e);
                break;
            }
            Err(e) => tracing::warn!("Skipping entry in {}: {}", path.display(), e),
        }
    }

    let layer = KeyLayer::from_pairs(pairs);
    tracing::debug!(
        "Read {} setting(s) from {}",
        layer.len(),
        path.display()
    );
    layer
}
