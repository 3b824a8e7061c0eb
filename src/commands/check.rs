//! Check command - Validates the resolved settings against their constraints.

use crate::config::{Settings, JWT_SECRET_KEY_ENV};
use crate::errors::{ConfigError, ConfigResult};

/// Execute the check command
///
/// Prints one line per violation and returns the constraint error so the
/// process exits non-zero.
pub fn execute(settings: &Settings) -> ConfigResult<()> {
    let report = report(settings);

    for line in &report.warnings {
        println!("warning: {}", line);
    }
    for line in &report.violations {
        println!("error: {}", line);
    }

    match report.outcome {
        Ok(()) => {
            println!("Settings OK");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

/// Result of checking a settings record
#[derive(Debug)]
pub struct CheckReport {
    pub warnings: Vec<String>,
    pub violations: Vec<String>,
    pub outcome: ConfigResult<()>,
}

/// Check the settings without printing anything.
pub fn report(settings: &Settings) -> CheckReport {
    let mut warnings = Vec::new();
    if settings.uses_insecure_secret() {
        warnings.push(format!(
            "{} is still the placeholder value; set a real secret before deploying",
            JWT_SECRET_KEY_ENV
        ));
    }

    let outcome = settings.check();
    let violations = match &outcome {
        Err(ConfigError::Constraints(errors)) => {
            let mut lines: Vec<String> = errors
                .field_errors()
                .into_iter()
                .flat_map(|(field, errs)| {
                    let field = field.to_string();
                    errs.iter().map(move |e| match &e.message {
                        Some(msg) => format!("{}: {}", field, msg),
                        None => format!("{}: {}", field, e.code),
                    })
                })
                .collect();
            lines.sort();
            lines
        }
        Err(other) => vec![other.to_string()],
        Ok(()) => Vec::new(),
    };

    CheckReport {
        warnings,
        violations,
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SettingsLoader;

    #[test]
    fn test_defaults_pass_with_insecure_secret_warning() {
        let report = report(&Settings::default());

        assert!(report.outcome.is_ok());
        assert!(report.violations.is_empty());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("JWT_SECRET_KEY"));
    }

    #[test]
    fn test_violations_are_listed_per_field() {
        let settings = SettingsLoader::new()
            .without_env_file()
            .environment([
                ("JWT_SECRET_KEY", "a-real-secret"),
                ("JWT_ALGORITHM", "MD5"),
                ("ACCESS_TOKEN_EXPIRE_MINUTES", "0"),
            ])
            .load()
            .unwrap();

        let report = report(&settings);

        assert!(report.warnings.is_empty());
        assert!(matches!(report.outcome, Err(ConfigError::Constraints(_))));
        assert_eq!(report.violations.len(), 2);
        assert!(report.violations[0].starts_with("access_token_expire_minutes:"));
        assert!(report.violations[1].starts_with("jwt_algorithm:"));
        assert!(report.violations[1].contains("MD5"));
    }
}
