//! Show command - Prints the resolved settings.

use crate::cli::args::ShowArgs;
use crate::config::{Settings, REDACTED};
use crate::errors::ConfigResult;

/// Execute the show command
pub fn execute(args: &ShowArgs, settings: &Settings) -> ConfigResult<()> {
    println!("{}", render(settings, args.json)?);
    Ok(())
}

/// Render the settings as aligned text or pretty JSON. The secret is never shown.
pub fn render(settings: &Settings, json: bool) -> ConfigResult<String> {
    if json {
        return Ok(serde_json::to_string_pretty(settings)?);
    }

    let rows = [
        ("PROJECT_NAME", settings.project_name().to_string()),
        ("DATABASE_URL", settings.database_url().to_string()),
        ("JWT_SECRET_KEY", REDACTED.to_string()),
        ("JWT_ALGORITHM", settings.jwt_algorithm().to_string()),
        (
            "ACCESS_TOKEN_EXPIRE_MINUTES",
            settings.access_token_expire_minutes().to_string(),
        ),
    ];

    let width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    let lines: Vec<String> = rows
        .iter()
        .map(|(key, value)| format!("{:<width$}  {}", key, value, width = width))
        .collect();

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SettingsLoader;

    fn loaded(secret: &str) -> Settings {
        SettingsLoader::new()
            .without_env_file()
            .environment([("JWT_SECRET_KEY", secret)])
            .load()
            .unwrap()
    }

    #[test]
    fn test_render_text_hides_secret() {
        let out = render(&loaded("very-private"), false).unwrap();

        assert!(!out.contains("very-private"));
        assert!(out.contains("JWT_SECRET_KEY"));
        assert!(out.contains("sqlite:///./dev.db"));
        assert_eq!(out.lines().count(), 5);
    }

    #[test]
    fn test_render_json_hides_secret() {
        let out = render(&loaded("very-private"), true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["jwt_secret_key"], REDACTED);
        assert_eq!(value["jwt_algorithm"], "HS256");
        assert_eq!(value["access_token_expire_minutes"], 60);
    }
}
