//! Application configuration loader for PanicPal.
//!
//! Reads `config.toml` from the data directory (`~/.panicpal/` in production)
//! and deserializes it into [`AppConfig`]. Falls back to defaults when the
//! file is missing or malformed.

use std::path::{Path, PathBuf};

use panicpal_types::config::AppConfig;
use secrecy::SecretString;

/// Environment variable that overrides `access_token` from the file.
pub const ACCESS_TOKEN_ENV: &str = "PANICPAL_ACCESS_TOKEN";

/// Path of the configuration file inside `data_dir`.
pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join("config.toml")
}

/// Load configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`AppConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
pub async fn load_app_config(data_dir: &Path) -> AppConfig {
    let config_path = config_path(data_dir);

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            AppConfig::default()
        }
    }
}

/// Resolve the endpoint access token.
///
/// Priority:
/// 1. `PANICPAL_ACCESS_TOKEN` environment variable
/// 2. `access_token` from `config.toml`
///
/// Blank values count as unset.
pub fn resolve_access_token(config: &AppConfig) -> Option<SecretString> {
    access_token_from(std::env::var(ACCESS_TOKEN_ENV).ok(), config)
}

fn access_token_from(env_value: Option<String>, config: &AppConfig) -> Option<SecretString> {
    env_value
        .filter(|v| !v.trim().is_empty())
        .or_else(|| {
            config
                .access_token
                .clone()
                .filter(|v| !v.trim().is_empty())
        })
        .map(SecretString::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use panicpal_types::config::{DEFAULT_ENDPOINT_URL, DEFAULT_FALLBACK_MESSAGE};
    use secrecy::ExposeSecret;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_app_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_app_config(tmp.path()).await;
        assert_eq!(config.endpoint_url, DEFAULT_ENDPOINT_URL);
        assert_eq!(config.fallback_message, DEFAULT_FALLBACK_MESSAGE);
        assert!(config.access_token.is_none());
    }

    #[tokio::test]
    async fn load_app_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            config_path(tmp.path()),
            r#"
endpoint_url = "http://localhost:7071/api/PanicPal"
access_token = "from-file"

[loading]
interval_ms = 250
glyphs = ["-", "\\", "|", "/"]
"#,
        )
        .await
        .unwrap();

        let config = load_app_config(tmp.path()).await;
        assert_eq!(config.endpoint_url, "http://localhost:7071/api/PanicPal");
        assert_eq!(config.access_token.as_deref(), Some("from-file"));
        assert_eq!(config.loading.interval_ms, 250);
        assert_eq!(config.loading.glyphs.len(), 4);
        assert_eq!(config.fallback_message, DEFAULT_FALLBACK_MESSAGE);
    }

    #[tokio::test]
    async fn load_app_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(config_path(tmp.path()), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_app_config(tmp.path()).await;
        assert_eq!(config.endpoint_url, DEFAULT_ENDPOINT_URL);
    }

    #[test]
    fn access_token_env_overrides_file() {
        let config = AppConfig {
            access_token: Some("from-file".to_string()),
            ..AppConfig::default()
        };

        let token = access_token_from(Some("from-env".to_string()), &config).unwrap();
        assert_eq!(token.expose_secret(), "from-env");

        let token = access_token_from(None, &config).unwrap();
        assert_eq!(token.expose_secret(), "from-file");
    }

    #[test]
    fn access_token_blank_is_unset() {
        let config = AppConfig {
            access_token: Some("  ".to_string()),
            ..AppConfig::default()
        };
        assert!(access_token_from(Some(String::new()), &config).is_none());
        assert!(access_token_from(None, &AppConfig::default()).is_none());
    }
}
