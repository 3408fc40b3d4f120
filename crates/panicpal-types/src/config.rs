//! Application configuration types for PanicPal.
//!
//! `AppConfig` represents `config.toml` in the data directory. Every field has
//! a default, so an absent or partial file still yields a working setup.

use serde::{Deserialize, Serialize};

/// Default assistant endpoint.
pub const DEFAULT_ENDPOINT_URL: &str = "https://panicpal.azurewebsites.net/api/PanicPal";

/// Instructions sent as the leading system turn of every conversation.
pub const DEFAULT_SYSTEM_PROMPT: &str = "The assistant is a cognitive behavioral therapist specializing in panic disorder with 20 years of experience. The assistant helps the user get through their panic attacks by reassuring them everything will be okay, helping them talk through catastrophic thoughts, and walking them through exercises that will deescalate the panic attack. Keep responses very concise and brief.";

/// Reply shown when the assistant endpoint cannot be reached.
pub const DEFAULT_FALLBACK_MESSAGE: &str = "I can't connect to Azure";

/// Content of the loading turn when it is first inserted.
pub const DEFAULT_LOADING_INITIAL: &str = ".  ";

/// Rotation the loading turn cycles through while a reply is pending.
pub const DEFAULT_LOADING_GLYPHS: [&str; 3] = [".. ", "...", ".  "];

/// Default period between loading glyph changes.
pub const DEFAULT_LOADING_INTERVAL_MS: u64 = 500;

/// Top-level configuration for PanicPal.
///
/// Loaded from `~/.panicpal/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// URL the conversation is POSTed to.
    #[serde(default = "default_endpoint_url")]
    pub endpoint_url: String,

    /// Function key sent as the `code` query parameter.
    ///
    /// `PANICPAL_ACCESS_TOKEN` takes precedence over this value.
    #[serde(default)]
    pub access_token: Option<String>,

    /// Content of the leading system turn for new conversations.
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// Assistant reply used when the endpoint fails.
    #[serde(default = "default_fallback_message")]
    pub fallback_message: String,

    /// Loading indicator animation.
    #[serde(default)]
    pub loading: LoadingConfig,
}

fn default_endpoint_url() -> String {
    DEFAULT_ENDPOINT_URL.to_string()
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}

fn default_fallback_message() -> String {
    DEFAULT_FALLBACK_MESSAGE.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint_url: default_endpoint_url(),
            access_token: None,
            system_prompt: default_system_prompt(),
            fallback_message: default_fallback_message(),
            loading: LoadingConfig::default(),
        }
    }
}

/// Settings for the animated loading turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadingConfig {
    /// Milliseconds between glyph changes.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Content of the loading turn when inserted.
    #[serde(default = "default_initial")]
    pub initial: String,

    /// Glyph rotation, applied in order and wrapping around.
    #[serde(default = "default_glyphs")]
    pub glyphs: Vec<String>,
}

fn default_interval_ms() -> u64 {
    DEFAULT_LOADING_INTERVAL_MS
}

fn default_initial() -> String {
    DEFAULT_LOADING_INITIAL.to_string()
}

fn default_glyphs() -> Vec<String> {
    DEFAULT_LOADING_GLYPHS.iter().map(|g| g.to_string()).collect()
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            initial: default_initial(),
            glyphs: default_glyphs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_default_values() {
        let config = AppConfig::default();
        assert_eq!(config.endpoint_url, DEFAULT_ENDPOINT_URL);
        assert!(config.access_token.is_none());
        assert_eq!(config.fallback_message, "I can't connect to Azure");
        assert_eq!(config.loading.interval_ms, 500);
        assert_eq!(config.loading.initial, ".  ");
        assert_eq!(config.loading.glyphs, vec![".. ", "...", ".  "]);
    }

    #[test]
    fn test_app_config_deserialize_with_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.endpoint_url, DEFAULT_ENDPOINT_URL);
        assert_eq!(config.system_prompt, DEFAULT_SYSTEM_PROMPT);
        assert_eq!(config.loading, LoadingConfig::default());
    }

    #[test]
    fn test_app_config_deserialize_with_values() {
        let toml_str = r#"
endpoint_url = "http://localhost:7071/api/PanicPal"
access_token = "local-key"
fallback_message = "Offline."

[loading]
interval_ms = 250
glyphs = ["-", "\\", "|", "/"]
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.endpoint_url, "http://localhost:7071/api/PanicPal");
        assert_eq!(config.access_token.as_deref(), Some("local-key"));
        assert_eq!(config.fallback_message, "Offline.");
        assert_eq!(config.loading.interval_ms, 250);
        assert_eq!(config.loading.glyphs.len(), 4);
        // Unset fields keep their defaults
        assert_eq!(config.loading.initial, ".  ");
        assert_eq!(config.system_prompt, DEFAULT_SYSTEM_PROMPT);
    }
}
