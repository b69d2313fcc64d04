use crate::error::{Error, Result};
use std::fmt;

pub const YOUTUBE_API_KEY_ENV: &str = "YOUTUBE_API_KEY";
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 4096;

/// Settings resolved once at startup and handed to the services that need them.
#[derive(Clone)]
pub struct Config {
    youtube_api_key: String,
    openai_api_key: String,
    pub model: String,
    pub languages: Vec<String>,
    pub max_output_tokens: u32,
}

impl Config {
    /// Both credentials are required; blank values count as missing.
    pub fn new(youtube_api_key: Option<String>, openai_api_key: Option<String>) -> Result<Self> {
        Ok(Self {
            youtube_api_key: require(youtube_api_key, YOUTUBE_API_KEY_ENV)?,
            openai_api_key: require(openai_api_key, OPENAI_API_KEY_ENV)?,
            model: DEFAULT_MODEL.to_string(),
            languages: vec!["en".to_string()],
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Comma separated list, e.g. `en,es`. Empty entries are dropped.
    pub fn with_languages(mut self, languages: &str) -> Self {
        let parsed: Vec<String> = languages
            .split(',')
            .map(str::trim)
            .filter(|lang| !lang.is_empty())
            .map(str::to_string)
            .collect();
        if !parsed.is_empty() {
            self.languages = parsed;
        }
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    pub fn youtube_api_key(&self) -> &str {
        &self.youtube_api_key
    }

    pub fn openai_api_key(&self) -> &str {
        &self.openai_api_key
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("youtube_api_key", &"<redacted>")
            .field("openai_api_key", &"<redacted>")
            .field("model", &self.model)
            .field("languages", &self.languages)
            .field("max_output_tokens", &self.max_output_tokens)
            .finish()
    }
}

fn require(value: Option<String>, name: &'static str) -> Result<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(Error::MissingCredential(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> (Option<String>, Option<String>) {
        (Some("yt-key".to_string()), Some("sk-test".to_string()))
    }

    #[test]
    fn requires_both_credentials() {
        let err = Config::new(None, Some("sk-test".to_string())).unwrap_err();
        assert!(matches!(err, Error::MissingCredential(YOUTUBE_API_KEY_ENV)));

        let err = Config::new(Some("yt-key".to_string()), Some("   ".to_string())).unwrap_err();
        assert!(matches!(err, Error::MissingCredential(OPENAI_API_KEY_ENV)));
    }

    #[test]
    fn defaults_and_overrides() {
        let (yt, openai) = keys();
        let config = Config::new(yt, openai).expect("valid");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.languages, vec!["en"]);

        let config = config
            .with_model("gpt-4o")
            .with_languages(" en, es ,,")
            .with_max_output_tokens(1024);
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.languages, vec!["en", "es"]);
        assert_eq!(config.max_output_tokens, 1024);
        assert_eq!(config.youtube_api_key(), "yt-key");
    }

    #[test]
    fn blank_language_list_keeps_default() {
        let (yt, openai) = keys();
        let config = Config::new(yt, openai).expect("valid").with_languages(" , ");
        assert_eq!(config.languages, vec!["en"]);
    }

    #[test]
    fn debug_output_redacts_keys() {
        let (yt, openai) = keys();
        let rendered = format!("{:?}", Config::new(yt, openai).expect("valid"));
        assert!(!rendered.contains("yt-key"));
        assert!(!rendered.contains("sk-test"));
    }
}
