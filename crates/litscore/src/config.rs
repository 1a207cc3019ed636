//! Application configuration with sensible defaults.
//!
//! [`AppConfig`] is assembled in layers: built-in defaults, then an
//! optional TOML file, then whatever the binaries override from their
//! command lines. The API key is the only secret and only ever comes from
//! the `API_KEY` environment variable (a `.env` file in the working
//! directory is loaded first, if present).
//!
//! ```toml
//! model = "gpt-4o"
//! timeout_secs = 20
//! splash_secs = 1
//! prompts = ["Describe your hometown.", "Explain a hobby you enjoy."]
//! rubric = "You are a strict grader..."
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info};

use crate::analyzer::LiteracyAnalyzer;
use crate::error::ConfigError;
use crate::prompts::{DEFAULT_PROMPTS, PromptBank};
use crate::rubric::DEFAULT_RUBRIC;
use crate::{ClientConfig, DEFAULT_MODEL, DEFAULT_TIMEOUT, OPENAI_CHAT_URL, OpenAiClient};

/// File looked up in the working directory when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = "litscore.toml";

/// Environment variable holding the provider API key.
pub const API_KEY_ENV: &str = "API_KEY";

/// Runtime configuration shared by the CLI and the TUI.
#[derive(Clone)]
pub struct AppConfig {
    /// Provider API key. Required only for building an analyzer.
    pub api_key: Option<String>,
    /// Model identifier. Default: `"gpt-4o-mini"`.
    pub model: String,
    /// Chat completions URL. Default: the OpenAI endpoint.
    pub endpoint: String,
    /// Request timeout in seconds. Default: `15`.
    pub timeout_secs: u64,
    /// Sampling temperature. Default: `0.0`.
    pub temperature: f32,
    /// How long the splash screen stays up. Default: `2`.
    pub splash_secs: u64,
    /// Writing prompts. Default: the five stock prompts.
    pub prompts: Vec<String>,
    /// System instruction sent with every request.
    pub rubric: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: OPENAI_CHAT_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            temperature: 0.0,
            splash_secs: 2,
            prompts: DEFAULT_PROMPTS.iter().map(|p| (*p).to_string()).collect(),
            rubric: DEFAULT_RUBRIC.to_string(),
        }
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("timeout_secs", &self.timeout_secs)
            .field("temperature", &self.temperature)
            .field("splash_secs", &self.splash_secs)
            .field("prompts", &self.prompts.len())
            .field("rubric", &format_args!("{} chars", self.rubric.len()))
            .finish()
    }
}

/// Optional overrides read from a TOML file.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub model: Option<String>,
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
    pub temperature: Option<f32>,
    pub splash_secs: Option<u64>,
    pub prompts: Option<Vec<String>>,
    pub rubric: Option<String>,
}

impl FileConfig {
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl AppConfig {
    /// Load defaults, the config file and the `API_KEY` environment variable.
    ///
    /// With `path = None`, `litscore.toml` in the working directory is used
    /// if it exists.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(env_path) => debug!("Loaded environment from {}", env_path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => debug!("Ignoring unreadable .env file: {e}"),
        }

        let file_path: Option<PathBuf> = match path {
            Some(p) => Some(p.to_path_buf()),
            None => Some(PathBuf::from(CONFIG_FILE_NAME)).filter(|p| p.is_file()),
        };

        let mut config = match file_path {
            Some(p) => {
                info!("Reading config from {}", p.display());
                Self::from_file(&p)?
            }
            None => Self::default(),
        };
        config.api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty());
        Ok(config)
    }

    /// Defaults overlaid with the given TOML file. Does not read the environment.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply(FileConfig::read(path)?);
        config.validate()?;
        Ok(config)
    }

    /// Overlay every field the file sets.
    pub fn apply(&mut self, file: FileConfig) {
        if let Some(model) = file.model {
            self.model = model;
        }
        if let Some(endpoint) = file.endpoint {
            self.endpoint = endpoint;
        }
        if let Some(secs) = file.timeout_secs {
            self.timeout_secs = secs;
        }
        if let Some(t) = file.temperature {
            self.temperature = t;
        }
        if let Some(secs) = file.splash_secs {
            self.splash_secs = secs;
        }
        if let Some(prompts) = file.prompts {
            self.prompts = prompts;
        }
        if let Some(rubric) = file.rubric {
            self.rubric = rubric;
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.prompts.iter().all(|p| p.trim().is_empty()) {
            return Err(ConfigError::EmptyPromptList);
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn splash_duration(&self) -> Duration {
        Duration::from_secs(self.splash_secs)
    }

    pub fn prompt_bank(&self) -> Result<PromptBank, ConfigError> {
        PromptBank::new(self.prompts.clone())
    }

    /// Client settings; fails when no API key is configured.
    pub fn client_config(&self) -> Result<ClientConfig, ConfigError> {
        self.validate()?;
        let api_key = self.api_key.clone().ok_or(ConfigError::MissingApiKey)?;
        Ok(ClientConfig {
            api_key,
            endpoint: self.endpoint.clone(),
            model: self.model.clone(),
            timeout: self.timeout(),
            temperature: self.temperature,
        })
    }

    /// Analyzer backed by the configured OpenAI-compatible endpoint.
    pub fn build_analyzer(&self) -> Result<LiteracyAnalyzer<OpenAiClient>, ConfigError> {
        let client = OpenAiClient::new(self.client_config()?).map_err(ConfigError::Client)?;
        Ok(LiteracyAnalyzer::with_rubric(client, self.rubric.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::CompletionProvider;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_match_the_stock_setup() {
        let config = AppConfig::default();
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.timeout_secs, 15);
        assert_eq!(config.splash_secs, 2);
        assert!(config.temperature.abs() < f32::EPSILON);
        assert_eq!(config.prompts.len(), 5);
        assert_eq!(config.rubric, DEFAULT_RUBRIC);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn file_overrides_only_what_it_sets() {
        let file = write_config(
            r#"
model = "gpt-4o"
timeout_secs = 30
prompts = ["Describe your hometown."]
"#,
        );
        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.prompts, vec!["Describe your hometown.".to_string()]);
        assert_eq!(config.endpoint, OPENAI_CHAT_URL);
        assert_eq!(config.rubric, DEFAULT_RUBRIC);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let file = write_config("modle = \"typo\"\n");
        assert!(matches!(
            AppConfig::from_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = AppConfig::from_file(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("here.toml"));
    }

    #[test]
    fn empty_prompt_list_is_rejected() {
        let file = write_config("prompts = []\n");
        assert!(matches!(
            AppConfig::from_file(file.path()),
            Err(ConfigError::EmptyPromptList)
        ));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let file = write_config("timeout_secs = 0\n");
        assert!(matches!(
            AppConfig::from_file(file.path()),
            Err(ConfigError::ZeroTimeout)
        ));
    }

    #[test]
    fn client_config_requires_api_key() {
        let config = AppConfig::default();
        assert!(matches!(
            config.client_config(),
            Err(ConfigError::MissingApiKey)
        ));
        assert!(matches!(
            config.build_analyzer(),
            Err(ConfigError::MissingApiKey)
        ));
    }

    #[test]
    fn build_analyzer_carries_model_and_rubric() {
        let mut config = AppConfig::default().with_api_key("sk-test");
        config.model = "gpt-4o".into();
        config.rubric = "Grade gently.".into();
        let analyzer = config.build_analyzer().unwrap();
        assert_eq!(analyzer.provider().model(), "gpt-4o");
        assert_eq!(analyzer.rubric(), "Grade gently.");
    }

    #[test]
    fn debug_output_redacts_the_key() {
        let config = AppConfig::default().with_api_key("sk-very-secret");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("sk-very-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
