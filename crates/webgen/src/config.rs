use crate::prelude::*;
use std::time::Duration;

/// Connection settings for the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

/// Gemini flags shared by every command that calls the model.
#[derive(Debug, Clone, clap::Args)]
pub struct GeminiArgs {
    /// Gemini API key
    #[clap(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Gemini model name
    #[clap(long, env = "GEMINI_MODEL", default_value = GeminiConfig::DEFAULT_MODEL)]
    pub model: String,

    /// Gemini API base URL
    #[clap(long, env = "GEMINI_API_BASE", default_value = GeminiConfig::DEFAULT_BASE_URL)]
    pub api_base: String,

    /// Request timeout in seconds
    #[clap(long, env = "WEBGEN_TIMEOUT", default_value_t = GeminiConfig::DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,
}

impl GeminiConfig {
    pub const DEFAULT_MODEL: &'static str = "gemini-1.5-flash";
    pub const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com/v1beta";
    pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

    /// Load configuration from environment variables
    /// Requires GEMINI_API_KEY; GEMINI_MODEL, GEMINI_API_BASE and WEBGEN_TIMEOUT are optional
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| Error::Config("GEMINI_API_KEY environment variable not set".into()))?;

        let timeout = match std::env::var("WEBGEN_TIMEOUT") {
            Ok(value) => value
                .parse::<u64>()
                .map_err(|_| Error::Config(f!("WEBGEN_TIMEOUT must be a number, got {value}")))?,
            Err(_) => Self::DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_key,
            model: std::env::var("GEMINI_MODEL").unwrap_or_else(|_| Self::DEFAULT_MODEL.into()),
            base_url: std::env::var("GEMINI_API_BASE")
                .unwrap_or_else(|_| Self::DEFAULT_BASE_URL.into()),
            timeout: Duration::from_secs(timeout),
        })
    }

    /// Apply overrides to the configuration
    pub fn with_overrides(
        mut self,
        api_key: Option<String>,
        model: Option<String>,
        base_url: Option<String>,
    ) -> Self {
        if let Some(key) = api_key {
            self.api_key = key;
        }
        if let Some(model) = model {
            self.model = model;
        }
        if let Some(url) = base_url {
            self.base_url = url;
        }
        self
    }

    /// Full `generateContent` URL, without the key.
    pub fn endpoint(&self) -> String {
        f!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl TryFrom<GeminiArgs> for GeminiConfig {
    type Error = Error;

    fn try_from(args: GeminiArgs) -> std::result::Result<Self, Self::Error> {
        let api_key = args
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                Error::Config("Missing API key, pass --api-key or set GEMINI_API_KEY".into())
            })?;

        Ok(Self {
            api_key,
            model: args.model,
            base_url: args.api_base,
            timeout: Duration::from_secs(args.timeout),
        })
    }
}
