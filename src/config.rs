use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "ContractGuard";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Gemini model used for both analysis stages.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Google Generative Language API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Per-request timeout for model calls (seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default tracing filter when RUST_LOG is not set.
pub fn default_log_filter() -> &'static str {
    "contractguard=info"
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("GOOGLE_API_KEY is not set")]
    MissingApiKey,
}

/// Model endpoint configuration, passed explicitly into the client at
/// construction. The pipeline itself never reads process environment;
/// `from_env` is the single composition-boundary helper that does.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl ModelConfig {
    pub fn new(api_key: &str) -> Self {
        Self {
            // Keys pasted from the console often carry stray whitespace
            api_key: api_key.trim().to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Read `GOOGLE_API_KEY` from the environment. Intended for binaries at
    /// startup, not for the analysis path.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var("GOOGLE_API_KEY") {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(&key)),
            _ => Err(ConfigError::MissingApiKey),
        }
    }
}
