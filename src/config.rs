//! Client configuration.

use std::time::Duration;

use crate::error::{CozeError, CozeResult};

/// Default API endpoint (international site).
pub const COZE_COM_BASE_URL: &str = "https://api.coze.com";
/// API endpoint of the China site.
pub const COZE_CN_BASE_URL: &str = "https://api.coze.cn";
/// Streams of long answers stay open for minutes.
pub const DEFAULT_TIMEOUT_SECS: u64 = 600;

pub const ENV_API_TOKEN: &str = "COZE_API_TOKEN";
pub const ENV_API_BASE: &str = "COZE_API_BASE";
pub const ENV_TIMEOUT_SECS: &str = "COZE_TIMEOUT_SECS";

/// Connection settings for [`crate::client::ChatClient`].
///
/// # Example
///
/// ```ignore
/// use coze_chat::config::CozeConfig;
///
/// let config = CozeConfig::new("pat_xxx")
///     .with_base_url("https://api.coze.cn")
///     .with_timeout_secs(60);
/// ```
#[derive(Clone)]
pub struct CozeConfig {
    /// Base URL without trailing slash
    pub base_url: String,
    /// Personal access token sent as a Bearer token
    pub api_token: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for CozeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CozeConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for CozeConfig {
    fn default() -> Self {
        Self {
            base_url: COZE_COM_BASE_URL.to_string(),
            api_token: String::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl CozeConfig {
    pub fn new(api_token: impl Into<String>) -> Self {
        Self::default().with_api_token(api_token)
    }

    pub fn with_api_token(mut self, api_token: impl Into<String>) -> Self {
        self.api_token = api_token.into();
        self
    }

    /// Set the base URL. A trailing slash is dropped.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = normalize_base_url(&base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_timeout_secs(self, secs: u64) -> Self {
        self.with_timeout(Duration::from_secs(secs))
    }

    /// Build from `COZE_API_TOKEN`, `COZE_API_BASE` and `COZE_TIMEOUT_SECS`.
    /// Only the token is required.
    pub fn from_env() -> CozeResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> CozeResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_token = lookup(ENV_API_TOKEN)
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| CozeError::Config(format!("{} is not set", ENV_API_TOKEN)))?;

        let mut config = Self::new(api_token);

        if let Some(base_url) = lookup(ENV_API_BASE).filter(|v| !v.trim().is_empty()) {
            config = config.with_base_url(base_url.trim());
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                CozeError::Config(format!("{} must be a number of seconds, got '{}'", ENV_TIMEOUT_SECS, raw))
            })?;
            config = config.with_timeout_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    /// Check the settings are usable.
    pub fn validate(&self) -> CozeResult<()> {
        if self.api_token.is_empty() {
            return Err(CozeError::Config("API token is empty".to_string()));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(CozeError::Config(format!(
                "base URL must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        if self.timeout.is_zero() {
            return Err(CozeError::Config("timeout must be positive".to_string()));
        }
        Ok(())
    }

    /// Join an API path such as `/v3/chat` onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
