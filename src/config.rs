//! Runtime configuration.
//!
//! [`MatcherConfig`] controls how a matching run executes. [`AdvisoryConfig`]
//! holds the settings of the optional advisory client; it is normally read
//! from the environment. Scoring weights are compile-time constants in
//! [`scoring`](crate::scoring) and are deliberately absent here.

use std::env;
use std::time::Duration;

/// Matcher execution settings.
///
/// # Defaults
///
/// ```
/// use u_sourcing::config::MatcherConfig;
///
/// let config = MatcherConfig::default();
/// assert!(!config.parallel);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MatcherConfig {
    /// Whether to score companies in parallel using rayon.
    ///
    /// Only effective with the `parallel` feature. Output order is the same
    /// either way.
    pub parallel: bool,
}

impl MatcherConfig {
    /// Enables or disables parallel scoring.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Default OpenAI-compatible endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
/// Default model name.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
/// Default completion budget. A boost object is tiny.
pub const DEFAULT_MAX_TOKENS: u32 = 120;

/// Advisory client settings.
#[derive(Debug, Clone, PartialEq)]
pub struct AdvisoryConfig {
    /// Bearer token.
    pub api_key: String,
    /// API base URL, without the trailing `/chat/completions`.
    pub base_url: String,
    /// Model (or deployment) name.
    pub model: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Maximum completion tokens.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

impl AdvisoryConfig {
    /// Creates a config with defaults for everything but the key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: 0.0,
        }
    }

    /// Reads the config from the process environment.
    ///
    /// Returns `None` when `OPENAI_API_KEY` is unset or blank, which leaves the
    /// advisory service disabled.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable lookup.
    ///
    /// | Variable | Field |
    /// |----------|-------|
    /// | `OPENAI_API_KEY` | `api_key` (required) |
    /// | `OPENAI_BASE_URL` | `base_url` |
    /// | `OPENAI_MODEL` | `model` |
    /// | `CMA_LLM_TIMEOUT_SEC` | `timeout` |
    /// | `CMA_LLM_MAX_TOKENS` | `max_tokens` |
    /// | `CMA_LLM_TEMPERATURE` | `temperature` |
    ///
    /// Unparsable numbers fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let mut config = Self::new(non_blank("OPENAI_API_KEY")?.trim());
        if let Some(url) = non_blank("OPENAI_BASE_URL") {
            config.base_url = url.trim().trim_end_matches('/').to_string();
        }
        if let Some(model) = non_blank("OPENAI_MODEL") {
            config.model = model.trim().to_string();
        }
        if let Some(timeout) = non_blank("CMA_LLM_TIMEOUT_SEC")
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|secs| *secs > 0.0)
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
        {
            config.timeout = timeout;
        }
        if let Some(n) = non_blank("CMA_LLM_MAX_TOKENS").and_then(|v| v.trim().parse().ok()) {
            config.max_tokens = n;
        }
        if let Some(t) = non_blank("CMA_LLM_TEMPERATURE").and_then(|v| v.trim().parse().ok()) {
            config.temperature = t;
        }
        Some(config)
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `{base_url}/chat/completions`.
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}
