use thiserror::Error;
use url::Url;

/// Default OpenAI-compatible endpoint (Gemini).
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
pub const DEFAULT_PROBLEM_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_FEEDBACK_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Validated settings for the text-generation service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AiSettings {
    api_key: Option<String>,
    base_url: String,
    problem_model: String,
    feedback_model: String,
    timeout_secs: u64,
}

#[derive(Clone, Debug, Default)]
pub struct AiSettingsDraft {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub problem_model: Option<String>,
    pub feedback_model: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AiSettingsError {
    #[error("invalid base URL")]
    InvalidBaseUrl,
    #[error("request timeout must be at least one second")]
    ZeroTimeout,
}

impl AiSettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and normalize the draft, filling defaults for missing values.
    ///
    /// # Errors
    ///
    /// Returns `AiSettingsError` if the base URL is present but invalid, or the
    /// timeout is zero.
    pub fn validate(self) -> Result<AiSettings, AiSettingsError> {
        let api_key = normalize_optional(self.api_key);
        let base_url =
            normalize_optional(self.base_url).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let problem_model = normalize_optional(self.problem_model)
            .unwrap_or_else(|| DEFAULT_PROBLEM_MODEL.to_string());
        let feedback_model = normalize_optional(self.feedback_model)
            .unwrap_or_else(|| DEFAULT_FEEDBACK_MODEL.to_string());
        let timeout_secs = self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);

        if Url::parse(&base_url).is_err() {
            return Err(AiSettingsError::InvalidBaseUrl);
        }
        if timeout_secs == 0 {
            return Err(AiSettingsError::ZeroTimeout);
        }

        Ok(AiSettings {
            api_key,
            base_url,
            problem_model,
            feedback_model,
            timeout_secs,
        })
    }
}

impl AiSettings {
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn problem_model(&self) -> &str {
        &self.problem_model
    }

    #[must_use]
    pub fn feedback_model(&self) -> &str {
        &self.feedback_model
    }

    #[must_use]
    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    /// True when an API key is configured.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            problem_model: DEFAULT_PROBLEM_MODEL.to_string(),
            feedback_model: DEFAULT_FEEDBACK_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}
