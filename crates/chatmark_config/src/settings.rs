use std::fmt;
use std::time::Duration;

use derive_setters::Setters;
use serde::Deserialize;
use url::Url;

use crate::{ConfigError, Result};

#[derive(Clone, PartialEq, Deserialize, Setters)]
#[setters(into)]
pub struct ProviderConfig {
    /// Chat-completion endpoint.
    pub url: Url,
    /// Sent as a bearer token when present.
    #[serde(default)]
    #[setters(strip_option)]
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
    /// How many earlier messages accompany each new prompt.
    pub history_limit: usize,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("url", &self.url.as_str())
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("top_p", &self.top_p)
            .field("history_limit", &self.history_limit)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Setters)]
pub struct ScheduleConfig {
    pub batch_size: u64,
    pub long_delta_threshold: usize,
    pub pacing_ms: u64,
}

impl ScheduleConfig {
    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Setters)]
pub struct ChatmarkConfig {
    pub provider: ProviderConfig,
    pub schedule: ScheduleConfig,
}

impl ChatmarkConfig {
    /// Reject values that load fine but make no sense at runtime.
    pub fn validate(self) -> Result<Self> {
        if self.schedule.batch_size == 0 {
            return Err(ConfigError::Invalid {
                key: "schedule.batch_size",
                reason: "must be at least 1".to_string(),
            });
        }

        if !(0.0..=2.0).contains(&self.provider.temperature) {
            return Err(ConfigError::Invalid {
                key: "provider.temperature",
                reason: format!("{} is outside 0.0..=2.0", self.provider.temperature),
            });
        }

        if !(0.0..=1.0).contains(&self.provider.top_p) {
            return Err(ConfigError::Invalid {
                key: "provider.top_p",
                reason: format!("{} is outside 0.0..=1.0", self.provider.top_p),
            });
        }

        Ok(self)
    }
}
