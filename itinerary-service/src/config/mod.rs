use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::services::providers::{
    CloudChatConfig, CloudChatProvider, GenerationProvider, LocalModelConfig, LocalModelProvider,
    MockGenerationProvider,
};

/// Which backend turns prompts into itineraries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationStrategy {
    Cloud,
    Local,
    Mock,
}

impl fmt::Display for GenerationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GenerationStrategy::Cloud => "cloud",
            GenerationStrategy::Local => "local",
            GenerationStrategy::Mock => "mock",
        };
        f.write_str(name)
    }
}

impl FromStr for GenerationStrategy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cloud" => Ok(GenerationStrategy::Cloud),
            "local" => Ok(GenerationStrategy::Local),
            "mock" => Ok(GenerationStrategy::Mock),
            other => Err(AppError::ConfigError(anyhow::anyhow!(
                "Unknown GENERATION_STRATEGY '{}': expected cloud, local or mock",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ItineraryConfig {
    pub common: core_config::Config,
    pub strategy: GenerationStrategy,
    pub local: LocalModelConfig,
    pub cloud: CloudChatConfig,
    pub static_dir: String,
    pub request_timeout: Duration,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
}

impl ItineraryConfig {
    /// The shared loader reads `.env` first, so service variables may come
    /// from it as well.
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        Self::from_lookup(common, |key| env::var(key).ok())
    }

    /// Builds the service settings from `lookup`, which maps a variable name
    /// to its value. Unset variables take their defaults.
    pub fn from_lookup<F>(common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get_env = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let local_defaults = LocalModelConfig::default();
        let cloud_defaults = CloudChatConfig::default();

        let otlp_endpoint = lookup("OTLP_ENDPOINT").filter(|endpoint| !endpoint.trim().is_empty());

        Ok(ItineraryConfig {
            common,
            strategy: get_env("GENERATION_STRATEGY", "cloud").parse()?,
            local: LocalModelConfig {
                base_url: get_env("LOCAL_MODEL_URL", &local_defaults.base_url),
                model: get_env("LOCAL_MODEL_NAME", &local_defaults.model),
            },
            cloud: CloudChatConfig {
                base_url: get_env("CLOUD_CHAT_URL", &cloud_defaults.base_url),
                model: get_env("CLOUD_CHAT_MODEL", &cloud_defaults.model),
                // not validated here; a missing key surfaces as a provider auth failure
                api_key: Secret::new(get_env("NVIDIA_API_KEY", "")),
                temperature: parse_env(&lookup, "CLOUD_CHAT_TEMPERATURE", cloud_defaults.temperature)?,
                top_p: parse_env(&lookup, "CLOUD_CHAT_TOP_P", cloud_defaults.top_p)?,
                max_tokens: parse_env(&lookup, "CLOUD_CHAT_MAX_TOKENS", cloud_defaults.max_tokens)?,
            },
            static_dir: get_env("STATIC_DIR", "itinerary-service/static"),
            request_timeout: Duration::from_secs(parse_env(&lookup, "REQUEST_TIMEOUT_SECS", 300)?),
            log_level: get_env("LOG_LEVEL", "info"),
            otlp_endpoint,
        })
    }

    /// The provider selected by `strategy`.
    pub fn build_provider(&self) -> Arc<dyn GenerationProvider> {
        match self.strategy {
            GenerationStrategy::Cloud => Arc::new(CloudChatProvider::new(self.cloud.clone())),
            GenerationStrategy::Local => Arc::new(LocalModelProvider::new(self.local.clone())),
            GenerationStrategy::Mock => Arc::new(MockGenerationProvider::default()),
        }
    }
}

fn parse_env<F, T>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!("{} has invalid value '{}': {}", key, raw, e))
        }),
    }
}
