use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::models::AggregationSettings;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub directory: DirectorySettings,
    #[serde(default)]
    pub suggester: SuggesterSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectoryBackend {
    Memory,
    Postgres,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DirectorySettings {
    #[serde(default = "default_backend")]
    pub backend: DirectoryBackend,
    /// JSON array of profiles loaded at startup
    pub seed_path: Option<String>,
    pub database_url: Option<String>,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

impl Default for DirectorySettings {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            seed_path: None,
            database_url: None,
            max_connections: None,
            min_connections: None,
            acquire_timeout_secs: None,
            idle_timeout_secs: None,
        }
    }
}

fn default_backend() -> DirectoryBackend { DirectoryBackend::Memory }

#[derive(Debug, Clone, Deserialize)]
pub struct SuggesterSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_roster")]
    pub max_roster: usize,
}

impl Default for SuggesterSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: default_base_url(),
            api_key: None,
            model: default_model(),
            timeout_ms: default_timeout_ms(),
            temperature: default_temperature(),
            max_roster: default_max_roster(),
        }
    }
}

impl SuggesterSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

fn default_base_url() -> String { "https://api.openai.com".to_string() }
fn default_model() -> String { "gpt-4o-mini".to_string() }
fn default_timeout_ms() -> u64 { 8000 }
fn default_temperature() -> f32 { 0.2 }
fn default_max_roster() -> usize { 100 }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_baseline_score")]
    pub baseline_score: f64,
    #[serde(default)]
    pub min_ai_score: f64,
    #[serde(default = "default_true")]
    pub include_ai_only: bool,
    pub max_results: Option<usize>,
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            baseline_score: default_baseline_score(),
            min_ai_score: 0.0,
            include_ai_only: true,
            max_results: None,
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

impl MatchingSettings {
    /// Aggregator settings, with scores clamped into [0, 1]
    pub fn aggregation(&self) -> AggregationSettings {
        AggregationSettings {
            baseline_score: self.baseline_score.clamp(0.0, 1.0),
            min_ai_score: self.min_ai_score.clamp(0.0, 1.0),
            include_ai_only: self.include_ai_only,
            max_results: self.max_results,
        }
    }

    /// Requested page size capped at `max_limit`
    pub fn effective_limit(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or(self.default_limit).min(self.max_limit)
    }
}

fn default_baseline_score() -> f64 { 1.0 }
fn default_true() -> bool { true }
fn default_limit() -> usize { 20 }
fn default_max_limit() -> usize { 100 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with SKILLSWAP)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., SKILLSWAP__SERVER__PORT -> server.port
            .add_source(env_source())
            .build()?;

        apply_env_fallbacks(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?;

        apply_env_fallbacks(settings)?.try_deserialize()
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("SKILLSWAP")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Fill secrets from the conventional variables when not set explicitly
///
/// `DATABASE_URL` feeds `directory.database_url`, `OPENAI_API_KEY` feeds
/// `suggester.api_key`.
fn apply_env_fallbacks(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings.clone());

    if settings.get_string("directory.database_url").is_err() {
        if let Ok(url) = env::var("DATABASE_URL") {
            builder = builder.set_override("directory.database_url", url)?;
        }
    }

    if settings.get_string("suggester.api_key").is_err() {
        if let Ok(key) = env::var("OPENAI_API_KEY") {
            builder = builder.set_override("suggester.api_key", key)?;
        }
    }

    builder.build()
}
