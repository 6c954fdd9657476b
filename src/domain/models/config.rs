use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for Foreman
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Cache lifetimes and budgets
    #[serde(default)]
    pub cache: CacheConfig,

    /// Progress extraction settings
    #[serde(default)]
    pub progress: ProgressConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CacheConfig {
    /// TTL for small resource descriptors (pod phases), in milliseconds
    #[serde(default = "default_ttl_ms")]
    pub descriptor_ttl_ms: u64,

    /// TTL for raw and prettified log text, in milliseconds
    #[serde(default = "default_ttl_ms")]
    pub logs_ttl_ms: u64,

    /// Byte budget for each log text cache
    #[serde(default = "default_logs_max_bytes")]
    pub logs_max_bytes: usize,
}

const fn default_ttl_ms() -> u64 {
    5000
}

const fn default_logs_max_bytes() -> usize {
    256 * 1024 * 1024
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            descriptor_ttl_ms: default_ttl_ms(),
            logs_ttl_ms: default_ttl_ms(),
            logs_max_bytes: default_logs_max_bytes(),
        }
    }
}

/// Progress extraction configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProgressConfig {
    /// Base URL repositories are resolved against (e.g. the GitLab host)
    #[serde(default)]
    pub repository_base_url: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files; stderr only when unset
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
        }
    }
}
