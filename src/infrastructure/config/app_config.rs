//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::args::CliArgs;
use crate::application::services::CompressionConfig;
use crate::application::use_cases::DeliveryPolicy;
use crate::domain::entities::Source;

const APP_NAME: &str = "picrelay";
const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "linuxmobile";

/// Per-user directories for config and data files.
pub(crate) fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
}

/// Upstream request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Pause between delivery attempts.
pub const RETRY_DELAY: Duration = Duration::from_secs(1);
/// How long a persisted image outlives its delivery.
pub const CLEANUP_GRACE: Duration = Duration::from_secs(15);

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Where outbound messages go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    /// Print to stdout.
    #[default]
    Console,
    /// POST to a webhook URL.
    Webhook,
}

/// Outbound channel configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// Channel adapter.
    #[serde(default)]
    pub kind: ChannelKind,

    /// Target URL for the webhook channel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Log file path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Per-user cooldown in seconds.
    #[serde(default = "default_cooldown")]
    pub cooldown: u64,

    /// Recompress oversized images.
    #[serde(default = "default_true")]
    pub compress_enable: bool,

    /// Recompression threshold in megabytes.
    #[serde(default = "default_compress_threshold")]
    pub compress_threshold: u64,

    /// JPEG quality used when recompressing.
    #[serde(default = "default_compress_quality")]
    pub compress_quality: u8,

    /// Delivery retries after the first attempt.
    #[serde(default = "default_send_retries")]
    pub send_retries: u32,

    /// Verify upstream TLS certificates.
    #[serde(default)]
    pub verify_ssl: bool,

    /// Directory for transient image files.
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    /// Outbound channel.
    #[serde(default)]
    pub channel: ChannelConfig,

    /// Content sources, matched in order.
    #[serde(default)]
    pub sources: Vec<Source>,
}

fn default_true() -> bool {
    true
}

fn default_cooldown() -> u64 {
    10
}

fn default_compress_threshold() -> u64 {
    5
}

fn default_compress_quality() -> u8 {
    85
}

fn default_send_retries() -> u32 {
    3
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("data").join("temp_images")
}


impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(cache_dir) = &args.cache_dir {
            self.cache_dir = cache_dir.clone();
        }
        if let Some(verify_ssl) = args.verify_ssl {
            self.verify_ssl = verify_ssl;
        }
        if let Some(send_retries) = args.send_retries {
            self.send_retries = send_retries;
        }
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.data_dir().join("picrelay.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }

    /// Resolves the cache directory against the working directory.
    #[must_use]
    pub fn effective_cache_dir(&self) -> PathBuf {
        if self.cache_dir.is_absolute() {
            return self.cache_dir.clone();
        }
        std::env::current_dir()
            .map(|cwd| cwd.join(&self.cache_dir))
            .unwrap_or_else(|_| self.cache_dir.clone())
    }

    /// Returns the per-user cooldown.
    #[must_use]
    pub const fn cooldown_duration(&self) -> Duration {
        Duration::from_secs(self.cooldown)
    }

    /// Returns the recompression policy.
    #[must_use]
    pub const fn compression(&self) -> CompressionConfig {
        CompressionConfig::from_megabytes(
            self.compress_enable,
            self.compress_threshold,
            self.compress_quality,
        )
    }

    /// Returns the delivery policy.
    #[must_use]
    pub const fn delivery_policy(&self) -> DeliveryPolicy {
        DeliveryPolicy {
            send_retries: self.send_retries,
            retry_delay: RETRY_DELAY,
            compression: self.compression(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_path: None,
            log_level: LogLevel::Info,
            cooldown: default_cooldown(),
            compress_enable: true,
            compress_threshold: default_compress_threshold(),
            compress_quality: default_compress_quality(),
            send_retries: default_send_retries(),
            verify_ssl: false,
            cache_dir: default_cache_dir(),
            channel: ChannelConfig::default(),
            sources: Vec::new(),
        }
    }
}
