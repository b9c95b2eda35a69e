//! Application configuration.

pub mod app_config;
pub mod args;
pub mod storage;

pub use app_config::{
    AppConfig, CLEANUP_GRACE, ChannelConfig, ChannelKind, LogLevel, REQUEST_TIMEOUT, RETRY_DELAY,
};
pub use args::CliArgs;
pub use storage::{ConfigError, StorageManager};
