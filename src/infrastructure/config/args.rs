//! Command line arguments.

use super::app_config::LogLevel;
use clap::Parser;
use std::path::PathBuf;

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "picrelay",
    version,
    about = "Fetch an image for a trigger message and deliver it with retries",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Directory for transient image files.
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Verify upstream TLS certificates.
    #[arg(long)]
    pub verify_ssl: Option<bool>,

    /// Delivery retries after the first attempt.
    #[arg(long)]
    pub send_retries: Option<u32>,

    /// Sender identity used for cooldowns.
    #[arg(short, long, default_value = "local", env = "PICRELAY_USER")]
    pub user: String,

    /// Trigger message text.
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

impl CliArgs {
    /// Returns the trigger text as typed.
    #[must_use]
    pub fn trigger_text(&self) -> String {
        self.text.join(" ")
    }
}
