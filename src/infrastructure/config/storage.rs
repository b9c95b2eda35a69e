//! Locates and loads the TOML config file.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use super::app_config::{AppConfig, project_dirs};

const CONFIG_FILE_NAME: &str = "config.toml";

/// Config file errors.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ConfigError {
    #[error("no home directory to place config.toml in")]
    NoConfigDir,

    #[error("config file io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to render default config: {0}")]
    Render(#[from] toml::ser::Error),
}

/// Owns the location of the config file.
#[derive(Debug, Clone)]
pub struct StorageManager {
    config_path: PathBuf,
}

impl StorageManager {
    /// Uses `config.toml` in the per-user config directory.
    ///
    /// # Errors
    /// Returns error if no home directory can be determined.
    pub fn new() -> Result<Self, ConfigError> {
        let dirs = project_dirs().ok_or(ConfigError::NoConfigDir)?;
        Ok(Self::at(dirs.config_dir().join(CONFIG_FILE_NAME)))
    }

    /// Uses an explicit config file, as given with `--config`.
    #[must_use]
    pub const fn at(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Loads the config.
    ///
    /// A missing file is created with the defaults. A file that does not parse
    /// is left as is and the defaults are used for this run.
    ///
    /// # Errors
    /// Returns error if the file cannot be read, or the default file cannot be
    /// written.
    pub fn load_config(&self) -> Result<AppConfig, ConfigError> {
        let path = &self.config_path;
        if !path.exists() {
            let config = AppConfig::default();
            write_atomically(path, &toml::to_string_pretty(&config)?)?;
            info!(path = %path.display(), "Wrote default config");
            return Ok(config);
        }

        let text = fs::read_to_string(path)?;
        let config = match toml::from_str::<AppConfig>(&text) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Config does not parse, using defaults");
                return Ok(AppConfig::default());
            }
        };

        for source in config.sources.iter().filter(|s| s.keywords.is_empty()) {
            warn!(source = %source.display_name(), "Source has no keywords and can never match");
        }
        debug!(path = %path.display(), sources = config.sources.len(), "Loaded config");
        Ok(config)
    }
}

fn write_atomically(path: &Path, contents: &str) -> Result<(), ConfigError> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut staged = tempfile::NamedTempFile::new_in(dir)?;
    staged.write_all(contents.as_bytes())?;
    staged.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::ChannelKind;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gets_default_schema() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let config = StorageManager::at(path.clone()).load_config().unwrap();

        assert_eq!(config.send_retries, 3);
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("send_retries = 3"));
        assert!(written.contains("cache_dir = "));
        let reparsed: AppConfig = toml::from_str(&written).unwrap();
        assert_eq!(reparsed.cooldown, config.cooldown);
        assert_eq!(reparsed.channel.kind, ChannelKind::Console);
    }

    #[test]
    fn test_sources_and_channel_are_loaded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("picrelay.toml");
        fs::write(
            &path,
            r#"
                cooldown = 3

                [channel]
                kind = "webhook"
                webhook_url = "https://hooks.test/x"

                [[sources]]
                name = "cats"
                keywords = ["cat"]
                apis = ["https://a.test/random", "  "]
            "#,
        )
        .unwrap();

        let config = StorageManager::at(path).load_config().unwrap();

        assert_eq!(config.cooldown, 3);
        assert_eq!(config.channel.webhook_url.as_deref(), Some("https://hooks.test/x"));
        assert_eq!(config.sources[0].display_name(), "cats");
        assert_eq!(config.sources[0].apis.len(), 2);
    }

    #[test]
    fn test_unparsable_sources_fall_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        let broken = "[[sources]]\nkeywords = \"cat\"\n";
        fs::write(&path, broken).unwrap();

        let config = StorageManager::at(path.clone()).load_config().unwrap();

        assert!(config.sources.is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), broken);
    }

    #[test]
    fn test_source_without_keywords_still_loads() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[[sources]]\napis = [\"https://a.test\"]\n").unwrap();

        let config = StorageManager::at(path).load_config().unwrap();

        assert_eq!(config.sources.len(), 1);
        assert!(config.sources[0].keywords.is_empty());
    }
}
