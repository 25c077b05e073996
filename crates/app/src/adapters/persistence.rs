use anyhow::{Context, Result};
use directories::ProjectDirs;
use gitact_core::ports::{AppConfig, ConfigStore};
use std::fs;
use std::path::{Path, PathBuf};

/// File-based configuration store that implements ConfigStore
pub struct FileConfigStore {
    config_path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Result<Self> {
        let config_path = Self::get_default_config_path()?;
        Ok(Self { config_path })
    }

    pub fn with_path<P: AsRef<Path>>(config_path: P) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    fn get_default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("", "", "gitact")
            .context("Failed to determine project directories")?;

        let config_dir = proj_dirs.config_dir();
        Ok(config_dir.join("gitact.toml"))
    }

    /// Create default config if it doesn't exist
    fn ensure_config_exists(&self) -> Result<()> {
        if !self.config_path.exists() {
            if let Some(parent) = self.config_path.parent() {
                fs::create_dir_all(parent)
                    .context("Failed to create config directory")?;
            }
            self.save(&AppConfig::default())?;
        }
        Ok(())
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Result<AppConfig> {
        self.ensure_config_exists()?;

        let contents = fs::read_to_string(&self.config_path)
            .with_context(|| format!("Failed to read config file: {}", self.config_path.display()))?;

        let config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", self.config_path.display()))?;

        Ok(config)
    }

    fn save(&self, config: &AppConfig) -> Result<()> {
        let contents = toml::to_string_pretty(config)
            .context("Failed to serialize config to TOML")?;

        fs::write(&self.config_path, contents)
            .with_context(|| format!("Failed to write config file: {}", self.config_path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_load_nonexistent_creates_default() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("nested").join("nonexistent.toml");

        let store = FileConfigStore::with_path(&config_path);
        let config = store.load()?;

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.ui.notification_secs, 3);

        // Should have created the file
        assert!(config_path.exists());

        Ok(())
    }

    #[test]
    fn test_config_save_and_load() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("test.toml");

        let store = FileConfigStore::with_path(&config_path);

        let mut config = AppConfig::default();
        config.github.api_url = "http://localhost:8080".to_string();
        config.github.per_page = 30;
        config.ui.notification_secs = 5;
        config.log_file = Some(PathBuf::from("/tmp/gitact.log"));

        store.save(&config)?;
        let loaded_config = store.load()?;

        assert_eq!(config, loaded_config);

        Ok(())
    }

    #[test]
    fn test_token_is_never_written() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("test.toml");
        let store = FileConfigStore::with_path(&config_path);

        let mut config = AppConfig::default();
        config.github.token = Some("ghp_secret".to_string());
        store.save(&config)?;

        let written = fs::read_to_string(&config_path)?;
        assert!(!written.contains("ghp_secret"));
        assert_eq!(store.load()?.github.token, None);

        Ok(())
    }

    #[test]
    fn test_partial_file_uses_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("partial.toml");
        fs::write(&config_path, "version = 1\n[ui]\nnotification_secs = 7\n")?;

        let config = FileConfigStore::with_path(&config_path).load()?;
        assert_eq!(config.ui.notification_secs, 7);
        assert_eq!(config.ui.tick_millis, 100);
        assert_eq!(config.github.api_url, "https://api.github.com");

        Ok(())
    }

    #[test]
    fn test_get_default_config_path() -> Result<()> {
        let path = FileConfigStore::get_default_config_path()?;
        assert!(path.ends_with("gitact.toml"));
        Ok(())
    }
}
