//! Configuration management for minitools.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::ui::Theme;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Starting state of every new session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_opening_balance")]
    pub atm_opening_balance: u64,
    /// Fixed seed for the games; drawn from the OS when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Username -> password table for the login demo.
    #[serde(default = "default_accounts")]
    pub accounts: BTreeMap<String, String>,
}

fn default_opening_balance() -> u64 {
    10_000
}

fn default_accounts() -> BTreeMap<String, String> {
    [
        ("admin", "password123"),
        ("user", "user123"),
        ("test", "test123"),
    ]
    .into_iter()
    .map(|(user, pass)| (user.to_string(), pass.to_string()))
    .collect()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            atm_opening_balance: default_opening_balance(),
            seed: None,
            accounts: default_accounts(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub theme: Theme,
    /// Event poll interval of the terminal UI, in milliseconds.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

fn default_tick_ms() -> u64 {
    100
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            tick_ms: default_tick_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// `tracing` filter directive, e.g. `info` or `minitools=debug`.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file; `~/.minitools/minitools.log` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl AppConfig {
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".minitools"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load from `path`, falling back to defaults when the file is absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Apply `MINITOOLS_*` environment overrides.
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(theme) = std::env::var("MINITOOLS_THEME") {
            self.ui.theme = theme
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e))
                .context("Invalid MINITOOLS_THEME")?;
        }
        if let Ok(level) = std::env::var("MINITOOLS_LOG") {
            self.log.level = level;
        }
        Ok(())
    }

    pub fn save_default_to(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        let default = Self::default();
        let content = toml::to_string_pretty(&default).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.session.atm_opening_balance, 10_000);
        assert_eq!(config.session.accounts.len(), 3);
        assert_eq!(config.ui.theme, Theme::Dark);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_save_default_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        AppConfig::save_default_to(&path).unwrap();
        assert!(path.exists());

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.session.atm_opening_balance, 10_000);
        assert_eq!(
            config.session.accounts.get("admin").map(String::as_str),
            Some("password123")
        );
        assert_eq!(config.ui.tick_ms, 100);
        assert!(config.session.seed.is_none());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[session]\natm_opening_balance = 500\nseed = 7\n\n[ui]\ntheme = \"light\"\n",
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.session.atm_opening_balance, 500);
        assert_eq!(config.session.seed, Some(7));
        assert_eq!(config.session.accounts.len(), 3);
        assert_eq!(config.ui.theme, Theme::Light);
        assert_eq!(config.ui.tick_ms, 100);
    }

    #[test]
    fn test_bad_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[session\n").unwrap();
        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
