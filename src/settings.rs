use anyhow::{anyhow, Result};
use log::{info, LevelFilter};
use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::env;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const DEFAULT_CLOCK_LABEL: &str = "9:41";
pub const ASSETS_DIR_ENV: &str = "PEOPLE_ASSETS_DIR";

#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Settings {
    #[serde(default)]
    pub assets_dir: Option<PathBuf>,
    #[serde(default)]
    pub log_level: Option<String>,
    #[serde(default)]
    pub clock_label: Option<String>,
}

impl Settings {
    /// Layer `over` on top of `self`; any field set in `over` wins.
    pub fn merge(self, over: Settings) -> Settings {
        Settings {
            assets_dir: over.assets_dir.or(self.assets_dir),
            log_level: over.log_level.or(self.log_level),
            clock_label: over.clock_label.or(self.clock_label),
        }
    }

    /// Settings taken from the environment.
    pub fn from_env() -> Settings {
        Settings {
            assets_dir: env::var_os(ASSETS_DIR_ENV).map(PathBuf::from),
            ..Settings::default()
        }
    }

    pub fn level_filter(&self) -> Result<LevelFilter> {
        match &self.log_level {
            Some(level) => LevelFilter::from_str(level)
                .map_err(|_| anyhow!("Invalid log level '{}'", level)),
            None => Ok(LevelFilter::Info),
        }
    }

    pub fn clock_label(&self) -> &str {
        self.clock_label.as_deref().unwrap_or(DEFAULT_CLOCK_LABEL)
    }
}

static CONFIG_PATH_OVERRIDE: OnceCell<PathBuf> = OnceCell::new();

/// Point settings loading at a specific file instead of the config directory.
pub fn set_config_path_override(path: PathBuf) {
    let _ = CONFIG_PATH_OVERRIDE.set(path);
}

fn get_config_path() -> Result<PathBuf> {
    if let Some(path) = CONFIG_PATH_OVERRIDE.get() {
        return Ok(path.clone());
    }
    let config_dir = dirs::config_dir()
        .ok_or_else(|| anyhow!("Could not determine config directory"))?
        .join("people-screen");
    Ok(config_dir.join("settings.json"))
}

/// Load the settings file; a missing file yields default settings.
pub fn load_settings() -> Result<Settings> {
    load_settings_from(&get_config_path()?)
}

fn load_settings_from(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }

    let mut file = File::open(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;

    let settings: Settings = serde_json::from_str(&contents)
        .map_err(|e| anyhow!("Invalid settings file {}: {}", path.display(), e))?;
    info!("Loaded settings from {}", path.display());

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings_from(&dir.path().join("settings.json")).unwrap();

        assert_eq!(settings, Settings::default());
        assert_eq!(settings.clock_label(), "9:41");
        assert_eq!(settings.level_filter().unwrap(), LevelFilter::Info);
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "assets_dir": "/srv/avatars", "log_level": "debug" }"#).unwrap();

        let settings = load_settings_from(&path).unwrap();

        assert_eq!(settings.assets_dir, Some(PathBuf::from("/srv/avatars")));
        assert_eq!(settings.level_filter().unwrap(), LevelFilter::Debug);
        assert_eq!(settings.clock_label, None);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_settings_from(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid settings file"));
    }

    #[test]
    fn test_merge_prefers_override() {
        let file = Settings {
            assets_dir: Some(PathBuf::from("from-file")),
            log_level: Some("warn".to_string()),
            clock_label: Some("10:00".to_string()),
        };
        let cli = Settings {
            assets_dir: Some(PathBuf::from("from-cli")),
            ..Settings::default()
        };

        let merged = file.merge(cli);

        assert_eq!(merged.assets_dir, Some(PathBuf::from("from-cli")));
        assert_eq!(merged.log_level.as_deref(), Some("warn"));
        assert_eq!(merged.clock_label(), "10:00");
    }

    #[test]
    fn test_environment_sits_between_file_and_cli() {
        env::set_var(ASSETS_DIR_ENV, "/from/env");
        let from_env = Settings::from_env();
        env::remove_var(ASSETS_DIR_ENV);

        assert_eq!(from_env.assets_dir, Some(PathBuf::from("/from/env")));
        assert_eq!(from_env.log_level, None);
        assert_eq!(from_env.clock_label, None);

        let file = Settings {
            assets_dir: Some(PathBuf::from("/from/file")),
            log_level: Some("debug".to_string()),
            ..Settings::default()
        };

        let without_cli = file.clone().merge(from_env.clone()).merge(Settings::default());
        assert_eq!(without_cli.assets_dir, Some(PathBuf::from("/from/env")));
        assert_eq!(without_cli.log_level.as_deref(), Some("debug"));

        let cli = Settings {
            assets_dir: Some(PathBuf::from("/from/cli")),
            ..Settings::default()
        };
        let with_cli = file.merge(from_env).merge(cli);
        assert_eq!(with_cli.assets_dir, Some(PathBuf::from("/from/cli")));
    }

    #[test]
    fn test_bad_log_level() {
        let settings = Settings {
            log_level: Some("loud".to_string()),
            ..Settings::default()
        };
        assert!(settings.level_filter().is_err());
    }
}
