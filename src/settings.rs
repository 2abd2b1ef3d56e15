use log::{info, warn};
use platform_dirs::AppDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use video_modes::types::DisplayConfig;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("No config directory available on this platform")]
    NoConfigDir,
    #[error("Settings file error")]
    FileError(#[from] std::io::Error),
    #[error("Settings could not be serialized")]
    Serialize(#[from] serde_json::Error),
}

/// Durable storage for an applied display configuration
pub(crate) trait SettingsStore {
    fn save_resolution_settings(&mut self, config: &DisplayConfig) -> anyhow::Result<()>;
}

#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
pub(crate) struct SavedSettings {
    #[serde(default)]
    pub(crate) display: DisplayConfig,
}

impl SavedSettings {
    pub(crate) fn config_file() -> Result<PathBuf, SettingsError> {
        let app_dirs = AppDirs::new(Some("display-setup"), true).ok_or(SettingsError::NoConfigDir)?;
        Ok(app_dirs.config_dir.join("config.json"))
    }

    pub(crate) fn load_from(config_file: &Path) -> Option<Self> {
        let json = std::fs::read_to_string(config_file).ok()?;
        info!("Loaded settings from {:?} with json {}", config_file, json);
        match serde_json::from_str(&json) {
            Ok(settings) => Some(settings),
            Err(e) => {
                warn!("Ignoring unreadable settings in {:?}: {}", config_file, e);
                None
            }
        }
    }

    pub(crate) fn save_to(&self, config_file: &Path) -> Result<(), SettingsError> {
        if let Some(dir) = config_file.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(config_file, serde_json::to_string_pretty(self)?)?;
        info!("Saved settings to {:?}", config_file);
        Ok(())
    }
}

/// Keeps [`SavedSettings`] in a json file, rewriting it on every save
#[derive(Debug, Clone)]
pub(crate) struct JsonSettingsStore {
    config_file: Option<PathBuf>,
    settings: SavedSettings,
}

impl JsonSettingsStore {
    pub(crate) fn new(config_file: Option<PathBuf>, settings: SavedSettings) -> Self {
        Self {
            config_file,
            settings,
        }
    }

    #[cfg(test)]
    pub(crate) fn settings(&self) -> &SavedSettings {
        &self.settings
    }
}

impl SettingsStore for JsonSettingsStore {
    fn save_resolution_settings(&mut self, config: &DisplayConfig) -> anyhow::Result<()> {
        self.settings.display = *config;
        let config_file = self.config_file.as_ref().ok_or(SettingsError::NoConfigDir)?;
        self.settings.save_to(config_file)?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tempfile::TempDir;
    use video_modes::types::Resolution;

    fn scratch_file(temp_dir: &TempDir) -> PathBuf {
        temp_dir.path().join("nested").join("config.json")
    }

    #[test]
    fn save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let file = scratch_file(&temp_dir);
        let settings = SavedSettings {
            display: DisplayConfig {
                resolution: Resolution::new(2560, 1440),
                fullscreen: true,
            },
        };
        settings.save_to(&file).expect("save should create directories");
        assert_eq!(SavedSettings::load_from(&file), Some(settings));
    }

    #[test]
    fn missing_file_loads_nothing() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(SavedSettings::load_from(&scratch_file(&temp_dir)), None);
    }

    #[test]
    fn corrupt_file_loads_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let file = scratch_file(&temp_dir);
        std::fs::create_dir_all(file.parent().unwrap()).unwrap();
        std::fs::write(&file, r#"{"display":{"resolution":"wide"}}"#).unwrap();
        assert_eq!(SavedSettings::load_from(&file), None);
    }

    #[test]
    fn missing_display_section_uses_default() {
        let settings: SavedSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.display, DisplayConfig::default());
    }

    #[test]
    fn store_writes_applied_config() {
        let temp_dir = TempDir::new().unwrap();
        let file = scratch_file(&temp_dir);
        let mut store = JsonSettingsStore::new(Some(file.clone()), SavedSettings::default());
        let config = DisplayConfig {
            resolution: Resolution::new(1920, 1080),
            fullscreen: false,
        };
        store.save_resolution_settings(&config).unwrap();
        assert_eq!(store.settings().display, config);
        assert_eq!(SavedSettings::load_from(&file).unwrap().display, config);
    }

    #[test]
    fn saved_files_go_away_with_their_directory() {
        let temp_dir = TempDir::new().unwrap();
        let file = scratch_file(&temp_dir);
        SavedSettings::default().save_to(&file).unwrap();
        assert!(file.exists());

        let root = temp_dir.path().to_path_buf();
        temp_dir.close().unwrap();
        assert!(!root.exists());
    }

    #[test]
    fn store_without_config_dir_fails() {
        let mut store = JsonSettingsStore::new(None, SavedSettings::default());
        let err = store
            .save_resolution_settings(&DisplayConfig::default())
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SettingsError>(),
            Some(SettingsError::NoConfigDir)
        ));
    }
}
