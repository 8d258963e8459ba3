//! Deck settings
//!
//! Layout tunables plus the pacing values the scenes use. Loaded from a JSON
//! file when one is given; fields the file leaves out fall back to the
//! defaults.

use crate::Result;
use equation_layout::LayoutConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings shared by every scene
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DeckSettings {
    /// Equation layout configuration (font size, row gap, part spacing)
    pub layout: LayoutConfig,
    /// Pause before each slide break, in seconds
    pub wait_duration: f32,
    /// Distance from the reference row's right edge to the numbering column
    pub numbering_offset: f32,
    /// Run time of a single write animation, in seconds
    pub write_run_time: f32,
}

impl Default for DeckSettings {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            wait_duration: 0.1,
            numbering_offset: 120.0,
            write_run_time: 1.0,
        }
    }
}

impl DeckSettings {
    pub fn font_size(&self) -> f32 {
        self.layout.font_size
    }
}

/// Settings manager for loading and saving deck settings
pub struct SettingsManager {
    /// Path to the settings file
    settings_path: PathBuf,
    /// Current settings (cached)
    current: DeckSettings,
}

impl SettingsManager {
    /// Create a manager for the settings file at `settings_path`
    pub fn new(settings_path: PathBuf) -> Self {
        Self {
            settings_path,
            current: DeckSettings::default(),
        }
    }

    /// Get the path to the settings file
    pub fn settings_path(&self) -> &PathBuf {
        &self.settings_path
    }

    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load(&mut self) -> Result<&DeckSettings> {
        if self.settings_path.exists() {
            let content = std::fs::read_to_string(&self.settings_path)?;
            match serde_json::from_str::<DeckSettings>(&content) {
                Ok(settings) => {
                    self.current = settings;
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to parse settings file {:?}, using defaults: {}",
                        self.settings_path,
                        e
                    );
                    self.current = DeckSettings::default();
                }
            }
        } else {
            self.current = DeckSettings::default();
        }
        Ok(&self.current)
    }

    /// Load settings the user asked for by path; a missing or malformed file
    /// is an error rather than a silent fallback
    pub fn load_existing(&mut self) -> Result<&DeckSettings> {
        let content = std::fs::read_to_string(&self.settings_path)?;
        self.current = serde_json::from_str(&content)?;
        tracing::debug!(path = ?self.settings_path, "settings loaded");
        Ok(&self.current)
    }

    /// Save current settings to disk
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.settings_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&self.current)?;
        std::fs::write(&self.settings_path, content)?;
        Ok(())
    }

    /// Get current settings
    pub fn get(&self) -> &DeckSettings {
        &self.current
    }

    /// Update settings and save to disk
    pub fn update(&mut self, settings: DeckSettings) -> Result<()> {
        self.current = settings;
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DeckError;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = DeckSettings::default();
        assert_eq!(settings.font_size(), 30.0);
        assert_eq!(settings.wait_duration, 0.1);
        assert_eq!(settings.layout.row_gap_factor, 0.5);
    }

    #[test]
    fn test_settings_manager_load_save() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("deck.json");
        let mut manager = SettingsManager::new(path.clone());

        // Load should return defaults when no file exists
        let settings = manager.load().unwrap();
        assert_eq!(settings, &DeckSettings::default());

        let mut new_settings = DeckSettings::default();
        new_settings.wait_duration = 0.5;
        new_settings.layout.font_size = 24.0;
        manager.update(new_settings).unwrap();

        let mut manager2 = SettingsManager::new(path);
        let loaded = manager2.load().unwrap();
        assert_eq!(loaded.wait_duration, 0.5);
        assert_eq!(loaded.font_size(), 24.0);
    }

    #[test]
    fn test_unparsable_file_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("deck.json");
        std::fs::write(&path, "{ not json").unwrap();

        let mut manager = SettingsManager::new(path);
        assert_eq!(manager.load().unwrap(), &DeckSettings::default());
    }

    #[test]
    fn test_load_existing_rejects_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = SettingsManager::new(temp_dir.path().join("absent.json"));
        assert!(matches!(manager.load_existing(), Err(DeckError::Io(_))));
    }

    #[test]
    fn test_load_existing_rejects_unparsable_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("deck.json");
        std::fs::write(&path, "{ not json").unwrap();

        let mut manager = SettingsManager::new(path);
        assert!(matches!(manager.load_existing(), Err(DeckError::Json(_))));
        assert_eq!(manager.get(), &DeckSettings::default());
    }

    #[test]
    fn test_load_existing_reads_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("deck.json");
        std::fs::write(&path, r#"{"wait_duration": 0.3}"#).unwrap();

        let mut manager = SettingsManager::new(path);
        let loaded = manager.load_existing().unwrap();
        assert_eq!(loaded.wait_duration, 0.3);
        assert_eq!(loaded.numbering_offset, 120.0);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("deck.json");
        std::fs::write(&path, r#"{"numbering_offset": 60.0}"#).unwrap();

        let mut manager = SettingsManager::new(path);
        let loaded = manager.load().unwrap();
        assert_eq!(loaded.numbering_offset, 60.0);
        assert_eq!(loaded.write_run_time, 1.0);
    }
}
