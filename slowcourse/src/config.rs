//! User settings for slowCourse, stored as JSON in the config directory

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use slowcore::storage::{config_dir, LocalStore};
use slowcore::theme::ThemeMode;

use crate::content::DEFAULT_TRACK_ID;

pub const APP_NAME: &str = "slowcourse";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseConfig {
    pub track_id: String,
    pub right_panel_open: bool,
    pub theme: ThemeMode,
    /// Where notes are kept; the app's config directory when unset
    pub storage_dir: Option<PathBuf>,
}

impl Default for CourseConfig {
    fn default() -> Self {
        Self {
            track_id: DEFAULT_TRACK_ID.to_string(),
            right_panel_open: true,
            theme: ThemeMode::Light,
            storage_dir: None,
        }
    }
}

impl CourseConfig {
    pub fn default_path() -> PathBuf {
        config_dir(APP_NAME).join("config.json")
    }

    pub fn load() -> Self {
        Self::load_from(&Self::default_path())
    }

    /// Read the config at `path`. A missing file gives defaults; an
    /// unreadable one is logged and also gives defaults.
    pub fn load_from(path: &Path) -> Self {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not read config, using defaults");
                return Self::default();
            }
        };
        match serde_json::from_str(&text) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "bad config, using defaults");
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }

    pub fn save(&self) {
        let path = Self::default_path();
        if let Err(e) = self.save_to(&path) {
            tracing::warn!(path = %path.display(), error = %e, "failed to save config");
        }
    }

    /// Key-value store for notes.
    pub fn store(&self) -> LocalStore {
        match &self.storage_dir {
            Some(dir) => LocalStore::new(dir.clone()),
            None => LocalStore::for_app(APP_NAME),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = CourseConfig::load_from(&dir.path().join("nope.json"));
        assert_eq!(config, CourseConfig::default());
        assert!(config.right_panel_open);
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ track_id: ").unwrap();
        assert_eq!(CourseConfig::load_from(&path), CourseConfig::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "track_id": "typography-101", "theme": "dark" }"#).unwrap();
        let config = CourseConfig::load_from(&path);
        assert_eq!(config.track_id, "typography-101");
        assert_eq!(config.theme, ThemeMode::Dark);
        assert!(config.right_panel_open);
    }

    #[test]
    fn test_panel_width_is_not_stored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "panel_width": 640.0, "right_panel_open": false }"#).unwrap();
        let config = CourseConfig::load_from(&path);
        assert!(!config.right_panel_open);
        config.save_to(&path).unwrap();
        let saved = std::fs::read_to_string(&path).unwrap();
        assert!(!saved.contains("panel_width"));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = CourseConfig {
            right_panel_open: false,
            storage_dir: Some(dir.path().join("notes")),
            ..Default::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(CourseConfig::load_from(&path), config);
        assert_eq!(config.store().root(), dir.path().join("notes"));
    }
}
