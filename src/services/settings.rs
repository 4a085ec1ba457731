//! Persisted user defaults (`~/.gridcal/config.json`)

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::services::layout::LayoutTuning;
use crate::types::{GridcalError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub canvas_width: u32,
    pub weeks_shown: i64,
    /// Noun shown in the tooltip headline
    pub unit: String,
    pub tuning: LayoutTuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_width: 800,
            weeks_shown: 53,
            unit: "events".to_string(),
            tuning: LayoutTuning::default(),
        }
    }
}

pub struct SettingsService {
    config_dir: PathBuf,
}

impl SettingsService {
    pub fn new() -> Result<Self> {
        let base_dirs = BaseDirs::new()
            .ok_or_else(|| GridcalError::Config("Cannot determine home directory".into()))?;
        Ok(Self {
            config_dir: base_dirs.home_dir().join(".gridcal"),
        })
    }

    pub fn with_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join("config.json")
    }

    /// Missing file means defaults; an unreadable or malformed one is logged and ignored
    pub fn load(&self) -> Settings {
        let path = self.config_path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Settings::default(),
            Err(e) => {
                log::warn!("cannot read {}: {}", path.display(), e);
                return Settings::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("ignoring malformed {}: {}", path.display(), e);
                Settings::default()
            }
        }
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        fs::create_dir_all(&self.config_dir)?;
        let json = serde_json::to_string_pretty(settings)?;
        fs::write(self.config_path(), json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_service() -> (TempDir, SettingsService) {
        let tmp = TempDir::new().unwrap();
        let svc = SettingsService::with_dir(tmp.path().join(".gridcal"));
        (tmp, svc)
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let (_tmp, svc) = make_service();
        assert_eq!(svc.load(), Settings::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let (_tmp, svc) = make_service();
        let settings = Settings {
            canvas_width: 1200,
            weeks_shown: 26,
            unit: "pomodoros".to_string(),
            tuning: LayoutTuning {
                axis_margin: 40,
                ..LayoutTuning::default()
            },
        };

        svc.save(&settings).unwrap();
        assert_eq!(svc.load(), settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let (_tmp, svc) = make_service();
        fs::create_dir_all(svc.config_path().parent().unwrap()).unwrap();
        fs::write(
            svc.config_path(),
            r#"{"weeks_shown": 12, "tuning": {"tooltip_flip": 60.0}}"#,
        )
        .unwrap();

        let settings = svc.load();
        assert_eq!(settings.weeks_shown, 12);
        assert_eq!(settings.canvas_width, 800);
        assert_eq!(settings.unit, "events");
        assert_eq!(settings.tuning.tooltip_flip, 60.0);
        assert_eq!(settings.tuning.axis_margin, 36);
    }

    #[test]
    fn test_malformed_file_uses_defaults() {
        let (_tmp, svc) = make_service();
        fs::create_dir_all(svc.config_path().parent().unwrap()).unwrap();
        fs::write(svc.config_path(), "not json").unwrap();

        assert_eq!(svc.load(), Settings::default());
    }

    #[test]
    fn test_unreadable_path_uses_defaults() {
        let (_tmp, svc) = make_service();
        // a directory where the file should be fails with something other than NotFound
        fs::create_dir_all(svc.config_path()).unwrap();

        assert_eq!(svc.load(), Settings::default());
    }
}
