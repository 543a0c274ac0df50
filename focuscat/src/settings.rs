//! User preferences, stored as JSON in the config directory.

use crate::audio::DEFAULT_VOLUME;
use crate::quotes::QuoteLang;
use crate::timer::DEFAULT_FOCUS_MINUTES;
use catcore::storage::{load_json, save_json, StorageError};
use catcore::ThemeKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE: &str = "settings.json";
pub const DEFAULT_SHADE_ALPHA: u8 = 170;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: ThemeKind,
    pub quote_lang: QuoteLang,
    pub sound_enabled: bool,
    /// 0.0 ..= 1.0
    pub volume: f32,
    pub shade_enabled: bool,
    pub shade_alpha: u8,
    pub focus_minutes: u32,
    pub background: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: ThemeKind::Dark,
            quote_lang: QuoteLang::Zh,
            sound_enabled: true,
            volume: DEFAULT_VOLUME,
            shade_enabled: true,
            shade_alpha: DEFAULT_SHADE_ALPHA,
            focus_minutes: DEFAULT_FOCUS_MINUTES,
            background: None,
        }
    }
}

impl Settings {
    /// Load from `path`; anything unreadable falls back to defaults.
    pub fn load(path: &Path) -> Self {
        match load_json::<Settings>(path) {
            Ok(settings) => settings.sanitized(),
            Err(StorageError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                log::warn!("ignoring settings at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) {
        if let Err(e) = save_json(self, path) {
            log::warn!("failed to save settings to {}: {}", path.display(), e);
        }
    }

    /// Volume as a whole percentage for the slider.
    pub fn volume_percent(&self) -> u32 {
        (self.volume * 100.0).round() as u32
    }

    pub fn set_volume_percent(&mut self, percent: u32) {
        self.volume = percent.min(100) as f32 / 100.0;
    }

    fn sanitized(mut self) -> Self {
        if !self.volume.is_finite() {
            self.volume = DEFAULT_VOLUME;
        }
        self.volume = self.volume.clamp(0.0, 1.0);
        self.focus_minutes = self.focus_minutes.clamp(1, crate::timer::MAX_FOCUS_MINUTES);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        let settings = Settings {
            theme: ThemeKind::EyeCare,
            quote_lang: QuoteLang::En,
            sound_enabled: false,
            volume: 0.3,
            shade_enabled: false,
            shade_alpha: 40,
            focus_minutes: 50,
            background: Some(PathBuf::from("/tmp/cat.jpg")),
        };
        settings.save(&path);
        assert_eq!(Settings::load(&path), settings);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, r#"{ "theme": "light" }"#).unwrap();
        let settings = Settings::load(&path);
        assert_eq!(settings.theme, ThemeKind::Light);
        assert_eq!(settings.volume, DEFAULT_VOLUME);
        assert_eq!(settings.focus_minutes, DEFAULT_FOCUS_MINUTES);
        assert!(settings.sound_enabled);
    }

    #[test]
    fn test_broken_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, "meow").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
        assert_eq!(Settings::load(&dir.path().join("none.json")), Settings::default());
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, r#"{ "volume": 4.0, "focus_minutes": 0 }"#).unwrap();
        let settings = Settings::load(&path);
        assert_eq!(settings.volume, 1.0);
        assert_eq!(settings.focus_minutes, 1);
    }

    #[test]
    fn test_volume_percent() {
        let mut settings = Settings::default();
        assert_eq!(settings.volume_percent(), 85);
        settings.set_volume_percent(250);
        assert_eq!(settings.volume, 1.0);
    }
}
