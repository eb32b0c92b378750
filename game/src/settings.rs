use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const MIN_DROP_INTERVAL_MS: u64 = 16;
pub const MAX_DROP_INTERVAL_MS: u64 = 5000;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameplaySettings {
    pub drop_interval_ms: u64,
}

impl Default for GameplaySettings {
    fn default() -> Self {
        Self {
            drop_interval_ms: 500,
        }
    }
}

impl GameplaySettings {
    pub fn drop_interval(self) -> Duration {
        Duration::from_millis(self.drop_interval_ms)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ControlSettings {
    pub show_touch_pad: bool,
    /// When off, pad presses are observed but do nothing.
    pub touch_controls: bool,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            show_touch_pad: false,
            touch_controls: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct VideoSettings {
    pub vsync: bool,
}

impl Default for VideoSettings {
    fn default() -> Self {
        Self { vsync: true }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameSettings {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub gameplay: GameplaySettings,
    #[serde(default)]
    pub controls: ControlSettings,
    #[serde(default)]
    pub video: VideoSettings,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            version: default_version(),
            gameplay: GameplaySettings::default(),
            controls: ControlSettings::default(),
            video: VideoSettings::default(),
        }
    }
}

impl GameSettings {
    pub fn sanitized(mut self) -> Self {
        self.version = default_version();
        self.gameplay.drop_interval_ms = self
            .gameplay
            .drop_interval_ms
            .clamp(MIN_DROP_INTERVAL_MS, MAX_DROP_INTERVAL_MS);
        self
    }

    /// Applies `BLOCKFALL_VSYNC` on top of the file settings.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(vsync) = env_bool("BLOCKFALL_VSYNC") {
            self.video.vsync = vsync;
        }
        self
    }
}

fn default_version() -> u32 {
    1
}

pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn env_bool(name: &str) -> Option<bool> {
    std::env::var(name).ok().as_deref().and_then(parse_bool)
}

/// Read-only settings file location.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_env() -> Self {
        if let Some(explicit) = std::env::var_os("BLOCKFALL_SETTINGS_PATH") {
            return Self::new(explicit);
        }

        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var_os("HOME").map(|home| {
                    let mut p = PathBuf::from(home);
                    p.push(".config");
                    p
                })
            })
            .unwrap_or_else(|| PathBuf::from("."));

        let mut path = base;
        path.push("blockfall");
        path.push("settings.json");
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing files give defaults silently; unreadable or invalid ones log a warning.
    pub fn load(&self) -> GameSettings {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return GameSettings::default();
            }
            Err(err) => {
                log::warn!("could not read {}: {err}", self.path.display());
                return GameSettings::default();
            }
        };
        match serde_json::from_slice::<GameSettings>(&bytes) {
            Ok(settings) => settings.sanitized(),
            Err(err) => {
                log::warn!("ignoring invalid settings in {}: {err}", self.path.display());
                GameSettings::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("blockfall-{}-{name}", std::process::id()));
        path
    }

    #[test]
    fn defaults_match_the_classic_game() {
        let settings = GameSettings::default();
        assert_eq!(settings.gameplay.drop_interval(), Duration::from_millis(500));
        assert!(!settings.controls.show_touch_pad);
        assert!(!settings.controls.touch_controls);
        assert!(settings.video.vsync);
    }

    #[test]
    fn sanitized_clamps_drop_interval() {
        let mut settings = GameSettings {
            version: 42,
            ..GameSettings::default()
        };
        settings.gameplay.drop_interval_ms = 1;
        let settings = settings.sanitized();
        assert_eq!(settings.version, 1);
        assert_eq!(settings.gameplay.drop_interval_ms, MIN_DROP_INTERVAL_MS);

        let mut slow = GameSettings::default();
        slow.gameplay.drop_interval_ms = 60_000;
        assert_eq!(
            slow.sanitized().gameplay.drop_interval_ms,
            MAX_DROP_INTERVAL_MS
        );
    }

    #[test]
    fn serde_defaults_fill_missing_sections() {
        let parsed: GameSettings =
            serde_json::from_str(r#"{"controls":{"show_touch_pad":false,"touch_controls":true}}"#)
                .expect("settings JSON should parse");
        assert_eq!(parsed.version, 1);
        assert_eq!(parsed.gameplay, GameplaySettings::default());
        assert_eq!(parsed.video, VideoSettings::default());
        assert!(parsed.controls.touch_controls);
    }

    #[test]
    fn touch_pad_is_opt_in_from_json() {
        let parsed: GameSettings = serde_json::from_str(r#"{"version":1}"#).unwrap();
        assert!(!parsed.controls.show_touch_pad);

        let shown: GameSettings = serde_json::from_str(
            r#"{"controls":{"show_touch_pad":true,"touch_controls":false}}"#,
        )
        .unwrap();
        assert!(shown.controls.show_touch_pad);
    }

    #[test]
    fn parse_bool_accepts_common_spellings() {
        assert_eq!(parse_bool("ON"), Some(true));
        assert_eq!(parse_bool(" no "), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn load_reads_and_sanitizes_a_file() {
        let path = temp_path("load.json");
        fs::write(&path, r#"{"gameplay":{"drop_interval_ms":2}}"#).unwrap();
        let settings = SettingsStore::new(&path).load();
        fs::remove_file(&path).ok();
        assert_eq!(settings.gameplay.drop_interval_ms, MIN_DROP_INTERVAL_MS);
    }

    #[test]
    fn load_falls_back_on_missing_or_broken_files() {
        let missing = SettingsStore::new(temp_path("missing.json"));
        assert_eq!(missing.load(), GameSettings::default());

        let path = temp_path("broken.json");
        fs::write(&path, "{not json").unwrap();
        let settings = SettingsStore::new(&path).load();
        fs::remove_file(&path).ok();
        assert_eq!(settings, GameSettings::default());
    }
}
