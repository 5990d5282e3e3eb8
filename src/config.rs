//! Application configuration.
//!
//! The configuration is loaded from a JSON file (by default
//! `$XDG_CONFIG_HOME/handctl/config.json`).  Every field is optional, so a
//! minimal `{}` file is valid and all sections fall back to their
//! compiled-in defaults.
//!
//! # Example
//!
//! ```json
//! {
//!   "gestures": {
//!     "buffer_len": 8,
//!     "swipe_threshold": 0.2,
//!     "swipe_cooldown_ms": 500,
//!     "smoothing_alpha": 0.2,
//!     "open_palm_quorum": 3,
//!     "click_enabled": true,
//!     "click_cooldown_ms": 300,
//!     "mirror_x": false
//!   },
//!   "dispatcher": "hyprland",
//!   "socket_path": "/run/user/1000/handctl.sock"
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Smallest and largest supported swipe window.
pub const BUFFER_LEN_RANGE: std::ops::RangeInclusive<usize> = 5..=10;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Gesture recognition settings.
    #[serde(default)]
    pub gestures: GestureConfig,

    /// Which backend performs the actions.
    #[serde(default)]
    pub dispatcher: DispatcherKind,

    /// Override for the frame socket path.
    #[serde(default)]
    pub socket_path: Option<PathBuf>,
}

/// Tuning knobs for the gesture pipeline.
///
/// `buffer_len` is the swipe window in frames; at 30 fps the default of 8
/// covers roughly a quarter second.  `swipe_threshold` is the net horizontal
/// travel (normalised units) across that window needed for a swipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Frames in the swipe window.  Default: `8` (allowed `5..=10`).
    pub buffer_len: usize,
    /// Net x travel across the window that counts as a swipe.  Default: `0.2`.
    pub swipe_threshold: f64,
    /// Minimum time between two swipes.  Default: `500`.
    pub swipe_cooldown_ms: u64,
    /// EMA weight of the newest cursor sample.  Default: `0.2`.
    pub smoothing_alpha: f64,
    /// Extended fingers (of four) needed for an open palm.  Default: `3`.
    pub open_palm_quorum: usize,
    /// Click on index-finger pointing.  Default: `true`.
    pub click_enabled: bool,
    /// Minimum time between two clicks.  Default: `300`.
    pub click_cooldown_ms: u64,
    /// Flip x (`x → 1 - x`) for unmirrored camera input.  Default: `false`.
    pub mirror_x: bool,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            buffer_len: 8,
            swipe_threshold: 0.2,
            swipe_cooldown_ms: 500,
            smoothing_alpha: 0.2,
            open_palm_quorum: 3,
            click_enabled: true,
            click_cooldown_ms: 300,
            mirror_x: false,
        }
    }
}

impl GestureConfig {
    pub fn swipe_cooldown(&self) -> Duration {
        Duration::from_millis(self.swipe_cooldown_ms)
    }

    pub fn click_cooldown(&self) -> Duration {
        Duration::from_millis(self.click_cooldown_ms)
    }

    /// Check that every value is within its supported range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !BUFFER_LEN_RANGE.contains(&self.buffer_len) {
            return Err(ConfigError(format!(
                "gestures.buffer_len must be in {}..={}, got {}",
                BUFFER_LEN_RANGE.start(),
                BUFFER_LEN_RANGE.end(),
                self.buffer_len
            )));
        }
        if !(self.swipe_threshold > 0.0 && self.swipe_threshold < 1.0) {
            return Err(ConfigError(format!(
                "gestures.swipe_threshold must be in (0, 1), got {}",
                self.swipe_threshold
            )));
        }
        if !(self.smoothing_alpha > 0.0 && self.smoothing_alpha <= 1.0) {
            return Err(ConfigError(format!(
                "gestures.smoothing_alpha must be in (0, 1], got {}",
                self.smoothing_alpha
            )));
        }
        if !(1..=4).contains(&self.open_palm_quorum) {
            return Err(ConfigError(format!(
                "gestures.open_palm_quorum must be in 1..=4, got {}",
                self.open_palm_quorum
            )));
        }
        Ok(())
    }
}

/// Backend that turns actions into operating-system effects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatcherKind {
    /// Write every action as a JSON line to stdout.
    #[default]
    Stdout,
    /// Drive the cursor and workspaces over Hyprland IPC.
    Hyprland,
}

impl Config {
    /// Load and validate configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        Self::from_json(&contents)
            .map_err(|e| ConfigError(format!("{}: {}", path.display(), e.0)))
    }

    /// Parse and validate configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ConfigError(format!("failed to parse: {}", e)))?;
        config.gestures.validate()?;
        Ok(config)
    }
}

/// Error from loading, parsing or validating a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_full_config() {
        let json = r#"{
            "gestures": {
                "buffer_len": 6,
                "swipe_threshold": 0.3,
                "swipe_cooldown_ms": 750,
                "smoothing_alpha": 0.5,
                "open_palm_quorum": 4,
                "click_enabled": false,
                "click_cooldown_ms": 200,
                "mirror_x": true
            },
            "dispatcher": "hyprland",
            "socket_path": "/tmp/frames.sock"
        }"#;
        let cfg = Config::from_json(json).unwrap();
        assert_eq!(cfg.gestures.buffer_len, 6);
        assert_eq!(cfg.gestures.swipe_threshold, 0.3);
        assert_eq!(cfg.gestures.swipe_cooldown(), Duration::from_millis(750));
        assert_eq!(cfg.gestures.smoothing_alpha, 0.5);
        assert_eq!(cfg.gestures.open_palm_quorum, 4);
        assert!(!cfg.gestures.click_enabled);
        assert_eq!(cfg.gestures.click_cooldown(), Duration::from_millis(200));
        assert!(cfg.gestures.mirror_x);
        assert_eq!(cfg.dispatcher, DispatcherKind::Hyprland);
        assert_eq!(cfg.socket_path, Some(PathBuf::from("/tmp/frames.sock")));
    }

    #[test]
    fn deserialize_empty_uses_defaults() {
        let cfg = Config::from_json("{}").unwrap();
        assert_eq!(cfg.gestures, GestureConfig::default());
        assert_eq!(cfg.dispatcher, DispatcherKind::Stdout);
        assert_eq!(cfg.socket_path, None);
    }

    #[test]
    fn default_values() {
        let g = GestureConfig::default();
        assert_eq!(g.buffer_len, 8);
        assert_eq!(g.swipe_threshold, 0.2);
        assert_eq!(g.swipe_cooldown(), Duration::from_millis(500));
        assert_eq!(g.smoothing_alpha, 0.2);
        assert_eq!(g.open_palm_quorum, 3);
        assert!(g.validate().is_ok());
    }

    #[test]
    fn deserialize_partial_gestures() {
        let cfg = Config::from_json(r#"{ "gestures": { "buffer_len": 10 } }"#).unwrap();
        assert_eq!(cfg.gestures.buffer_len, 10);
        assert_eq!(cfg.gestures.swipe_threshold, GestureConfig::default().swipe_threshold);
    }

    #[test]
    fn out_of_range_values_rejected() {
        for json in [
            r#"{ "gestures": { "buffer_len": 4 } }"#,
            r#"{ "gestures": { "buffer_len": 11 } }"#,
            r#"{ "gestures": { "swipe_threshold": 0.0 } }"#,
            r#"{ "gestures": { "smoothing_alpha": 0.0 } }"#,
            r#"{ "gestures": { "smoothing_alpha": 1.5 } }"#,
            r#"{ "gestures": { "open_palm_quorum": 0 } }"#,
            r#"{ "gestures": { "open_palm_quorum": 5 } }"#,
        ] {
            assert!(Config::from_json(json).is_err(), "accepted {}", json);
        }
    }

    #[test]
    fn unknown_dispatcher_rejected() {
        assert!(Config::from_json(r#"{ "dispatcher": "xdotool" }"#).is_err());
    }

    #[test]
    fn unknown_top_level_keys_ignored() {
        let json = r#"{ "gestures": {}, "future_section": { "key": 42 } }"#;
        let _cfg = Config::from_json(json).unwrap();
    }

    #[test]
    fn load_missing_file_is_error() {
        let path = std::env::temp_dir().join("handctl-test-does-not-exist.json");
        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
