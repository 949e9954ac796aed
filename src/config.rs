//! Region configuration.
//!
//! Describes where the card grid and the fixed click anchors sit inside the
//! game window, in the 1920×1080 design resolution. The configuration surface
//! (GUI or config file) owns these values; recognition passes only read them.
//! Loaded from JSON at startup with per-field defaults, so a partial file or
//! a missing file still yields a usable configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A fixed point in design-resolution coordinates, used for the hand slot and
/// the new-game button.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchor {
    pub x: i32,
    pub y: i32,
}

/// Complete geometry configuration, in 1920×1080 design coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionConfig {
    /// Left edge of the play field.
    pub field_left: i32,
    /// Top edge of the play field.
    pub field_top: i32,
    /// Right edge of the play field.
    pub field_right: i32,
    /// Bottom edge of the play field.
    pub field_bottom: i32,
    /// Number of card columns on the field.
    pub columns: u32,
    /// Rendered card width.
    pub card_width: i32,
    /// Rendered card height.
    pub card_height: i32,
    /// Center of the free hand slot.
    pub hand: Anchor,
    /// Center of the new-game button.
    pub new_game: Anchor,
    /// Horizontal shift from a slot's corner to its sampled glyph.
    pub offset_x: i32,
    /// Vertical shift from a slot's corner to its sampled glyph.
    pub offset_y: i32,
    /// Side length of the square recognition sample (12–20).
    pub sample_size: u32,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            field_left: 366,
            field_top: 460,
            field_right: 1556,
            field_bottom: 730,
            columns: 9,
            card_width: 120,
            card_height: 180,
            hand: Anchor { x: 1430, y: 280 },
            new_game: Anchor { x: 1400, y: 900 },
            offset_x: 5,
            offset_y: 4,
            sample_size: 14,
        }
    }
}

impl RegionConfig {
    /// Loads configuration from a JSON file, or returns defaults if the file
    /// is missing or malformed.
    pub fn load(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(contents) => match serde_json::from_str(&contents) {
                    Ok(config) => {
                        crate::log(&format!("Region config loaded from {}", path.display()));
                        return config;
                    }
                    Err(e) => {
                        crate::log(&format!(
                            "Failed to parse {}: {}. Using defaults.",
                            path.display(),
                            e
                        ));
                    }
                },
                Err(e) => {
                    crate::log(&format!(
                        "Failed to read {}: {}. Using defaults.",
                        path.display(),
                        e
                    ));
                }
            }
        } else {
            crate::log(&format!(
                "{} not found. Using default region config.",
                path.display()
            ));
        }
        Self::default()
    }

    /// Writes the configuration as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RegionConfig::default();
        assert_eq!(config.columns, 9);
        assert_eq!(config.sample_size, 14);
        assert_eq!(config.hand, Anchor { x: 1430, y: 280 });
    }

    #[test]
    fn test_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("regions.json");

        let mut config = RegionConfig::default();
        config.columns = 6;
        config.offset_x = -2;
        config.save(&path).unwrap();

        assert_eq!(RegionConfig::load(&path), config);
    }

    #[test]
    fn test_load_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = RegionConfig::load(&dir.path().join("absent.json"));
        assert_eq!(config, RegionConfig::default());
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("regions.json");
        fs::write(&path, r#"{"columns": 7, "sample_size": 16}"#).unwrap();

        let config = RegionConfig::load(&path);
        assert_eq!(config.columns, 7);
        assert_eq!(config.sample_size, 16);
        // Unmentioned fields keep their defaults.
        assert_eq!(config.field_left, 366);
        assert_eq!(config.card_height, 180);
    }

    #[test]
    fn test_load_malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("regions.json");
        fs::write(&path, "not json").unwrap();
        assert_eq!(RegionConfig::load(&path), RegionConfig::default());
    }
}
