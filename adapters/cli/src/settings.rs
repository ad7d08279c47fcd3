//! Construction-time tunables merged from defaults and an optional TOML file.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Tunables fixed at startup; there is no runtime reconfiguration.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Settings {
    /// Number of tile columns in generated grids.
    pub(crate) grid_columns: u32,
    /// Number of tile rows in generated grids.
    pub(crate) grid_rows: u32,
    /// Side length of a square tile in world units.
    pub(crate) tile_length: f32,
    /// Chance in `[0, 1]` that a seeded cell starts as a wall.
    pub(crate) fill_probability: f32,
    /// Number of smoothing passes applied after seeding.
    pub(crate) smoothing_passes: u32,
    /// Neighbor-count cutoff applied during smoothing.
    pub(crate) wall_threshold: u8,
    /// Edge length of the crawler's square bounding box in world units.
    pub(crate) crawler_size: f32,
    /// Distance the crawler covers per tick along each held axis.
    pub(crate) crawler_speed: f32,
    /// Fraction of the remaining camera distance closed per tick.
    pub(crate) camera_smoothing: f32,
    /// Visible world-space width, also used as the window width.
    pub(crate) viewport_width: f32,
    /// Visible world-space height, also used as the window height.
    pub(crate) viewport_height: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_columns: 50,
            grid_rows: 50,
            tile_length: 32.0,
            fill_probability: 0.45,
            smoothing_passes: 5,
            wall_threshold: 4,
            crawler_size: 24.0,
            crawler_speed: 4.0,
            camera_smoothing: 0.1,
            viewport_width: 800.0,
            viewport_height: 600.0,
        }
    }
}

/// Loads settings from the provided TOML file, or the defaults when no path
/// is given. Keys missing from the file fall back to their defaults.
pub(crate) fn load(path: Option<&Path>) -> Result<Settings> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };

    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file {}", path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("failed to parse settings file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::Settings;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let settings: Settings =
            toml::from_str("grid_columns = 30\nfill_probability = 0.4").expect("valid settings");

        assert_eq!(settings.grid_columns, 30);
        assert_eq!(settings.fill_probability, 0.4);
        assert_eq!(settings.grid_rows, Settings::default().grid_rows);
        assert_eq!(settings.tile_length, Settings::default().tile_length);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = toml::from_str::<Settings>("grid_colums = 30");
        assert!(result.is_err(), "typoed keys must not parse silently");
    }
}
