use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::warn;
use ratatui::style::Color;
use serde::Deserialize;

use crate::error::GameError;

const APP_DIR_NAME: &str = "grid-snake";
const SETTINGS_FILE_NAME: &str = "settings.json";

/// Logical grid dimensions, border ring included.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the number of cells inside the wall ring.
    #[must_use]
    pub fn interior_cells(self) -> usize {
        usize::from(self.width.saturating_sub(2)) * usize::from(self.height.saturating_sub(2))
    }

    /// Clamps each axis into `MIN_GRID_SIDE..=MAX_GRID_SIDE`.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            width: self.width.clamp(MIN_GRID_SIDE, MAX_GRID_SIDE),
            height: self.height.clamp(MIN_GRID_SIDE, MAX_GRID_SIDE),
        }
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
        }
    }
}

/// Default board width, wall ring included.
pub const DEFAULT_GRID_WIDTH: u16 = 20;

/// Default board height, wall ring included.
pub const DEFAULT_GRID_HEIGHT: u16 = 20;

/// Smallest side that keeps the centre spawn clear of the opponent spawn.
pub const MIN_GRID_SIDE: u16 = 6;

/// Largest accepted side.
pub const MAX_GRID_SIDE: u16 = 200;

/// Default tick delay in milliseconds.
pub const DEFAULT_TICK_DELAY_MS: u64 = 500;

/// Where the opponent snake enters the board.
pub const OPPONENT_SPAWN: (i32, i32) = (2, 2);

pub const GLYPH_WALL: &str = "#";
pub const GLYPH_SNAKE: &str = "S";
pub const GLYPH_APPLE: &str = "A";
pub const GLYPH_OPPONENT: &str = "O";

pub const PAUSE_LABEL: &str = "Pause";

/// Cell colors for every drawable entity.
#[derive(Debug)]
pub struct Theme {
    pub wall: Color,
    pub snake: Color,
    pub apple: Color,
    pub opponent: Color,
    pub pause_label: Color,
    pub status_line: Color,
}

pub const THEME_CLASSIC: Theme = Theme {
    wall: Color::Cyan,
    snake: Color::Yellow,
    apple: Color::Red,
    opponent: Color::Magenta,
    pause_label: Color::White,
    status_line: Color::DarkGray,
};

/// Immutable per-run configuration.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameSettings {
    /// Delay between ticks in milliseconds.
    pub tick_delay_ms: u64,
    pub opponent_enabled: bool,
    /// Crossing the wall ring wraps to the opposite interior edge.
    pub no_clip: bool,
    /// Drop 180° turns instead of letting the snake run into itself.
    pub reject_reversal: bool,
    /// The opponent's head running into the player's body also ends the run.
    pub opponent_collision_ends_game: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            tick_delay_ms: DEFAULT_TICK_DELAY_MS,
            opponent_enabled: false,
            no_clip: false,
            reject_reversal: false,
            opponent_collision_ends_game: true,
        }
    }
}

/// Maps a raw tick delay to a usable value.
///
/// Zero, negative and the `-1` sentinel all fall back to
/// [`DEFAULT_TICK_DELAY_MS`].
#[must_use]
pub fn normalize_tick_delay(raw_ms: i64) -> u64 {
    match u64::try_from(raw_ms) {
        Ok(ms) if ms > 0 => ms,
        _ => {
            if raw_ms != -1 {
                warn!("tick delay {raw_ms}ms is invalid, using {DEFAULT_TICK_DELAY_MS}ms");
            }
            DEFAULT_TICK_DELAY_MS
        }
    }
}

/// Optional on-disk overrides. Every field is optional so that a file only
/// needs to mention what it changes.
#[derive(Debug, Clone, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsFile {
    pub delay: Option<i64>,
    pub with_opponent: Option<bool>,
    pub no_clip: Option<bool>,
    pub reject_reversal: Option<bool>,
    pub opponent_collision_ends_game: Option<bool>,
    pub width: Option<u16>,
    pub height: Option<u16>,
}

impl SettingsFile {
    /// Applies the file's values on top of `settings` and `grid`.
    pub fn apply(&self, settings: &mut GameSettings, grid: &mut GridSize) {
        if let Some(delay) = self.delay {
            settings.tick_delay_ms = normalize_tick_delay(delay);
        }
        if let Some(enabled) = self.with_opponent {
            settings.opponent_enabled = enabled;
        }
        if let Some(enabled) = self.no_clip {
            settings.no_clip = enabled;
        }
        if let Some(enabled) = self.reject_reversal {
            settings.reject_reversal = enabled;
        }
        if let Some(enabled) = self.opponent_collision_ends_game {
            settings.opponent_collision_ends_game = enabled;
        }
        if let Some(width) = self.width {
            grid.width = width;
        }
        if let Some(height) = self.height {
            grid.height = height;
        }
        *grid = grid.normalized();
    }
}

/// Returns the platform-correct default settings file path.
#[must_use]
pub fn default_settings_path() -> Option<PathBuf> {
    let mut base = dirs::config_dir()?;
    base.push(APP_DIR_NAME);
    base.push(SETTINGS_FILE_NAME);
    Some(base)
}

/// Loads a settings file.
///
/// Returns `Ok(None)` when the file does not exist, so a missing default file
/// is not an error.
pub fn load_settings_file(path: &Path) -> Result<Option<SettingsFile>, GameError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    serde_json::from_str::<SettingsFile>(&raw)
        .map(Some)
        .map_err(|source| GameError::Settings {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{
        load_settings_file, normalize_tick_delay, GameSettings, GridSize, SettingsFile,
        DEFAULT_TICK_DELAY_MS,
    };

    #[test]
    fn invalid_tick_delays_fall_back_to_default() {
        assert_eq!(normalize_tick_delay(-1), DEFAULT_TICK_DELAY_MS);
        assert_eq!(normalize_tick_delay(-250), DEFAULT_TICK_DELAY_MS);
        assert_eq!(normalize_tick_delay(0), DEFAULT_TICK_DELAY_MS);
        assert_eq!(normalize_tick_delay(120), 120);
    }

    #[test]
    fn defaults_match_documented_values() {
        let settings = GameSettings::default();

        assert_eq!(settings.tick_delay_ms, 500);
        assert!(!settings.opponent_enabled);
        assert!(!settings.no_clip);
        assert!(settings.opponent_collision_ends_game);
        assert_eq!(GridSize::default().interior_cells(), 18 * 18);
    }

    #[test]
    fn settings_file_overrides_only_listed_fields() {
        let file: SettingsFile =
            serde_json::from_str(r#"{ "no_clip": true, "delay": -5, "width": 3 }"#)
                .expect("settings should parse");
        let mut settings = GameSettings {
            tick_delay_ms: 90,
            opponent_enabled: true,
            ..GameSettings::default()
        };
        let mut grid = GridSize::default();

        file.apply(&mut settings, &mut grid);

        assert!(settings.no_clip);
        assert!(settings.opponent_enabled);
        assert_eq!(settings.tick_delay_ms, DEFAULT_TICK_DELAY_MS);
        assert_eq!(grid.width, 6);
        assert_eq!(grid.height, 20);
    }

    #[test]
    fn oversized_board_from_settings_file_is_clamped() {
        let file: SettingsFile = serde_json::from_str(r#"{ "width": 65535, "height": 201 }"#)
            .expect("settings should parse");
        let mut settings = GameSettings::default();
        let mut grid = GridSize::default();

        file.apply(&mut settings, &mut grid);

        assert_eq!(grid, GridSize { width: 200, height: 200 });
        assert_eq!(grid.interior_cells(), 198 * 198);
    }

    #[test]
    fn missing_settings_file_is_not_an_error() {
        let path = unique_test_path("missing");
        let loaded = load_settings_file(&path).expect("missing file should be Ok(None)");
        assert!(loaded.is_none());
    }

    #[test]
    fn malformed_settings_file_returns_error() {
        let path = unique_test_path("malformed");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(&path, "{ \"colour\": 3 }").expect("test file write should succeed");

        assert!(load_settings_file(&path).is_err());

        let _ = fs::remove_file(&path);
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("grid-snake-settings-tests")
            .join(format!("{label}-{nanos}.json"))
    }
}
