//! Configuration loading and parsing.
//!
//! Reads `oxnano.toml` (or an override path supplied by the binary):
//!
//! ```toml
//! [layout]
//! top_margin = 2      # rows reserved for the title/status bar
//! bottom_margin = 2   # rows reserved for the help bar
//! [editing]
//! tab_width = 4       # spaces inserted for a tab
//! [input]
//! idle_delay_ms = 20  # poll timeout between redraw checks
//! ```
//!
//! Every field is optional and unknown fields are ignored. A missing file or a
//! parse error yields the defaults; parse errors are logged so a typo does not
//! silently change behaviour. Values that would break the editor are clamped
//! at access time with an `info` log on target `config`.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf, time::Duration};
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "oxnano.toml";

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LayoutConfig {
    #[serde(default = "LayoutConfig::default_margin")]
    pub top_margin: u16,
    #[serde(default = "LayoutConfig::default_margin")]
    pub bottom_margin: u16,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            top_margin: Self::default_margin(),
            bottom_margin: Self::default_margin(),
        }
    }
}

impl LayoutConfig {
    const fn default_margin() -> u16 {
        2
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct EditingConfig {
    #[serde(default = "EditingConfig::default_tab_width")]
    pub tab_width: usize,
}

impl Default for EditingConfig {
    fn default() -> Self {
        Self {
            tab_width: Self::default_tab_width(),
        }
    }
}

impl EditingConfig {
    const fn default_tab_width() -> usize {
        4
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct InputConfig {
    #[serde(default = "InputConfig::default_idle_delay_ms")]
    pub idle_delay_ms: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            idle_delay_ms: Self::default_idle_delay_ms(),
        }
    }
}

impl InputConfig {
    const fn default_idle_delay_ms() -> u64 {
        20
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub editing: EditingConfig,
    #[serde(default)]
    pub input: InputConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub file: ConfigFile,    // parsed (or default) data
}

/// Best-effort config path following platform conventions (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("oxnano").join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(target: "config", path = %path.display(), "config_loaded");
            Ok(Config {
                raw: Some(content),
                file,
            })
        }
        Err(e) => {
            warn!(
                target: "config",
                path = %path.display(),
                error = %e,
                "config_parse_failed_using_defaults"
            );
            Ok(Config::default())
        }
    }
}

impl Config {
    /// Configured `(top, bottom)` bar heights.
    ///
    /// Logs when they leave no text rows on a terminal `rows` tall; the session
    /// refuses such a layout.
    pub fn margins_for(&self, rows: u16) -> (u16, u16) {
        let top = self.file.layout.top_margin;
        let bottom = self.file.layout.bottom_margin;
        if rows <= top.saturating_add(bottom) {
            info!(
                target: "config",
                rows,
                top_margin = top,
                bottom_margin = bottom,
                "margins_leave_no_text_rows"
            );
        }
        (top, bottom)
    }

    /// Tab expansion width, at least one column.
    pub fn tab_width(&self) -> usize {
        let raw = self.file.editing.tab_width;
        if raw == 0 {
            info!(target: "config", raw, clamped = 1, "tab_width_clamped");
            return 1;
        }
        raw
    }

    /// Poll timeout used by the event loop between redraw checks.
    pub fn idle_delay(&self) -> Duration {
        Duration::from_millis(self.file.input.idle_delay_ms)
    }
}
