//! Runtime configuration.
//!
//! Everything has a usable default: built-in lexicon tables and a 400×400
//! canvas. A JSON file may override any subset of fields.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::RebusResult;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RebusConfig {
    /// External lookup tables.
    pub tables: TablesConfig,
    /// Renderer settings.
    pub render: RenderConfig,
}

impl RebusConfig {
    /// Load a configuration file. Missing fields fall back to defaults.
    pub fn from_path(path: impl AsRef<Path>) -> RebusResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = serde_json::from_str(&text)?;
        tracing::debug!(path = %path.as_ref().display(), "loaded configuration");
        Ok(config)
    }
}

/// Paths to JSON lookup tables. `None` keeps the built-in table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TablesConfig {
    /// `{ "word": { "perfect": [..], "close": [..] } }`
    pub homophones: Option<PathBuf>,
    /// `[ { "words": [..], "glyph": ".." } ]`
    pub icons: Option<PathBuf>,
    /// `{ "to": 2, "for": 4 }`
    pub number_sounds: Option<PathBuf>,
    /// `[ "a", "the", .. ]`
    pub fillers: Option<PathBuf>,
    /// `[ { "first": .., "second": .., "combined": .., "plural": false } ]`
    pub compounds: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    /// Font size of a node drawn at template scale 1.0.
    pub font_size: f32,
    pub font_family: String,
    /// Font family switched to for icon glyphs.
    pub icon_font_family: String,
    /// Where rendered images are written; `None` leaves writing to the caller.
    pub output_dir: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 400,
            font_size: 48.0,
            font_family: "DejaVu Sans, Arial, sans-serif".to_string(),
            icon_font_family: "Noto Color Emoji, Segoe UI Emoji, sans-serif".to_string(),
            output_dir: None,
        }
    }
}
