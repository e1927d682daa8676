use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::Result;
use crate::raster::DEFAULT_FONT_SCALE;
use crate::render::RenderStyle;
use crate::svg::DEFAULT_FONT_SIZE;

pub const DEFAULT_SETTINGS_FILE: &str = "mindmap.json";

/// Size of the surfaces created for exports and the live window.
/// Height is fixed; width may follow the window.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct CanvasSize {
    pub width: usize,
    pub height: usize,
}

impl Default for CanvasSize {
    fn default() -> Self {
        CanvasSize {
            width: 800,
            height: 500,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub style: RenderStyle,
    pub canvas: CanvasSize,
    /// Pixel multiplier for the bitmap font (PNG and window output)
    pub font_scale: usize,
    /// Font size for SVG output
    pub font_size: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            style: RenderStyle::default(),
            canvas: CanvasSize::default(),
            font_scale: DEFAULT_FONT_SCALE,
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl Settings {
    /// Read settings from `path`, or fall back to defaults if it does not exist.
    /// Missing fields take their default values.
    pub fn load_or_default(path: &Path) -> Result<Settings> {
        if !path.exists() {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Settings::default());
        }

        let contents = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&contents)?;
        debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
