// Settings for a comparer, loadable from JSON. Every field has a default so
// a config file only needs the values it changes.

use crate::align::{AlignParams, DEFAULT_THRESHOLD, EdgeCost};
use crate::error::{Error, Result};
use crate::render::{BitmapFont, Rasterizer, RenderStyle, TrueTypeFont};
use crate::visualize::DEFAULT_BAND_HEIGHT;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Interior insertion/deletion cost per column.
    pub threshold: f32,
    pub edge_cost: EdgeCost,
    pub render: RenderSettings,
    /// Present = write a debug strip per comparison.
    pub debug: Option<DebugSettings>,
}

impl Default for Settings {
    fn default() -> Self {
        Self { threshold: DEFAULT_THRESHOLD, edge_cost: EdgeCost::Unit, render: RenderSettings::default(), debug: None }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub font: FontSettings,
    #[serde(flatten)]
    pub style: RenderStyle,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FontSettings {
    /// The built-in 5x7 font at an integer scale.
    Builtin { scale: usize },
    /// A font file at a pixel size.
    TrueType { path: PathBuf, size: f32 },
}

impl Default for FontSettings {
    fn default() -> Self {
        FontSettings::Builtin { scale: 2 }
    }
}

impl FontSettings {
    /// Load the font this names.
    pub fn load(&self) -> Result<Box<dyn Rasterizer + Send + Sync>> {
        match self {
            FontSettings::Builtin { scale } => Ok(Box::new(BitmapFont::new(*scale))),
            FontSettings::TrueType { path, size } => Ok(Box::new(TrueTypeFont::from_file(path, *size)?)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DebugSettings {
    /// Directory the `<label>.png` strips are written to.
    pub dir: PathBuf,
    /// Height of the annotation band under the two rows of columns.
    pub band_height: usize,
}

impl Default for DebugSettings {
    fn default() -> Self {
        Self { dir: PathBuf::from("debug"), band_height: DEFAULT_BAND_HEIGHT }
    }
}

impl Settings {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(text).map_err(|e| Error::Config(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }

    /// Reject values the alignment can't work with.
    pub fn validate(&self) -> Result<()> {
        self.align_params()?;
        match &self.render.font {
            FontSettings::Builtin { scale } if *scale == 0 => {
                return Err(Error::Config("builtin font scale must be at least 1".into()));
            }
            FontSettings::TrueType { size, .. } if !(size.is_finite() && *size > 0.0) => {
                return Err(Error::Config(format!("font size must be positive, got {size}")));
            }
            _ => {}
        }
        Ok(())
    }

    pub fn align_params(&self) -> Result<AlignParams> {
        AlignParams::new(self.threshold, self.edge_cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Antialiasing;
    use crate::types::Rgb;

    #[test]
    fn empty_object_gives_defaults() {
        let s = Settings::from_json_str("{}").unwrap();
        assert_eq!(s, Settings::default());
        assert_eq!(s.threshold, 0.085);
        assert!(s.debug.is_none());
    }

    #[test]
    fn full_file_parses() {
        let s = Settings::from_json_str(
            r#"{
                "threshold": 0.1,
                "edge_cost": "threshold",
                "render": {
                    "font": {"kind": "truetype", "path": "fonts/mono.ttf", "size": 14.0},
                    "antialiasing": "off",
                    "background": [0, 0, 0],
                    "foreground": [255, 255, 255]
                },
                "debug": {"dir": "out"}
            }"#,
        )
        .unwrap();
        assert_eq!(s.threshold, 0.1);
        assert_eq!(s.edge_cost, EdgeCost::Threshold);
        assert_eq!(s.align_params().unwrap(), AlignParams::new(0.1, EdgeCost::Threshold).unwrap());
        assert_eq!(s.render.font, FontSettings::TrueType { path: "fonts/mono.ttf".into(), size: 14.0 });
        assert_eq!(s.render.style.antialiasing, Antialiasing::Off);
        assert_eq!(s.render.style.background, Rgb::BLACK);
        let debug = s.debug.unwrap();
        assert_eq!(debug.dir, PathBuf::from("out"));
        assert_eq!(debug.band_height, DEFAULT_BAND_HEIGHT);
    }

    #[test]
    fn bad_values_are_config_errors() {
        for text in [
            r#"{"threshold": 0}"#,
            r#"{"threshold": -1.0}"#,
            r#"{"render": {"font": {"kind": "builtin", "scale": 0}}}"#,
            r#"{"render": {"font": {"kind": "truetype", "path": "x.ttf", "size": 0}}}"#,
            r#"{"thresold": 0.1}"#,
            "not json",
        ] {
            assert!(matches!(Settings::from_json_str(text), Err(Error::Config(_))), "{text}");
        }
    }

    #[test]
    fn builtin_font_loads() {
        let r = FontSettings::Builtin { scale: 1 }.load().unwrap();
        assert_eq!(r.render("ab", &RenderStyle::default()).width(), 12);
    }

    #[test]
    fn missing_font_file_fails_to_load() {
        let f = FontSettings::TrueType { path: "/nonexistent.ttf".into(), size: 12.0 };
        assert!(matches!(f.load(), Err(Error::FontLoad(_))));
    }
}
