// Turning strings into pixel buffers.
// A rasterizer owns a font; the style (antialiasing + colors) is a plain value
// passed into every call, so nothing about rendering lives in hidden state.

mod bitmap;
mod truetype;

pub use bitmap::BitmapFont;
pub use truetype::TrueTypeFont;

use crate::types::{PixelBuffer, Rgb};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Antialiasing {
    #[default]
    On,
    Off,
}

/// How text is painted: edge smoothing plus the two colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    pub antialiasing: Antialiasing,
    pub background: Rgb,
    pub foreground: Rgb,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self { antialiasing: Antialiasing::On, background: Rgb::WHITE, foreground: Rgb::BLACK }
    }
}

/// Anything that can draw a string into a fresh buffer.
///
/// Must be deterministic: the same text and style always give the same pixels.
/// The buffer is sized from the font's bounding box for `text`, with the text
/// drawn left-aligned on a background fill.
pub trait Rasterizer {
    fn render(&self, text: &str, style: &RenderStyle) -> PixelBuffer;
}

impl<R: Rasterizer + ?Sized> Rasterizer for Box<R> {
    fn render(&self, text: &str, style: &RenderStyle) -> PixelBuffer {
        (**self).render(text, style)
    }
}

impl<R: Rasterizer + ?Sized> Rasterizer for &R {
    fn render(&self, text: &str, style: &RenderStyle) -> PixelBuffer {
        (**self).render(text, style)
    }
}

/// Paint a coverage map (0 = background, 1 = full ink) with the style's colors.
pub(crate) fn paint_coverage(width: usize, height: usize, coverage: &[f32], style: &RenderStyle) -> PixelBuffer {
    debug_assert_eq!(coverage.len(), width * height);
    let pixels = coverage
        .iter()
        .map(|&c| style.background.lerp(style.foreground, c).packed())
        .collect();
    PixelBuffer::from_raw(width, height, pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coverage_maps_to_style_colors() {
        let style = RenderStyle { background: Rgb(10, 20, 30), foreground: Rgb(110, 120, 130), ..Default::default() };
        let buf = paint_coverage(3, 1, &[0.0, 1.0, 0.5], &style);
        assert_eq!(buf.get(0, 0), Rgb(10, 20, 30));
        assert_eq!(buf.get(1, 0), Rgb(110, 120, 130));
        assert_eq!(buf.get(2, 0), Rgb(60, 70, 80));
    }

    #[test]
    fn boxed_rasterizer_delegates() {
        let boxed: Box<dyn Rasterizer> = Box::new(BitmapFont::new(1));
        let style = RenderStyle::default();
        assert_eq!(boxed.render("ab", &style), BitmapFont::new(1).render("ab", &style));
    }

    #[test]
    fn style_parses_with_defaults() {
        let style: RenderStyle = serde_json::from_str(r#"{"antialiasing":"off","foreground":[255,0,0]}"#).unwrap();
        assert_eq!(style.antialiasing, Antialiasing::Off);
        assert_eq!(style.foreground, Rgb(255, 0, 0));
        assert_eq!(style.background, Rgb::WHITE);
    }
}
