// TrueType/OpenType rendering through fontdue.
// Glyphs are laid out left to right on one baseline with pair kerning;
// the buffer is as wide as the summed advances and as tall as ascent - descent.

use super::{Antialiasing, Rasterizer, RenderStyle, paint_coverage};
use crate::error::{Error, Result};
use crate::types::PixelBuffer;
use fontdue::{Font, FontSettings};
use std::path::Path;

/// A parsed font at a fixed pixel size.
#[derive(Clone)]
pub struct TrueTypeFont {
    font: Font,
    px: f32,
}

impl std::fmt::Debug for TrueTypeFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrueTypeFont").field("name", &self.font.name()).field("px", &self.px).finish()
    }
}

impl TrueTypeFont {
    pub fn from_bytes(bytes: &[u8], px: f32) -> Result<Self> {
        if !(px.is_finite() && px > 0.0) {
            return Err(Error::FontLoad(format!("font size must be positive, got {px}")));
        }
        let font = Font::from_bytes(bytes, FontSettings::default()).map_err(|e| Error::FontLoad(e.to_string()))?;
        Ok(Self { font, px })
    }

    pub fn from_file(path: &Path, px: f32) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| Error::FontLoad(format!("{}: {e}", path.display())))?;
        Self::from_bytes(&bytes, px)
    }

    pub fn px(&self) -> f32 {
        self.px
    }
}

impl Rasterizer for TrueTypeFont {
    fn render(&self, text: &str, style: &RenderStyle) -> PixelBuffer {
        let (ascent, descent) = self
            .font
            .horizontal_line_metrics(self.px)
            .map(|m| (m.ascent, m.descent))
            .unwrap_or((self.px, 0.0));

        // 1) Lay out: pen position of every glyph plus its coverage bitmap.
        let mut pen = 0.0_f32;
        let mut prev: Option<char> = None;
        let mut placed = Vec::with_capacity(text.len());
        for ch in text.chars() {
            if let Some(p) = prev {
                pen += self.font.horizontal_kern(p, ch, self.px).unwrap_or(0.0);
            }
            let (metrics, bitmap) = self.font.rasterize(ch, self.px);
            placed.push((pen, metrics, bitmap));
            pen += metrics.advance_width;
            prev = Some(ch);
        }

        let width = pen.ceil().max(0.0) as usize;
        let height = (ascent - descent).ceil().max(0.0) as usize;
        let baseline = ascent.round() as i32;

        // 2) Composite coverage; overlapping glyphs keep the stronger ink.
        let mut coverage = vec![0.0_f32; width * height];
        for (pen_x, m, bitmap) in &placed {
            let x0 = (pen_x + m.xmin as f32).round() as i32;
            let y0 = baseline - m.ymin - m.height as i32;
            for gy in 0..m.height {
                for gx in 0..m.width {
                    let (x, y) = (x0 + gx as i32, y0 + gy as i32);
                    if x < 0 || y < 0 || x as usize >= width || y as usize >= height {
                        continue;
                    }
                    let mut c = bitmap[gy * m.width + gx] as f32 / 255.0;
                    if style.antialiasing == Antialiasing::Off {
                        c = if c >= 0.5 { 1.0 } else { 0.0 };
                    }
                    let idx = y as usize * width + x as usize;
                    coverage[idx] = coverage[idx].max(c);
                }
            }
        }

        paint_coverage(width, height, &coverage, style)
    }
}
