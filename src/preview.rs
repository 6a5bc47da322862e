// Window that shows a debug strip until you close it or press ESC.
// Strips are tiny (a few dozen pixels tall), so the window scales them up.

use crate::error::{Error, Result};
use crate::types::PixelBuffer;
use minifb::{Key, Scale, Window, WindowOptions};

pub struct Preview {
    window: Window, // the on-screen window you see
}

impl Preview {
    /// Create a window sized to `image` (times the scale factor).
    pub fn new(title: &str, image: &PixelBuffer) -> Result<Self> {
        let options = WindowOptions { scale: Scale::X4, ..WindowOptions::default() };
        let mut window = Window::new(title, image.width().max(1), image.height().max(1), options)
            .map_err(|e| Error::Preview(e.to_string()))?;
        window.set_target_fps(30);
        Ok(Self { window })
    }

    /// Returns false when the user closes the window.
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Keep presenting `image` until the window is closed or ESC is pressed.
    pub fn show(&mut self, image: &PixelBuffer) -> Result<()> {
        if image.is_empty() {
            return Ok(());
        }
        while self.is_open() && !self.esc_pressed() {
            self.window
                .update_with_buffer(image.pixels(), image.width(), image.height())
                .map_err(|e| Error::Preview(e.to_string()))?;
        }
        Ok(())
    }
}
