// Software drawing into a mutable pixel grid.
// Rasterizers and the debug visualizer paint here, then freeze the result
// into an immutable PixelBuffer.

use crate::types::{Column, PixelBuffer, Rgb};

pub(crate) struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<u32>, // 0x00RRGGBB
}

impl Canvas {
    /// A canvas pre-filled with `background`.
    pub fn new(width: usize, height: usize, background: Rgb) -> Self {
        Self { width, height, pixels: vec![background.packed(); width * height] }
    }

    /// Put a pixel if (x,y) is inside bounds; anything outside is clipped.
    #[inline]
    pub fn put_pixel(&mut self, x: i32, y: i32, color: Rgb) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }
        self.pixels[y * self.width + x] = color.packed();
    }

    #[cfg(test)]
    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        Rgb::from_packed(self.pixels[y * self.width + x])
    }

    /// Fill a `w x h` rectangle whose top-left corner is (x,y), clipped to the canvas.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: usize, h: usize, color: Rgb) {
        for dy in 0..h as i32 {
            for dx in 0..w as i32 {
                self.put_pixel(x + dx, y + dy, color);
            }
        }
    }

    /// Copy a one-pixel-wide column so its top lands at (x,y).
    pub fn blit_column(&mut self, column: Column<'_>, x: usize, y: usize) {
        for (dy, px) in column.pixels().enumerate() {
            self.put_pixel(x as i32, (y + dy) as i32, Rgb::from_packed(px));
        }
    }

    pub fn into_buffer(self) -> PixelBuffer {
        PixelBuffer::from_raw(self.width, self.height, self.pixels)
    }
}
