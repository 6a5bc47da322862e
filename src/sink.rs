// Where debug strips go once rendered.

use crate::error::{Error, Result};
use crate::types::PixelBuffer;
use log::info;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Receives one visualization per comparison, keyed by a label.
pub trait DebugSink {
    fn write(&self, label: &str, image: &PixelBuffer) -> Result<()>;
}

/// Writes `<dir>/<label>.png`, creating `dir` on first use. Unsafe label
/// characters are percent-escaped; each label maps to its own file.
#[derive(Debug, Clone)]
pub struct PngDirSink {
    dir: PathBuf,
}

impl PngDirSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File the strip for `label` ends up in.
    pub fn path_for(&self, label: &str) -> PathBuf {
        self.dir.join(format!("{}.png", file_stem(label)))
    }
}

impl DebugSink for PngDirSink {
    fn write(&self, label: &str, image: &PixelBuffer) -> Result<()> {
        let path = self.path_for(label);
        let fail = |reason: String| Error::DebugWrite { path: path.clone(), reason };

        if image.is_empty() {
            // PNG can't hold a zero-sized image.
            return Err(fail(format!("{}x{} image", image.width(), image.height())));
        }
        std::fs::create_dir_all(&self.dir).map_err(|e| fail(e.to_string()))?;
        image.to_rgb_image().save(&path).map_err(|e| fail(e.to_string()))?;
        info!("wrote debug strip {}", path.display());
        Ok(())
    }
}

/// Keeps every strip in memory; handy for tests and for callers that
/// want to display strips themselves.
#[derive(Debug, Default)]
pub struct MemorySink {
    images: Mutex<Vec<(String, PixelBuffer)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain everything written so far.
    pub fn take(&self) -> Vec<(String, PixelBuffer)> {
        std::mem::take(&mut *self.images.lock().unwrap_or_else(|p| p.into_inner()))
    }
}

impl DebugSink for MemorySink {
    fn write(&self, label: &str, image: &PixelBuffer) -> Result<()> {
        self.images
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push((label.to_owned(), image.clone()));
        Ok(())
    }
}

/// Labels are arbitrary strings; keep them from escaping the directory.
/// Separators, `%`, `:` and control characters become `%XX` (one per UTF-8
/// byte), so distinct labels always get distinct files. The empty label is
/// a bare `%`, which no escaped label can produce.
fn file_stem(label: &str) -> String {
    if label.is_empty() {
        return "%".to_owned();
    }
    let mut stem = String::with_capacity(label.len());
    for c in label.chars() {
        if matches!(c, '/' | '\\' | '%' | ':') || c.is_control() {
            let mut utf8 = [0u8; 4];
            for byte in c.encode_utf8(&mut utf8).bytes() {
                stem.push_str(&format!("%{byte:02X}"));
            }
        } else {
            stem.push(c);
        }
    }
    stem
}
