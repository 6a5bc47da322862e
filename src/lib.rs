//! Visual distance between strings.
//!
//! Both strings are rendered with the same font and style, and the two images
//! are compared column by column with an edit distance whose substitution cost
//! is how different two pixel columns look. Strings that *look* alike (`rn`
//! and `m`, `O` and `0`) come out close even when their characters differ.
//!
//! ```
//! use glyph_distance::{BitmapFont, RenderStyle, StringComparer};
//!
//! let comparer = StringComparer::new(BitmapFont::new(2), RenderStyle::default());
//! assert_eq!(comparer.compare("test", "test"), 0.0);
//! assert!(comparer.compare("test", "text") > 0.0);
//!
//! // Render a reference once and reuse it.
//! let reference = comparer.render("example");
//! let d = comparer.compare_rendered(&reference, "exampIe");
//! assert!(d < comparer.compare_rendered(&reference, "sample"));
//! ```

pub mod align;
pub mod comparer;
pub mod config;
mod draw;
pub mod error;
#[cfg(feature = "preview")]
pub mod preview;
pub mod render;
pub mod similarity;
pub mod sink;
pub mod types;
pub mod visualize;

pub use align::{AlignParams, DEFAULT_THRESHOLD, DistanceMatrix, EdgeCost, align};
pub use comparer::{Comparison, DebugOutcome, StringComparer};
pub use config::{DebugSettings, FontSettings, RenderSettings, Settings};
pub use error::{Error, Result};
pub use render::{Antialiasing, BitmapFont, Rasterizer, RenderStyle, TrueTypeFont};
pub use sink::{DebugSink, MemorySink, PngDirSink};
pub use types::{Column, PixelBuffer, Rgb};
pub use visualize::{AlignmentStep, VisualizeParams, alignment_path, visualize};
