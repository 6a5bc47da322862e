// The front door: render strings, align their columns, optionally keep a
// picture of how they were aligned.

use crate::align::{AlignParams, DistanceMatrix, align};
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::render::{Rasterizer, RenderStyle};
use crate::sink::{DebugSink, PngDirSink};
use crate::types::PixelBuffer;
use crate::visualize::{DEFAULT_BAND_HEIGHT, VisualizeParams, visualize};
use log::{debug, warn};

/// What happened to the debug strip of one comparison.
#[derive(Debug)]
pub enum DebugOutcome {
    /// Debug mode is off; nothing was computed.
    Disabled,
    /// Debug mode is on without a sink; here is the strip.
    Rendered(PixelBuffer),
    /// The strip was handed to the sink under this label.
    Written { label: String },
    /// The strip could not be delivered. The distance is still valid.
    Unavailable(Error),
}

/// Full result of one comparison.
#[derive(Debug)]
pub struct Comparison {
    pub distance: f32,
    pub matrix: DistanceMatrix,
    pub debug: DebugOutcome,
}

struct DebugMode {
    sink: Option<Box<dyn DebugSink + Send + Sync>>,
}

/// Compares strings by how they look when rendered with one fixed font and style.
pub struct StringComparer<R: Rasterizer> {
    rasterizer: R,
    style: RenderStyle,
    params: AlignParams,
    band_height: usize,
    debug: Option<DebugMode>,
}

impl<R: Rasterizer> StringComparer<R> {
    /// Debug mode starts off; see [`with_debug_sink`](Self::with_debug_sink).
    pub fn new(rasterizer: R, style: RenderStyle) -> Self {
        Self { rasterizer, style, params: AlignParams::default(), band_height: DEFAULT_BAND_HEIGHT, debug: None }
    }

    /// Use these costs; see [`AlignParams::new`] for the accepted range.
    pub fn with_params(mut self, params: AlignParams) -> Self {
        self.params = params;
        self
    }

    /// Turn debug mode on, delivering each strip to `sink` labelled with the B string.
    pub fn with_debug_sink(mut self, sink: impl DebugSink + Send + Sync + 'static) -> Self {
        self.debug = Some(DebugMode { sink: Some(Box::new(sink)) });
        self
    }

    /// Turn debug mode on without a sink; strips come back in [`Comparison::debug`].
    pub fn with_debug_render(mut self) -> Self {
        self.debug = Some(DebugMode { sink: None });
        self
    }

    /// Height of the annotation band in debug strips. Kept when debug mode is
    /// switched on or off later.
    pub fn with_band_height(mut self, band_height: usize) -> Self {
        self.band_height = band_height;
        self
    }

    pub fn without_debug(mut self) -> Self {
        self.debug = None;
        self
    }

    pub fn band_height(&self) -> usize {
        self.band_height
    }

    pub fn params(&self) -> &AlignParams {
        &self.params
    }

    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    pub fn debug_enabled(&self) -> bool {
        self.debug.is_some()
    }

    /// Render with this comparer's font and style, e.g. to reuse a reference.
    pub fn render(&self, text: &str) -> PixelBuffer {
        self.rasterizer.render(text, &self.style)
    }

    /// Visual distance between two strings.
    pub fn compare(&self, a: &str, b: &str) -> f32 {
        let rendered = self.render(a);
        self.compare_rendered(&rendered, b)
    }

    /// Visual distance between a pre-rendered string and a string.
    pub fn compare_rendered(&self, a: &PixelBuffer, b: &str) -> f32 {
        let result = self.compare_detailed(a, b);
        if let DebugOutcome::Unavailable(err) = &result.debug {
            warn!("{err}");
        }
        result.distance
    }

    /// Like [`compare_rendered`](Self::compare_rendered), also returning the
    /// matrix and what happened to the debug strip.
    pub fn compare_detailed(&self, a: &PixelBuffer, b: &str) -> Comparison {
        let rendered_b = self.render(b);
        let (distance, matrix) = align(a, &rendered_b, &self.params);
        debug!(
            "compare {}x{} against {:?} ({}x{}): {distance}",
            a.width(),
            a.height(),
            b,
            rendered_b.width(),
            rendered_b.height()
        );

        let debug = match &self.debug {
            None => DebugOutcome::Disabled,
            Some(mode) => {
                let params = VisualizeParams { threshold: self.params.threshold(), band_height: self.band_height };
                let strip = visualize(a, &rendered_b, &matrix, &params);
                match &mode.sink {
                    None => DebugOutcome::Rendered(strip),
                    Some(sink) => match sink.write(b, &strip) {
                        Ok(()) => DebugOutcome::Written { label: b.to_owned() },
                        Err(e) => DebugOutcome::Unavailable(e),
                    },
                }
            }
        };

        Comparison { distance, matrix, debug }
    }
}

impl StringComparer<Box<dyn Rasterizer + Send + Sync>> {
    /// Build a comparer from settings: loads the font and, when the settings
    /// ask for it, writes strips to a PNG directory.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        settings.validate()?;
        let rasterizer = settings.render.font.load()?;
        let mut comparer = StringComparer::new(rasterizer, settings.render.style).with_params(settings.align_params()?);
        if let Some(debug) = &settings.debug {
            comparer = comparer.with_debug_sink(PngDirSink::new(&debug.dir)).with_band_height(debug.band_height);
        }
        Ok(comparer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::EdgeCost;
    use crate::render::BitmapFont;
    use crate::sink::MemorySink;
    use crate::types::Rgb;
    use std::sync::Arc;

    struct FailingSink;

    impl DebugSink for FailingSink {
        fn write(&self, label: &str, _image: &PixelBuffer) -> Result<()> {
            Err(Error::DebugWrite { path: format!("nowhere/{label}.png").into(), reason: "read-only".into() })
        }
    }

    /// Shares one MemorySink between the comparer and the test.
    struct Shared(Arc<MemorySink>);

    impl DebugSink for Shared {
        fn write(&self, label: &str, image: &PixelBuffer) -> Result<()> {
            self.0.write(label, image)
        }
    }

    fn comparer() -> StringComparer<BitmapFont> {
        StringComparer::new(BitmapFont::new(1), RenderStyle::default())
    }

    #[test]
    fn same_string_is_zero() {
        assert_eq!(comparer().compare("test", "test"), 0.0);
    }

    #[test]
    fn prerendered_matches_string_path() {
        let c = comparer();
        let reference = c.render("example");
        assert_eq!(c.compare_rendered(&reference, "test"), c.compare("example", "test"));
    }

    #[test]
    fn debug_off_computes_nothing_extra() {
        let result = comparer().compare_detailed(&comparer().render("ab"), "ac");
        assert!(matches!(result.debug, DebugOutcome::Disabled));
        assert_eq!(result.matrix.distance(), result.distance);
    }

    #[test]
    fn debug_render_returns_strip() {
        let c = comparer().with_debug_render().with_band_height(4);
        let a = c.render("ab");
        let result = c.compare_detailed(&a, "abc");
        let strip = match result.debug {
            DebugOutcome::Rendered(strip) => strip,
            other => panic!("expected a rendered strip, got {other:?}"),
        };
        assert_eq!(strip.height(), 9 + 9 + 4);
        assert!(strip.width() >= 18);
    }

    #[test]
    fn band_height_survives_builder_order() {
        let c = comparer().with_band_height(4).with_debug_render();
        assert_eq!(c.band_height(), 4);
        let result = c.compare_detailed(&c.render("ab"), "ab");
        let strip = match result.debug {
            DebugOutcome::Rendered(strip) => strip,
            other => panic!("expected a rendered strip, got {other:?}"),
        };
        assert_eq!(strip.height(), 9 + 9 + 4);
    }

    #[test]
    fn sink_receives_strip_labelled_with_b() {
        let memory = Arc::new(MemorySink::new());
        let c = comparer().with_debug_sink(Shared(memory.clone()));
        c.compare("abc", "abd");
        let got = memory.take();
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].0, "abd");
        assert_eq!(got[0].1.get(0, 9 + 9), crate::visualize::BACKGROUND);
    }

    #[test_log::test]
    fn failing_sink_never_masks_the_distance() {
        let plain = comparer();
        let failing = comparer().with_debug_sink(FailingSink);
        assert_eq!(failing.compare("test", "text"), plain.compare("test", "text"));

        let result = failing.compare_detailed(&failing.render("test"), "text");
        assert!(matches!(result.debug, DebugOutcome::Unavailable(Error::DebugWrite { .. })));
        assert!(result.distance > 0.0);
    }

    #[test]
    fn params_are_applied() {
        let c = comparer().with_params(AlignParams::new(0.5, EdgeCost::Threshold).unwrap());
        assert_eq!(c.params().threshold(), 0.5);
        // Two 6-column cells inserted along the boundary.
        assert_eq!(c.compare("", "ab"), 6.0);
        assert_eq!(comparer().compare("", "ab"), 12.0);
    }

    #[test]
    fn from_settings_builds_a_working_comparer() {
        let settings = Settings::from_json_str(r#"{"render": {"font": {"kind": "builtin", "scale": 1}}}"#).unwrap();
        let c = StringComparer::from_settings(&settings).unwrap();
        assert!(!c.debug_enabled());
        assert_eq!(c.style().background, Rgb::WHITE);
        assert_eq!(c.compare("same", "same"), 0.0);
        assert_eq!(c.render("xy").width(), 12);
    }
}
