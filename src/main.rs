// Command line front end.
// Renders a reference (a string, or a PNG via --reference-image), compares each
// candidate against it and prints one "<candidate>\t<distance>" line per candidate.
// With debug on, an alignment strip per candidate lands in the debug directory.

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use glyph_distance::{
    Antialiasing, DebugOutcome, DebugSettings, EdgeCost, FontSettings, PixelBuffer, Settings, StringComparer,
};
use log::{info, warn};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AliasingArg {
    On,
    Off,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EdgeCostArg {
    Unit,
    Threshold,
}

/// Visual distance between rendered strings
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Reference string followed by candidates (all candidates with --reference-image)
    #[arg(required = true)]
    texts: Vec<String>,

    /// JSON settings file; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Use a pre-rendered reference image instead of rendering the first string
    #[arg(long)]
    reference_image: Option<PathBuf>,

    /// TrueType/OpenType font file (default: built-in bitmap font)
    #[arg(long)]
    font: Option<PathBuf>,

    /// Font size in pixels for --font
    #[arg(long, default_value = "14")]
    size: f32,

    /// Pixel scale of the built-in font
    #[arg(long)]
    scale: Option<usize>,

    #[arg(long, value_enum)]
    aliasing: Option<AliasingArg>,

    /// Cost of inserting or deleting one pixel column
    #[arg(short, long)]
    threshold: Option<f32>,

    /// Cost per column along the matrix boundary
    #[arg(long, value_enum)]
    edge_cost: Option<EdgeCostArg>,

    /// Write an alignment strip per candidate into this directory
    #[arg(long)]
    debug_dir: Option<PathBuf>,

    /// Show each alignment strip in a window (ESC for the next one)
    #[cfg(feature = "preview")]
    #[arg(long)]
    show: bool,
}

impl Args {
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::from_json_file(path)?,
            None => Settings::default(),
        };
        if let Some(path) = &self.font {
            settings.render.font = FontSettings::TrueType { path: path.clone(), size: self.size };
        } else if let Some(scale) = self.scale {
            settings.render.font = FontSettings::Builtin { scale };
        }
        if let Some(aliasing) = self.aliasing {
            settings.render.style.antialiasing = match aliasing {
                AliasingArg::On => Antialiasing::On,
                AliasingArg::Off => Antialiasing::Off,
            };
        }
        if let Some(threshold) = self.threshold {
            settings.threshold = threshold;
        }
        if let Some(edge) = self.edge_cost {
            settings.edge_cost = match edge {
                EdgeCostArg::Unit => EdgeCost::Unit,
                EdgeCostArg::Threshold => EdgeCost::Threshold,
            };
        }
        if let Some(dir) = &self.debug_dir {
            let band_height = settings.debug.as_ref().map_or_else(|| DebugSettings::default().band_height, |d| d.band_height);
            settings.debug = Some(DebugSettings { dir: dir.clone(), band_height });
        }
        settings.validate()?;
        Ok(settings)
    }

    #[cfg(feature = "preview")]
    fn show(&self) -> bool {
        self.show
    }

    #[cfg(not(feature = "preview"))]
    fn show(&self) -> bool {
        false
    }
}

fn main() -> Result<()> {
    // Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let settings = args.settings().context("loading settings")?;
    let mut comparer = StringComparer::from_settings(&settings).context("setting up the comparer")?;
    if args.show() {
        // Strips come back to us so they can be shown; writing them is done below.
        comparer = comparer.with_debug_render();
    }

    let (reference, candidates) = match &args.reference_image {
        Some(path) => {
            let img = PixelBuffer::open(path).with_context(|| format!("reading reference {}", path.display()))?;
            (img, &args.texts[..])
        }
        None => {
            if args.texts.len() < 2 {
                bail!("need a reference string and at least one candidate");
            }
            (comparer.render(&args.texts[0]), &args.texts[1..])
        }
    };
    info!("reference is {}x{} pixels", reference.width(), reference.height());

    for candidate in candidates {
        let result = comparer.compare_detailed(&reference, candidate);
        println!("{candidate}\t{:.6}", result.distance);

        match result.debug {
            DebugOutcome::Unavailable(err) => warn!("{err}"),
            DebugOutcome::Rendered(strip) => show_strip(&settings, candidate, &strip)?,
            DebugOutcome::Disabled | DebugOutcome::Written { .. } => {}
        }
    }
    Ok(())
}

/// Write (if a debug dir is set) and display one strip.
fn show_strip(settings: &Settings, label: &str, strip: &PixelBuffer) -> Result<()> {
    if let Some(debug) = &settings.debug {
        use glyph_distance::DebugSink;
        if let Err(err) = glyph_distance::PngDirSink::new(&debug.dir).write(label, strip) {
            warn!("{err}");
        }
    }
    #[cfg(feature = "preview")]
    {
        let mut window = glyph_distance::preview::Preview::new(label, strip).context("opening preview")?;
        window.show(strip)?;
    }
    Ok(())
}
