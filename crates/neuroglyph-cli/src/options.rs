//! Command-line options for the generators.
//!
//! Every value is optional so that a flag only overrides the config file when
//! it is actually given; defaults are filled in by [`crate::config`].

use std::path::PathBuf;

use clap::{Args, Subcommand};

use neuroglyph_svg::BrainVariant;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Render the seeded cyber brain diagram
    Brain(BrainArgs),
    /// Render text with the pixel font
    PixelText(PixelTextArgs),
    /// Render the gold gradient text logo
    Logo(LogoArgs),
    /// Generate every asset with its defaults
    All,
}

#[derive(Args, Debug, Clone, Default)]
pub struct BrainArgs {
    /// Preset: 'classic' (polar placement) or 'lobed' (inside the ellipse only)
    #[arg(long, value_name = "VARIANT")]
    pub variant: Option<BrainVariant>,

    /// Seed for node placement and wiring
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Number of neurons
    #[arg(long = "nodes", value_name = "N")]
    pub node_count: Option<usize>,

    /// Number of axons
    #[arg(long = "edges", value_name = "N")]
    pub edge_count: Option<usize>,

    /// Canvas edge length in pixels
    #[arg(long, value_name = "PX")]
    pub size: Option<u32>,

    /// Never connect the same pair of neurons twice
    #[arg(long = "unique-edges")]
    pub unique_edges: bool,

    /// Output file path (defaults to a fixed name in the output directory)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct PixelTextArgs {
    /// Text to render
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,

    /// Edge length of one cell in pixels
    #[arg(long = "cell-size", value_name = "N")]
    pub cell_size: Option<u32>,

    /// Spacing between adjacent cells in pixels
    #[arg(long = "gap-size", value_name = "N")]
    pub gap_size: Option<u32>,

    /// Font file (TOML) to use instead of the built-in font
    #[arg(long, value_name = "FILE")]
    pub font: Option<PathBuf>,

    /// Fill colour of set cells
    #[arg(long, value_name = "COLOR")]
    pub fill: Option<String>,

    /// Outline colour of unset cells
    #[arg(long, value_name = "COLOR")]
    pub outline: Option<String>,

    /// Fail instead of skipping characters missing from the font
    #[arg(long)]
    pub strict: bool,

    /// Output file path (defaults to a fixed name in the output directory)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct LogoArgs {
    /// Text to render
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,

    /// Font size in pixels
    #[arg(long = "font-size", value_name = "N")]
    pub font_size: Option<f64>,

    /// Output file path (defaults to a fixed name in the output directory)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl BrainArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_variant(mut self, variant: BrainVariant) -> Self {
        self.variant = Some(variant);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }
}

impl PixelTextArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}
