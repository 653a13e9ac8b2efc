//! neuroglyph command-line interface.
//!
pub mod config;
pub mod options;
pub mod output;
pub mod pipeline;

use std::path::{Path, PathBuf};

use tracing::debug;

use neuroglyph_error::Result;

pub use config::Config;
pub use options::{BrainArgs, Command, LogoArgs, PixelTextArgs};
pub use pipeline::{Generated, generate_brain, generate_logo, generate_pixel_text, load_font};

/// Exit status when every file was written but some characters were skipped.
pub const EXIT_GLYPH_MISSES: u8 = 2;

/// Options for running neuroglyph.
#[derive(Debug, Clone)]
pub struct NeuroglyphOptions {
    pub config: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub command: Command,
}

/// Files written by one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    pub generated: Vec<Generated>,
}

impl Report {
    pub fn has_misses(&self) -> bool {
        self.generated.iter().any(|g| !g.misses.is_empty())
    }

    pub fn exit_code(&self) -> u8 {
        if self.has_misses() { EXIT_GLYPH_MISSES } else { 0 }
    }
}

/// Main entry point
pub fn run_main(opts: &NeuroglyphOptions) -> Result<Report> {
    let config = Config::load_optional(opts.config.as_deref())?;
    let out_dir = config.out_dir(opts.out_dir.as_deref());
    debug!(out_dir = %out_dir.display(), command = ?opts.command, "running");

    let mut report = Report::default();
    match &opts.command {
        Command::Brain(args) => {
            let scene = config.brain_scene(args);
            report
                .generated
                .push(generate_brain(&scene, &out_dir, args.output.as_deref())?);
        }
        Command::PixelText(args) => {
            report
                .generated
                .push(run_pixel_text(&config, args, &out_dir)?);
        }
        Command::Logo(args) => {
            let scene = config.logo_scene(args);
            report
                .generated
                .push(generate_logo(&scene, &out_dir, args.output.as_deref())?);
        }
        Command::All => {
            let brain = config.brain_scene(&BrainArgs::default());
            report.generated.push(generate_brain(&brain, &out_dir, None)?);
            report
                .generated
                .push(run_pixel_text(&config, &PixelTextArgs::default(), &out_dir)?);
            let logo = config.logo_scene(&LogoArgs::default());
            report.generated.push(generate_logo(&logo, &out_dir, None)?);
        }
    }
    Ok(report)
}

fn run_pixel_text(
    config: &Config,
    args: &PixelTextArgs,
    out_dir: &Path,
) -> Result<Generated> {
    let scene = config.pixel_scene(args);
    let font_path = config.pixel_font(args);
    let font = load_font(font_path.as_deref())?;
    generate_pixel_text(
        &scene,
        &font,
        config.pixel_strict(args),
        out_dir,
        args.output.as_deref(),
    )
}
