//! Generators: resolve parameters, plan, draw, write.

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{info, warn};

use neuroglyph_core::{GlyphMiss, GlyphTable};
use neuroglyph_error::{Error, Result};
use neuroglyph_svg::{BrainScene, LogoScene, PixelScene};

use crate::output::{prepare_output, target_path};

pub const BRAIN_FILE: &str = "rotating_cyber_brain.svg";
pub const PIXEL_TEXT_FILE: &str = "author_satoramy_praio.svg";
pub const LOGO_FILE: &str = "rfof_network_gold.svg";

/// One file written by a generator.
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    pub what: &'static str,
    pub path: PathBuf,
    /// Characters skipped because the font has no glyph for them.
    pub misses: Vec<GlyphMiss>,
}

pub fn generate_brain(
    scene: &BrainScene,
    out_dir: &Path,
    output: Option<&Path>,
) -> Result<Generated> {
    let start = Instant::now();
    let svg = scene.render()?;
    let path = target_path(out_dir, output, BRAIN_FILE);
    prepare_output(&path)?;
    svg.save(&path)?;

    info!(
        variant = %scene.variant,
        seed = scene.seed,
        "Brain diagram: {:.3}s",
        start.elapsed().as_secs_f64()
    );
    Ok(Generated {
        what: "Cyber brain SVG",
        path,
        misses: Vec::new(),
    })
}

/// Load a font file, or fall back to the built-in font.
pub fn load_font(path: Option<&Path>) -> Result<Cow<'static, GlyphTable>> {
    let Some(path) = path else {
        return Ok(Cow::Borrowed(GlyphTable::builtin()));
    };
    let source = std::fs::read_to_string(path).map_err(|e| {
        Error::from(e)
            .with_operation("pipeline::load_font")
            .with_context("path", path.display().to_string())
    })?;
    let table = GlyphTable::from_toml(&source)
        .map_err(|e| e.with_context("path", path.display().to_string()))?;
    info!(path = %path.display(), glyphs = table.len(), "font loaded");
    Ok(Cow::Owned(table))
}

/// Render pixel text. With `strict`, the first missing glyph is an error and
/// nothing is written.
pub fn generate_pixel_text(
    scene: &PixelScene,
    font: &GlyphTable,
    strict: bool,
    out_dir: &Path,
    output: Option<&Path>,
) -> Result<Generated> {
    let start = Instant::now();
    let render = scene.render(font)?;

    if strict {
        if let Some(miss) = render.misses.first() {
            return Err(miss
                .to_error()
                .with_operation("pipeline::generate_pixel_text")
                .with_context("misses", render.misses.len().to_string()));
        }
    }

    let path = target_path(out_dir, output, PIXEL_TEXT_FILE);
    prepare_output(&path)?;
    render.svg.save(&path)?;

    if !render.misses.is_empty() {
        warn!(
            misses = render.misses.len(),
            path = %path.display(),
            "pixel text written with skipped characters"
        );
    }
    info!("Pixel text: {:.3}s", start.elapsed().as_secs_f64());
    Ok(Generated {
        what: "Pixel text SVG",
        path,
        misses: render.misses,
    })
}

pub fn generate_logo(
    scene: &LogoScene,
    out_dir: &Path,
    output: Option<&Path>,
) -> Result<Generated> {
    let start = Instant::now();
    let svg = scene.render()?;
    let path = target_path(out_dir, output, LOGO_FILE);
    prepare_output(&path)?;
    svg.save(&path)?;

    info!("Gold text logo: {:.3}s", start.elapsed().as_secs_f64());
    Ok(Generated {
        what: "Gold text SVG",
        path,
        misses: Vec::new(),
    })
}
