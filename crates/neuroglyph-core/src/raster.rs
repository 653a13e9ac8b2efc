//! Glyph rasterization.
//!
//! Rendering is split into two passes that share [`advance`]:
//! [`measure`] computes the canvas extent without emitting anything, and
//! [`emit`] walks the text again producing one [`CellPrimitive`] per declared
//! glyph cell. [`rasterize`] runs both and checks that they agree.
//!
//! All extent arithmetic is checked: metrics or text that would not fit a
//! `u32` canvas fail with `InvalidParameters` instead of wrapping.

use tracing::{debug, warn};

use crate::glyph::{Cell, Glyph, GlyphTable};
use crate::{Error, Result};

/// Cell geometry, in output pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMetrics {
    pub cell_size: u32,
    pub gap_size: u32,
    /// Advance for a character without a glyph, in multiples of `cell_size`.
    pub fallback_cells: u32,
}

impl CellMetrics {
    pub fn new(cell_size: u32, gap_size: u32) -> Self {
        Self {
            cell_size,
            gap_size,
            fallback_cells: 4,
        }
    }

    /// Distance between adjacent cell origins.
    ///
    /// Saturates; [`CellMetrics::validate`] rejects metrics where it would.
    pub fn pitch(&self) -> u32 {
        self.cell_size.saturating_add(self.gap_size)
    }

    pub fn validate(&self) -> Result<()> {
        if self.cell_size == 0 {
            return Err(Error::invalid_parameters(
                "cell_size",
                "cell size must be at least 1",
            )
            .with_operation("raster::validate"));
        }
        if self.cell_size.checked_add(self.gap_size).is_none() {
            return Err(Error::invalid_parameters(
                "cell_size",
                "cell size plus gap size does not fit a u32",
            )
            .with_operation("raster::validate")
            .with_context("gap_size", self.gap_size.to_string()));
        }
        Ok(())
    }
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self::new(10, 2)
    }
}

/// Canvas size computed by the measuring pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Extent {
    pub width: u32,
    pub height: u32,
}

/// One unit square to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPrimitive {
    pub x: u32,
    pub y: u32,
    pub size: u32,
    pub cell: Cell,
    /// Position of the source character in the normalized text.
    pub char_index: usize,
}

/// A character that had no glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphMiss {
    pub ch: char,
    pub index: usize,
}

impl GlyphMiss {
    pub fn to_error(&self) -> Error {
        Error::glyph_lookup_miss(self.ch, self.index)
    }
}

/// Result of the emitting pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Emission {
    pub primitives: Vec<CellPrimitive>,
    /// Cursor position after the last character.
    pub cursor: u32,
    /// Tallest footprint among the emitted glyphs.
    pub height: u32,
    pub misses: Vec<GlyphMiss>,
}

/// Complete rasterization of one string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Raster {
    pub primitives: Vec<CellPrimitive>,
    pub width: u32,
    pub height: u32,
    pub misses: Vec<GlyphMiss>,
}

/// Horizontal cursor displacement for one character, or `None` if it does
/// not fit a `u32`.
pub fn advance(glyph: Option<&Glyph>, metrics: &CellMetrics) -> Option<u32> {
    match glyph {
        Some(glyph) => u32::try_from(glyph.width())
            .ok()?
            .checked_mul(metrics.pitch())?
            .checked_add(metrics.cell_size),
        None => metrics.fallback_cells.checked_mul(metrics.cell_size),
    }
}

fn footprint_height(glyph: &Glyph, metrics: &CellMetrics) -> Option<u32> {
    u32::try_from(glyph.height()).ok()?.checked_mul(metrics.pitch())
}

fn too_large(operation: &'static str, index: usize, metrics: &CellMetrics) -> Error {
    Error::invalid_parameters("text", "text does not fit a u32 canvas at this cell size")
        .with_operation(operation)
        .with_context("index", index.to_string())
        .with_context("cell_size", metrics.cell_size.to_string())
}

/// Pass 1: canvas extent of `text` (already normalized).
pub fn measure(text: &str, table: &GlyphTable, metrics: &CellMetrics) -> Result<Extent> {
    let mut extent = Extent::default();
    for (index, ch) in text.chars().enumerate() {
        let glyph = table.get(ch);
        extent.width = advance(glyph, metrics)
            .and_then(|step| extent.width.checked_add(step))
            .ok_or_else(|| too_large("raster::measure", index, metrics))?;
        if let Some(glyph) = glyph {
            let height = footprint_height(glyph, metrics)
                .ok_or_else(|| too_large("raster::measure", index, metrics))?;
            extent.height = extent.height.max(height);
        }
    }
    Ok(extent)
}

/// Pass 2: primitives for `text` (already normalized), left to right.
pub fn emit(text: &str, table: &GlyphTable, metrics: &CellMetrics) -> Result<Emission> {
    let pitch = metrics.pitch();
    let mut emission = Emission::default();

    for (index, ch) in text.chars().enumerate() {
        let glyph = table.get(ch);
        let cursor = emission.cursor;
        // Every cell offset stays below the next cursor and the footprint height.
        emission.cursor = advance(glyph, metrics)
            .and_then(|step| cursor.checked_add(step))
            .ok_or_else(|| too_large("raster::emit", index, metrics))?;
        match glyph {
            Some(glyph) => {
                let height = footprint_height(glyph, metrics)
                    .ok_or_else(|| too_large("raster::emit", index, metrics))?;
                emission.height = emission.height.max(height);
                emission
                    .primitives
                    .extend(glyph.cells().map(|(row, col, cell)| CellPrimitive {
                        x: cursor + col as u32 * pitch,
                        y: row as u32 * pitch,
                        size: metrics.cell_size,
                        cell,
                        char_index: index,
                    }));
            }
            None => {
                warn!(?ch, index, "character not defined in glyph table, skipping");
                emission.misses.push(GlyphMiss { ch, index });
            }
        }
    }

    Ok(emission)
}

/// Normalize, measure and emit `text`.
///
/// Unknown characters are recorded in [`Raster::misses`] and never abort the
/// run. Empty input yields an empty raster with a zero-sized canvas.
pub fn rasterize(text: &str, table: &GlyphTable, metrics: &CellMetrics) -> Result<Raster> {
    metrics
        .validate()
        .map_err(|e| e.with_operation("raster::rasterize"))?;

    let text = table.normalize(text);
    let extent = measure(&text, table, metrics)
        .map_err(|e| e.with_operation("raster::rasterize"))?;
    let emission =
        emit(&text, table, metrics).map_err(|e| e.with_operation("raster::rasterize"))?;

    if emission.cursor != extent.width {
        return Err(Error::unexpected("measure and emit disagree on width")
            .with_operation("raster::rasterize")
            .with_context("measured", extent.width.to_string())
            .with_context("emitted", emission.cursor.to_string()));
    }
    if emission.height != extent.height {
        return Err(Error::unexpected("measure and emit disagree on height")
            .with_operation("raster::rasterize")
            .with_context("measured", extent.height.to_string())
            .with_context("emitted", emission.height.to_string()));
    }

    debug!(
        chars = text.chars().count(),
        primitives = emission.primitives.len(),
        width = extent.width,
        height = extent.height,
        misses = emission.misses.len(),
        "rasterized text"
    );

    Ok(Raster {
        primitives: emission.primitives,
        width: extent.width,
        height: extent.height,
        misses: emission.misses,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::KeyCase;
    use pretty_assertions::assert_eq;

    #[test]
    fn advance_known_and_unknown() {
        let table = GlyphTable::builtin();
        let metrics = CellMetrics::new(10, 2);
        assert_eq!(advance(table.get('A'), &metrics), Some(46));
        assert_eq!(advance(None, &metrics), Some(40));

        let metrics = CellMetrics {
            fallback_cells: 2,
            ..CellMetrics::new(8, 1)
        };
        assert_eq!(advance(table.get('A'), &metrics), Some(35));
        assert_eq!(advance(None, &metrics), Some(16));
    }

    #[test]
    fn emit_positions_cells_on_pitch() {
        let rows: &[&str] = &["1.", ".0"];
        let table = GlyphTable::from_patterns(KeyCase::Upper, &[('X', rows)]).unwrap();
        let metrics = CellMetrics::new(4, 1);

        let emission = emit("XX", &table, &metrics).unwrap();
        let coords: Vec<_> = emission
            .primitives
            .iter()
            .map(|p| (p.x, p.y, p.cell, p.char_index))
            .collect();
        // advance = 2 * 5 + 4 = 14
        assert_eq!(
            coords,
            vec![
                (0, 0, Cell::Filled, 0),
                (5, 5, Cell::Hollow, 0),
                (14, 0, Cell::Filled, 1),
                (19, 5, Cell::Hollow, 1),
            ]
        );
        assert_eq!(emission.cursor, 28);
        assert_eq!(emission.height, 10);
        assert!(emission.misses.is_empty());
    }

    #[test]
    fn height_ignores_unknown_characters() {
        let table = GlyphTable::builtin();
        let metrics = CellMetrics::new(10, 2);
        let extent = measure("~~", table, &metrics).unwrap();
        assert_eq!(extent, Extent { width: 80, height: 0 });
        assert_eq!(emit("~~", table, &metrics).unwrap().height, 0);
    }

    #[test]
    fn emitted_height_matches_measured_height() {
        let rows_short: &[&str] = &["1"];
        let rows_tall: &[&str] = &["1", "0", "1"];
        let table =
            GlyphTable::from_patterns(KeyCase::Upper, &[('S', rows_short), ('T', rows_tall)])
                .unwrap();
        let metrics = CellMetrics::new(4, 1);

        for text in ["S", "ST", "TS", "S~T"] {
            let extent = measure(text, &table, &metrics).unwrap();
            let emission = emit(text, &table, &metrics).unwrap();
            assert_eq!(emission.height, extent.height, "{text:?}");
            assert_eq!(emission.cursor, extent.width, "{text:?}");
        }
        assert_eq!(measure("TS", &table, &metrics).unwrap().height, 15);
    }

    #[test]
    fn huge_cell_size_is_rejected_not_wrapped() {
        let table = GlyphTable::builtin();
        let metrics = CellMetrics::new(u32::MAX / 2, 2);
        assert!(metrics.validate().is_ok());
        assert_eq!(advance(table.get('A'), &metrics), None);

        let err = rasterize("AB", table, &metrics).unwrap_err();
        assert_eq!(err.kind(), neuroglyph_error::ErrorKind::InvalidParameters);
        assert_eq!(err.context_value("parameter"), Some("text"));
        assert_eq!(err.operation(), "raster::rasterize");
    }

    #[test]
    fn long_text_overflow_names_the_character() {
        let table = GlyphTable::builtin();
        // Two glyphs fit, the third would wrap.
        let metrics = CellMetrics::new(u32::MAX / 8, 0);
        assert!(measure("AB", table, &metrics).is_ok());

        let err = measure("ABC", table, &metrics).unwrap_err();
        assert_eq!(err.context_value("index"), Some("2"));
        let err = emit("ABC", table, &metrics).unwrap_err();
        assert_eq!(err.operation(), "raster::emit");
    }

    #[test]
    fn pitch_overflow_is_invalid() {
        let err = CellMetrics::new(u32::MAX, 1).validate().unwrap_err();
        assert_eq!(err.context_value("parameter"), Some("cell_size"));
        assert_eq!(err.context_value("gap_size"), Some("1"));
    }

    #[test]
    fn zero_cell_size_is_invalid() {
        let err = rasterize("A", GlyphTable::builtin(), &CellMetrics::new(0, 2)).unwrap_err();
        assert_eq!(err.kind(), neuroglyph_error::ErrorKind::InvalidParameters);
        assert_eq!(err.operation(), "raster::rasterize");
    }

    #[test]
    fn lowercase_input_is_folded() {
        let table = GlyphTable::builtin();
        let metrics = CellMetrics::default();
        let lower = rasterize("ab", table, &metrics).unwrap();
        let upper = rasterize("AB", table, &metrics).unwrap();
        assert_eq!(lower, upper);
        assert!(lower.misses.is_empty());
    }

    #[test]
    fn miss_converts_to_recoverable_error() {
        let miss = GlyphMiss { ch: '!', index: 4 };
        let err = miss.to_error();
        assert!(err.kind().is_recoverable());
        assert_eq!(err.context_value("index"), Some("4"));
    }
}
