//! Pixel text scene: one square per glyph cell.

use tracing::debug;

use neuroglyph_core::{Cell, CellMetrics, GlyphMiss, GlyphTable, Raster, rasterize};
use neuroglyph_error::Result;

use crate::builder::SvgBuilder;
use crate::paint::{Paint, Style};

/// Colours for the two cell kinds.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelStyle {
    pub fill: String,
    pub outline: String,
    pub outline_width: f64,
}

impl Default for PixelStyle {
    fn default() -> Self {
        Self {
            fill: "red".to_string(),
            outline: "black".to_string(),
            outline_width: 1.0,
        }
    }
}

impl PixelStyle {
    fn for_cell(&self, cell: Cell) -> Style {
        match cell {
            Cell::Filled => Style::fill(Paint::color(self.fill.as_str())),
            Cell::Hollow => Style::fill(Paint::None)
                .with_stroke(Paint::color(self.outline.as_str()), self.outline_width),
        }
    }
}

/// A rendered pixel text document and the characters it had to skip.
#[derive(Debug)]
pub struct PixelRender {
    pub svg: SvgBuilder,
    pub misses: Vec<GlyphMiss>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PixelScene {
    pub text: String,
    pub metrics: CellMetrics,
    pub style: PixelStyle,
}

impl Default for PixelScene {
    fn default() -> Self {
        Self {
            text: "AUTHOR: SATORAMY-PRAI".to_string(),
            metrics: CellMetrics::default(),
            style: PixelStyle::default(),
        }
    }
}

impl PixelScene {
    pub fn rasterize(&self, table: &GlyphTable) -> Result<Raster> {
        rasterize(&self.text, table, &self.metrics)
    }

    pub fn render(&self, table: &GlyphTable) -> Result<PixelRender> {
        let raster = self.rasterize(table)?;
        let svg = draw(&raster, &self.style);
        debug!(
            width = raster.width,
            height = raster.height,
            cells = raster.primitives.len(),
            "pixel text drawn"
        );
        Ok(PixelRender {
            svg,
            misses: raster.misses,
        })
    }
}

/// Draw a raster on a canvas of exactly its measured extent.
pub fn draw(raster: &Raster, style: &PixelStyle) -> SvgBuilder {
    let width = f64::from(raster.width);
    let height = f64::from(raster.height);
    let filled = style.for_cell(Cell::Filled);
    let hollow = style.for_cell(Cell::Hollow);

    let mut svg = SvgBuilder::new(width, height);
    svg.view_box(0.0, 0.0, width, height);
    for p in &raster.primitives {
        let size = f64::from(p.size);
        let cell_style = match p.cell {
            Cell::Filled => &filled,
            Cell::Hollow => &hollow,
        };
        svg.rect(f64::from(p.x), f64::from(p.y), size, size, cell_style);
    }
    svg
}
