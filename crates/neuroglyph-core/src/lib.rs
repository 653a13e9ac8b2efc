//! Geometry planning for the neuroglyph generators.
//!
//! Both planners are pure: they take parameters and return plain data, with
//! no drawing or I/O. Renderers in `neuroglyph-svg` turn the plans into
//! documents.
//!
//! - [`layout`]: seeded node scattering and random edges in an elliptical region
//! - [`glyph`]: bitmap glyphs and the built-in pixel font
//! - [`raster`]: two-pass text rasterization into unit cells
pub mod glyph;
pub mod layout;
pub mod raster;
pub mod region;

pub use glyph::{Cell, Glyph, GlyphTable, KeyCase};
pub use layout::{
    Edge, Layout, LayoutConfig, Node, PlacementPolicy, ValueRange, generate_layout,
    max_edge_count,
};
pub use neuroglyph_error::{Error, ErrorKind, Result};
pub use raster::{
    CellMetrics, CellPrimitive, Emission, Extent, GlyphMiss, Raster, advance, emit, measure,
    rasterize,
};
pub use region::Region;
