//! SVG output for neuroglyph.
//!
//! [`SvgBuilder`] is a small append-only document writer; the scene modules
//! turn core plans into documents with it.
pub mod brain;
pub mod builder;
pub mod logo;
pub mod paint;
pub mod pixel;

pub use brain::{BrainScene, BrainVariant};
pub use builder::{SvgBuilder, escape_xml, fmt_num, write_document};
pub use logo::LogoScene;
pub use paint::{Filter, FilterPrimitive, Font, GradientStop, LineCap, LinearGradient, Paint, Style};
pub use pixel::{PixelRender, PixelScene, PixelStyle, draw};
