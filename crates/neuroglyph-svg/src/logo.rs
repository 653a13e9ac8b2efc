//! Gold text logo with a glow filter.
//!
//! There is no font metrics source, so the canvas is an estimate: each
//! character is assumed to be `0.6 em` wide and the line `1.2 em` tall.

use tracing::debug;

use neuroglyph_error::{Error, Result};

use crate::builder::SvgBuilder;
use crate::paint::{Filter, Font, GradientStop, LinearGradient, Paint, Style};

const GRADIENT_ID: &str = "goldGradient";
const FILTER_ID: &str = "glow";

#[derive(Debug, Clone, PartialEq)]
pub struct LogoScene {
    pub text: String,
    pub font_size: f64,
    pub font_family: String,
}

impl Default for LogoScene {
    fn default() -> Self {
        Self {
            text: "@RFOF-NETWORK".to_string(),
            font_size: 60.0,
            font_family: "Arial Black, sans-serif".to_string(),
        }
    }
}

impl LogoScene {
    /// Estimated `(width, height)` of the text run.
    pub fn extent(&self) -> (f64, f64) {
        let chars = self.text.chars().count() as f64;
        (chars * self.font_size * 0.6, self.font_size * 1.2)
    }

    pub fn render(&self) -> Result<SvgBuilder> {
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(Error::invalid_parameters(
                "font_size",
                format!("font size {} must be finite and positive", self.font_size),
            )
            .with_operation("logo::render"));
        }

        let (width, height) = self.extent();
        let mut svg = SvgBuilder::new(width, height);
        svg.view_box(0.0, 0.0, width, height)
            .linear_gradient(&LinearGradient::diagonal(
                GRADIENT_ID,
                vec![
                    GradientStop::new(0.0, "rgb(255,215,0)"),
                    GradientStop::new(0.5, "rgb(255,240,100)"),
                    GradientStop::new(1.0, "rgb(150,110,0)"),
                ],
            ))
            .filter(&Filter::glow(FILTER_ID, 3.0, 2.0, 2.0));

        let font = Font {
            size: self.font_size,
            family: self.font_family.clone(),
            weight: Some("bold".to_string()),
        };
        svg.text(
            0.0,
            self.font_size * 0.9,
            &self.text,
            &font,
            &Style::fill(Paint::url(GRADIENT_ID)).with_filter(FILTER_ID),
        );

        debug!(chars = self.text.chars().count(), width, height, "logo drawn");
        Ok(svg)
    }
}
