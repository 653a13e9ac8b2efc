//! Paint resources and per-shape style attributes.

use strum_macros::{AsRefStr, Display};

/// A fill or stroke value.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    /// Any CSS colour literal (`red`, `#DC143C`, `rgb(0,200,50)`, `rgba(...)`).
    Color(String),
    /// Reference to a gradient in `<defs>`.
    Url(String),
    None,
}

impl Paint {
    pub fn color(value: impl Into<String>) -> Self {
        Paint::Color(value.into())
    }

    pub fn url(id: impl Into<String>) -> Self {
        Paint::Url(id.into())
    }

    /// Attribute value form.
    pub fn value(&self) -> String {
        match self {
            Paint::Color(c) => c.clone(),
            Paint::Url(id) => format!("url(#{id})"),
            Paint::None => "none".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum LineCap {
    Butt,
    Round,
    Square,
}

/// Presentation attributes carried by every primitive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    pub fill: Option<Paint>,
    pub stroke: Option<Paint>,
    pub stroke_width: Option<f64>,
    pub stroke_linecap: Option<LineCap>,
    pub opacity: Option<f64>,
    /// Id of a filter in `<defs>`.
    pub filter: Option<String>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fill(paint: Paint) -> Self {
        Self {
            fill: Some(paint),
            ..Self::default()
        }
    }

    pub fn stroke(paint: Paint, width: f64) -> Self {
        Self {
            stroke: Some(paint),
            stroke_width: Some(width),
            ..Self::default()
        }
    }

    pub fn with_fill(mut self, paint: Paint) -> Self {
        self.fill = Some(paint);
        self
    }

    pub fn with_stroke(mut self, paint: Paint, width: f64) -> Self {
        self.stroke = Some(paint);
        self.stroke_width = Some(width);
        self
    }

    pub fn with_linecap(mut self, cap: LineCap) -> Self {
        self.stroke_linecap = Some(cap);
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn with_filter(mut self, id: impl Into<String>) -> Self {
        self.filter = Some(id.into());
        self
    }
}

/// One colour stop of a gradient.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientStop {
    /// Position along the gradient vector, `0.0..=1.0`.
    pub offset: f64,
    pub color: String,
    pub opacity: f64,
}

impl GradientStop {
    pub fn new(offset: f64, color: impl Into<String>) -> Self {
        Self {
            offset,
            color: color.into(),
            opacity: 1.0,
        }
    }
}

/// A linear gradient; endpoints are fractions of the bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub id: String,
    pub start: (f64, f64),
    pub end: (f64, f64),
    pub stops: Vec<GradientStop>,
}

impl LinearGradient {
    /// Diagonal gradient from the top-left to the bottom-right corner.
    pub fn diagonal(id: impl Into<String>, stops: Vec<GradientStop>) -> Self {
        Self {
            id: id.into(),
            start: (0.0, 0.0),
            end: (1.0, 1.0),
            stops,
        }
    }
}

/// Node of a filter graph.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterPrimitive {
    GaussianBlur {
        input: String,
        std_deviation: f64,
        result: String,
    },
    Offset {
        input: String,
        dx: f64,
        dy: f64,
        result: String,
    },
    /// Layers the inputs in order, last on top.
    Merge { inputs: Vec<String> },
}

/// A named filter graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub id: String,
    pub primitives: Vec<FilterPrimitive>,
}

impl Filter {
    /// Blurred, offset copy of the source drawn underneath it.
    pub fn glow(id: impl Into<String>, std_deviation: f64, dx: f64, dy: f64) -> Self {
        Self {
            id: id.into(),
            primitives: vec![
                FilterPrimitive::GaussianBlur {
                    input: "SourceGraphic".to_string(),
                    std_deviation,
                    result: "blur".to_string(),
                },
                FilterPrimitive::Offset {
                    input: "blur".to_string(),
                    dx,
                    dy,
                    result: "offsetBlur".to_string(),
                },
                FilterPrimitive::Merge {
                    inputs: vec!["offsetBlur".to_string(), "SourceGraphic".to_string()],
                },
            ],
        }
    }
}

/// Font attributes of a text run.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub size: f64,
    pub family: String,
    pub weight: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paint_values() {
        assert_eq!(Paint::color("red").value(), "red");
        assert_eq!(Paint::url("goldGradient").value(), "url(#goldGradient)");
        assert_eq!(Paint::None.value(), "none");
    }

    #[test]
    fn linecap_names() {
        assert_eq!(LineCap::Round.as_ref(), "round");
        assert_eq!(LineCap::Butt.to_string(), "butt");
    }

    #[test]
    fn glow_chains_blur_offset_merge() {
        let filter = Filter::glow("glow", 3.0, 2.0, 2.0);
        assert_eq!(filter.primitives.len(), 3);
        match &filter.primitives[2] {
            FilterPrimitive::Merge { inputs } => {
                assert_eq!(inputs, &["offsetBlur", "SourceGraphic"]);
            }
            other => panic!("expected merge, got {other:?}"),
        }
    }
}
