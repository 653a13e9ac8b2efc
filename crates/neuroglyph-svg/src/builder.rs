//! SVG document builder.
//!
//! Shapes are appended to the body in call order; paint resources go to a
//! separate `<defs>` buffer so they can be registered at any point and still
//! precede the shapes that use them.

use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write as _};
use std::path::Path;

use tracing::debug;

use neuroglyph_error::{Error, Result};

use crate::paint::{Filter, FilterPrimitive, Font, LinearGradient, Style};

/// Format a number for an attribute: shortest exact form, no trailing `.0`.
pub fn fmt_num(value: f64) -> String {
    if value == 0.0 {
        // Also folds -0.0.
        return "0".to_string();
    }
    value.to_string()
}

/// Escape text content and attribute values.
pub fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Write indentation to output.
fn write_indent(output: &mut String, level: usize) {
    for _ in 0..level {
        output.push_str("  ");
    }
}

/// An SVG document under construction.
#[derive(Debug, Clone)]
pub struct SvgBuilder {
    width: f64,
    height: f64,
    view_box: Option<(f64, f64, f64, f64)>,
    defs: String,
    body: String,
    shapes: usize,
}

impl SvgBuilder {
    /// Create a document of the given pixel dimensions.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            view_box: None,
            defs: String::new(),
            body: String::with_capacity(4096),
            shapes: 0,
        }
    }

    /// Set the `viewBox` attribute.
    pub fn view_box(&mut self, min_x: f64, min_y: f64, width: f64, height: f64) -> &mut Self {
        self.view_box = Some((min_x, min_y, width, height));
        self
    }

    /// Register a linear gradient.
    pub fn linear_gradient(&mut self, gradient: &LinearGradient) -> &mut Self {
        write_indent(&mut self.defs, 2);
        let _ = writeln!(
            self.defs,
            r#"<linearGradient id="{}" x1="{}" y1="{}" x2="{}" y2="{}">"#,
            escape_xml(&gradient.id),
            fmt_num(gradient.start.0),
            fmt_num(gradient.start.1),
            fmt_num(gradient.end.0),
            fmt_num(gradient.end.1),
        );
        for stop in &gradient.stops {
            write_indent(&mut self.defs, 3);
            let _ = writeln!(
                self.defs,
                r#"<stop offset="{}" stop-color="{}" stop-opacity="{}" />"#,
                fmt_num(stop.offset),
                escape_xml(&stop.color),
                fmt_num(stop.opacity),
            );
        }
        write_indent(&mut self.defs, 2);
        self.defs.push_str("</linearGradient>\n");
        self
    }

    /// Register a filter graph.
    pub fn filter(&mut self, filter: &Filter) -> &mut Self {
        write_indent(&mut self.defs, 2);
        let _ = writeln!(self.defs, r#"<filter id="{}">"#, escape_xml(&filter.id));
        for primitive in &filter.primitives {
            write_indent(&mut self.defs, 3);
            match primitive {
                FilterPrimitive::GaussianBlur {
                    input,
                    std_deviation,
                    result,
                } => {
                    let _ = writeln!(
                        self.defs,
                        r#"<feGaussianBlur in="{}" stdDeviation="{}" result="{}" />"#,
                        escape_xml(input),
                        fmt_num(*std_deviation),
                        escape_xml(result),
                    );
                }
                FilterPrimitive::Offset {
                    input,
                    dx,
                    dy,
                    result,
                } => {
                    let _ = writeln!(
                        self.defs,
                        r#"<feOffset in="{}" dx="{}" dy="{}" result="{}" />"#,
                        escape_xml(input),
                        fmt_num(*dx),
                        fmt_num(*dy),
                        escape_xml(result),
                    );
                }
                FilterPrimitive::Merge { inputs } => {
                    self.defs.push_str("<feMerge>\n");
                    for input in inputs {
                        write_indent(&mut self.defs, 4);
                        let _ = writeln!(self.defs, r#"<feMergeNode in="{}" />"#, escape_xml(input));
                    }
                    write_indent(&mut self.defs, 3);
                    self.defs.push_str("</feMerge>\n");
                }
            }
        }
        write_indent(&mut self.defs, 2);
        self.defs.push_str("</filter>\n");
        self
    }

    /// Add an ellipse.
    pub fn ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, style: &Style) -> &mut Self {
        self.shape(
            "ellipse",
            &[("cx", cx), ("cy", cy), ("rx", rx), ("ry", ry)],
            style,
        )
    }

    /// Add a circle.
    pub fn circle(&mut self, cx: f64, cy: f64, r: f64, style: &Style) -> &mut Self {
        self.shape("circle", &[("cx", cx), ("cy", cy), ("r", r)], style)
    }

    /// Add a line segment.
    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, style: &Style) -> &mut Self {
        self.shape(
            "line",
            &[("x1", x1), ("y1", y1), ("x2", x2), ("y2", y2)],
            style,
        )
    }

    /// Add an axis-aligned rectangle.
    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, style: &Style) -> &mut Self {
        self.shape(
            "rect",
            &[("x", x), ("y", y), ("width", width), ("height", height)],
            style,
        )
    }

    /// Add a text run with its baseline starting at `(x, y)`.
    pub fn text(&mut self, x: f64, y: f64, content: &str, font: &Font, style: &Style) -> &mut Self {
        write_indent(&mut self.body, 1);
        let _ = write!(
            self.body,
            r#"<text x="{}" y="{}" font-size="{}px" font-family="{}""#,
            fmt_num(x),
            fmt_num(y),
            fmt_num(font.size),
            escape_xml(&font.family),
        );
        if let Some(weight) = &font.weight {
            let _ = write!(self.body, r#" font-weight="{}""#, escape_xml(weight));
        }
        write_style(&mut self.body, style);
        let _ = writeln!(self.body, ">{}</text>", escape_xml(content));
        self.shapes += 1;
        self
    }

    /// Number of primitives appended so far.
    pub fn shape_count(&self) -> usize {
        self.shapes
    }

    fn shape(&mut self, tag: &str, geometry: &[(&str, f64)], style: &Style) -> &mut Self {
        write_indent(&mut self.body, 1);
        let _ = write!(self.body, "<{tag}");
        for (key, value) in geometry {
            let _ = write!(self.body, r#" {key}="{}""#, fmt_num(*value));
        }
        write_style(&mut self.body, style);
        self.body.push_str(" />\n");
        self.shapes += 1;
        self
    }

    /// Finish building and return the document.
    pub fn build(self) -> String {
        let mut output = String::with_capacity(self.defs.len() + self.body.len() + 256);
        output.push_str("<?xml version=\"1.0\" encoding=\"utf-8\" ?>\n");
        let _ = write!(
            output,
            r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="{}" height="{}""#,
            fmt_num(self.width),
            fmt_num(self.height),
        );
        if let Some((x, y, w, h)) = self.view_box {
            let _ = write!(
                output,
                r#" viewBox="{} {} {} {}""#,
                fmt_num(x),
                fmt_num(y),
                fmt_num(w),
                fmt_num(h)
            );
        }
        output.push_str(">\n");
        if !self.defs.is_empty() {
            output.push_str("  <defs>\n");
            output.push_str(&self.defs);
            output.push_str("  </defs>\n");
        }
        output.push_str(&self.body);
        output.push_str("</svg>\n");
        output
    }

    /// Serialize and write the document to `path`.
    pub fn save(self, path: &Path) -> Result<()> {
        let shapes = self.shapes;
        let document = self.build();
        write_document(path, &document)?;
        debug!(path = %path.display(), shapes, bytes = document.len(), "svg saved");
        Ok(())
    }
}

/// Write a finished document. The file is opened only once the document is
/// complete, and is flushed and closed before returning on every path.
pub fn write_document(path: &Path, document: &str) -> Result<()> {
    let file = File::create(path).map_err(|e| {
        Error::from(e)
            .with_operation("svg::write_document")
            .with_context("path", path.display().to_string())
    })?;
    let mut writer = BufWriter::new(file);
    writer.write_all(document.as_bytes())?;
    writer.flush()?;
    Ok(())
}

fn write_style(out: &mut String, style: &Style) {
    if let Some(fill) = &style.fill {
        let _ = write!(out, r#" fill="{}""#, escape_xml(&fill.value()));
    }
    if let Some(stroke) = &style.stroke {
        let _ = write!(out, r#" stroke="{}""#, escape_xml(&stroke.value()));
    }
    if let Some(width) = style.stroke_width {
        let _ = write!(out, r#" stroke-width="{}""#, fmt_num(width));
    }
    if let Some(cap) = style.stroke_linecap {
        let _ = write!(out, r#" stroke-linecap="{}""#, cap.as_ref());
    }
    if let Some(opacity) = style.opacity {
        let _ = write!(out, r#" opacity="{}""#, fmt_num(opacity));
    }
    if let Some(filter) = &style.filter {
        let _ = write!(out, r#" filter="url(#{})""#, escape_xml(filter));
    }
}
