//! Cyber brain scene: a gold brain silhouette with green neurons and axons.

use serde::Deserialize;
use strum_macros::{Display, EnumString, IntoStaticStr};
use tracing::debug;

use neuroglyph_core::{Layout, LayoutConfig, Region, generate_layout};
use neuroglyph_error::Result;

use crate::builder::SvgBuilder;
use crate::paint::{GradientStop, LineCap, LinearGradient, Paint, Style};

const NEURON_BASE: &str = "rgb(0,200,50)";
const NEURON_GLOW: &str = "rgb(50,255,100)";
const AXON: &str = "rgb(0,100,20)";

const GOLD: &str = "rgb(255,215,0)";
const GOLD_LIGHT: &str = "rgb(255,240,100)";
const GOLD_DARK: &str = "rgb(150,110,0)";

/// Brain silhouette and sampling preset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Display, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BrainVariant {
    /// Single gradient, polar placement with overscan.
    #[default]
    Classic,
    /// Shaded lobes, rejection placement strictly inside the ellipse.
    Lobed,
}

/// All parameters of one brain render.
#[derive(Debug, Clone, PartialEq)]
pub struct BrainScene {
    pub variant: BrainVariant,
    /// Canvas edge length in pixels.
    pub size: u32,
    pub node_count: usize,
    pub edge_count: usize,
    pub seed: u64,
    pub allow_duplicate_edges: bool,
}

impl BrainScene {
    pub fn preset(variant: BrainVariant) -> Self {
        let (node_count, edge_count) = match variant {
            BrainVariant::Classic => (70, 100),
            BrainVariant::Lobed => (100, 150),
        };
        Self {
            variant,
            size: 800,
            node_count,
            edge_count,
            seed: 42,
            allow_duplicate_edges: true,
        }
    }

    fn center(&self) -> f64 {
        f64::from(self.size / 2)
    }

    /// The ellipse nodes are scattered in.
    pub fn region(&self) -> Region {
        let size = f64::from(self.size);
        let rx = size * 0.35;
        let ry = match self.variant {
            BrainVariant::Classic => rx * 0.9,
            BrainVariant::Lobed => size * 0.30,
        };
        Region::new(self.center(), self.center(), rx, ry)
    }

    pub fn layout_config(&self) -> LayoutConfig {
        let config = match self.variant {
            BrainVariant::Classic => LayoutConfig::polar(),
            BrainVariant::Lobed => LayoutConfig::rejection(),
        };
        config.with_duplicate_edges(self.allow_duplicate_edges)
    }

    /// Sample the neuron layout without drawing anything.
    pub fn plan(&self) -> Result<Layout> {
        generate_layout(
            &self.region(),
            self.node_count,
            self.edge_count,
            self.seed,
            &self.layout_config(),
        )
        .map_err(|e| e.with_context("variant", self.variant.to_string()))
    }

    pub fn render(&self) -> Result<SvgBuilder> {
        let layout = self.plan()?;
        let size = f64::from(self.size);
        let mut svg = SvgBuilder::new(size, size);

        match self.variant {
            BrainVariant::Classic => self.draw_classic_body(&mut svg),
            BrainVariant::Lobed => self.draw_lobed_body(&mut svg),
        }
        self.draw_network(&mut svg, &layout);

        debug!(
            variant = %self.variant,
            nodes = layout.nodes.len(),
            edges = layout.edges.len(),
            shapes = svg.shape_count(),
            "brain scene drawn"
        );
        Ok(svg)
    }

    fn draw_classic_body(&self, svg: &mut SvgBuilder) {
        let region = self.region();
        let (cx, cy, r) = (region.cx, region.cy, region.rx);

        svg.linear_gradient(&LinearGradient::diagonal(
            "goldGradient",
            vec![
                GradientStop::new(0.0, GOLD),
                GradientStop::new(0.5, GOLD_LIGHT),
                GradientStop::new(1.0, GOLD_DARK),
            ],
        ));
        svg.ellipse(
            cx,
            cy,
            region.rx,
            region.ry,
            &Style::fill(Paint::url("goldGradient")).with_stroke(Paint::color(GOLD_LIGHT), 3.0),
        );
        svg.line(
            cx,
            cy - r * 0.8,
            cx,
            cy + r * 0.8,
            &Style::stroke(Paint::color("rgb(180,140,0)"), 2.0),
        );
    }

    fn draw_lobed_body(&self, svg: &mut SvgBuilder) {
        let region = self.region();
        let (cx, cy, rx, ry) = (region.cx, region.cy, region.rx, region.ry);
        let shadow = f64::from(self.size) * 0.02;

        svg.linear_gradient(&LinearGradient::diagonal(
            "goldGradientLight",
            vec![GradientStop::new(0.0, GOLD_LIGHT), GradientStop::new(1.0, GOLD)],
        ))
        .linear_gradient(&LinearGradient::diagonal(
            "goldGradientDark",
            vec![GradientStop::new(0.0, GOLD_DARK), GradientStop::new(1.0, GOLD)],
        ));

        svg.ellipse(
            cx + shadow,
            cy + shadow,
            rx,
            ry,
            &Style::fill(Paint::color("rgba(0,0,0,0.3)")),
        )
        .ellipse(
            cx,
            cy,
            rx,
            ry,
            &Style::fill(Paint::url("goldGradientLight")).with_stroke(Paint::color(GOLD_LIGHT), 3.0),
        )
        .line(
            cx - rx * 0.05,
            cy - ry * 0.8,
            cx + rx * 0.05,
            cy + ry * 0.8,
            &Style::stroke(Paint::url("goldGradientDark"), 2.0).with_linecap(LineCap::Round),
        );

        let lobe = Style {
            stroke: Some(Paint::None),
            ..Style::fill(Paint::url("goldGradientDark")).with_opacity(0.7)
        };
        svg.circle(cx - rx * 0.2, cy - ry * 0.4, rx * 0.1, &lobe)
            .circle(cx + rx * 0.25, cy + ry * 0.3, rx * 0.08, &lobe);
    }

    /// Neurons first, then axons on top of them.
    fn draw_network(&self, svg: &mut SvgBuilder, layout: &Layout) {
        let (glow_scale, glow_alpha, axon_width, axon_alpha) = match self.variant {
            BrainVariant::Classic => (0.5, 0.7, 0.4, 0.6),
            BrainVariant::Lobed => (0.6, 0.6, 0.3, 0.5),
        };

        for node in &layout.nodes {
            svg.circle(
                node.x,
                node.y,
                node.radius,
                &Style::fill(Paint::color(NEURON_BASE)).with_opacity(node.opacity),
            );
            svg.circle(
                node.x,
                node.y,
                node.radius * glow_scale,
                &Style::fill(Paint::color(NEURON_GLOW)).with_opacity(node.opacity * glow_alpha),
            );
        }

        let axon = Style::stroke(Paint::color(AXON), axon_width).with_opacity(axon_alpha);
        for edge in &layout.edges {
            let (a, b) = layout.endpoints(edge);
            svg.line(a.x, a.y, b.x, b.y, &axon);
        }
    }
}

impl Default for BrainScene {
    fn default() -> Self {
        Self::preset(BrainVariant::default())
    }
}
