//! Deterministic layout sampling.
//!
//! Scatters nodes inside a [`Region`] and joins random pairs of them with
//! edges. Every call builds its own RNG from the caller's seed, so the same
//! inputs always produce bit-identical layouts and concurrent or repeated
//! calls never observe each other's random stream.
//!
//! Two placement policies are supported:
//!
//! - [`PlacementPolicy::PolarBounded`]: draw an angle and a radial distance
//!   around the center. Points may land outside the ellipse when the
//!   overscan factor is above 1.
//! - [`PlacementPolicy::RejectionInEllipse`]: draw candidates in the bounding
//!   box and keep the first one inside the ellipse, within a fixed attempt
//!   budget.

use std::collections::HashSet;
use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use strum_macros::IntoStaticStr;
use tracing::{debug, trace};

use crate::region::Region;
use crate::{Error, Result};

/// Default per-node attempt budget for rejection sampling.
pub const DEFAULT_MAX_ATTEMPTS: usize = 1_000;

/// A positioned point entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub opacity: f64,
}

/// A connection between two distinct node indices, in draw order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub source: usize,
    pub target: usize,
}

impl Edge {
    /// The unordered pair, smallest index first.
    pub fn key(&self) -> (usize, usize) {
        if self.source <= self.target {
            (self.source, self.target)
        } else {
            (self.target, self.source)
        }
    }
}

/// Inclusive range a scalar attribute is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        rng.gen_range(self.min..=self.max)
    }

    fn validate(&self, name: &'static str) -> Result<()> {
        // The width is checked too: rand cannot sample a span that overflows.
        let finite = [self.min, self.max, self.max - self.min]
            .iter()
            .all(|v| v.is_finite());
        if !finite || self.min > self.max {
            return Err(Error::invalid_parameters(
                name,
                format!("range {}..{} must be finite and ordered", self.min, self.max),
            ));
        }
        Ok(())
    }
}

/// How node positions are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, IntoStaticStr)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
#[strum(serialize_all = "snake_case")]
pub enum PlacementPolicy {
    /// Angle in `[0, 2pi)`, distance in `[0, rx * overscan]`, vertical offset
    /// scaled by `aspect`. Containment is not re-checked.
    PolarBounded { overscan: f64, aspect: f64 },
    /// Uniform candidates in the bounding box, accepted only inside the ellipse.
    RejectionInEllipse { max_attempts: usize },
}

impl PlacementPolicy {
    pub fn name(&self) -> &'static str {
        self.into()
    }

    fn validate(&self) -> Result<()> {
        match *self {
            PlacementPolicy::PolarBounded { overscan, aspect } => {
                for (name, value) in [("policy.overscan", overscan), ("policy.aspect", aspect)] {
                    if !value.is_finite() || value <= 0.0 {
                        return Err(Error::invalid_parameters(
                            name,
                            format!("{value} must be finite and positive"),
                        ));
                    }
                }
                Ok(())
            }
            PlacementPolicy::RejectionInEllipse { max_attempts } => {
                if max_attempts == 0 {
                    return Err(Error::invalid_parameters(
                        "policy.max_attempts",
                        "rejection sampling needs at least one attempt",
                    ));
                }
                Ok(())
            }
        }
    }

    /// Box every candidate position is drawn from, as
    /// `(min_x, min_y, max_x, max_y)`.
    fn sampling_box(&self, region: &Region) -> (f64, f64, f64, f64) {
        match *self {
            PlacementPolicy::PolarBounded { overscan, aspect } => {
                let reach_x = region.rx * overscan;
                let reach_y = reach_x * aspect;
                (
                    region.cx - reach_x,
                    region.cy - reach_y,
                    region.cx + reach_x,
                    region.cy + reach_y,
                )
            }
            PlacementPolicy::RejectionInEllipse { .. } => region.bounds(),
        }
    }
}

/// Sampler configuration shared by every layout variant.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub policy: PlacementPolicy,
    pub node_radius: ValueRange,
    pub opacity: ValueRange,
    /// Permit the same unordered pair to be drawn more than once.
    pub allow_duplicate_edges: bool,
    /// Truncate polar offsets toward zero and floor rejection candidates.
    pub snap_to_grid: bool,
}

impl LayoutConfig {
    /// Polar placement with the classic brain proportions.
    pub fn polar() -> Self {
        Self {
            policy: PlacementPolicy::PolarBounded {
                overscan: 1.1,
                aspect: 0.9,
            },
            node_radius: ValueRange::new(2.0, 6.0),
            opacity: ValueRange::new(0.5, 1.0),
            allow_duplicate_edges: true,
            snap_to_grid: true,
        }
    }

    /// Rejection placement with the denser, smaller-node proportions.
    pub fn rejection() -> Self {
        Self {
            policy: PlacementPolicy::RejectionInEllipse {
                max_attempts: DEFAULT_MAX_ATTEMPTS,
            },
            node_radius: ValueRange::new(1.0, 4.0),
            opacity: ValueRange::new(0.3, 0.9),
            allow_duplicate_edges: true,
            snap_to_grid: true,
        }
    }

    pub fn with_policy(mut self, policy: PlacementPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_duplicate_edges(mut self, allow: bool) -> Self {
        self.allow_duplicate_edges = allow;
        self
    }

    pub fn with_snap_to_grid(mut self, snap: bool) -> Self {
        self.snap_to_grid = snap;
        self
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::polar()
    }
}

/// Output of one sampler run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layout {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Layout {
    /// Both endpoints of an edge.
    pub fn endpoints(&self, edge: &Edge) -> (&Node, &Node) {
        (&self.nodes[edge.source], &self.nodes[edge.target])
    }
}

/// Number of distinct unordered pairs among `node_count` nodes.
pub fn max_edge_count(node_count: usize) -> usize {
    node_count.saturating_mul(node_count.saturating_sub(1)) / 2
}

/// Generate a reproducible layout.
///
/// Draw order is fixed: for each node its position, then its radius, then its
/// opacity; edges are drawn after all nodes.
pub fn generate_layout(
    region: &Region,
    node_count: usize,
    edge_count: usize,
    seed: u64,
    config: &LayoutConfig,
) -> Result<Layout> {
    validate(region, node_count, edge_count, config)
        .map_err(|e| e.with_operation("layout::generate"))?;

    debug!(
        node_count,
        edge_count,
        seed,
        policy = config.policy.name(),
        duplicates = config.allow_duplicate_edges,
        "generating layout"
    );

    let mut rng = StdRng::seed_from_u64(seed);

    let mut nodes = Vec::with_capacity(node_count);
    for i in 0..node_count {
        let (x, y) = place(region, config, i, &mut rng)?;
        let radius = config.node_radius.sample(&mut rng);
        let opacity = config.opacity.sample(&mut rng);
        nodes.push(Node {
            x,
            y,
            radius,
            opacity,
        });
    }

    let edges = if config.allow_duplicate_edges {
        (0..edge_count)
            .map(|_| draw_edge(node_count, &mut rng))
            .collect()
    } else {
        draw_unique_edges(node_count, edge_count, &mut rng)?
    };

    Ok(Layout { nodes, edges })
}

fn validate(
    region: &Region,
    node_count: usize,
    edge_count: usize,
    config: &LayoutConfig,
) -> Result<()> {
    region.validate()?;
    config.policy.validate()?;
    config.node_radius.validate("node_radius")?;
    config.opacity.validate("opacity")?;

    let (min_x, min_y, max_x, max_y) = config.policy.sampling_box(region);
    let finite = [min_x, min_y, max_x, max_y, max_x - min_x, max_y - min_y]
        .iter()
        .all(|v| v.is_finite());
    if !finite {
        return Err(Error::invalid_parameters(
            "region.bounds",
            format!("placement box ({min_x}, {min_y})..({max_x}, {max_y}) is not finite"),
        )
        .with_operation("layout::validate")
        .with_context("policy", config.policy.name()));
    }

    if edge_count > 0 && node_count < 2 {
        return Err(Error::invalid_parameters(
            "node_count",
            format!("{edge_count} edges need at least 2 nodes, got {node_count}"),
        )
        .with_operation("layout::validate"));
    }
    let max_edges = max_edge_count(node_count);
    if edge_count > max_edges {
        return Err(Error::invalid_parameters(
            "edge_count",
            format!("{edge_count} edges exceed the {max_edges} distinct pairs of {node_count} nodes"),
        )
        .with_operation("layout::validate"));
    }
    Ok(())
}

fn place(
    region: &Region,
    config: &LayoutConfig,
    node: usize,
    rng: &mut StdRng,
) -> Result<(f64, f64)> {
    match config.policy {
        PlacementPolicy::PolarBounded { overscan, aspect } => {
            let angle = rng.gen_range(0.0..TAU);
            let distance = rng.gen_range(0.0..=region.rx * overscan);
            let mut dx = distance * angle.cos();
            let mut dy = distance * angle.sin() * aspect;
            if config.snap_to_grid {
                dx = dx.trunc();
                dy = dy.trunc();
            }
            Ok((region.cx + dx, region.cy + dy))
        }
        PlacementPolicy::RejectionInEllipse { max_attempts } => {
            let (min_x, min_y, max_x, max_y) = region.bounds();
            for attempt in 1..=max_attempts {
                let mut x = rng.gen_range(min_x..=max_x);
                let mut y = rng.gen_range(min_y..=max_y);
                if config.snap_to_grid {
                    x = x.floor();
                    y = y.floor();
                }
                if region.contains(x, y) {
                    trace!(node, attempt, "candidate accepted");
                    return Ok((x, y));
                }
            }
            let message = if config.snap_to_grid {
                "no candidate landed inside the region; snap_to_grid floors candidates to \
                 whole coordinates, which a small region may not contain"
            } else {
                "no candidate landed inside the region"
            };
            Err(Error::generation_failed(message)
                .with_operation("layout::place")
                .with_context("node", node.to_string())
                .with_context("max_attempts", max_attempts.to_string())
                .with_context("snap_to_grid", config.snap_to_grid.to_string()))
        }
    }
}

fn draw_edge(node_count: usize, rng: &mut StdRng) -> Edge {
    let picked = index::sample(rng, node_count, 2);
    Edge {
        source: picked.index(0),
        target: picked.index(1),
    }
}

fn draw_unique_edges(node_count: usize, edge_count: usize, rng: &mut StdRng) -> Result<Vec<Edge>> {
    let budget = edge_count.saturating_mul(64).saturating_add(1024);
    let mut seen = HashSet::with_capacity(edge_count);
    let mut edges = Vec::with_capacity(edge_count);
    let mut draws = 0usize;

    while edges.len() < edge_count {
        if draws == budget {
            return Err(Error::generation_failed("duplicate-free edge budget exhausted")
                .with_operation("layout::draw_unique_edges")
                .with_context("drawn", edges.len().to_string())
                .with_context("budget", budget.to_string()));
        }
        draws += 1;
        let edge = draw_edge(node_count, rng);
        if seen.insert(edge.key()) {
            edges.push(edge);
        }
    }

    trace!(draws, edge_count, "unique edges drawn");
    Ok(edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use neuroglyph_error::ErrorKind;

    fn brain_region() -> Region {
        Region::new(400.0, 400.0, 280.0, 252.0)
    }

    #[test]
    fn edge_key_is_unordered() {
        let a = Edge {
            source: 7,
            target: 2,
        };
        let b = Edge {
            source: 2,
            target: 7,
        };
        assert_eq!(a.key(), (2, 7));
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn max_edge_count_matches_pairs() {
        assert_eq!(max_edge_count(0), 0);
        assert_eq!(max_edge_count(1), 0);
        assert_eq!(max_edge_count(2), 1);
        assert_eq!(max_edge_count(70), 2415);
    }

    #[test]
    fn empty_layout_is_valid() {
        let layout = generate_layout(&brain_region(), 0, 0, 1, &LayoutConfig::polar()).unwrap();
        assert!(layout.nodes.is_empty());
        assert!(layout.edges.is_empty());
    }

    #[test]
    fn single_node_without_edges_is_valid() {
        let layout = generate_layout(&brain_region(), 1, 0, 1, &LayoutConfig::rejection()).unwrap();
        assert_eq!(layout.nodes.len(), 1);
    }

    #[test]
    fn edges_need_two_nodes() {
        let err = generate_layout(&brain_region(), 1, 1, 1, &LayoutConfig::polar()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameters);
        assert_eq!(err.context_value("parameter"), Some("node_count"));
    }

    #[test]
    fn too_many_edges_rejected() {
        let err = generate_layout(&brain_region(), 3, 4, 1, &LayoutConfig::polar()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameters);
        assert_eq!(err.context_value("parameter"), Some("edge_count"));
        assert_eq!(err.operation(), "layout::generate");
    }

    #[test]
    fn bad_ranges_rejected() {
        let mut config = LayoutConfig::polar();
        config.opacity = ValueRange::new(0.9, 0.1);
        let err = generate_layout(&brain_region(), 4, 2, 1, &config).unwrap_err();
        assert_eq!(err.context_value("parameter"), Some("opacity"));

        let config = LayoutConfig::polar().with_policy(PlacementPolicy::PolarBounded {
            overscan: 0.0,
            aspect: 1.0,
        });
        let err = generate_layout(&brain_region(), 4, 2, 1, &config).unwrap_err();
        assert_eq!(err.context_value("parameter"), Some("policy.overscan"));

        let config = LayoutConfig::rejection()
            .with_policy(PlacementPolicy::RejectionInEllipse { max_attempts: 0 });
        let err = generate_layout(&brain_region(), 4, 2, 1, &config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameters);
    }

    #[test]
    fn unbounded_polar_reach_is_rejected() {
        let region = Region::new(0.0, 0.0, f64::MAX, 1.0);
        let err = generate_layout(&region, 2, 1, 42, &LayoutConfig::polar()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameters);
        assert_eq!(err.context_value("parameter"), Some("region.bounds"));
        assert_eq!(err.context_value("policy"), Some("polar_bounded"));
    }

    #[test]
    fn unbounded_rejection_box_is_rejected() {
        for region in [
            Region::new(f64::MAX, 0.0, f64::MAX, 1.0),
            // Finite corners, but the width overflows.
            Region::new(0.0, 0.0, f64::MAX, 1.0),
        ] {
            let err =
                generate_layout(&region, 2, 1, 42, &LayoutConfig::rejection()).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidParameters, "{region:?}");
            assert_eq!(err.context_value("parameter"), Some("region.bounds"));
        }
    }

    #[test]
    fn overflowing_value_range_is_rejected() {
        let mut config = LayoutConfig::polar();
        config.node_radius = ValueRange::new(-f64::MAX, f64::MAX);
        let err = generate_layout(&brain_region(), 4, 2, 1, &config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameters);
        assert_eq!(err.context_value("parameter"), Some("node_radius"));
    }

    #[test]
    fn snapping_is_named_when_rejection_runs_dry() {
        let region = Region::new(0.5, 0.5, 0.4, 0.4);
        let err = generate_layout(&region, 1, 0, 3, &LayoutConfig::rejection()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::GenerationFailed);
        assert_eq!(err.context_value("snap_to_grid"), Some("true"));
        assert!(err.message().contains("snap_to_grid"));

        let config = LayoutConfig::rejection().with_snap_to_grid(false);
        let layout = generate_layout(&region, 1, 0, 3, &config).unwrap();
        assert!(region.contains(layout.nodes[0].x, layout.nodes[0].y));
    }

    #[test]
    fn attributes_stay_in_range() {
        let config = LayoutConfig::rejection();
        let layout = generate_layout(&brain_region(), 100, 150, 42, &config).unwrap();
        for node in &layout.nodes {
            assert!((1.0..=4.0).contains(&node.radius), "{node:?}");
            assert!((0.3..=0.9).contains(&node.opacity), "{node:?}");
        }
    }

    #[test]
    fn snapped_positions_are_whole_offsets() {
        let layout =
            generate_layout(&brain_region(), 50, 0, 9, &LayoutConfig::polar()).unwrap();
        for node in &layout.nodes {
            assert_eq!(node.x.fract(), 0.0);
            assert_eq!(node.y.fract(), 0.0);
        }
    }

    #[test]
    fn unsnapped_polar_stays_within_overscan() {
        let config = LayoutConfig::polar().with_snap_to_grid(false);
        let region = brain_region();
        let layout = generate_layout(&region, 200, 0, 5, &config).unwrap();
        let limit = region.rx * 1.1 + 1e-9;
        for node in &layout.nodes {
            let dx = node.x - region.cx;
            let dy = (node.y - region.cy) / 0.9;
            assert!((dx * dx + dy * dy).sqrt() <= limit, "{node:?}");
        }
    }

    #[test]
    fn policy_names_are_snake_case() {
        assert_eq!(LayoutConfig::polar().policy.name(), "polar_bounded");
        assert_eq!(LayoutConfig::rejection().policy.name(), "rejection_in_ellipse");
    }
}
