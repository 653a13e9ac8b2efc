//! Elliptical placement regions.

use serde::Deserialize;

use crate::{Error, Result};

/// An axis-aligned ellipse given by its center and two radii.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Region {
    pub cx: f64,
    pub cy: f64,
    pub rx: f64,
    pub ry: f64,
}

impl Region {
    pub fn new(cx: f64, cy: f64, rx: f64, ry: f64) -> Self {
        Self { cx, cy, rx, ry }
    }

    /// Left-hand side of the membership inequality; a point is inside when
    /// this is `<= 1`.
    pub fn membership(&self, x: f64, y: f64) -> f64 {
        let dx = (x - self.cx) / self.rx;
        let dy = (y - self.cy) / self.ry;
        dx * dx + dy * dy
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.membership(x, y) <= 1.0
    }

    /// Bounding box as `(min_x, min_y, max_x, max_y)`.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        (
            self.cx - self.rx,
            self.cy - self.ry,
            self.cx + self.rx,
            self.cy + self.ry,
        )
    }

    /// Reject non-finite centers and radii that are not strictly positive.
    pub fn validate(&self) -> Result<()> {
        if !self.cx.is_finite() || !self.cy.is_finite() {
            return Err(Error::invalid_parameters(
                "region.center",
                format!("center ({}, {}) is not finite", self.cx, self.cy),
            )
            .with_operation("region::validate"));
        }
        for (name, value) in [("region.rx", self.rx), ("region.ry", self.ry)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::invalid_parameters(
                    name,
                    format!("radius {value} must be finite and positive"),
                )
                .with_operation("region::validate"));
            }
        }
        Ok(())
    }
}
