//! Coordinate mapping between data space, the unit square and clip space.
//!
//! Every view describes its geometry in its own data coordinates. A
//! [`PlotWindow`] takes those to the unit square `[0,1]²`, and [`to_clip`]
//! takes the unit square to the `[-1,1]²` clip space the renderer expects,
//! dividing x by the viewport aspect ratio so shapes keep their proportions
//! on non-square canvases.

use serde::Deserialize;

use crate::error::{Result, VizError};

/// Map a point of the unit square into clip space.
pub fn to_clip(x_norm: f64, y_norm: f64, aspect: f64) -> (f64, f64) {
    ((x_norm * 2.0 - 1.0) / aspect, y_norm * 2.0 - 1.0)
}

/// Width over height, with degenerate viewports treated as square.
pub fn aspect_ratio(width: f64, height: f64) -> f64 {
    let aspect = width / height;
    if aspect.is_finite() && aspect > 0.0 {
        aspect
    } else {
        1.0
    }
}

/// Position of a pointer along one axis of a container, as a fraction of
/// the container's extent. `None` when the container has no extent.
pub fn pointer_fraction(client: f64, origin: f64, extent: f64) -> Option<f64> {
    if !(extent.is_finite() && extent > 0.0) || !client.is_finite() {
        return None;
    }
    Some((client - origin) / extent)
}

/// Closed interval `[lo, hi]` with `lo < hi`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "(f64, f64)")]
pub struct Interval {
    pub(crate) lo: f64,
    pub(crate) hi: f64,
}

impl Interval {
    pub const UNIT: Interval = Interval { lo: 0.0, hi: 1.0 };
    pub const SIGNED: Interval = Interval { lo: -1.0, hi: 1.0 };

    pub fn new(lo: f64, hi: f64) -> Result<Self> {
        if lo.is_finite() && hi.is_finite() && lo < hi {
            Ok(Self { lo, hi })
        } else {
            Err(VizError::InvalidBounds { lo, hi })
        }
    }

    pub fn lo(&self) -> f64 {
        self.lo
    }

    pub fn hi(&self) -> f64 {
        self.hi
    }

    pub fn width(&self) -> f64 {
        self.hi - self.lo
    }

    pub fn contains(&self, x: f64) -> bool {
        x >= self.lo && x <= self.hi
    }

    /// Clamp into the interval. `NaN` lands on the lower bound.
    pub fn clamp(&self, x: f64) -> f64 {
        if x.is_nan() {
            return self.lo;
        }
        x.clamp(self.lo, self.hi)
    }

    /// Point at parameter `t`; exact at both ends.
    pub fn lerp(&self, t: f64) -> f64 {
        self.lo * (1.0 - t) + self.hi * t
    }

    /// Inverse of [`Interval::lerp`].
    pub fn fraction_of(&self, x: f64) -> f64 {
        (x - self.lo) / self.width()
    }

    /// Intersection with `other`, if it is non-degenerate.
    pub fn intersect(&self, other: &Interval) -> Result<Interval> {
        Interval::new(self.lo.max(other.lo), self.hi.min(other.hi))
    }
}

impl TryFrom<(f64, f64)> for Interval {
    type Error = VizError;

    fn try_from((lo, hi): (f64, f64)) -> Result<Self> {
        Interval::new(lo, hi)
    }
}

/// The region of data space a view shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotWindow {
    pub x: Interval,
    pub y: Interval,
}

impl PlotWindow {
    /// `[-1,1]²`: data coordinates are already clip coordinates.
    pub const SIGNED: PlotWindow = PlotWindow {
        x: Interval::SIGNED,
        y: Interval::SIGNED,
    };

    pub fn new(x: Interval, y: Interval) -> Self {
        Self { x, y }
    }

    pub fn normalize(&self, x: f64, y: f64) -> (f64, f64) {
        (self.x.fraction_of(x), self.y.fraction_of(y))
    }

    pub fn to_clip(&self, x: f64, y: f64, aspect: f64) -> (f64, f64) {
        let (u, v) = self.normalize(x, y);
        to_clip(u, v, aspect)
    }
}
