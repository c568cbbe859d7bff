//! Finite-difference derivatives and Riemann sums over registered functions.

use std::str::FromStr;

use serde::Deserialize;

use crate::coords::Interval;
use crate::error::{Result, VizError};
use crate::functions::FunctionEntry;

/// Step used when a derivative is shown as "exact".
pub const FINE_DX: f64 = 1e-4;

/// Slope of `entry` at `x` by central difference over a window of width
/// `dx`. The window is clamped to the function's domain, so at an edge this
/// degrades to a one-sided difference instead of sampling outside it.
pub fn derivative_at(entry: &FunctionEntry, x: f64, dx: f64) -> Result<f64> {
    if !(dx.is_finite() && dx > 0.0) {
        return Err(VizError::InvalidStep(dx));
    }
    let (lo, hi) = difference_window(entry.domain(), x, dx);
    if hi <= lo {
        return Err(VizError::InvalidStep(dx));
    }
    let y_lo = entry.eval(lo).ok_or(VizError::Undefined { x: lo })?;
    let y_hi = entry.eval(hi).ok_or(VizError::Undefined { x: hi })?;
    Ok((y_hi - y_lo) / (hi - lo))
}

/// The two points a difference quotient of width `dx` around `x` samples,
/// kept inside `domain`.
pub fn difference_window(domain: Interval, x: f64, dx: f64) -> (f64, f64) {
    let x = domain.clamp(x);
    (domain.clamp(x - dx / 2.0), domain.clamp(x + dx / 2.0))
}

/// Where in each subinterval a Riemann sum samples the function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiemannRule {
    #[default]
    Left,
    Right,
    Midpoint,
}

impl RiemannRule {
    fn offset(self) -> f64 {
        match self {
            RiemannRule::Left => 0.0,
            RiemannRule::Right => 1.0,
            RiemannRule::Midpoint => 0.5,
        }
    }
}

impl FromStr for RiemannRule {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "left" => Ok(RiemannRule::Left),
            "right" => Ok(RiemannRule::Right),
            "midpoint" | "mid" => Ok(RiemannRule::Midpoint),
            other => Err(VizError::UnknownMode(other.to_string())),
        }
    }
}

/// One rectangle of a Riemann sum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiemannRect {
    pub x0: f64,
    pub x1: f64,
    /// Where the height was sampled.
    pub sample: f64,
    pub height: f64,
}

impl RiemannRect {
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn area(&self) -> f64 {
        self.height * self.width()
    }
}

/// The `n` rectangles of a Riemann sum of `entry` over `[lower, upper]`,
/// with the bounds clamped to the function's domain.
pub fn riemann_rectangles(
    entry: &FunctionEntry,
    lower: f64,
    upper: f64,
    n: usize,
    rule: RiemannRule,
) -> Result<Vec<RiemannRect>> {
    if n == 0 {
        return Err(VizError::ZeroSubintervals);
    }
    let domain = entry.domain();
    let bounds = Interval::new(domain.clamp(lower), domain.clamp(upper))
        .map_err(|_| VizError::InvalidBounds { lo: lower, hi: upper })?;

    let count = n as f64;
    (0..n)
        .map(|i| {
            let x0 = bounds.lerp(i as f64 / count);
            let x1 = bounds.lerp((i + 1) as f64 / count);
            let sample = x0 + (x1 - x0) * rule.offset();
            let height = entry.eval(sample).ok_or(VizError::Undefined { x: sample })?;
            Ok(RiemannRect {
                x0,
                x1,
                sample,
                height,
            })
        })
        .collect()
}

/// Riemann-sum approximation of the integral of `entry` over `[lower, upper]`.
pub fn riemann_sum(
    entry: &FunctionEntry,
    lower: f64,
    upper: f64,
    n: usize,
    rule: RiemannRule,
) -> Result<f64> {
    let rects = riemann_rectangles(entry, lower, upper, n, rule)?;
    Ok(rects.iter().map(RiemannRect::area).sum())
}
