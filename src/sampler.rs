use crate::coords::Interval;
use crate::error::{Result, VizError};
use crate::functions::FunctionEntry;

/// One sample of a curve. `y` is `None` where the function is undefined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    pub x: f64,
    pub y: Option<f64>,
}

/// Evenly spaced samples of a function, regenerated every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveSample {
    points: Vec<CurvePoint>,
}

impl CurveSample {
    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Maximal runs of defined samples. Holes split a curve into several
    /// line strips.
    pub fn runs(&self) -> Vec<Vec<(f64, f64)>> {
        let mut runs = Vec::new();
        let mut current = Vec::new();
        for point in &self.points {
            match point.y {
                Some(y) => current.push((point.x, y)),
                None if !current.is_empty() => runs.push(std::mem::take(&mut current)),
                None => {}
            }
        }
        if !current.is_empty() {
            runs.push(current);
        }
        runs
    }

    /// Defined samples only.
    pub fn defined(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points.iter().filter_map(|p| p.y.map(|y| (p.x, y)))
    }
}

/// `segments + 1` samples of `entry` across its whole domain.
pub fn sample(entry: &FunctionEntry, segments: usize) -> Result<CurveSample> {
    sample_over(entry, entry.domain(), segments)
}

/// `segments + 1` samples of `entry` across `domain`; the first lands on
/// the lower bound and the last on the upper bound.
pub fn sample_over(entry: &FunctionEntry, domain: Interval, segments: usize) -> Result<CurveSample> {
    if segments == 0 {
        return Err(VizError::NoSegments);
    }
    let count = segments as f64;
    let points = (0..=segments)
        .map(|i| {
            let x = domain.lerp(i as f64 / count);
            CurvePoint { x, y: entry.eval(x) }
        })
        .collect();
    Ok(CurveSample { points })
}
