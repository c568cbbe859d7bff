//! Named real functions the views sample.

use std::collections::BTreeMap;
use std::f64::consts::{E, PI};
use std::fmt;

use crate::coords::Interval;
use crate::error::{Result, VizError};

#[derive(Clone, Copy)]
enum Kernel {
    Total(fn(f64) -> f64),
    Partial(fn(f64) -> Option<f64>),
}

/// A named function with the domain it is defined on and the range a plot
/// of it should show.
#[derive(Clone, Copy)]
pub struct FunctionEntry {
    name: &'static str,
    kernel: Kernel,
    domain: Interval,
    range: Interval,
}

impl FunctionEntry {
    pub fn total(name: &'static str, f: fn(f64) -> f64, domain: Interval, range: Interval) -> Self {
        Self {
            name,
            kernel: Kernel::Total(f),
            domain,
            range,
        }
    }

    /// A function with holes: `f` returns `None` where it is undefined.
    pub fn partial(
        name: &'static str,
        f: fn(f64) -> Option<f64>,
        domain: Interval,
        range: Interval,
    ) -> Self {
        Self {
            name,
            kernel: Kernel::Partial(f),
            domain,
            range,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn domain(&self) -> Interval {
        self.domain
    }

    pub fn range(&self) -> Interval {
        self.range
    }

    /// Value at `x`, or `None` at a hole, outside the domain, or where the
    /// result is not finite.
    pub fn eval(&self, x: f64) -> Option<f64> {
        if !self.domain.contains(x) {
            return None;
        }
        let y = match self.kernel {
            Kernel::Total(f) => Some(f(x)),
            Kernel::Partial(f) => f(x),
        };
        y.filter(|y| y.is_finite())
    }
}

impl fmt::Debug for FunctionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionEntry")
            .field("name", &self.name)
            .field("domain", &self.domain)
            .field("range", &self.range)
            .finish()
    }
}

#[derive(Debug, Default, Clone)]
pub struct FunctionRegistry {
    entries: BTreeMap<&'static str, FunctionEntry>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The functions the bundled views plot.
    pub fn builtin() -> Self {
        Self {
            entries: builtin_entries()
                .into_iter()
                .map(|entry| (entry.name, entry))
                .collect(),
        }
    }

    pub fn register(&mut self, entry: FunctionEntry) -> Result<()> {
        if self.entries.contains_key(entry.name) {
            return Err(VizError::DuplicateFunction(entry.name.to_string()));
        }
        self.entries.insert(entry.name, entry);
        Ok(())
    }

    /// Look up a function registered at startup.
    ///
    /// # Panics
    ///
    /// Panics if `name` was never registered. Names coming from the page go
    /// through [`FunctionRegistry::try_get`] instead.
    pub fn get(&self, name: &str) -> &FunctionEntry {
        match self.entries.get(name) {
            Some(entry) => entry,
            None => panic!("function '{name}' is not registered"),
        }
    }

    pub fn try_get(&self, name: &str) -> Result<&FunctionEntry> {
        self.entries
            .get(name)
            .ok_or_else(|| VizError::UnknownFunction(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }
}

/// `sin(2πx)·sign(x - ½)`, undefined within 0.001 of ½.
pub fn jump_sine(x: f64) -> Option<f64> {
    let dx = x - 0.5;
    if dx.abs() < 0.001 {
        return None;
    }
    Some((x * PI * 2.0).sin() * dx.signum())
}

fn builtin_entries() -> [FunctionEntry; 6] {
    let unit = Interval::UNIT;
    [
        FunctionEntry::total("sine", |x| (x * PI * 2.0).sin() * 0.5, unit, Interval::SIGNED),
        FunctionEntry::total("sine_bump", |x| (x * PI).sin() * 0.5 + 0.5, unit, unit),
        FunctionEntry::total("linear", |x| x, unit, unit),
        FunctionEntry::total("quadratic", |x| x * x, unit, unit),
        FunctionEntry::total(
            "exponential",
            f64::exp,
            unit,
            Interval { lo: 0.0, hi: E + 0.25 },
        ),
        FunctionEntry::partial("jump_sine", jump_sine, unit, Interval { lo: -2.0, hi: 2.0 }),
    ]
}
