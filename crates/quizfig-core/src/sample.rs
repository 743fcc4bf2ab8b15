use crate::expr::Expr;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// `n` evenly spaced values over `[start, stop]`, both ends included.
///
/// `n == 0` yields nothing and `n == 1` yields `start`. The last value is exactly `stop`.
#[derive(Debug, Clone)]
pub struct Linspace {
    start: f64,
    stop: f64,
    step: f64,
    n: usize,
    i: usize,
}

pub fn linspace(start: f64, stop: f64, n: usize) -> Linspace {
    let step = if n > 1 {
        (stop - start) / (n - 1) as f64
    } else {
        0.0
    };
    Linspace {
        start,
        stop,
        step,
        n,
        i: 0,
    }
}

impl Iterator for Linspace {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.i >= self.n {
            return None;
        }
        let i = self.i;
        self.i += 1;
        if i + 1 == self.n && self.n > 1 {
            Some(self.stop)
        } else {
            Some(self.start + self.step * i as f64)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.n - self.i;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Linspace {}

/// The closed-form function behind a curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CurveFn {
    /// `x = f(t)`, `y = g(t)`.
    Parametric { x: Expr, y: Expr },
    /// `y = f(x)`.
    Explicit { y: Expr },
}

impl CurveFn {
    pub fn explicit(y: &str) -> Result<Self> {
        Ok(Self::Explicit {
            y: Expr::parse(y)?,
        })
    }

    pub fn parametric(x: &str, y: &str) -> Result<Self> {
        Ok(Self::Parametric {
            x: Expr::parse(x)?,
            y: Expr::parse(y)?,
        })
    }

    pub fn at(&self, u: f64) -> (f64, f64) {
        match self {
            Self::Explicit { y } => (u, y.eval(u)),
            Self::Parametric { x, y } => (x.eval(u), y.eval(u)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sample {
    Point(f64, f64),
    /// An excluded or non-finite sample; the drawn polyline breaks here.
    Gap,
}

/// Upper bound on [`SampledCurve::samples`].
pub const MAX_SAMPLES: usize = 100_000;

fn default_samples() -> usize {
    100
}

/// A function evaluated at evenly spaced points of a domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampledCurve {
    #[serde(flatten)]
    pub function: CurveFn,
    pub domain: [f64; 2],
    #[serde(default = "default_samples")]
    pub samples: usize,
    /// Closed parameter intervals that are skipped (e.g. around an asymptote).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<[f64; 2]>,
}

impl SampledCurve {
    pub fn new(function: CurveFn, start: f64, stop: f64, samples: usize) -> Self {
        Self {
            function,
            domain: [start, stop],
            samples,
            exclude: Vec::new(),
        }
    }

    /// Skips parameters within `radius` of `center`.
    pub fn excluding(mut self, center: f64, radius: f64) -> Self {
        self.exclude.push([center - radius, center + radius]);
        self
    }

    pub fn validate(&self) -> Result<()> {
        let [a, b] = self.domain;
        if !(a.is_finite() && b.is_finite()) {
            return Err(Error::InvalidFigure {
                message: format!("curve domain must be finite, got [{a}, {b}]"),
            });
        }
        if self.samples > MAX_SAMPLES {
            return Err(Error::InvalidFigure {
                message: format!(
                    "curve has {} samples, at most {MAX_SAMPLES} are allowed",
                    self.samples
                ),
            });
        }
        if self.exclude.iter().any(|[lo, hi]| !(lo <= hi)) {
            return Err(Error::InvalidFigure {
                message: "curve exclusion intervals must be ordered".to_string(),
            });
        }
        Ok(())
    }

    fn is_excluded(&self, u: f64) -> bool {
        self.exclude.iter().any(|[lo, hi]| u >= *lo && u <= *hi)
    }

    /// Lazily evaluates the curve; each call starts a fresh pass.
    pub fn samples(&self) -> impl Iterator<Item = Sample> + '_ {
        linspace(self.domain[0], self.domain[1], self.samples).map(move |u| {
            if self.is_excluded(u) {
                return Sample::Gap;
            }
            let (x, y) = self.function.at(u);
            if x.is_finite() && y.is_finite() {
                Sample::Point(x, y)
            } else {
                Sample::Gap
            }
        })
    }

    /// Drawable runs plus the number of non-finite samples. Excluded samples split runs but
    /// are not counted.
    pub(crate) fn split_runs(&self) -> (Vec<Vec<(f64, f64)>>, usize) {
        let mut out: Vec<Vec<(f64, f64)>> = Vec::new();
        let mut cur: Vec<(f64, f64)> = Vec::new();
        let mut non_finite = 0usize;
        for u in linspace(self.domain[0], self.domain[1], self.samples) {
            let point = if self.is_excluded(u) {
                None
            } else {
                let (x, y) = self.function.at(u);
                if x.is_finite() && y.is_finite() {
                    Some((x, y))
                } else {
                    non_finite += 1;
                    None
                }
            };
            match point {
                Some(p) => cur.push(p),
                None if !cur.is_empty() => out.push(std::mem::take(&mut cur)),
                None => {}
            }
        }
        if !cur.is_empty() {
            out.push(cur);
        }
        (out, non_finite)
    }

    /// Consecutive drawable runs of points. Gaps split runs; empty runs are dropped.
    pub fn segments(&self) -> Vec<Vec<(f64, f64)>> {
        let (runs, non_finite) = self.split_runs();
        if non_finite > 0 {
            tracing::warn!(
                non_finite,
                domain = ?self.domain,
                "curve produced non-finite samples; drawing split segments"
            );
        }
        runs
    }
}
