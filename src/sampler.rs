//! Sampling of a one-variable expression over an interval, for plotting.

use crate::error::SampleError;
use crate::expr::evaluate_expression;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Largest absolute coordinate a plotted viewport may reach
pub const MAX_VALUE_AREA: f64 = 1e6;

/// Number of points sampled for each redraw of a plot
pub const DEFAULT_SAMPLE_COUNT: usize = 1000;

/// A single point of a sampled curve. `y` is `None` where the expression has
/// no value, which leaves a gap in the curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Position on the horizontal axis
    pub x: f64,
    /// Value of the expression at `x`, if any
    pub y: Option<f64>,
}

/// Samples of an expression at evenly spaced, increasing `x` positions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleSet {
    points: Vec<Sample>,
}

impl SampleSet {
    /// All the points, ordered by `x`
    #[must_use]
    pub fn points(&self) -> &[Sample] {
        &self.points
    }

    /// Number of points
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if there is no point at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of points without a value
    #[must_use]
    pub fn gaps(&self) -> usize {
        self.points.iter().filter(|point| point.y.is_none()).count()
    }

    /// Iterate over the `(x, y)` pairs of the points with a value
    pub fn finite_points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points.iter().filter_map(|point| point.y.map(|y| (point.x, y)))
    }

    /// Smallest and largest `y` over the points with a value
    #[must_use]
    pub fn y_range(&self) -> Option<(f64, f64)> {
        self.finite_points().fold(None, |range, (_, y)| match range {
            None => Some((y, y)),
            Some((low, high)) => Some((low.min(y), high.max(y))),
        })
    }
}

/// The visible part of the horizontal axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Left edge
    pub x_min: f64,
    /// Right edge
    pub x_max: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x_min: -10.0,
            x_max: 10.0,
        }
    }
}

impl Viewport {
    /// Create a viewport from its edges
    #[must_use]
    pub fn new(x_min: f64, x_max: f64) -> Self {
        Self { x_min, x_max }
    }

    /// Restrict the viewport to `[-bound, bound]`.
    ///
    /// ```
    /// # use smartcalc::Viewport;
    /// let viewport = Viewport::new(-5e6, 3.0).clamped(1e6);
    /// assert_eq!(viewport, Viewport::new(-1e6, 3.0));
    /// ```
    #[must_use]
    pub fn clamped(self, bound: f64) -> Self {
        Self {
            x_min: self.x_min.max(-bound),
            x_max: self.x_max.min(bound),
        }
    }
}

/// Settings of a plot: which variable is substituted, where, and how densely
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Name of the variable in the expression
    pub variable: String,
    /// Number of samples over the viewport
    pub count: usize,
    /// Absolute limit applied to the viewport before sampling
    pub bound: f64,
    /// Requested viewport
    pub viewport: Viewport,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            variable: "x".to_owned(),
            count: DEFAULT_SAMPLE_COUNT,
            bound: MAX_VALUE_AREA,
            viewport: Viewport::default(),
        }
    }
}

impl SamplerConfig {
    /// Clamp the viewport to the bound, then sample `expression` over it
    pub fn sample(&self, expression: &str) -> Result<SampleSet, SampleError> {
        let viewport = self.viewport.clamped(self.bound);
        sample(
            expression,
            &self.variable,
            viewport.x_min,
            viewport.x_max,
            self.count,
        )
    }
}

/// Replace every whole-word occurrence of `variable` in `expression` by
/// `value`, written between parentheses.
///
/// Occurrences glued to other letters are kept, so substituting `i` does not
/// touch `sin`, and the result can still be read by the lexer.
///
/// ```
/// # use smartcalc::substitute;
/// assert_eq!(substitute("x^2+sin(x)", "x", -1.5), "(-1.5)^2+sin((-1.5))");
/// assert_eq!(substitute("Pi*i", "i", 2.0), "Pi*(2)");
/// ```
#[must_use]
pub fn substitute(expression: &str, variable: &str, value: f64) -> String {
    if variable.is_empty() {
        return expression.to_owned();
    }
    let is_letter = |c: Option<char>| c.map_or(false, |c| c.is_ascii_alphabetic());

    let replacement = format!("({})", value);
    let mut output = String::with_capacity(expression.len());
    let mut last = 0;
    for (start, _) in expression.match_indices(variable) {
        let end = start + variable.len();
        if start < last {
            continue;
        }
        let before = expression[..start].chars().next_back();
        let after = expression[end..].chars().next();
        if is_letter(before) || is_letter(after) {
            continue;
        }
        output.push_str(&expression[last..start]);
        output.push_str(&replacement);
        last = end;
    }
    output.push_str(&expression[last..]);
    output
}

/// Evaluate `expression` at `count` evenly spaced positions of `[low, high]`,
/// both ends included.
///
/// Positions where the expression fails leave a gap. The points are computed
/// in parallel and returned in increasing `x` order. The interval is used as
/// is: callers are expected to clamp it first (see [`Viewport::clamped`]).
///
/// ```
/// # use smartcalc::sample;
/// let samples = sample("ln(x)", "x", -1.0, 1.0, 3).unwrap();
/// let ys: Vec<_> = samples.points().iter().map(|point| point.y).collect();
/// assert_eq!(ys, vec![None, None, Some(0.0)]);
/// ```
pub fn sample(
    expression: &str,
    variable: &str,
    low: f64,
    high: f64,
    count: usize,
) -> Result<SampleSet, SampleError> {
    let positions = positions(low, high, count)?;
    let points: Vec<Sample> = positions
        .into_par_iter()
        .map(|x| sample_at(expression, variable, x))
        .collect();
    let set = SampleSet { points };
    debug!(expression, count, gaps = set.gaps(), "sampled");
    Ok(set)
}

/// Same as [`sample`], on the current thread only
pub fn sample_sequential(
    expression: &str,
    variable: &str,
    low: f64,
    high: f64,
    count: usize,
) -> Result<SampleSet, SampleError> {
    let points = positions(low, high, count)?
        .into_iter()
        .map(|x| sample_at(expression, variable, x))
        .collect();
    Ok(SampleSet { points })
}

fn sample_at(expression: &str, variable: &str, x: f64) -> Sample {
    let y = evaluate_expression(&substitute(expression, variable, x))
        .ok()
        .and_then(|rendered| rendered.parse::<f64>().ok())
        .filter(|y| y.is_finite());
    Sample { x, y }
}

#[allow(clippy::cast_precision_loss)]
fn positions(low: f64, high: f64, count: usize) -> Result<Vec<f64>, SampleError> {
    let invalid = SampleError::InvalidInterval { low, high };
    let valid = low.is_finite() && high.is_finite() && low <= high && (count <= 1 || low < high);
    if !valid {
        return Err(invalid);
    }
    if count <= 1 {
        return Ok(if count == 1 { vec![low] } else { Vec::new() });
    }

    let step = (high - low) / (count - 1) as f64;
    let mut xs: Vec<f64> = (0..count).map(|i| low + step * i as f64).collect();
    xs[count - 1] = high;
    // too narrow an interval for `count` distinct positions
    if xs.windows(2).any(|pair| pair[0] >= pair[1]) {
        debug!(low, high, count, "positions collapse");
        return Err(invalid);
    }
    Ok(xs)
}
