//! Descriptive statistics over plain `f64` slices.
//!
//! Callers strip nulls before calling in; every function here treats its
//! input as complete. Functions return `None` where the statistic is
//! undefined (empty input, zero variance) instead of producing NaN.

use serde::Serialize;

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator).
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}

/// Quantile `q` in `[0, 1]` of an ascending slice, interpolating linearly
/// between the two nearest order statistics.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Pearson product-moment correlation of two equally long samples.
///
/// `None` when fewer than two pairs are given, the lengths differ, or either
/// sample is constant.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    let mx = mean(xs)?;
    let my = mean(ys)?;
    let mut cov = 0.0;
    let mut vx = 0.0;
    let mut vy = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mx;
        let dy = y - my;
        cov += dx * dy;
        vx += dx * dx;
        vy += dy * dy;
    }
    if vx == 0.0 || vy == 0.0 {
        return None;
    }
    Some((cov / (vx * vy).sqrt()).clamp(-1.0, 1.0))
}

/// Ordinary least squares line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

pub fn linear_fit(xs: &[f64], ys: &[f64]) -> Option<LinearFit> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    let mx = mean(xs)?;
    let my = mean(ys)?;
    let sxx: f64 = xs.iter().map(|x| (x - mx).powi(2)).sum();
    if sxx == 0.0 {
        return None;
    }
    let sxy: f64 = xs.iter().zip(ys).map(|(x, y)| (x - mx) * (y - my)).sum();
    let slope = sxy / sxx;
    let intercept = my - slope * mx;
    let syy: f64 = ys.iter().map(|y| (y - my).powi(2)).sum();
    let r_squared = if syy == 0.0 {
        1.0
    } else {
        let sse: f64 = xs
            .iter()
            .zip(ys)
            .map(|(x, y)| (y - (slope * x + intercept)).powi(2))
            .sum();
        1.0 - sse / syy
    };
    Some(LinearFit {
        slope,
        intercept,
        r_squared,
    })
}

/// Count, moments and quartiles of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Describe {
    pub count: usize,
    pub mean: f64,
    /// `None` for a single observation
    pub std: Option<f64>,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

pub fn describe(values: &[f64]) -> Option<Describe> {
    let sorted = sorted_copy(values);
    Some(Describe {
        count: sorted.len(),
        mean: mean(&sorted)?,
        std: sample_std(&sorted),
        min: *sorted.first()?,
        q1: quantile(&sorted, 0.25)?,
        median: quantile(&sorted, 0.5)?,
        q3: quantile(&sorted, 0.75)?,
        max: *sorted.last()?,
    })
}

/// Box-plot summary with Tukey fences at 1.5 × IQR.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoxSummary {
    pub stats: Describe,
    pub lower_fence: f64,
    pub upper_fence: f64,
    /// Smallest observation inside the fences
    pub lower_whisker: f64,
    /// Largest observation inside the fences
    pub upper_whisker: f64,
    pub outliers: usize,
}

impl BoxSummary {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let stats = describe(values)?;
        let iqr = stats.q3 - stats.q1;
        let lower_fence = stats.q1 - 1.5 * iqr;
        let upper_fence = stats.q3 + 1.5 * iqr;
        let inside = |v: &&f64| **v >= lower_fence && **v <= upper_fence;
        let lower_whisker = values
            .iter()
            .filter(inside)
            .copied()
            .fold(f64::INFINITY, f64::min);
        let upper_whisker = values
            .iter()
            .filter(inside)
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        let outliers = values.iter().filter(|v| !inside(v)).count();
        Some(BoxSummary {
            stats,
            lower_fence,
            upper_fence,
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }

    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower_fence || value > self.upper_fence
    }
}
