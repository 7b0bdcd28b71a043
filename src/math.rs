//! Numeric primitives shared by all evaluators.
//!
//! Every statistic returns `None` when no sample contributed. Non-finite
//! samples (NaN, ±inf) are treated as absent.

/// `numerator / denominator`, or `None` if the denominator is not positive.
///
/// The result is not clamped: inconsistent producer counters (more completions
/// than requests) surface as a ratio above 1.
pub fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator > 0.0 {
        Some(numerator / denominator)
    } else {
        None
    }
}

/// Arithmetic mean of the finite samples.
pub fn average(samples: &[f64]) -> Option<f64> {
    let (sum, count) = samples
        .iter()
        .filter(|x| x.is_finite())
        .fold((0.0, 0usize), |(sum, count), x| (sum + x, count + 1));
    ratio(sum, count as f64)
}

/// Percentile `p` (in `[0, 1]`) by linear interpolation over sorted samples.
///
/// The fractional index is `p * (n - 1)`; the result interpolates between the
/// floor and ceil elements. `p` outside `[0, 1]` is clamped.
pub fn percentile(samples: &[f64], p: f64) -> Option<f64> {
    let mut sorted = finite(samples);
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
    let index = p * (sorted.len() - 1) as f64;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;
    let fraction = index - lower as f64;

    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Fraction of finite samples strictly below `cutoff`.
pub fn fraction_below(samples: &[f64], cutoff: f64) -> Option<f64> {
    fraction_where(samples, |x| x < cutoff)
}

/// Fraction of finite samples strictly above `cutoff`.
pub fn fraction_above(samples: &[f64], cutoff: f64) -> Option<f64> {
    fraction_where(samples, |x| x > cutoff)
}

fn fraction_where(samples: &[f64], predicate: impl Fn(f64) -> bool) -> Option<f64> {
    let (hits, total) = samples
        .iter()
        .copied()
        .filter(|x| x.is_finite())
        .fold((0usize, 0usize), |(hits, total), x| {
            (hits + usize::from(predicate(x)), total + 1)
        });
    ratio(hits as f64, total as f64)
}

fn finite(samples: &[f64]) -> Vec<f64> {
    samples.iter().copied().filter(|x| x.is_finite()).collect()
}

/// Map a raw value onto `[0, 1]` with `good → 1.0` and `bad → 0.0`.
///
/// Values past either bound are clamped. With `higher_is_better == false`
/// the interval is traversed in reverse. This function is total: degenerate
/// thresholds (`good == bad`) act as a step at `good`, and NaN scores 0.
pub fn score_linear(value: f64, good: f64, bad: f64, higher_is_better: bool) -> f64 {
    if value.is_nan() {
        return 0.0;
    }

    let (low, high) = if higher_is_better {
        (bad, good)
    } else {
        (good, bad)
    };

    let span = high - low;
    if span == 0.0 || !span.is_finite() {
        let at_least_good = if higher_is_better {
            value >= good
        } else {
            value <= good
        };
        return if at_least_good { 1.0 } else { 0.0 };
    }

    let position = (value - low) / span;
    let score = if higher_is_better {
        position
    } else {
        1.0 - position
    };
    score.clamp(0.0, 1.0)
}
