//! Break calculation for numeric classification.
//!
//! Breaks are upper bounds: a value `v` belongs to the first interval
//! whose break `b` satisfies `v <= b`.

use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};
use crate::{Error, Result};

/// Maximum number of quantile computations for [`BreakMethod::EqualSize`].
pub const MAX_QUANTILE_ITERS: usize = 10;

/// How breaks are derived from the data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BreakMethod {
    /// Quantiles: each interval holds about the same number of values.
    #[default]
    EqualSize,
    /// Each interval spans the same numeric width.
    EqualInterval,
}

impl BreakMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            BreakMethod::EqualSize => "equal-size",
            BreakMethod::EqualInterval => "equal-interval",
        }
    }
}

impl fmt::Display for BreakMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BreakMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "equal-size" => Ok(BreakMethod::EqualSize),
            "equal-interval" => Ok(BreakMethod::EqualInterval),
            _ => Err(Error::InvalidMethod(s.to_string())),
        }
    }
}

/// Compute the breaks of `values` for `intervals` color intervals.
///
/// Missing values, NaN and infinities are ignored.  The number of
/// requested breaks is `intervals - 1` (at least one).  With
/// [`BreakMethod::EqualSize`], repeated values may collapse quantiles;
/// the number of requested breaks is then increased by one and the
/// quantiles recomputed, at most [`MAX_QUANTILE_ITERS`] times, keeping
/// whatever the last attempt yields.
///
/// ```
/// use color_classify::{compute_breaks, BreakMethod};
/// let v = [Some(0.), Some(10.), None, Some(20.), Some(30.), Some(40.), Some(50.)];
/// let b = compute_breaks(v, 4, BreakMethod::EqualInterval).unwrap();
/// assert_eq!(b, [0., 25., 50.]);
/// ```
pub fn compute_breaks<I>(values: I, intervals: usize, method: BreakMethod)
                         -> Result<Vec<f64>>
where I: IntoIterator<Item = Option<f64>> {
    let mut sorted: Vec<f64> = values.into_iter().flatten()
        .filter(|v| v.is_finite())
        .collect();
    if sorted.is_empty() {
        return Err(Error::EmptyColumn(
            "no non-missing values to compute breaks from".to_string()));
    }
    sorted.sort_by(f64::total_cmp);
    let requested = intervals.saturating_sub(1).max(1);
    let breaks = match method {
        BreakMethod::EqualSize => {
            let mut n = requested;
            let mut breaks = quantile_breaks(&sorted, n);
            let mut iters = 1;
            while breaks.len() < requested && iters < MAX_QUANTILE_ITERS {
                n += 1;
                iters += 1;
                trace!(n, got = breaks.len(), "retrying quantile breaks");
                breaks = quantile_breaks(&sorted, n);
            }
            breaks
        }
        BreakMethod::EqualInterval => {
            let (min, max) = (sorted[0], sorted[sorted.len() - 1]);
            dedup(linear_breaks(min, max, requested))
        }
    };
    debug!(%method, intervals, breaks = breaks.len(), "computed breaks");
    Ok(breaks)
}

/// Quantile `q` ∈ \[0, 1\] of the non-empty ascending slice `sorted`,
/// interpolating linearly between closest ranks.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    let last = sorted.len() - 1;
    let pos = q.clamp(0., 1.) * last as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        sorted[lo] + (pos - lo as f64) * (sorted[hi] - sorted[lo])
    }
}

/// `n` evenly spaced values from `min` to `max`, both included.  A
/// single break is `max` so that every value falls below it.
pub fn linear_breaks(min: f64, max: f64, n: usize) -> Vec<f64> {
    match n {
        0 => vec![],
        1 => vec![max],
        _ => {
            let last = (n - 1) as f64;
            (0 .. n).map(|i| {
                if i == n - 1 { max }
                else { min + (max - min) * i as f64 / last }
            }).collect()
        }
    }
}

/// Quantiles at `0, 1/(n-1), ..., 1` without repeated values.
fn quantile_breaks(sorted: &[f64], n: usize) -> Vec<f64> {
    let probs = linear_breaks(0., 1., n);
    dedup(probs.into_iter().map(|q| quantile(sorted, q)).collect())
}

fn dedup(mut breaks: Vec<f64>) -> Vec<f64> {
    breaks.dedup();
    breaks
}


#[cfg(test)]
mod tests {
    use super::*;

    fn some(v: &[f64]) -> Vec<Option<f64>> { v.iter().map(|&x| Some(x)).collect() }

    #[test]
    fn parse_method() {
        assert_eq!("equal-size".parse::<BreakMethod>().unwrap(),
                   BreakMethod::EqualSize);
        assert_eq!("equal-interval".parse::<BreakMethod>().unwrap(),
                   BreakMethod::EqualInterval);
        assert!(matches!("jenks".parse::<BreakMethod>(),
                         Err(Error::InvalidMethod(m)) if m == "jenks"));
        assert_eq!(BreakMethod::EqualInterval.to_string(), "equal-interval");
    }

    #[test]
    fn equal_interval_spans_range() {
        let v = some(&[3., -7.5, 12., 0.25, 8.]);
        for intervals in 2 ..= 7 {
            let b = compute_breaks(v.clone(), intervals,
                                   BreakMethod::EqualInterval).unwrap();
            assert_eq!(b.len(), intervals - 1);
            assert!(b.windows(2).all(|w| w[0] <= w[1]), "{b:?}");
            if intervals > 2 { assert_eq!(b[0], -7.5); }
            assert_eq!(b[b.len() - 1], 12.);
        }
    }

    #[test]
    fn equal_interval_degenerate_range() {
        let b = compute_breaks(some(&[4., 4., 4.]), 5,
                               BreakMethod::EqualInterval).unwrap();
        assert_eq!(b, [4.]);
    }

    #[test]
    fn equal_size_quartiles() {
        let v = some(&[1., 2., 3., 4., 5., 6., 7., 8., 9.]);
        let b = compute_breaks(v, 6, BreakMethod::EqualSize).unwrap();
        assert_eq!(b, [1., 3., 5., 7., 9.]);
    }

    #[test]
    fn equal_size_retries_on_repeated_values() {
        // Half the values are equal, so low quantiles collapse.
        let mut v = vec![0.; 10];
        v.extend((1 ..= 10).map(|x| x as f64));
        let b = compute_breaks(some(&v), 5, BreakMethod::EqualSize).unwrap();
        assert!(b.len() >= 4, "{b:?}");
        assert!(b.windows(2).all(|w| w[0] < w[1]), "{b:?}");
        assert_eq!(b[0], 0.);
        assert_eq!(b[b.len() - 1], 10.);
    }

    #[test]
    fn equal_size_gives_up_after_max_iters() {
        let b = compute_breaks(some(&[3., 3., 3.]), 7,
                               BreakMethod::EqualSize).unwrap();
        assert_eq!(b, [3.]);
        // Only the 4..5 rank gap interpolates: 15 quantiles after the
        // last attempt still give fewer than 6 breaks.
        let b = compute_breaks(some(&[1., 1., 1., 1., 2.]), 7,
                               BreakMethod::EqualSize).unwrap();
        assert!(b.len() < 6, "{b:?}");
        assert_eq!((b[0], b[b.len() - 1]), (1., 2.));
    }

    #[test]
    fn missing_values_are_dropped() {
        let v = vec![None, Some(f64::NAN), Some(2.), None, Some(6.)];
        let b = compute_breaks(v, 3, BreakMethod::EqualInterval).unwrap();
        assert_eq!(b, [2., 6.]);
    }

    #[test]
    fn infinities_are_dropped() {
        let v = vec![Some(0.), Some(f64::INFINITY), Some(f64::NEG_INFINITY),
                     Some(8.)];
        let b = compute_breaks(v, 4, BreakMethod::EqualInterval).unwrap();
        assert_eq!(b, [0., 4., 8.]);
        let b = compute_breaks(some(&[0., f64::INFINITY]), 4,
                               BreakMethod::EqualInterval).unwrap();
        assert_eq!(b, [0.]);
        assert!(matches!(compute_breaks(some(&[f64::INFINITY]), 3,
                                        BreakMethod::EqualSize),
                         Err(Error::EmptyColumn(_))));
    }

    #[test]
    fn empty_column() {
        let v: Vec<Option<f64>> = vec![None, Some(f64::NAN)];
        assert!(matches!(compute_breaks(v, 3, BreakMethod::EqualSize),
                         Err(Error::EmptyColumn(_))));
    }

    #[test]
    fn single_interval() {
        let b = compute_breaks(some(&[5., 1., 3.]), 1,
                               BreakMethod::EqualSize).unwrap();
        assert_eq!(b, [5.]);
    }

    #[test]
    fn quantile_interpolates() {
        let s = [0., 10., 20., 30.];
        assert_eq!(quantile(&s, 0.), 0.);
        assert_eq!(quantile(&s, 1.), 30.);
        assert!((quantile(&s, 0.5) - 15.).abs() <= 1e-12);
        assert_eq!(quantile(&[7.], 0.3), 7.);
    }
}
