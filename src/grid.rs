//! Wavenumber grid reconstruction and the small amount of 1-D numerics the
//! assembler needs (approximate comparison, axis union, clamped linear
//! interpolation).

use crate::error::{Result, XscError};

/// Relative tolerance used when comparing grids.
pub const GRID_RTOL: f64 = 1e-5;
/// Absolute tolerance used when comparing grids.
pub const GRID_ATOL: f64 = 1e-8;

/// Rebuild the evenly spaced axis described by a header.
///
/// Points are `min + i * step` for `i in 0..number_of_points`, so the last one
/// lands on `max` up to rounding and the length always equals the declared
/// count. Fewer than two points, or bounds that give a step that is not
/// positive and finite, are a [`XscError::GridMismatch`].
pub fn build_grid(min_wavenumber: f64, max_wavenumber: f64, number_of_points: usize) -> Result<Vec<f64>> {
    if number_of_points < 2 {
        return Err(XscError::GridMismatch {
            expected: number_of_points,
            found: 0,
        });
    }

    let step = (max_wavenumber - min_wavenumber) / (number_of_points - 1) as f64;
    if !step.is_finite() || step <= 0.0 {
        return Err(XscError::GridMismatch {
            expected: number_of_points,
            found: 0,
        });
    }

    Ok((0..number_of_points)
        .map(|i| min_wavenumber + i as f64 * step)
        .collect())
}

/// Element-wise `|a - b| <= atol + rtol * |b|` over equal-length slices.
#[must_use]
pub fn grids_close(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .zip(b)
            .all(|(x, y)| (x - y).abs() <= GRID_ATOL + GRID_RTOL * y.abs())
}

/// Sorted, duplicate-free union of every point in `grids`.
#[must_use]
pub fn merge_grids<'a, I>(grids: I) -> Vec<f64>
where
    I: IntoIterator<Item = &'a [f64]>,
{
    let mut merged: Vec<f64> = grids.into_iter().flatten().copied().collect();
    merged.sort_by(f64::total_cmp);
    merged.dedup();
    merged
}

/// Linear interpolation of `(xp, fp)` at each point of `x`.
///
/// `xp` must be ascending. Points left of `xp[0]` take `fp[0]`, points right
/// of the last sample take the last value; nothing is extrapolated.
#[must_use]
pub fn interp_clamped(x: &[f64], xp: &[f64], fp: &[f64]) -> Vec<f64> {
    debug_assert_eq!(xp.len(), fp.len());
    let (Some(&x_first), Some(&x_last)) = (xp.first(), xp.last()) else {
        return Vec::new();
    };
    let (f_first, f_last) = (fp[0], fp[fp.len() - 1]);

    x.iter()
        .map(|&xi| {
            if xi <= x_first {
                return f_first;
            }
            if xi >= x_last {
                return f_last;
            }
            // First sample strictly greater than xi; 1..len by the checks above.
            let hi = xp.partition_point(|&v| v <= xi);
            let lo = hi - 1;
            let t = (xi - xp[lo]) / (xp[hi] - xp[lo]);
            fp[lo] + t * (fp[hi] - fp[lo])
        })
        .collect()
}

/// Mean of consecutive differences. NaN for fewer than two points.
#[must_use]
pub fn mean_spacing(axis: &[f64]) -> f64 {
    if axis.len() < 2 {
        return f64::NAN;
    }
    let total: f64 = axis.windows(2).map(|w| w[1] - w[0]).sum();
    total / (axis.len() - 1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_grid_hits_both_endpoints() {
        for (min, max, n) in [(0.0, 4.0, 5), (500.0, 600.0, 401), (1000.0, 1010.0, 11), (-2.0, 2.0, 2)] {
            let g = build_grid(min, max, n).unwrap();
            assert_eq!(g.len(), n);
            assert_eq!(g[0], min);
            assert!((g[n - 1] - max).abs() < 1e-9, "{min} {max} {n}: {}", g[n - 1]);
            assert!(g.windows(2).all(|w| w[1] > w[0]));
        }
    }

    #[test]
    fn inexact_steps_still_hit_the_declared_count() {
        // (max - min) / step lands a hair above n - 1 for these.
        for (min, max, n) in [(0.0, 1.0, 10), (0.0, 1.0, 7), (750.01, 811.99, 57931)] {
            let g = build_grid(min, max, n).unwrap();
            assert_eq!(g.len(), n);
            assert!((g[n - 1] - max).abs() < 1e-9);
        }
    }

    #[test]
    fn too_few_points_is_grid_mismatch() {
        for n in [0, 1] {
            assert!(matches!(
                build_grid(0.0, 1.0, n),
                Err(XscError::GridMismatch { expected, .. }) if expected == n
            ));
        }
    }

    #[test]
    fn descending_bounds_are_grid_mismatch() {
        assert!(matches!(
            build_grid(10.0, 1.0, 5),
            Err(XscError::GridMismatch { expected: 5, .. })
        ));
        assert!(matches!(
            build_grid(3.0, 3.0, 5),
            Err(XscError::GridMismatch { .. })
        ));
    }

    #[test]
    fn non_finite_bounds_are_grid_mismatch() {
        let bounds = [
            (f64::NAN, 1.0),
            (0.0, f64::INFINITY),
            (f64::NEG_INFINITY, 0.0),
            // Finite bounds whose span overflows.
            (-f64::MAX, f64::MAX),
        ];
        for (min, max) in bounds {
            assert!(
                matches!(build_grid(min, max, 3), Err(XscError::GridMismatch { expected: 3, found: 0 })),
                "{min} {max}"
            );
        }
    }

    #[test]
    fn closeness_is_tolerant_but_length_strict() {
        let a = [1000.0, 1000.5, 1001.0];
        let b = [1000.0 + 1e-9, 1000.5, 1001.0 - 1e-9];
        assert!(grids_close(&a, &b));
        assert!(!grids_close(&a, &[1000.0, 1000.6, 1001.0]));
        assert!(!grids_close(&a, &a[..2]));
    }

    #[test]
    fn merge_sorts_and_dedups() {
        let a = [1.0, 2.0, 3.0];
        let b = [2.5, 3.0, 4.0];
        assert_eq!(merge_grids([&a[..], &b[..]]), vec![1.0, 2.0, 2.5, 3.0, 4.0]);
    }

    #[test]
    fn interp_reproduces_samples_and_clamps() {
        let xp = [1.0, 2.0, 4.0];
        let fp = [10.0, 20.0, 0.0];
        assert_eq!(interp_clamped(&xp, &xp, &fp), fp.to_vec());
        assert_eq!(
            interp_clamped(&[0.0, 1.5, 3.0, 9.0], &xp, &fp),
            vec![10.0, 15.0, 10.0, 0.0]
        );
    }

    #[test]
    fn spacing_is_mean_difference() {
        assert_eq!(mean_spacing(&[0.0, 1.0, 3.0]), 1.5);
        assert!(mean_spacing(&[1.0]).is_nan());
    }
}
