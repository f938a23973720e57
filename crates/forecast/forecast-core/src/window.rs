//! Trailing-window primitives over a series with missing values
//!
//! Every function is position based: element `i` of the output only looks at
//! inputs `0..=i`, and a gap in calendar years does not skip a position.

/// Value `periods` positions earlier; missing at the start of the series.
pub fn lag(values: &[Option<f64>], periods: usize) -> Vec<Option<f64>> {
    (0..values.len())
        .map(|i| i.checked_sub(periods).and_then(|j| values[j]))
        .collect()
}

/// Mean over the trailing `window` positions ending at each element.
///
/// Missing while the window is incomplete, and missing whenever any value
/// inside the window is missing. Never computed over a partial window.
pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }

    (0..values.len())
        .map(|i| {
            if i + 1 < window {
                return None;
            }
            let sum = values[i + 1 - window..=i]
                .iter()
                .try_fold(0.0, |acc, v| v.map(|x| acc + x))?;
            Some(sum / window as f64)
        })
        .collect()
}

/// OLS slope over the trailing window of up to `window` positions.
///
/// Missing values are dropped before fitting and the remaining values are
/// regressed against `0..n`. Missing when fewer than `min_periods` values are
/// present.
pub fn trailing_slope(
    values: &[Option<f64>],
    window: usize,
    min_periods: usize,
) -> Vec<Option<f64>> {
    (0..values.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(window);
            let present: Vec<f64> = values[start..=i].iter().flatten().copied().collect();
            if present.len() < min_periods.max(2) {
                None
            } else {
                ols_slope(&present)
            }
        })
        .collect()
}

/// Least-squares slope of `ys` against the index `0, 1, 2, ...`.
pub fn ols_slope(ys: &[f64]) -> Option<f64> {
    if ys.len() < 2 {
        return None;
    }

    let n = ys.len() as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;

    for (i, &y) in ys.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_xx += x * x;
    }

    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator.abs() < 1e-10 {
        return None;
    }
    Some((n * sum_xy - sum_x * sum_y) / denominator)
}
