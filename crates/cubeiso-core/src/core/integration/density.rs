use super::{IntegrationError, Sign};
use std::cmp::Ordering;

/// Finds the isovalue enclosing `percent` of the total sign-matching density.
///
/// The sign-matching values are sorted most-extreme-first and accumulated until
/// the running sum reaches the target fraction; the grid value at the crossing
/// is the isovalue. If rounding keeps the sweep from ever satisfying the
/// condition, the least extreme element is returned.
pub fn isovalue_from_percentage(
    values: &[f64],
    percent: f64,
    sign: Sign,
) -> Result<f64, IntegrationError> {
    let mut filtered: Vec<f64> = values.iter().copied().filter(|&v| sign.selects(v)).collect();
    if filtered.is_empty() {
        return Err(IntegrationError::EmptySelection);
    }

    let total: f64 = filtered.iter().sum();
    let target = percent / 100.0 * total;

    match sign {
        Sign::Positive => {
            filtered.sort_unstable_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal))
        }
        Sign::Negative => {
            filtered.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
        }
    }

    let mut integrated = 0.0;
    for &v in &filtered {
        integrated += v;
        let reached = match sign {
            Sign::Positive => integrated >= target,
            Sign::Negative => integrated <= target,
        };
        if reached {
            return Ok(v);
        }
    }
    Ok(filtered[filtered.len() - 1])
}

/// Computes the percentage of the total sign-matching density enclosed by
/// `isovalue`.
///
/// Fails with [`IntegrationError::ZeroTotal`] if the sign-matching total is
/// exactly zero, which also covers grids with no values of the requested sign.
pub fn percentage_from_isovalue(
    values: &[f64],
    isovalue: f64,
    sign: Sign,
) -> Result<f64, IntegrationError> {
    let mut total = 0.0;
    let mut integrated = 0.0;
    for &v in values {
        if !sign.selects(v) {
            continue;
        }
        total += v;
        let enclosed = match sign {
            Sign::Positive => v >= isovalue,
            Sign::Negative => v <= isovalue,
        };
        if enclosed {
            integrated += v;
        }
    }
    if total == 0.0 {
        return Err(IntegrationError::ZeroTotal);
    }
    Ok(integrated / total * 100.0)
}
