use super::{IntegrationError, Sign};
use std::cmp::Ordering;
use tracing::trace;

/// One grid point of an orbital amplitude grid, paired with its squared
/// magnitude and its original position in the value sequence.
struct OrbitalPoint {
    density: f64,
    value: f64,
    index: usize,
}

/// Finds the amplitude threshold enclosing `percent` of the total orbital
/// density.
///
/// Every grid point participates regardless of sign: the physical quantity is
/// the squared amplitude. Points are sorted by squared value descending and
/// accumulated until the running density sum reaches the target fraction; the
/// signed amplitude at the crossing is returned (callers re-square it for
/// density comparisons). The sign parameter is accepted for signature parity
/// with the density-mode routine and is not consulted here.
pub fn isovalue_from_percentage(
    values: &[f64],
    percent: f64,
    _sign: Sign,
) -> Result<f64, IntegrationError> {
    if values.is_empty() {
        return Err(IntegrationError::EmptySelection);
    }

    let mut points: Vec<OrbitalPoint> = values
        .iter()
        .copied()
        .enumerate()
        .map(|(index, value)| OrbitalPoint {
            density: value * value,
            value,
            index,
        })
        .collect();

    let total: f64 = points.iter().map(|p| p.density).sum();
    let target = percent / 100.0 * total;

    points.sort_unstable_by(|a, b| b.density.partial_cmp(&a.density).unwrap_or(Ordering::Equal));

    let mut integrated = 0.0;
    for p in &points {
        integrated += p.density;
        if integrated >= target {
            trace!(
                grid_index = p.index,
                density = p.density,
                "orbital density target reached"
            );
            return Ok(p.value);
        }
    }
    Ok(points[points.len() - 1].value)
}

/// Computes the percentage of the total orbital density enclosed by the
/// squared `isovalue`.
///
/// The sign parameter is accepted and ignored, as in
/// [`isovalue_from_percentage`].
pub fn percentage_from_isovalue(
    values: &[f64],
    isovalue: f64,
    _sign: Sign,
) -> Result<f64, IntegrationError> {
    let threshold_density = isovalue * isovalue;
    let mut total = 0.0;
    let mut integrated = 0.0;
    for &v in values {
        let density = v * v;
        total += density;
        if density >= threshold_density {
            integrated += density;
        }
    }
    if total == 0.0 {
        return Err(IntegrationError::ZeroTotal);
    }
    Ok(integrated / total * 100.0)
}
