use ndarray::Array1;

use crate::error::{Result, RoadQaError};

/// Piecewise-linear resampling of one scalar channel onto a target axis.
///
/// `native_ms` must be strictly increasing and every target must fall inside
/// `[native_ms[0], native_ms[last]]`. An axis produced by
/// [`crate::timeline::CommonTimeAxis`] satisfies both by construction, but a
/// caller-supplied axis is re-checked here rather than trusted.
///
/// A target that hits a native timestamp returns that sample's value exactly;
/// anything between two samples is linearly interpolated. No extrapolation.
pub fn interpolate(
    native_ms: &[u64],
    values: &[f64],
    targets_ms: &[u64],
) -> Result<Array1<f64>> {
    if native_ms.len() != values.len() {
        return Err(RoadQaError::InterpolationDomain(format!(
            "{} timestamps against {} values",
            native_ms.len(),
            values.len()
        )));
    }
    if native_ms.len() < 2 {
        return Err(RoadQaError::InterpolationDomain(format!(
            "need at least 2 native samples, found {}",
            native_ms.len()
        )));
    }
    for (index, pair) in native_ms.windows(2).enumerate() {
        if pair[1] <= pair[0] {
            return Err(RoadQaError::InterpolationDomain(format!(
                "native timestamps not strictly increasing at index {} ({} ms then {} ms)",
                index + 1,
                pair[0],
                pair[1]
            )));
        }
    }

    let first = native_ms[0];
    let last = native_ms[native_ms.len() - 1];

    let mut out = Array1::zeros(targets_ms.len());
    for (slot, &target) in out.iter_mut().zip(targets_ms) {
        if target < first || target > last {
            return Err(RoadQaError::Extrapolation {
                target_ms: target,
                min_ms: first,
                max_ms: last,
            });
        }
        // First native index with timestamp >= target. In range because the
        // domain check above already rejected target > last.
        let hi = native_ms.partition_point(|&t| t < target);
        if native_ms[hi] == target {
            *slot = values[hi];
        } else {
            let lo = hi - 1;
            let t0 = native_ms[lo] as f64;
            let t1 = native_ms[hi] as f64;
            let frac = (target as f64 - t0) / (t1 - t0);
            *slot = values[lo] + (values[hi] - values[lo]) * frac;
        }
    }
    Ok(out)
}
