use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RoadQaError};
use crate::pipeline::AlignedTrack;

/// One piece of track handed to a map renderer: two consecutive subsampled
/// coordinates and the roughness of the stretch starting at `start`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackSegment {
    /// (latitude, longitude) degrees.
    pub start: (f64, f64),
    pub end: (f64, f64),
    /// Bounded [0, 1], run-relative.
    pub vibration: f64,
}

/// Reduce a full-rate track to renderable segments: keep one coordinate
/// every `factor` axis samples and carry the maximum vibration seen in a
/// centered `factor`-wide window, so a short spike survives the decimation
/// instead of falling between kept points.
pub fn subsample(
    track: &AlignedTrack,
    vibration: &Array1<f64>,
    factor: usize,
) -> Result<Vec<TrackSegment>> {
    if factor == 0 {
        return Err(RoadQaError::InvalidParameter(
            "subsample factor must be at least 1".to_string(),
        ));
    }
    if vibration.len() + 1 != track.len() {
        return Err(RoadQaError::InvalidParameter(format!(
            "vibration series of length {} does not match track of length {}",
            vibration.len(),
            track.len()
        )));
    }
    if track.len() < 2 {
        return Ok(Vec::new());
    }

    let half = factor / 2;
    let points: Vec<(f64, f64, f64)> = (0..track.len())
        .step_by(factor)
        .map(|i| {
            let center = i.min(vibration.len() - 1);
            let lo = center.saturating_sub(half);
            let hi = (center + half + 1).min(vibration.len());
            let peak = vibration
                .iter()
                .skip(lo)
                .take(hi - lo)
                .fold(0.0f64, |acc, &v| acc.max(v));
            (track.latitude[i], track.longitude[i], peak)
        })
        .collect();

    Ok(points
        .windows(2)
        .map(|pair| TrackSegment {
            start: (pair[0].0, pair[0].1),
            end: (pair[1].0, pair[1].1),
            vibration: pair[0].2,
        })
        .collect())
}
