use crate::error::{Result, RoadQaError};
use crate::types::{InertialSample, PositionSample};

/// Uniform sampling axis covering the half-open interval where both sensor
/// streams have data. Stored as (start, step, len) so every timestamp is
/// derived, never accumulated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommonTimeAxis {
    start_ms: u64,
    step_ms: u64,
    len: usize,
}

impl CommonTimeAxis {
    /// Intersect the IMU time range with the valid-fix GPS time range and
    /// lay a uniform axis over `[max(mins), min(maxes))` at `step_ms`.
    ///
    /// `gps` must already be filtered to valid fixes; invalid fixes would
    /// otherwise widen the window with timestamps that carry no position.
    pub fn resolve(
        imu: &[InertialSample],
        gps: &[PositionSample],
        step_ms: u64,
    ) -> Result<CommonTimeAxis> {
        if step_ms == 0 {
            return Err(RoadQaError::InvalidParameter(
                "interpolation period must be at least 1 ms".to_string(),
            ));
        }

        // Device clocks are only monotonic-ish, so scan instead of trusting
        // the first and last samples.
        let imu_times = || imu.iter().map(|s| s.timestamp_ms);
        let gps_times = || gps.iter().map(|s| s.timestamp_ms);

        let imu_min = imu_times().min().ok_or_else(|| {
            RoadQaError::InsufficientOverlap("imu stream is empty".to_string())
        })?;
        let gps_min = gps_times().min().ok_or_else(|| {
            RoadQaError::InsufficientOverlap("no valid gps fixes".to_string())
        })?;
        let imu_max = imu_times().max().unwrap_or(imu_min);
        let gps_max = gps_times().max().unwrap_or(gps_min);

        let start_ms = imu_min.max(gps_min);
        let end_ms = imu_max.min(gps_max);
        if end_ms <= start_ms {
            return Err(RoadQaError::InsufficientOverlap(format!(
                "imu covers [{imu_min}, {imu_max}] ms, valid gps covers [{gps_min}, {gps_max}] ms"
            )));
        }

        let len = ((end_ms - start_ms) / step_ms) as usize;
        if len == 0 {
            return Err(RoadQaError::InsufficientOverlap(format!(
                "common window [{start_ms}, {end_ms}) ms is shorter than one {step_ms} ms step"
            )));
        }

        Ok(CommonTimeAxis {
            start_ms,
            step_ms,
            len,
        })
    }

    pub fn start_ms(&self) -> u64 {
        self.start_ms
    }

    pub fn step_ms(&self) -> u64 {
        self.step_ms
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Materialize the axis as millisecond timestamps.
    pub fn timestamps_ms(&self) -> Vec<u64> {
        (0..self.len as u64)
            .map(|k| self.start_ms + k * self.step_ms)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn imu_at(times: &[u64]) -> Vec<InertialSample> {
        times
            .iter()
            .map(|&t| InertialSample {
                timestamp_ms: t,
                acc_x: 0.0,
                acc_y: 0.0,
                acc_z: 9.8,
            })
            .collect()
    }

    fn gps_at(times: &[u64]) -> Vec<PositionSample> {
        times
            .iter()
            .map(|&t| PositionSample {
                timestamp_ms: t,
                latitude: 45.5,
                longitude: -73.5,
                speed: 10.0,
            })
            .collect()
    }

    #[test]
    fn resolves_overlap_window() {
        // IMU [0, 1000], GPS [500, 1500], step 10 -> [500, 1000) at 10 ms.
        let imu = imu_at(&[0, 250, 500, 750, 1000]);
        let gps = gps_at(&[500, 1000, 1500]);
        let axis = CommonTimeAxis::resolve(&imu, &gps, 10).unwrap();
        assert_eq!(axis.start_ms(), 500);
        assert_eq!(axis.len(), 50);
        let ts = axis.timestamps_ms();
        assert_eq!(ts.first().copied(), Some(500));
        assert_eq!(ts.last().copied(), Some(990));
    }

    #[test]
    fn axis_is_strictly_increasing_with_constant_step() {
        let imu = imu_at(&[0, 997]);
        let gps = gps_at(&[3, 1200]);
        let axis = CommonTimeAxis::resolve(&imu, &gps, 7).unwrap();
        let ts = axis.timestamps_ms();
        assert_eq!(ts.len(), axis.len());
        for pair in ts.windows(2) {
            assert_eq!(pair[1] - pair[0], 7);
        }
        // Half-open: everything stays below min(maxes).
        assert!(*ts.last().unwrap() < 997);
    }

    #[test]
    fn length_is_window_over_step() {
        let imu = imu_at(&[0, 55]);
        let gps = gps_at(&[0, 100]);
        let axis = CommonTimeAxis::resolve(&imu, &gps, 10).unwrap();
        assert_eq!(axis.len(), 5);
    }

    #[test]
    fn disjoint_ranges_fail() {
        let imu = imu_at(&[0, 100]);
        let gps = gps_at(&[200, 300]);
        let err = CommonTimeAxis::resolve(&imu, &gps, 10).unwrap_err();
        assert!(matches!(err, RoadQaError::InsufficientOverlap(_)));
    }

    #[test]
    fn window_shorter_than_step_fails() {
        let imu = imu_at(&[0, 105]);
        let gps = gps_at(&[100, 200]);
        let err = CommonTimeAxis::resolve(&imu, &gps, 10).unwrap_err();
        assert!(matches!(err, RoadQaError::InsufficientOverlap(_)));
    }

    #[test]
    fn empty_streams_fail() {
        let imu = imu_at(&[0, 100]);
        let gps = gps_at(&[0, 100]);
        assert!(matches!(
            CommonTimeAxis::resolve(&[], &gps, 10).unwrap_err(),
            RoadQaError::InsufficientOverlap(_)
        ));
        assert!(matches!(
            CommonTimeAxis::resolve(&imu, &[], 10).unwrap_err(),
            RoadQaError::InsufficientOverlap(_)
        ));
    }

    #[test]
    fn zero_step_is_rejected() {
        let imu = imu_at(&[0, 100]);
        let gps = gps_at(&[0, 100]);
        let err = CommonTimeAxis::resolve(&imu, &gps, 0).unwrap_err();
        assert!(matches!(err, RoadQaError::InvalidParameter(_)));
    }

    #[test]
    fn unordered_streams_still_resolve() {
        // min/max are scanned, not read off the ends.
        let imu = imu_at(&[500, 0, 1000]);
        let gps = gps_at(&[1500, 500]);
        let axis = CommonTimeAxis::resolve(&imu, &gps, 10).unwrap();
        assert_eq!(axis.start_ms(), 500);
        assert_eq!(axis.len(), 50);
    }
}
