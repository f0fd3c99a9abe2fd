use ndarray::Array1;

use crate::error::Result;
use crate::parse::SensorLog;
use crate::resample::interpolate;
use crate::timeline::CommonTimeAxis;
use crate::types::PositionSample;
use crate::vibration::{self, VibrationConfig};

/// Both sensor streams resampled onto one uniform axis. Parallel arrays,
/// all of axis length; computed once per run and never mutated.
#[derive(Clone, Debug, PartialEq)]
pub struct AlignedTrack {
    pub timestamps_ms: Vec<u64>,
    pub latitude: Array1<f64>,
    pub longitude: Array1<f64>,
    pub acc_x: Array1<f64>,
    pub acc_y: Array1<f64>,
    pub acc_z: Array1<f64>,
}

impl AlignedTrack {
    pub fn len(&self) -> usize {
        self.timestamps_ms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps_ms.is_empty()
    }

    /// Roughness series for this track's vertical channel, one value per
    /// adjacent axis pair. Recomputing with another config fully replaces
    /// the previous series; a failure here leaves the track itself intact.
    pub fn vibration(&self, config: &VibrationConfig) -> Result<Array1<f64>> {
        vibration::estimate(&self.acc_z, config)
    }
}

/// Align a parsed log onto a uniform `step_ms` axis: drop invalid GPS fixes,
/// intersect the two time ranges, then resample each channel independently
/// against its own native timestamps.
pub fn align(log: &SensorLog, step_ms: u64) -> Result<AlignedTrack> {
    let valid_gps: Vec<PositionSample> = log
        .gps
        .iter()
        .copied()
        .filter(PositionSample::has_valid_fix)
        .collect();
    log::debug!(
        "{} imu samples, {} gps fixes ({} valid)",
        log.imu.len(),
        log.gps.len(),
        valid_gps.len()
    );

    let axis = CommonTimeAxis::resolve(&log.imu, &valid_gps, step_ms)?;
    let targets = axis.timestamps_ms();
    log::debug!(
        "common axis: {} points from {} ms at {} ms step",
        axis.len(),
        axis.start_ms(),
        axis.step_ms()
    );

    let imu_ms: Vec<u64> = log.imu.iter().map(|s| s.timestamp_ms).collect();
    let gps_ms: Vec<u64> = valid_gps.iter().map(|s| s.timestamp_ms).collect();

    let channel = |values: Vec<f64>, native: &[u64]| interpolate(native, &values, &targets);

    Ok(AlignedTrack {
        latitude: channel(valid_gps.iter().map(|s| s.latitude).collect(), &gps_ms)?,
        longitude: channel(valid_gps.iter().map(|s| s.longitude).collect(), &gps_ms)?,
        acc_x: channel(log.imu.iter().map(|s| s.acc_x).collect(), &imu_ms)?,
        acc_y: channel(log.imu.iter().map(|s| s.acc_y).collect(), &imu_ms)?,
        acc_z: channel(log.imu.iter().map(|s| s.acc_z).collect(), &imu_ms)?,
        timestamps_ms: targets,
    })
}
