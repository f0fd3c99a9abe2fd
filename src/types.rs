use serde::{Deserialize, Serialize};

/// One accelerometer reading as written by the logger.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct InertialSample {
    /// Millisecond counter of the device clock (monotonic-ish).
    pub timestamp_ms: u64,
    pub acc_x: f64,
    pub acc_y: f64,
    pub acc_z: f64,
}

/// One GPS fix as written by the logger.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PositionSample {
    /// Millisecond counter of the device clock, same epoch as the IMU.
    pub timestamp_ms: u64,
    pub latitude: f64,
    pub longitude: f64,
    pub speed: f64,
}

impl PositionSample {
    /// Receivers without a lock report (0, 0); such fixes carry no position
    /// and are excluded from alignment.
    pub fn has_valid_fix(&self) -> bool {
        self.latitude.abs() > 0.0 && self.longitude.abs() > 0.0
    }
}
