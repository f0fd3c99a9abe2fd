use ndarray::Array1;

use crate::error::{Result, RoadQaError};

/// Added to the sensitivity before inversion so a zero sensitivity never
/// produces an infinite exponent.
pub const SENSITIVITY_BASELINE: f64 = 0.1;

/// Shaping knobs for the roughness metric. All three live in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VibrationConfig {
    /// Floor below which vibration collapses to exactly zero.
    pub threshold: f64,
    /// Exponential gain on normalized jerk; higher keeps more of the
    /// mid-range, lower crushes everything but the peaks.
    pub sensitivity: f64,
    /// Final exponent reshaping the dynamic range for display.
    pub contrast: f64,
}

impl Default for VibrationConfig {
    fn default() -> Self {
        VibrationConfig {
            threshold: 0.01,
            sensitivity: 0.3,
            contrast: 1.0 / 3.0,
        }
    }
}

impl VibrationConfig {
    fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("threshold", self.threshold),
            ("sensitivity", self.sensitivity),
            ("contrast", self.contrast),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(RoadQaError::InvalidParameter(format!(
                    "{name} must be in [0, 1], got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Derive the bounded roughness series from a resampled vertical-acceleration
/// channel. Output has length `N - 1` (one value per adjacent axis pair),
/// every value in [0, 1]. The scale is run-relative: 1 marks the strongest
/// jerk in this run, not a physical unit.
pub fn estimate(vertical_acc: &Array1<f64>, config: &VibrationConfig) -> Result<Array1<f64>> {
    config.validate()?;

    let n = vertical_acc.len();
    if n < 2 {
        return Err(RoadQaError::DegenerateSignal(format!(
            "need at least 2 samples to differentiate, found {n}"
        )));
    }

    let mean = vertical_acc.sum() / n as f64;
    let centered = vertical_acc.mapv(|v| v - mean);

    // Absolute first difference of the centered channel: jerk magnitude.
    let mut vibration = Array1::zeros(n - 1);
    for (i, slot) in vibration.iter_mut().enumerate() {
        *slot = (centered[i + 1] - centered[i]).abs();
    }

    let min = vibration.fold(f64::INFINITY, |acc, &v| acc.min(v));
    vibration.mapv_inplace(|v| v - min);

    let max = vibration.fold(0.0f64, |acc, &v| acc.max(v));
    if max <= 0.0 {
        return Err(RoadQaError::DegenerateSignal(format!(
            "jerk range is zero across {n} samples; the signal is flat"
        )));
    }

    let gain = 1.0 / (config.sensitivity + SENSITIVITY_BASELINE);
    vibration.mapv_inplace(|v| (v / max).powf(gain));

    vibration.mapv_inplace(|v| if v < config.threshold { 0.0 } else { v });

    // powf(0.0) would turn thresholded zeros into ones; exact zeros stay.
    vibration.mapv_inplace(|v| if v > 0.0 { v.powf(config.contrast) } else { 0.0 });

    Ok(vibration)
}
