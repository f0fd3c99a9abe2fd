//! Road roughness from vehicle ride logs.
//!
//! Takes asynchronously-sampled IMU and GPS records, aligns them onto one
//! uniform time axis by piecewise-linear interpolation, and derives a
//! bounded per-position roughness metric from vertical-acceleration jerk.
//! Offline, batch, single pass; any malformed input aborts the run.

pub mod error;
pub mod parse;
pub mod pipeline;
pub mod render;
pub mod resample;
pub mod timeline;
pub mod types;
pub mod vibration;

pub use error::{Result, RoadQaError};
pub use parse::{LogFormat, SensorLog};
pub use pipeline::{align, AlignedTrack};
pub use render::TrackSegment;
pub use timeline::CommonTimeAxis;
pub use types::{InertialSample, PositionSample};
pub use vibration::VibrationConfig;
