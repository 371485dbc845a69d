//! Collaborator interfaces consumed by the guide core

use crate::{CameraConfig, CameraError, MotionConfig, MotionSample, RangeError, SensorError, VideoFrame};
use chrono::Timelike;

/// Forward camera
pub trait FrameSource: Send {
    /// Open the video source in the requested capture mode
    fn open(&mut self, config: &CameraConfig) -> Result<(), CameraError>;

    /// Newest frame, `None` once the stream has ended
    fn latest_frame(&mut self) -> Option<VideoFrame>;
}

/// Single-point rangefinder
pub trait Rangefinder: Send {
    /// Open the bus and connect to the device
    fn open(&mut self) -> Result<(), RangeError>;

    /// Distance in centimeters, `None` when busy or nothing returned
    fn sample_distance(&mut self) -> Result<Option<f32>, RangeError>;
}

/// 9-axis orientation and barometric sensor
pub trait MotionSensor: Send {
    /// Configure output rates and enter run mode
    fn begin(&mut self, config: &MotionConfig) -> Result<(), SensorError>;

    /// Read event status and whatever outputs are ready.
    ///
    /// An error bit in the event status is reported as `SensorError::Fault`.
    fn poll(&mut self) -> Result<MotionSample, SensorError>;
}

/// Wall clock used for time-of-day advisories
pub trait WallClock: Send {
    /// Local hour of day (0-23)
    fn local_hour(&self) -> u32;
}

/// System local time
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl WallClock for LocalClock {
    fn local_hour(&self) -> u32 {
        chrono::Local::now().hour()
    }
}
