//! Sensor Adapter Layer
//!
//! Normalizes the device collaborators into plain readings:
//! - Forward camera frames (RGB) with the image measures the guide needs
//! - Rangefinder distance (centimeters)
//! - 9-axis motion sensor (quaternion, acceleration, gyro, barometer)
//! - Wall clock for time-of-day advisories

pub mod frame;
pub mod motion;
pub mod sim;
pub mod source;

pub use frame::VideoFrame;
pub use motion::{BarometricReading, MotionSample, Orientation, Quaternion, Vector3};
pub use source::{FrameSource, LocalClock, MotionSensor, Rangefinder, WallClock};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Camera error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CameraError {
    #[error("Failed to open video source: {0}")]
    Open(String),

    #[error("Frame buffer does not match {width}x{height}")]
    Buffer { width: u32, height: u32 },

    #[error("Empty frame")]
    EmptyFrame,
}

/// Motion sensor error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SensorError {
    #[error("Failed to initialize motion sensor: {0}")]
    Open(String),

    #[error("Motion sensor fault: {0}")]
    Fault(String),
}

/// Rangefinder error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RangeError {
    #[error("Failed to open rangefinder bus: {0}")]
    Open(String),

    #[error("Rangefinder read failed: {0}")]
    Read(String),
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Capture width
    pub width: u32,
    /// Capture height
    pub height: u32,
    /// Target FPS
    pub fps: u32,
}

impl CameraConfig {
    /// Reject a geometry or rate the capture pipeline cannot honor
    pub fn validate(&self) -> Result<(), CameraError> {
        if self.width == 0 || self.height == 0 || self.fps == 0 {
            return Err(CameraError::Open(format!(
                "unsupported capture mode {}x{}@{}",
                self.width, self.height, self.fps
            )));
        }
        Ok(())
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fps: 10,
        }
    }
}

/// Motion sensor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Magnetometer rate (Hz)
    pub mag_rate_hz: u32,
    /// Accelerometer rate (Hz)
    pub accel_rate_hz: u32,
    /// Gyroscope rate (Hz)
    pub gyro_rate_hz: u32,
    /// Barometer rate (Hz)
    pub baro_rate_hz: u32,
    /// Quaternion rate as a divisor of the gyro rate
    pub quaternion_rate_divisor: u32,
    /// Magnetic declination added to yaw (degrees)
    pub declination_deg: f32,
}

impl MotionConfig {
    /// Quaternion output rate (Hz)
    pub fn quaternion_rate_hz(&self) -> u32 {
        self.gyro_rate_hz / self.quaternion_rate_divisor.max(1)
    }

    /// Reject rates the sensor hub would not accept
    pub fn validate(&self) -> Result<(), SensorError> {
        let rates = [
            ("magnetometer", self.mag_rate_hz),
            ("accelerometer", self.accel_rate_hz),
            ("gyroscope", self.gyro_rate_hz),
            ("barometer", self.baro_rate_hz),
            ("quaternion divisor", self.quaternion_rate_divisor),
        ];
        match rates.iter().find(|(_, rate)| *rate == 0) {
            Some((name, _)) => Err(SensorError::Open(format!("{} rate must be non-zero", name))),
            None => Ok(()),
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            mag_rate_hz: 100,
            accel_rate_hz: 200,
            gyro_rate_hz: 200,
            baro_rate_hz: 50,
            quaternion_rate_divisor: 3,
            declination_deg: 13.8,
        }
    }
}
