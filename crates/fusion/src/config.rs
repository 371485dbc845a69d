//! Fusion loop and aggregate guide configuration

use crate::FusionError;
use alerting::QueueConfig;
use behavior::BehaviorConfig;
use proximity::ProximityConfig;
use rolling_window::WindowConfig;
use sampling::PacingConfig;
use sensor_adapter::{CameraConfig, MotionConfig};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Fusion loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionConfig {
    /// Yaw rate beyond which frames are cropped for turning (deg/s)
    pub turn_rate_threshold: f32,

    /// Laplacian variance a frame must exceed to be run through the detector
    pub sharpness_threshold: f64,

    /// Delay between fusion ticks (ms)
    pub tick_interval_ms: u64,

    /// Startup sequence cue length (ms)
    pub startup_sequence_ms: u64,

    /// Startup warning cue length (ms)
    pub startup_warning_ms: u64,

    /// Camera error cue length (ms)
    pub camera_error_ms: u64,

    /// Motion sensor error cue length (ms)
    pub motion_error_ms: u64,

    /// Rangefinder error cue length (ms)
    pub range_error_ms: u64,

    /// Farewell cue length (ms)
    pub farewell_ms: u64,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            turn_rate_threshold: 20.0,
            sharpness_threshold: 40.0,
            tick_interval_ms: 0,
            startup_sequence_ms: 13_000,
            startup_warning_ms: 15_000,
            camera_error_ms: 6_000,
            motion_error_ms: 7_000,
            range_error_ms: 7_000,
            farewell_ms: 7_000,
        }
    }
}

impl FusionConfig {
    /// Configuration with every cue wait removed
    pub fn without_waits() -> Self {
        Self {
            startup_sequence_ms: 0,
            startup_warning_ms: 0,
            camera_error_ms: 0,
            motion_error_ms: 0,
            range_error_ms: 0,
            farewell_ms: 0,
            ..Self::default()
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

/// Everything the guide can be configured with
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GuideConfig {
    pub camera: CameraConfig,
    pub motion: MotionConfig,
    pub windows: WindowConfig,
    pub behavior: BehaviorConfig,
    pub proximity: ProximityConfig,
    pub queue: QueueConfig,
    pub pacing: PacingConfig,
    pub fusion: FusionConfig,
}

impl GuideConfig {
    /// Reject settings no component can run with
    pub fn validate(&self) -> Result<(), FusionError> {
        self.windows.validate()?;
        self.camera.validate()?;
        self.motion.validate()?;
        Ok(())
    }
}
