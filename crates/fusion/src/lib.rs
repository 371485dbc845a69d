//! Guide Fusion Engine
//!
//! Correlates the wearable's sensors into spoken guidance:
//! - Motion sensor (gestures, walking, slope)
//! - Forward camera (day/night, sharpness, object proximity)
//! - Rangefinder (mean distance, pacing beeps)
//!
//! [`FusionEngine`] holds the per-tick logic; [`Guide`] runs the startup
//! sequence, the sampling loops and the fusion loop until shutdown.

pub mod config;
pub mod engine;
pub mod runner;

pub use config::{FusionConfig, GuideConfig};
pub use engine::{FusionEngine, TickOutcome};
pub use runner::{Collaborators, ExitReason, Guide};

use proximity::DetectorError;
use rolling_window::WindowError;
use sampling::SamplingError;
use sensor_adapter::{CameraError, RangeError, SensorError};
use thiserror::Error;

/// Fusion error types
#[derive(Error, Debug)]
pub enum FusionError {
    #[error("Initialization failed: {}", .0.join("; "))]
    Init(Vec<String>),

    #[error(transparent)]
    Camera(#[from] CameraError),

    #[error(transparent)]
    Sensor(#[from] SensorError),

    #[error(transparent)]
    Range(#[from] RangeError),

    #[error(transparent)]
    Detector(#[from] DetectorError),

    #[error(transparent)]
    Sampling(#[from] SamplingError),

    #[error(transparent)]
    Window(#[from] WindowError),
}
