//! Proximity Classifier
//!
//! Scene hazards from the forward camera:
//! - Object detector capability with explicit enable/disable
//! - Apparent size and centre-band gating of detections
//! - Per-class rules combining size, rangefinder distance and walking state
//! - Red/green traffic light announcements

pub mod classifier;
pub mod config;
pub mod detector;
pub mod object;

pub use classifier::{ProximityClassifier, ProximityContext};
pub use config::{MotionGate, ProximityConfig, ProximityRule};
pub use detector::{Detector, DetectorFactory, DetectorHandle, DetectorSlot, ScriptedDetector};
pub use object::{Detection, ObjectClass};

use thiserror::Error;

/// Detector error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DetectorError {
    #[error("Model loading failed: {0}")]
    Load(String),

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Invalid frame format")]
    InvalidFrame,
}
