//! Walking detection from vertical acceleration

use crate::BehaviorConfig;
use rolling_window::{RollingWindow, WindowError};
use tracing::debug;

/// Walking / standing classifier with hysteresis.
///
/// Standing is entered on a quiet window (low deviation) and left only on a
/// strong latest sample, so near-still dwell does not flap.
pub struct WalkingDetector {
    window: RollingWindow<f32>,
    still_std_dev: f64,
    resume_accel: f32,
    moving: bool,
}

impl WalkingDetector {
    pub fn new(capacity: usize, config: &BehaviorConfig) -> Result<Self, WindowError> {
        Ok(Self {
            window: RollingWindow::new(capacity)?,
            still_std_dev: config.still_std_dev as f64,
            resume_accel: config.resume_accel,
            moving: true,
        })
    }

    /// Add a vertical acceleration sample (g) and re-evaluate
    pub fn update(&mut self, vertical_accel: f32) -> bool {
        self.window.push(vertical_accel);
        let was_moving = self.moving;

        if let Ok(std_dev) = self.window.standard_deviation() {
            if std_dev < self.still_std_dev {
                self.moving = false;
            }
        }

        if !self.moving {
            if let Some(latest) = self.window.latest() {
                if latest.abs() > self.resume_accel {
                    self.moving = true;
                }
            }
        }

        if was_moving != self.moving {
            debug!("Walking state changed: moving={}", self.moving);
        }
        self.moving
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn clear(&mut self) {
        self.window.clear();
    }
}
