//! Behavior thresholds

use serde::{Deserialize, Serialize};

/// State machine thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Pitch beyond which a sideways tilt registers (degrees)
    pub tilt_pitch_deg: f32,

    /// Pitch magnitude below which the head counts as level (degrees)
    pub level_pitch_deg: f32,

    /// Roll below which a level head counts as tilted down (degrees)
    pub tilt_down_roll_deg: f32,

    /// Roll above which a level head counts as tilted up (degrees)
    pub tilt_up_roll_deg: f32,

    /// Ticks a first tilt-up waits for its confirming second tilt-up
    pub shutdown_window_ticks: u32,

    /// Pressure above which no rain is announced (hPa)
    pub rain_pressure_hpa: f32,

    /// Acceleration deviation below which the wearer is standing still (g)
    pub still_std_dev: f32,

    /// Latest acceleration magnitude that resumes walking (g)
    pub resume_accel: f32,

    /// Altitude slope beyond which terrain counts as a grade
    pub slope_threshold: f32,

    /// Luminance score below which the scene is night
    pub night_luminance: u32,

    /// Consecutive ticks a new light class must persist
    pub daylight_confirm_ticks: u32,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            tilt_pitch_deg: 60.0,
            level_pitch_deg: 30.0,
            tilt_down_roll_deg: -140.0,
            tilt_up_roll_deg: -10.0,
            shutdown_window_ticks: 600,
            rain_pressure_hpa: 800.0,
            still_std_dev: 0.1,
            resume_accel: 0.3,
            slope_threshold: 0.02,
            night_luminance: 90,
            daylight_confirm_ticks: 7,
        }
    }
}
