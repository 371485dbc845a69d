//! Head-tilt gestures and the shutdown confirmation timer

use crate::BehaviorConfig;
use sensor_adapter::Orientation;
use tracing::{debug, info};

/// Recognized head tilts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Pitch far positive: time/weather advisory
    TiltRight,
    /// Pitch far negative: standby toggle
    TiltLeft,
    /// Rolled forward while level: falling alert
    TiltDown,
    /// Rolled back while level: shutdown request
    TiltUp,
}

/// One-shot gesture recognizer.
///
/// A gesture fires once per excursion out of the neutral band; the
/// recognizer re-arms only after the orientation returns to neutral.
pub struct GestureRecognizer {
    config: BehaviorConfig,
    armed: bool,
}

impl GestureRecognizer {
    pub fn new(config: &BehaviorConfig) -> Self {
        Self {
            config: config.clone(),
            armed: false,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Feed one orientation reading
    pub fn evaluate(&mut self, orientation: Orientation, standby: bool) -> Option<Gesture> {
        match self.band(orientation, standby) {
            None => {
                self.armed = true;
                None
            }
            Some(gesture) if self.armed => {
                self.armed = false;
                debug!("Gesture {:?} at {:?}", gesture, orientation);
                Some(gesture)
            }
            Some(_) => None,
        }
    }

    /// Bands are checked in a fixed order and never overlap
    fn band(&self, o: Orientation, standby: bool) -> Option<Gesture> {
        let cfg = &self.config;
        let level = o.pitch.abs() < cfg.level_pitch_deg;

        if o.pitch > cfg.tilt_pitch_deg && !standby {
            Some(Gesture::TiltRight)
        } else if o.pitch < -cfg.tilt_pitch_deg {
            Some(Gesture::TiltLeft)
        } else if !standby && level && o.roll < cfg.tilt_down_roll_deg {
            Some(Gesture::TiltDown)
        } else if !standby && level && o.roll > cfg.tilt_up_roll_deg {
            Some(Gesture::TiltUp)
        } else {
            None
        }
    }
}

/// Result of a tilt-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownPress {
    /// First press: confirmation window opened
    Armed,
    /// Second press inside the window
    Confirmed,
}

/// Two-press shutdown confirmation
pub struct ShutdownTimer {
    window: u32,
    remaining: Option<u32>,
}

impl ShutdownTimer {
    pub fn new(window_ticks: u32) -> Self {
        Self {
            window: window_ticks,
            remaining: None,
        }
    }

    pub fn press(&mut self) -> ShutdownPress {
        match self.remaining {
            None => {
                info!("Shutdown requested; waiting {} ticks for confirmation", self.window);
                self.remaining = Some(self.window);
                ShutdownPress::Armed
            }
            Some(_) => {
                info!("Shutdown confirmed");
                ShutdownPress::Confirmed
            }
        }
    }

    /// Count down one tick; the window closes at zero
    pub fn tick(&mut self) {
        if let Some(remaining) = self.remaining {
            if remaining <= 1 {
                info!("Shutdown confirmation window expired");
                self.remaining = None;
            } else {
                self.remaining = Some(remaining - 1);
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.remaining.is_some()
    }
}
