//! Proximity configuration and the per-class rule table

use crate::ObjectClass;
use serde::{Deserialize, Serialize};

/// Whether a rule depends on the wearer walking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionGate {
    Any,
    Moving,
    Stationary,
}

/// Rule for one object class. Size bounds are exclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProximityRule {
    pub class: ObjectClass,
    /// Apparent size must exceed this (pixels)
    pub min_size: u32,
    /// Apparent size must stay below this (pixels)
    pub max_size: Option<u32>,
    /// Require the rangefinder mean to be within `near_distance_cm`
    pub near_only: bool,
    pub motion: MotionGate,
}

impl ProximityRule {
    const fn new(
        class: ObjectClass,
        min_size: u32,
        max_size: Option<u32>,
        near_only: bool,
        motion: MotionGate,
    ) -> Self {
        Self {
            class,
            min_size,
            max_size,
            near_only,
            motion,
        }
    }

    pub fn size_matches(&self, size: u32) -> bool {
        size > self.min_size && self.max_size.map_or(true, |max| size < max)
    }
}

/// Proximity configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProximityConfig {
    /// Detections at or below this confidence are dropped
    pub min_confidence: f32,

    /// Central band, as fractions of frame width, that box centres must hit
    pub center_band: (f32, f32),

    /// Mean rangefinder distance that counts as near (cm)
    pub near_distance_cm: i32,

    /// Detection passes a red light is remembered for
    pub traffic_hold_passes: u32,

    pub rules: Vec<ProximityRule>,
}

impl Default for ProximityConfig {
    fn default() -> Self {
        use MotionGate::*;
        use ObjectClass::*;

        Self {
            min_confidence: 0.3,
            center_band: (0.3, 0.7),
            near_distance_cm: 500,
            traffic_hold_passes: 30,
            rules: vec![
                ProximityRule::new(Person, 500, None, true, Any),
                ProximityRule::new(Bicycle, 400, None, false, Any),
                ProximityRule::new(Car, 600, None, true, Moving),
                ProximityRule::new(Motorcycle, 550, None, false, Moving),
                ProximityRule::new(Bus, 700, None, true, Moving),
                ProximityRule::new(Bench, 350, Some(600), false, Any),
                ProximityRule::new(Chair, 300, Some(500), false, Any),
                ProximityRule::new(Bin, 300, Some(600), false, Any),
                ProximityRule::new(RedLight, 100, Some(300), false, Stationary),
                ProximityRule::new(GreenLight, 100, Some(300), false, Stationary),
            ],
        }
    }
}

impl ProximityConfig {
    pub fn rule_for(&self, class: ObjectClass) -> Option<&ProximityRule> {
        self.rules.iter().find(|rule| rule.class == class)
    }
}
