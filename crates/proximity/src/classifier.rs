//! Turns one detection pass into candidate warnings

use crate::config::{MotionGate, ProximityConfig, ProximityRule};
use crate::{Detection, ObjectClass};
use alerting::WarningKind;
use behavior::TrafficLightDebounce;
use tracing::debug;

/// Non-visual context for a detection pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityContext {
    /// Rolling mean rangefinder distance (cm)
    pub mean_distance_cm: i32,
    /// Wearer is walking
    pub moving: bool,
}

/// Per-class rule evaluation plus the traffic-light debounce
pub struct ProximityClassifier {
    config: ProximityConfig,
    traffic_light: TrafficLightDebounce,
}

impl ProximityClassifier {
    pub fn new(config: ProximityConfig) -> Self {
        Self {
            traffic_light: TrafficLightDebounce::new(config.traffic_hold_passes),
            config,
        }
    }

    /// Evaluate one pass over a `width` x `height` frame
    pub fn classify(
        &mut self,
        detections: &[Detection],
        width: u32,
        height: u32,
        context: ProximityContext,
    ) -> Vec<WarningKind> {
        let mut warnings = Vec::new();

        for detection in detections {
            if detection.confidence <= self.config.min_confidence {
                continue;
            }
            let Some(class) = detection.class() else {
                continue;
            };
            if class == ObjectClass::Background {
                continue;
            }

            let size = detection.apparent_size(width, height);
            let center = detection.center_x(width, height) as f32;
            let (left, right) = self.config.center_band;
            if center < left * width as f32 || center > right * width as f32 {
                continue;
            }

            let Some(rule) = self.config.rule_for(class) else {
                continue;
            };
            if !self.passes(rule, size, context) {
                continue;
            }

            let warning = match class {
                ObjectClass::RedLight => self.traffic_light.observe_red(),
                ObjectClass::GreenLight => self.traffic_light.observe_green(),
                other => warning_for(other),
            };
            if let Some(kind) = warning {
                debug!("{:?} at size {} -> {:?}", class, size, kind);
                warnings.push(kind);
            }
        }

        self.traffic_light.tick();
        warnings
    }

    fn passes(&self, rule: &ProximityRule, size: u32, context: ProximityContext) -> bool {
        if !rule.size_matches(size) {
            return false;
        }
        if rule.near_only && context.mean_distance_cm > self.config.near_distance_cm {
            return false;
        }
        match rule.motion {
            MotionGate::Any => true,
            MotionGate::Moving => context.moving,
            MotionGate::Stationary => !context.moving,
        }
    }

    pub fn traffic_light(&self) -> &TrafficLightDebounce {
        &self.traffic_light
    }
}

fn warning_for(class: ObjectClass) -> Option<WarningKind> {
    match class {
        ObjectClass::Person => Some(WarningKind::Person),
        ObjectClass::Bicycle => Some(WarningKind::Bicycle),
        ObjectClass::Car => Some(WarningKind::Car),
        ObjectClass::Motorcycle => Some(WarningKind::Motorcycle),
        ObjectClass::Bus => Some(WarningKind::Bus),
        ObjectClass::Bench => Some(WarningKind::Bench),
        ObjectClass::Chair => Some(WarningKind::Chair),
        ObjectClass::Bin => Some(WarningKind::Bin),
        ObjectClass::Background | ObjectClass::RedLight | ObjectClass::GreenLight => None,
    }
}
